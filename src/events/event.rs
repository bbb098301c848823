//! State-change notifications.
//!
//! One event per observable change, emitted after the mutation succeeded.
//! Payloads are minimal and never alias engine state: collections travel as
//! `im::Vector` snapshots.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::ToolCardId;
use crate::core::{Dice, PlayerId};
use crate::grid::Position;
use crate::scoring::Ranking;

/// Something that happened in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerJoined {
        player: PlayerId,
        name: String,
    },

    RoundStarted {
        round: usize,
        first_player: PlayerId,
    },

    TurnAdvanced {
        round: usize,
        turn: usize,
        player: PlayerId,
    },

    DiceDrafted {
        player: PlayerId,
        dice: Dice,
    },

    /// The die a player holds changed without a draft (tool effects).
    HeldDiceChanged {
        player: PlayerId,
        dice: Option<Dice>,
    },

    GridCellUpdated {
        player: PlayerId,
        at: Position,
        dice: Option<Dice>,
    },

    ToolCardUsed {
        player: PlayerId,
        card: ToolCardId,
        tokens_left: u32,
    },

    /// A tool effect failed and was undone; the card is available again.
    ToolCardRefunded {
        player: PlayerId,
        card: ToolCardId,
        tokens_left: u32,
    },

    DraftPoolChanged {
        pool: Vector<Dice>,
    },

    TrackChanged {
        track: Vector<Vector<Dice>>,
    },

    RankingsFinalized {
        rankings: Vec<Ranking>,
    },
}

impl GameEvent {
    /// The player an event concerns, if it concerns one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::PlayerJoined { player, .. }
            | GameEvent::TurnAdvanced { player, .. }
            | GameEvent::DiceDrafted { player, .. }
            | GameEvent::HeldDiceChanged { player, .. }
            | GameEvent::GridCellUpdated { player, .. }
            | GameEvent::ToolCardUsed { player, .. }
            | GameEvent::ToolCardRefunded { player, .. } => Some(*player),
            GameEvent::RoundStarted { first_player, .. } => Some(*first_player),
            GameEvent::DraftPoolChanged { .. }
            | GameEvent::TrackChanged { .. }
            | GameEvent::RankingsFinalized { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceColor;

    #[test]
    fn test_event_player() {
        let drafted = GameEvent::DiceDrafted {
            player: PlayerId(1),
            dice: Dice::new(DiceColor::Red, 2),
        };
        assert_eq!(drafted.player(), Some(PlayerId(1)));
        assert_eq!(GameEvent::DraftPoolChanged { pool: Vector::new() }.player(), None);
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::GridCellUpdated {
            player: PlayerId(0),
            at: Position::new(1, 2),
            dice: Some(Dice::new(DiceColor::Yellow, 5)),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
