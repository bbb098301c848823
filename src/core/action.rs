//! Player actions.
//!
//! A `PlayerAction` is one external input to the turn controller. Some
//! actions only make sense while a tool effect is active (`Increment`,
//! `MoveDice`, `ChooseFromTrack`...); the controller's transition table
//! decides which are legal at any moment.
//!
//! `ActionKind` is the payload-free discriminant, used as the column key of
//! the transition table and in rejection messages.

use serde::{Deserialize, Serialize};

use super::dice::Dice;
use super::player::PlayerId;
use crate::cards::ToolCardId;
use crate::grid::Position;

/// One external input to the turn controller.
///
/// ```
/// use rust_dicedraft::core::{ActionKind, Dice, DiceColor, PlayerAction};
///
/// let draft = PlayerAction::Draft { dice: Dice::new(DiceColor::Red, 3) };
/// assert_eq!(draft.kind(), ActionKind::Draft);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Take a die out of the draft pool.
    Draft { dice: Dice },

    /// Put the held die on the grid.
    Place { at: Position },

    /// Pay for and activate a tool card.
    UseToolCard { card: ToolCardId },

    /// Finish the turn. A held die goes back to the pool.
    EndTurn,

    // === Effect operations ===
    Increment,
    Decrement,
    MoveDice { from: Position, to: Position },
    ChooseFromTrack { slot: usize, index: usize },
    ChooseValue { value: u8 },

    /// Stop a multi-step effect early.
    EndEffect,
}

impl PlayerAction {
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Draft { .. } => ActionKind::Draft,
            PlayerAction::Place { .. } => ActionKind::Place,
            PlayerAction::UseToolCard { .. } => ActionKind::UseToolCard,
            PlayerAction::EndTurn => ActionKind::EndTurn,
            PlayerAction::Increment => ActionKind::Increment,
            PlayerAction::Decrement => ActionKind::Decrement,
            PlayerAction::MoveDice { .. } => ActionKind::MoveDice,
            PlayerAction::ChooseFromTrack { .. } => ActionKind::ChooseFromTrack,
            PlayerAction::ChooseValue { .. } => ActionKind::ChooseValue,
            PlayerAction::EndEffect => ActionKind::EndEffect,
        }
    }
}

/// Payload-free action discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Draft,
    Place,
    UseToolCard,
    EndTurn,
    Increment,
    Decrement,
    MoveDice,
    ChooseFromTrack,
    ChooseValue,
    EndEffect,
}

impl ActionKind {
    /// Every kind, in table column order.
    pub const ALL: [ActionKind; 10] = [
        ActionKind::Draft,
        ActionKind::Place,
        ActionKind::UseToolCard,
        ActionKind::EndTurn,
        ActionKind::Increment,
        ActionKind::Decrement,
        ActionKind::MoveDice,
        ActionKind::ChooseFromTrack,
        ActionKind::ChooseValue,
        ActionKind::EndEffect,
    ];

    /// Kinds that only an active tool effect can consume.
    #[must_use]
    pub const fn is_effect_operation(self) -> bool {
        matches!(
            self,
            ActionKind::Increment
                | ActionKind::Decrement
                | ActionKind::MoveDice
                | ActionKind::ChooseFromTrack
                | ActionKind::ChooseValue
                | ActionKind::EndEffect
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Draft => "draft",
            ActionKind::Place => "place",
            ActionKind::UseToolCard => "use tool card",
            ActionKind::EndTurn => "end turn",
            ActionKind::Increment => "increment",
            ActionKind::Decrement => "decrement",
            ActionKind::MoveDice => "move dice",
            ActionKind::ChooseFromTrack => "choose from track",
            ActionKind::ChooseValue => "choose value",
            ActionKind::EndEffect => "end effect",
        };
        f.write_str(name)
    }
}

/// An accepted action with the point in the game where it happened.
///
/// Used for replay and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: PlayerAction,
    pub round: usize,
    pub turn: usize,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: PlayerAction, round: usize, turn: usize) -> Self {
        Self {
            player,
            action,
            round,
            turn,
        }
    }
}
