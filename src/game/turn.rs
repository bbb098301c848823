//! One player's turn.

use serde::{Deserialize, Serialize};

use super::controller::{self, ControllerState, TurnContext};
use crate::cards::ToolCardId;
use crate::core::{Dice, PlayerAction, PlayerId, Rejection};

/// A turn: whose it is, what they hold, and where the controller stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub(crate) player: PlayerId,
    pub(crate) held: Option<Dice>,
    pub(crate) tool_used: Option<ToolCardId>,
    pub(crate) state: ControllerState,
}

impl Turn {
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            held: None,
            tool_used: None,
            state: ControllerState::Start,
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// The drafted die not yet placed.
    #[must_use]
    pub fn held(&self) -> Option<Dice> {
        self.held
    }

    #[must_use]
    pub fn tool_used(&self) -> Option<ToolCardId> {
        self.tool_used
    }

    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state == ControllerState::End
    }

    /// Feed one action through the controller.
    pub fn apply(&mut self, ctx: &mut TurnContext<'_>, action: &PlayerAction) -> Result<(), Rejection> {
        controller::dispatch(self, ctx, action)
    }

    /// End the turn from whatever state it is in, aborting a running
    /// effect. Returns the held die, if any, for the caller to put back.
    pub(crate) fn abort(&mut self) -> Option<Dice> {
        self.state = ControllerState::End;
        self.held.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceColor;

    #[test]
    fn test_new_turn() {
        let turn = Turn::new(PlayerId(2));
        assert_eq!(turn.player(), PlayerId(2));
        assert_eq!(turn.held(), None);
        assert_eq!(turn.state(), &ControllerState::Start);
        assert!(!turn.is_over());
    }

    #[test]
    fn test_abort_hands_back_held_dice() {
        let mut turn = Turn::new(PlayerId(0));
        turn.held = Some(Dice::new(DiceColor::Purple, 3));
        turn.state = ControllerState::Place;

        assert_eq!(turn.abort(), Some(Dice::new(DiceColor::Purple, 3)));
        assert!(turn.is_over());
        assert_eq!(turn.held(), None);
    }
}
