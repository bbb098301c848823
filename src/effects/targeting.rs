//! What input a tool effect waits for.

use serde::{Deserialize, Serialize};

use crate::core::ActionKind;

/// The interaction an effect expects after activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputShape {
    /// Finishes on activation.
    None,
    /// `Increment` or `Decrement`.
    ValueDelta,
    /// `MoveDice { from, to }`.
    CellPair,
    /// `ChooseFromTrack { slot, index }`.
    TrackChoice,
    /// `ChooseValue { value }`.
    FaceValue,
    /// `Place { at }`.
    Placement,
}

impl InputShape {
    /// Whether an operation of `kind` feeds an effect of this shape.
    /// `EndEffect` is accepted by every interactive shape.
    #[must_use]
    pub fn accepts(self, kind: ActionKind) -> bool {
        match self {
            InputShape::None => false,
            InputShape::ValueDelta => {
                matches!(kind, ActionKind::Increment | ActionKind::Decrement | ActionKind::EndEffect)
            }
            InputShape::CellPair => matches!(kind, ActionKind::MoveDice | ActionKind::EndEffect),
            InputShape::TrackChoice => {
                matches!(kind, ActionKind::ChooseFromTrack | ActionKind::EndEffect)
            }
            InputShape::FaceValue => matches!(kind, ActionKind::ChooseValue | ActionKind::EndEffect),
            InputShape::Placement => matches!(kind, ActionKind::Place | ActionKind::EndEffect),
        }
    }

    /// Every action kind this shape accepts.
    pub fn accepted(self) -> impl Iterator<Item = ActionKind> {
        ActionKind::ALL.into_iter().filter(move |k| self.accepts(*k))
    }
}
