//! Tool effect definitions.
//!
//! Effects are data. Each tool card is bound to one `ToolEffect`; the
//! [`EffectResolver`](super::EffectResolver) gives the variants their
//! behavior.
//!
//! ## Immediate effects
//!
//! `RerollDrafted`, `RerollPool` and `FlipDrafted` finish on activation.
//!
//! ## Interactive effects
//!
//! The others wait for one or more player operations. Which operations
//! they accept is their [`InputShape`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::targeting::InputShape;
use crate::rules::PlacementRule;

/// What a tool card does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolEffect {
    /// Raise or lower the held die by one. No wraparound.
    AdjustValue,

    /// Move dice already on the grid. Each move is checked against the
    /// standing chain minus `omit`. `EndEffect` stops early.
    MoveDice {
        omit: SmallVec<[PlacementRule; 4]>,
        moves: u8,
    },

    /// Exchange the held die with one on the track.
    SwapWithTrack,

    /// Re-roll the held die.
    RerollDrafted,

    /// Re-roll every die in the pool. Only before drafting.
    RerollPool,

    /// Turn the held die to its opposite face.
    FlipDrafted,

    /// Return the held die to the bag, draw a replacement, then choose its
    /// face.
    RedrawFromBag,

    /// Place the held die with some decorators lifted, this placement only.
    RelaxedPlacement { omit: SmallVec<[PlacementRule; 4]> },
}

impl ToolEffect {
    /// Move dice while ignoring one or more decorators.
    pub fn move_dice(omit: impl IntoIterator<Item = PlacementRule>, moves: u8) -> Self {
        ToolEffect::MoveDice {
            omit: omit.into_iter().collect(),
            moves,
        }
    }

    pub fn relaxed_placement(omit: impl IntoIterator<Item = PlacementRule>) -> Self {
        ToolEffect::RelaxedPlacement {
            omit: omit.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn input_shape(&self) -> InputShape {
        match self {
            ToolEffect::AdjustValue => InputShape::ValueDelta,
            ToolEffect::MoveDice { .. } => InputShape::CellPair,
            ToolEffect::SwapWithTrack => InputShape::TrackChoice,
            ToolEffect::RedrawFromBag => InputShape::FaceValue,
            ToolEffect::RelaxedPlacement { .. } => InputShape::Placement,
            ToolEffect::RerollDrafted | ToolEffect::RerollPool | ToolEffect::FlipDrafted => {
                InputShape::None
            }
        }
    }

    /// True if the effect needs a drafted die to act on.
    #[must_use]
    pub fn needs_held_dice(&self) -> bool {
        !matches!(self, ToolEffect::MoveDice { .. } | ToolEffect::RerollPool)
    }
}
