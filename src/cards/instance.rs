//! Cards in play: definitions bound to their behavior.
//!
//! A `ToolCard` carries the only mutable card state in the game, its
//! single-use flag. Objective cards are immutable once dealt.

use serde::{Deserialize, Serialize};

use super::definition::{ObjectiveCardId, ToolCardId};
use crate::core::DiceColor;
use crate::effects::ToolEffect;
use crate::grid::Grid;
use crate::scoring::{private_score, GridScorer, PublicObjective};

/// A tool card on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCard {
    pub id: ToolCardId,
    pub name: String,
    pub cost: u32,
    pub effect: ToolEffect,
    used: bool,
}

impl ToolCard {
    #[must_use]
    pub fn new(id: ToolCardId, name: impl Into<String>, cost: u32, effect: ToolEffect) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            effect,
            used: false,
        }
    }

    /// Each tool card works once per game.
    #[must_use]
    pub fn is_used(&self) -> bool {
        self.used
    }

    pub(crate) fn mark_used(&mut self) {
        self.used = true;
    }

    pub(crate) fn unmark_used(&mut self) {
        self.used = false;
    }
}

/// A public objective, scored for every player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicObjectiveCard {
    pub id: ObjectiveCardId,
    pub name: String,
    pub points: u32,
    pub scorer: PublicObjective,
}

impl PublicObjectiveCard {
    #[must_use]
    pub fn new(
        id: ObjectiveCardId,
        name: impl Into<String>,
        points: u32,
        scorer: PublicObjective,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            points,
            scorer,
        }
    }

    /// Points this card awards for `grid`.
    #[must_use]
    pub fn score(&self, grid: &Grid) -> u32 {
        self.scorer.count(grid) * self.points
    }
}

/// A private objective: the owner scores the faces of one color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrivateObjectiveCard {
    pub color: DiceColor,
}

impl PrivateObjectiveCard {
    #[must_use]
    pub const fn new(color: DiceColor) -> Self {
        Self { color }
    }

    #[must_use]
    pub fn score(&self, grid: &Grid) -> u32 {
        private_score(grid, self.color)
    }
}
