//! Placement rules.
//!
//! Every rule answers one question: may `dice` go on `grid` at `at`? A
//! [`RuleChain`] is an explicit list of rules that must all agree. The base
//! rule is always part of a chain; the decorators can be left out when a
//! tool effect relaxes placement for a single move.
//!
//! ## Rules
//!
//! - `Base`: the cell exists and is empty. Until the grid's first placement
//!   the cell must also be on the border.
//! - `ColorMatch` / `ValueMatch`: the cell's printed constraint, if any.
//! - `AdjacentColor` / `AdjacentValue`: no orthogonal neighbor shares the
//!   die's color / value. Vacuous when the cell has no occupied neighbors.
//!
//! All checks are pure. The chain accepts exactly when every rule accepts,
//! so acceptance does not depend on rule order; only which violation is
//! reported first does.
//!
//! ```
//! use rust_dicedraft::core::{Dice, DiceColor};
//! use rust_dicedraft::grid::{Grid, Position};
//! use rust_dicedraft::rules::{RuleChain, Violation};
//!
//! let grid = Grid::blank(4, 5);
//! let chain = RuleChain::standard();
//! let red = Dice::new(DiceColor::Red, 3);
//!
//! assert!(chain.is_allowed(&grid, red, Position::new(0, 2)));
//! assert_eq!(chain.check(&grid, red, Position::new(1, 1)), Err(Violation::NotOnBorder));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::Dice;
use crate::grid::{Grid, Position};

/// The constraint class a rejected placement broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum Violation {
    #[error("cell is outside the grid")]
    OutOfBounds,
    #[error("cell is already occupied")]
    CellOccupied,
    #[error("first dice must go on the border")]
    NotOnBorder,
    #[error("dice color does not match the cell")]
    ColorMismatch,
    #[error("dice value does not match the cell")]
    ValueMismatch,
    #[error("an adjacent dice has the same color")]
    SameColorNeighbor,
    #[error("an adjacent dice has the same value")]
    SameValueNeighbor,
}

/// Shared capability of a single rule and of a whole chain.
pub trait PlacementPredicate {
    /// The first constraint `dice` would break at `at`, if any.
    fn violation(&self, grid: &Grid, dice: Dice, at: Position) -> Option<Violation>;

    /// Convenience: no violation.
    fn allows(&self, grid: &Grid, dice: Dice, at: Position) -> bool {
        self.violation(grid, dice, at).is_none()
    }
}

/// One placement rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementRule {
    Base,
    ColorMatch,
    ValueMatch,
    AdjacentColor,
    AdjacentValue,
}

impl PlacementRule {
    /// Decorators in the order the standard chain applies them.
    pub const DECORATORS: [PlacementRule; 4] = [
        PlacementRule::ColorMatch,
        PlacementRule::ValueMatch,
        PlacementRule::AdjacentColor,
        PlacementRule::AdjacentValue,
    ];
}

impl PlacementPredicate for PlacementRule {
    fn violation(&self, grid: &Grid, dice: Dice, at: Position) -> Option<Violation> {
        let Some(cell) = grid.cell(at) else {
            return Some(Violation::OutOfBounds);
        };

        match self {
            PlacementRule::Base => {
                if !cell.is_empty() {
                    Some(Violation::CellOccupied)
                } else if !grid.has_first_placement() && !grid.is_border(at) {
                    Some(Violation::NotOnBorder)
                } else {
                    None
                }
            }
            PlacementRule::ColorMatch => {
                (!cell.constraint().allows_color(dice)).then_some(Violation::ColorMismatch)
            }
            PlacementRule::ValueMatch => {
                (!cell.constraint().allows_value(dice)).then_some(Violation::ValueMismatch)
            }
            PlacementRule::AdjacentColor => grid
                .neighbor_dice(at)
                .any(|n| n.color() == dice.color())
                .then_some(Violation::SameColorNeighbor),
            PlacementRule::AdjacentValue => grid
                .neighbor_dice(at)
                .any(|n| n.value() == dice.value())
                .then_some(Violation::SameValueNeighbor),
        }
    }
}

/// An ordered list of rules that must all accept.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleChain {
    rules: SmallVec<[PlacementRule; 5]>,
}

impl RuleChain {
    /// Only the base rule.
    #[must_use]
    pub fn base() -> Self {
        let mut rules = SmallVec::new();
        rules.push(PlacementRule::Base);
        Self { rules }
    }

    /// Base rule plus every decorator. Used outside rule-relaxing effects.
    #[must_use]
    pub fn standard() -> Self {
        PlacementRule::DECORATORS
            .iter()
            .fold(Self::base(), |chain, &rule| chain.with(rule))
    }

    /// Append a decorator. Adding a rule already present is a no-op.
    #[must_use]
    pub fn with(mut self, rule: PlacementRule) -> Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    /// A reduced copy with the given decorators left out. The base rule
    /// cannot be omitted; `self` is unchanged.
    #[must_use]
    pub fn without(&self, omit: &[PlacementRule]) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .copied()
                .filter(|r| *r == PlacementRule::Base || !omit.contains(r))
                .collect(),
        }
    }

    #[must_use]
    pub fn rules(&self) -> &[PlacementRule] {
        &self.rules
    }

    #[must_use]
    pub fn contains(&self, rule: PlacementRule) -> bool {
        self.rules.contains(&rule)
    }

    /// `Ok` if every rule accepts, otherwise the first violation in chain
    /// order.
    pub fn check(&self, grid: &Grid, dice: Dice, at: Position) -> Result<(), Violation> {
        match self.violation(grid, dice, at) {
            Some(v) => Err(v),
            None => Ok(()),
        }
    }

    /// Pure and total: out-of-range coordinates are simply not allowed.
    #[must_use]
    pub fn is_allowed(&self, grid: &Grid, dice: Dice, at: Position) -> bool {
        self.allows(grid, dice, at)
    }
}

impl Default for RuleChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl PlacementPredicate for RuleChain {
    fn violation(&self, grid: &Grid, dice: Dice, at: Position) -> Option<Violation> {
        self.rules.iter().find_map(|r| r.violation(grid, dice, at))
    }
}
