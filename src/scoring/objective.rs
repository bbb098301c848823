//! Public objective scorers.
//!
//! Every scorer walks a finished grid and returns a count; the objective
//! card multiplies that count by its points. All scorers are pure.
//!
//! ## Counting sets
//!
//! Set objectives extract one property (color or face) from every occupied
//! cell in row-major order. Each extracted value that belongs to the target
//! collection goes into the first set that does not contain it yet; if every
//! set already contains it, a new set is opened. The count is the number of
//! sets exactly equal to the target collection.
//!
//! ```
//! use rust_dicedraft::core::{Dice, DiceColor};
//! use rust_dicedraft::grid::{Grid, Position};
//! use rust_dicedraft::scoring::{DiceProperty, GridScorer, PropertyValue, PublicObjective};
//!
//! let mut grid = Grid::blank(1, 2);
//! grid.put(Position::new(0, 0), Dice::new(DiceColor::Red, 1));
//! grid.put(Position::new(0, 1), Dice::new(DiceColor::Blue, 2));
//!
//! let pair = PublicObjective::set(
//!     DiceProperty::Color,
//!     [PropertyValue::Color(DiceColor::Red), PropertyValue::Color(DiceColor::Blue)],
//! );
//! assert_eq!(pair.count(&grid), 1);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Dice, DiceColor};
use crate::grid::{Grid, Position};

/// Scan contract shared by every objective.
pub trait GridScorer {
    /// How many times the objective is satisfied on `grid`.
    fn count(&self, grid: &Grid) -> u32;
}

/// Which property of a die an objective looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceProperty {
    Color,
    Value,
}

impl DiceProperty {
    #[must_use]
    pub fn of(self, dice: Dice) -> PropertyValue {
        match self {
            DiceProperty::Color => PropertyValue::Color(dice.color()),
            DiceProperty::Value => PropertyValue::Value(dice.value()),
        }
    }
}

/// An extracted property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyValue {
    Color(DiceColor),
    Value(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    Row,
    Column,
}

/// A public objective's scoring function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicObjective {
    /// Complete sets of the target values.
    Set {
        property: DiceProperty,
        targets: SmallVec<[PropertyValue; 6]>,
    },

    /// Full lines with no repeated property.
    LineVariety { line: LineKind, property: DiceProperty },

    /// Dice diagonally adjacent to at least one die of the same color.
    ColorDiagonals,

    /// Lines holding at least `min_dice` dice.
    LineThreshold { line: LineKind, min_dice: usize },
}

impl PublicObjective {
    pub fn set(property: DiceProperty, targets: impl IntoIterator<Item = PropertyValue>) -> Self {
        PublicObjective::Set {
            property,
            targets: targets.into_iter().collect(),
        }
    }
}

impl GridScorer for PublicObjective {
    fn count(&self, grid: &Grid) -> u32 {
        match self {
            PublicObjective::Set { property, targets } => complete_sets(grid, *property, targets),
            PublicObjective::LineVariety { line, property } => {
                varied_lines(grid, *line, *property)
            }
            PublicObjective::ColorDiagonals => color_diagonals(grid),
            PublicObjective::LineThreshold { line, min_dice } => {
                lines(grid, *line)
                    .filter(|cells| cells.iter().flatten().count() >= *min_dice)
                    .count() as u32
            }
        }
    }
}

/// Greedy set building over the row-major scan.
#[must_use]
pub fn complete_sets(grid: &Grid, property: DiceProperty, targets: &[PropertyValue]) -> u32 {
    let target: FxHashSet<PropertyValue> = targets.iter().copied().collect();
    let mut sets: Vec<FxHashSet<PropertyValue>> = Vec::new();

    for (_, dice) in grid.occupied() {
        let value = property.of(dice);
        if !target.contains(&value) {
            continue;
        }

        match sets.iter_mut().find(|s| !s.contains(&value)) {
            Some(set) => {
                set.insert(value);
            }
            None => {
                let mut set = FxHashSet::default();
                set.insert(value);
                sets.push(set);
            }
        }
    }

    sets.iter().filter(|s| **s == target).count() as u32
}

fn lines(grid: &Grid, kind: LineKind) -> impl Iterator<Item = Vec<Option<Dice>>> + '_ {
    let count = match kind {
        LineKind::Row => grid.rows(),
        LineKind::Column => grid.cols(),
    };
    (0..count).map(move |i| match kind {
        LineKind::Row => grid.row(i).collect(),
        LineKind::Column => grid.column(i).collect(),
    })
}

fn varied_lines(grid: &Grid, kind: LineKind, property: DiceProperty) -> u32 {
    lines(grid, kind)
        .filter(|cells| {
            let mut seen = FxHashSet::default();
            cells
                .iter()
                .all(|cell| cell.map_or(false, |d| seen.insert(property.of(d))))
        })
        .count() as u32
}

fn color_diagonals(grid: &Grid) -> u32 {
    grid.occupied()
        .filter(|&(pos, dice)| {
            diagonal_neighbors(pos)
                .filter_map(|p| grid.dice_at(p))
                .any(|n| n.color() == dice.color())
        })
        .count() as u32
}

fn diagonal_neighbors(pos: Position) -> impl Iterator<Item = Position> {
    let up = pos.row.checked_sub(1);
    let left = pos.col.checked_sub(1);
    let down = Some(pos.row + 1);
    let right = Some(pos.col + 1);

    [(up, left), (up, right), (down, left), (down, right)]
        .into_iter()
        .filter_map(|(r, c)| Some(Position::new(r?, c?)))
}
