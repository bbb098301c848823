//! Grid coordinates and cells.

use serde::{Deserialize, Serialize};

use crate::core::{Dice, DiceColor};

/// A (row, col) coordinate. Not tied to any particular grid; bounds are
/// checked by whoever looks it up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Orthogonal neighbors that do not underflow. Upper bounds are the
    /// grid's business.
    pub fn orthogonal(self) -> impl Iterator<Item = Position> {
        let Position { row, col } = self;
        [
            row.checked_sub(1).map(|r| Position::new(r, col)),
            Some(Position::new(row + 1, col)),
            col.checked_sub(1).map(|c| Position::new(row, c)),
            Some(Position::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Printed restriction on a cell. Both parts are optional; a cell with
/// neither accepts any die.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    pub value: Option<u8>,
    pub color: Option<DiceColor>,
}

impl Constraint {
    /// No restriction.
    pub const NONE: Constraint = Constraint {
        value: None,
        color: None,
    };

    #[must_use]
    pub const fn value(value: u8) -> Self {
        Self {
            value: Some(value),
            color: None,
        }
    }

    #[must_use]
    pub const fn color(color: DiceColor) -> Self {
        Self {
            value: None,
            color: Some(color),
        }
    }

    #[must_use]
    pub fn allows_color(&self, dice: Dice) -> bool {
        self.color.map_or(true, |c| c == dice.color())
    }

    #[must_use]
    pub fn allows_value(&self, dice: Dice) -> bool {
        self.value.map_or(true, |v| v == dice.value())
    }
}

/// One square of a grid: a fixed constraint and at most one die.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    constraint: Constraint,
    dice: Option<Dice>,
}

impl Cell {
    #[must_use]
    pub const fn new(constraint: Constraint) -> Self {
        Self {
            constraint,
            dice: None,
        }
    }

    #[must_use]
    pub const fn constraint(&self) -> Constraint {
        self.constraint
    }

    #[must_use]
    pub const fn dice(&self) -> Option<Dice> {
        self.dice
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.dice.is_none()
    }

    pub(crate) fn set_dice(&mut self, dice: Dice) {
        self.dice = Some(dice);
    }

    pub(crate) fn take_dice(&mut self) -> Option<Dice> {
        self.dice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orthogonal_at_origin() {
        let neighbors: Vec<_> = Position::new(0, 0).orthogonal().collect();
        assert_eq!(neighbors, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn test_orthogonal_interior() {
        assert_eq!(Position::new(2, 2).orthogonal().count(), 4);
    }

    #[test]
    fn test_constraint_checks() {
        let red = Dice::new(DiceColor::Red, 3);

        assert!(Constraint::NONE.allows_color(red));
        assert!(Constraint::NONE.allows_value(red));
        assert!(Constraint::color(DiceColor::Red).allows_color(red));
        assert!(!Constraint::color(DiceColor::Blue).allows_color(red));
        assert!(Constraint::value(3).allows_value(red));
        assert!(!Constraint::value(4).allows_value(red));
        // A value constraint says nothing about color.
        assert!(Constraint::value(4).allows_color(red));
    }

    #[test]
    fn test_cell_take() {
        let mut cell = Cell::new(Constraint::NONE);
        assert!(cell.is_empty());
        cell.set_dice(Dice::new(DiceColor::Green, 1));
        assert_eq!(cell.take_dice().map(Dice::value), Some(1));
        assert!(cell.is_empty());
    }
}
