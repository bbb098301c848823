//! Player grids and the templates they are built from.
//!
//! ## GridTemplate
//!
//! Plain data: title, dimensions, difficulty and a sparse list of cell
//! constraints. Templates are what a loader deserializes; turning one into
//! a playable [`Grid`] validates it.
//!
//! ## Grid
//!
//! Row-major cells plus one piece of history: whether any die has ever been
//! placed. The border rule only applies until the first placement, and a
//! tool effect that later empties the grid does not bring it back.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Constraint, Position};
use crate::core::{ContractViolation, Dice, DiceColor, MAX_FACE, MIN_FACE};

/// One printed constraint of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintEntry {
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub value: Option<u8>,
    #[serde(default)]
    pub color: Option<DiceColor>,
}

/// Grid definition as supplied by the collaborator that loads templates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTemplate {
    pub title: String,
    pub rows: usize,
    pub cols: usize,
    /// Starting tokens for the player who picks this grid.
    pub difficulty: u32,
    #[serde(default)]
    pub constraints: Vec<ConstraintEntry>,
}

impl GridTemplate {
    /// Template with no constraints.
    pub fn new(title: impl Into<String>, rows: usize, cols: usize, difficulty: u32) -> Self {
        Self {
            title: title.into(),
            rows,
            cols,
            difficulty,
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, row: usize, col: usize, constraint: Constraint) -> Self {
        self.constraints.push(ConstraintEntry {
            row,
            col,
            value: constraint.value,
            color: constraint.color,
        });
        self
    }
}

/// A player's placement grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    title: String,
    rows: usize,
    cols: usize,
    difficulty: u32,
    cells: Vec<Cell>,
    first_placement_made: bool,
}

impl Grid {
    /// Materialize a template.
    ///
    /// Fails on zero dimensions, constraints outside the grid, faces outside
    /// `1..=6`, or two entries for the same cell.
    pub fn from_template(template: &GridTemplate) -> Result<Self, ContractViolation> {
        let malformed = |reason: String| ContractViolation::MalformedTemplate {
            title: template.title.clone(),
            reason,
        };

        if template.rows == 0 || template.cols == 0 {
            return Err(malformed(format!(
                "dimensions {}x{} must be positive",
                template.rows, template.cols
            )));
        }

        let mut cells = vec![Cell::default(); template.rows * template.cols];
        let mut seen = vec![false; cells.len()];

        for entry in &template.constraints {
            if entry.row >= template.rows || entry.col >= template.cols {
                return Err(malformed(format!(
                    "constraint at ({}, {}) is outside the grid",
                    entry.row, entry.col
                )));
            }
            if let Some(v) = entry.value {
                if !(MIN_FACE..=MAX_FACE).contains(&v) {
                    return Err(malformed(format!(
                        "constraint value {v} at ({}, {}) is not a face",
                        entry.row, entry.col
                    )));
                }
            }

            let idx = entry.row * template.cols + entry.col;
            if std::mem::replace(&mut seen[idx], true) {
                return Err(malformed(format!(
                    "duplicate constraint at ({}, {})",
                    entry.row, entry.col
                )));
            }
            cells[idx] = Cell::new(Constraint {
                value: entry.value,
                color: entry.color,
            });
        }

        Ok(Self {
            title: template.title.clone(),
            rows: template.rows,
            cols: template.cols,
            difficulty: template.difficulty,
            cells,
            first_placement_made: false,
        })
    }

    /// Unconstrained grid, mostly useful for tests and scoring examples.
    #[must_use]
    pub fn blank(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "Grid must have at least one cell");
        Self {
            title: String::new(),
            rows,
            cols,
            difficulty: 0,
            cells: vec![Cell::default(); rows * cols],
            first_placement_made: false,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// True for cells on the outer edge.
    #[must_use]
    pub fn is_border(&self, pos: Position) -> bool {
        self.in_bounds(pos)
            && (pos.row == 0 || pos.col == 0 || pos.row == self.rows - 1 || pos.col == self.cols - 1)
    }

    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    #[must_use]
    pub fn dice_at(&self, pos: Position) -> Option<Dice> {
        self.cell(pos).and_then(Cell::dice)
    }

    /// Whether any die has ever been placed on this grid.
    #[must_use]
    pub fn has_first_placement(&self) -> bool {
        self.first_placement_made
    }

    /// In-bounds orthogonal neighbors of `pos`.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.orthogonal().filter(move |p| self.in_bounds(*p))
    }

    /// Dice on the orthogonal neighbors of `pos`.
    pub fn neighbor_dice(&self, pos: Position) -> impl Iterator<Item = Dice> + '_ {
        self.neighbors(pos).filter_map(move |p| self.dice_at(p))
    }

    /// Put a die on an empty cell without consulting any placement rule.
    ///
    /// Returns `false` (and changes nothing) if `pos` is outside the grid or
    /// already occupied. Rule checking is the caller's job.
    pub fn put(&mut self, pos: Position, dice: Dice) -> bool {
        match self.index(pos) {
            Some(i) if self.cells[i].is_empty() => {
                self.cells[i].set_dice(dice);
                self.first_placement_made = true;
                true
            }
            _ => false,
        }
    }

    /// Lift a die off the grid. The first-placement flag stays set.
    pub fn take(&mut self, pos: Position) -> Option<Dice> {
        self.index(pos).and_then(|i| self.cells[i].take_dice())
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Dice)> + '_ {
        self.positions()
            .filter_map(move |p| self.dice_at(p).map(|d| (p, d)))
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |i| Position::new(i / cols, i % cols))
    }

    /// Contents of one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Option<Dice>> + '_ {
        (0..self.cols).map(move |c| self.dice_at(Position::new(row, c)))
    }

    /// Contents of one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<Dice>> + '_ {
        (0..self.rows).map(move |r| self.dice_at(Position::new(r, col)))
    }

    #[must_use]
    pub fn dice_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    #[must_use]
    pub fn empty_cell_count(&self) -> usize {
        self.cells.len() - self.dice_count()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.row * self.cols + pos.col)
    }
}

impl std::fmt::Display for Grid {
    /// One line per row: dice as `R4`, constraints as `r.`/`.3`, blanks `..`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                if c > 0 {
                    f.write_str(" ")?;
                }
                let cell = &self.cells[r * self.cols + c];
                match (cell.dice(), cell.constraint()) {
                    (Some(d), _) => write!(f, "{d}")?,
                    (None, Constraint { color: Some(color), .. }) => {
                        write!(f, "{}.", color.letter().to_ascii_lowercase())?;
                    }
                    (None, Constraint { value: Some(v), .. }) => write!(f, ".{v}")?,
                    (None, _) => f.write_str("..")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
