//! Private objective scoring.

use crate::core::DiceColor;
use crate::grid::Grid;

/// Sum of the faces of every `color` die on the grid.
#[must_use]
pub fn private_score(grid: &Grid, color: DiceColor) -> u32 {
    grid.occupied()
        .filter(|(_, d)| d.color() == color)
        .map(|(_, d)| u32::from(d.value()))
        .sum()
}
