//! Player grids: coordinates, cells, templates.

mod board;
mod cell;

pub use board::{ConstraintEntry, Grid, GridTemplate};
pub use cell::{Cell, Constraint, Position};
