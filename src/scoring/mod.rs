//! Objective scoring.
//!
//! Runs once per player after the last round. Public objectives share the
//! [`GridScorer`] scan contract; the private objective sums one color's
//! faces; [`score_grid`] combines them with tokens and the empty-cell
//! penalty.

mod final_score;
mod objective;
mod private;

pub use final_score::{rank_players, score_grid, Ranking, ScoreBreakdown};
pub use objective::{complete_sets, DiceProperty, GridScorer, LineKind, PropertyValue, PublicObjective};
pub use private::private_score;
