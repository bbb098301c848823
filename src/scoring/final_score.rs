//! End-of-game scores and rankings.
//!
//! Final score = every public objective + private objective + one point per
//! unused token - one point per empty cell. Totals may be negative.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{ObjectiveCardId, PrivateObjectiveCard, PublicObjectiveCard};
use crate::core::{PlayerId, PlayerMap};
use crate::grid::Grid;

/// How one player's total was reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub public: SmallVec<[(ObjectiveCardId, u32); 3]>,
    pub private: u32,
    pub tokens: u32,
    pub empty_cells: u32,
    pub total: i32,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn public_total(&self) -> u32 {
        self.public.iter().map(|(_, points)| points).sum()
    }
}

/// Score one finished grid.
#[must_use]
pub fn score_grid(
    grid: &Grid,
    publics: &[PublicObjectiveCard],
    private: &PrivateObjectiveCard,
    tokens: u32,
) -> ScoreBreakdown {
    let public: SmallVec<[(ObjectiveCardId, u32); 3]> =
        publics.iter().map(|card| (card.id, card.score(grid))).collect();
    let private = private.score(grid);
    let empty_cells = grid.empty_cell_count() as u32;

    let public_sum: u32 = public.iter().map(|(_, p)| p).sum();
    let total = i64::from(public_sum) + i64::from(private) + i64::from(tokens) - i64::from(empty_cells);

    ScoreBreakdown {
        public,
        private,
        tokens,
        empty_cells,
        total: total as i32,
    }
}

/// One line of the final standings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    /// 1-based.
    pub place: usize,
    pub player: PlayerId,
    pub score: i32,
}

/// Order players by total score.
///
/// Ties go to the higher private objective score, then to more unused
/// tokens, then to the lower seat index, so places are always distinct.
#[must_use]
pub fn rank_players(scores: &PlayerMap<ScoreBreakdown>) -> Vec<Ranking> {
    let mut order: Vec<(PlayerId, &ScoreBreakdown)> = scores.iter().collect();
    order.sort_by(|(pa, a), (pb, b)| {
        b.total
            .cmp(&a.total)
            .then(b.private.cmp(&a.private))
            .then(b.tokens.cmp(&a.tokens))
            .then(pa.cmp(pb))
    });

    order
        .into_iter()
        .enumerate()
        .map(|(i, (player, breakdown))| Ranking {
            place: i + 1,
            player,
            score: breakdown.total,
        })
        .collect()
}
