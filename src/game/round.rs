//! A round: one draft pool, two turns per player.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::turn::Turn;
use crate::core::{Dice, PlayerId};
use crate::zones::DraftPool;

/// The active round and its turn cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    index: usize,
    order: Vec<PlayerId>,
    cursor: usize,
    pool: DraftPool,
    turn: Turn,
}

impl Round {
    /// Open round `index` with the given seat order and pool.
    ///
    /// Panics if `order` is empty.
    #[must_use]
    pub fn new(index: usize, order: Vec<PlayerId>, pool: DraftPool) -> Self {
        assert!(!order.is_empty(), "Round must have at least 1 turn");
        let turn = Turn::new(order[0]);
        Self {
            index,
            order,
            cursor: 0,
            pool,
            turn,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Seats in turn order for this round.
    #[must_use]
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    /// 0-based index of the current turn within the round.
    #[must_use]
    pub fn turn_index(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn.player()
    }

    #[must_use]
    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    #[must_use]
    pub fn pool(&self) -> &DraftPool {
        &self.pool
    }

    pub(crate) fn turn_and_pool_mut(&mut self) -> (&mut Turn, &mut DraftPool) {
        (&mut self.turn, &mut self.pool)
    }

    /// Move to the next turn. `None` once every turn has been played.
    pub(crate) fn advance(&mut self) -> Option<PlayerId> {
        let next = *self.order.get(self.cursor + 1)?;
        self.cursor += 1;
        self.turn = Turn::new(next);
        Some(next)
    }

    /// Leftover dice, emptying the pool.
    pub(crate) fn drain_pool(&mut self) -> Vector<Dice> {
        self.pool.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceColor;

    #[test]
    fn test_cursor_walks_order() {
        let order = PlayerId::draft_order(2, PlayerId(1));
        let mut round = Round::new(3, order, DraftPool::new());

        assert_eq!(round.index(), 3);
        assert_eq!(round.current_player(), PlayerId(1));
        assert_eq!(round.advance(), Some(PlayerId(0)));
        assert_eq!(round.advance(), Some(PlayerId(0)));
        assert_eq!(round.advance(), Some(PlayerId(1)));
        assert_eq!(round.turn_index(), 3);
        assert_eq!(round.advance(), None);
        assert_eq!(round.turn_index(), 3);
    }

    #[test]
    fn test_drain_pool() {
        let pool = DraftPool::from_dice([Dice::new(DiceColor::Red, 1), Dice::new(DiceColor::Blue, 6)]);
        let mut round = Round::new(0, vec![PlayerId(0)], pool);

        assert_eq!(round.drain_pool().len(), 2);
        assert!(round.pool().is_empty());
    }

    #[test]
    #[should_panic(expected = "at least 1 turn")]
    fn test_empty_order_panics() {
        let _ = Round::new(0, Vec::new(), DraftPool::new());
    }
}
