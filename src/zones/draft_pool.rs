//! The per-round draft pool.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Dice, GameRng};

/// Ordered multiset of the dice available to draft this round.
///
/// Backed by `im::Vector`, so [`DraftPool::snapshot`] is O(1) and event
/// payloads never alias live state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPool {
    dice: Vector<Dice>,
}

impl DraftPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dice(dice: impl IntoIterator<Item = Dice>) -> Self {
        Self {
            dice: dice.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    #[must_use]
    pub fn contains(&self, dice: Dice) -> bool {
        self.dice.contains(&dice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dice> {
        self.dice.iter()
    }

    /// Remove one die equal to `dice`. Identical dice are interchangeable,
    /// so the first match is taken.
    pub fn remove(&mut self, dice: Dice) -> Option<Dice> {
        let idx = self.dice.index_of(&dice)?;
        Some(self.dice.remove(idx))
    }

    /// Put a die back (end of turn without placement, tool effects).
    pub fn push(&mut self, dice: Dice) {
        self.dice.push_back(dice);
    }

    /// Re-roll every die in place, keeping colors.
    pub fn reroll_all(&mut self, rng: &mut GameRng) {
        for d in self.dice.iter_mut() {
            *d = Dice::new(d.color(), rng.roll_face());
        }
    }

    /// Empty the pool, returning what was left.
    pub fn drain(&mut self) -> Vector<Dice> {
        std::mem::take(&mut self.dice)
    }

    /// Immutable copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vector<Dice> {
        self.dice.clone()
    }
}
