//! The round track.
//!
//! One slot per round. A slot is filled once, with whatever the draft pool
//! still holds when its round closes; afterwards only tool effects touch it,
//! by swapping a die in for one taken out.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::Dice;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    slots: Vector<Vector<Dice>>,
    filled: Vector<bool>,
}

impl Track {
    /// A track with one empty slot per round.
    #[must_use]
    pub fn new(rounds: usize) -> Self {
        Self {
            slots: (0..rounds).map(|_| Vector::new()).collect(),
            filled: (0..rounds).map(|_| false).collect(),
        }
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn slot(&self, round: usize) -> Option<&Vector<Dice>> {
        self.slots.get(round)
    }

    #[must_use]
    pub fn is_filled(&self, round: usize) -> bool {
        self.filled.get(round).copied().unwrap_or(false)
    }

    /// Store the leftovers of `round`. Returns `false` and changes nothing
    /// if the slot does not exist or was already filled.
    pub fn fill(&mut self, round: usize, dice: Vector<Dice>) -> bool {
        if round >= self.slots.len() || self.filled[round] {
            return false;
        }
        self.slots[round] = dice;
        self.filled[round] = true;
        true
    }

    #[must_use]
    pub fn get(&self, slot: usize, index: usize) -> Option<Dice> {
        self.slots.get(slot)?.get(index).copied()
    }

    /// Exchange the die at (`slot`, `index`) for `incoming`, returning the
    /// one taken out.
    pub fn swap(&mut self, slot: usize, index: usize, incoming: Dice) -> Option<Dice> {
        let held = self.slots.get_mut(slot)?.get_mut(index)?;
        Some(std::mem::replace(held, incoming))
    }

    #[must_use]
    pub fn dice_count(&self) -> usize {
        self.slots.iter().map(Vector::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice_count() == 0
    }

    /// Immutable copy of every slot.
    #[must_use]
    pub fn snapshot(&self) -> Vector<Vector<Dice>> {
        self.slots.clone()
    }
}
