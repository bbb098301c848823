//! Where round dice come from.
//!
//! The engine only needs something that hands out dice and takes some back;
//! [`DiceSource`] is that seam. [`DiceBag`] is the physical bag (a fixed
//! number of dice per color, drawn without replacement). [`ScriptedDice`]
//! yields a predetermined sequence for tests and replays.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{Dice, DiceColor, GameRng};

/// A supplier of dice for the draft pool and for redraw effects.
pub trait DiceSource: std::fmt::Debug + Send {
    /// Take one die, or `None` if the source is exhausted.
    fn draw(&mut self, rng: &mut GameRng) -> Option<Dice>;

    /// Return a die to the source.
    fn give_back(&mut self, dice: Dice);

    /// Take back a die that was returned earlier. `false` if no such die
    /// is in the source.
    fn take(&mut self, dice: Dice) -> bool;

    /// Dice still available.
    fn remaining(&self) -> usize;
}

/// The dice bag: per-color counts, drawn without replacement.
///
/// A draw picks a color with probability proportional to how many dice of
/// that color remain, then rolls it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceBag {
    counts: [u32; 5],
}

impl DiceBag {
    #[must_use]
    pub fn new(dice_per_color: u32) -> Self {
        Self {
            counts: [dice_per_color; 5],
        }
    }

    #[must_use]
    pub fn count(&self, color: DiceColor) -> u32 {
        self.counts[color.index()]
    }
}

impl DiceSource for DiceBag {
    fn draw(&mut self, rng: &mut GameRng) -> Option<Dice> {
        let idx = rng.choose_weighted(&self.counts)?;
        self.counts[idx] -= 1;
        Some(Dice::new(DiceColor::ALL[idx], rng.roll_face()))
    }

    fn give_back(&mut self, dice: Dice) {
        self.counts[dice.color().index()] += 1;
    }

    fn take(&mut self, dice: Dice) -> bool {
        let count = &mut self.counts[dice.color().index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    fn remaining(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }
}

/// Fixed draw order. Returned dice go to the back of the queue.
///
/// ```
/// use rust_dicedraft::core::{Dice, DiceColor, GameRng};
/// use rust_dicedraft::zones::{DiceSource, ScriptedDice};
///
/// let mut source = ScriptedDice::new([Dice::new(DiceColor::Red, 4)]);
/// let mut rng = GameRng::new(0);
/// assert_eq!(source.draw(&mut rng), Some(Dice::new(DiceColor::Red, 4)));
/// assert_eq!(source.draw(&mut rng), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedDice {
    queue: VecDeque<Dice>,
}

impl ScriptedDice {
    pub fn new(dice: impl IntoIterator<Item = Dice>) -> Self {
        Self {
            queue: dice.into_iter().collect(),
        }
    }
}

impl DiceSource for ScriptedDice {
    fn draw(&mut self, _rng: &mut GameRng) -> Option<Dice> {
        self.queue.pop_front()
    }

    fn give_back(&mut self, dice: Dice) {
        self.queue.push_back(dice);
    }

    fn take(&mut self, dice: Dice) -> bool {
        match self.queue.iter().rposition(|d| *d == dice) {
            Some(idx) => self.queue.remove(idx).is_some(),
            None => false,
        }
    }

    fn remaining(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_exhausts() {
        let mut bag = DiceBag::new(2);
        let mut rng = GameRng::new(42);

        let drawn: Vec<_> = std::iter::from_fn(|| bag.draw(&mut rng)).collect();
        assert_eq!(drawn.len(), 10);
        assert_eq!(bag.remaining(), 0);
        for color in DiceColor::ALL {
            assert_eq!(drawn.iter().filter(|d| d.color() == color).count(), 2);
        }
    }

    #[test]
    fn test_bag_give_back() {
        let mut bag = DiceBag::new(0);
        let mut rng = GameRng::new(42);
        assert_eq!(bag.draw(&mut rng), None);

        bag.give_back(Dice::new(DiceColor::Purple, 3));
        assert_eq!(bag.count(DiceColor::Purple), 1);
        let d = bag.draw(&mut rng).unwrap();
        assert_eq!(d.color(), DiceColor::Purple);
    }

    #[test]
    fn test_bag_deterministic() {
        let mut a = DiceBag::new(18);
        let mut b = DiceBag::new(18);
        let mut rng_a = GameRng::new(5);
        let mut rng_b = GameRng::new(5);
        for _ in 0..20 {
            assert_eq!(a.draw(&mut rng_a), b.draw(&mut rng_b));
        }
    }

    #[test]
    fn test_scripted_give_back_goes_last() {
        let mut source = ScriptedDice::new([
            Dice::new(DiceColor::Red, 1),
            Dice::new(DiceColor::Blue, 2),
        ]);
        let mut rng = GameRng::new(0);
        source.give_back(Dice::new(DiceColor::Green, 3));

        let order: Vec<_> = std::iter::from_fn(|| source.draw(&mut rng)).collect();
        assert_eq!(order.last(), Some(&Dice::new(DiceColor::Green, 3)));
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn test_take_undoes_give_back() {
        let mut bag = DiceBag::new(0);
        assert!(!bag.take(Dice::new(DiceColor::Red, 3)));
        bag.give_back(Dice::new(DiceColor::Red, 3));
        assert!(bag.take(Dice::new(DiceColor::Red, 5)));
        assert_eq!(bag.remaining(), 0);

        let r1 = Dice::new(DiceColor::Red, 1);
        let mut source = ScriptedDice::new([r1, Dice::new(DiceColor::Blue, 2)]);
        source.give_back(r1);
        assert!(source.take(r1));
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.draw(&mut GameRng::new(0)), Some(r1));
    }
}
