//! Dice: the colored, valued tokens players draft and place.
//!
//! A `Dice` is an immutable value. Every "change" (increment, flip,
//! re-roll) produces a new `Dice`; callers swap it into whatever slot held
//! the old one.
//!
//! Cells express "no color constraint" as `Option<DiceColor>::None`, so the
//! palette itself has no sentinel and no die can ever be colorless.

use serde::{Deserialize, Serialize};

/// Lowest face value.
pub const MIN_FACE: u8 = 1;

/// Highest face value.
pub const MAX_FACE: u8 = 6;

/// Dice color palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiceColor {
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl DiceColor {
    /// All colors in palette order.
    pub const ALL: [DiceColor; 5] = [
        DiceColor::Red,
        DiceColor::Yellow,
        DiceColor::Green,
        DiceColor::Blue,
        DiceColor::Purple,
    ];

    /// Position of this color in [`DiceColor::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            DiceColor::Red => 0,
            DiceColor::Yellow => 1,
            DiceColor::Green => 2,
            DiceColor::Blue => 3,
            DiceColor::Purple => 4,
        }
    }

    /// One-letter abbreviation.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            DiceColor::Red => 'R',
            DiceColor::Yellow => 'Y',
            DiceColor::Green => 'G',
            DiceColor::Blue => 'B',
            DiceColor::Purple => 'P',
        }
    }
}

impl std::fmt::Display for DiceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiceColor::Red => "red",
            DiceColor::Yellow => "yellow",
            DiceColor::Green => "green",
            DiceColor::Blue => "blue",
            DiceColor::Purple => "purple",
        };
        f.write_str(name)
    }
}

/// A single die: color plus face value in `1..=6`.
///
/// ```
/// use rust_dicedraft::core::{Dice, DiceColor};
///
/// let d = Dice::new(DiceColor::Red, 6);
/// assert_eq!(d.increment(), None);
/// assert_eq!(d.decrement(), Some(Dice::new(DiceColor::Red, 5)));
/// assert_eq!(d.flipped().value(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    color: DiceColor,
    value: u8,
}

impl Dice {
    /// Create a die.
    ///
    /// Panics if `value` is outside `1..=6`; use [`Dice::try_new`] for
    /// values that come from player input.
    #[must_use]
    pub fn new(color: DiceColor, value: u8) -> Self {
        assert!(
            (MIN_FACE..=MAX_FACE).contains(&value),
            "Dice value must be in 1..=6, got {value}"
        );
        Self { color, value }
    }

    /// Create a die, returning `None` for an out-of-range face.
    #[must_use]
    pub fn try_new(color: DiceColor, value: u8) -> Option<Self> {
        (MIN_FACE..=MAX_FACE)
            .contains(&value)
            .then_some(Self { color, value })
    }

    #[must_use]
    pub const fn color(self) -> DiceColor {
        self.color
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Same color, value + 1. `None` at 6 (no wraparound).
    #[must_use]
    pub fn increment(self) -> Option<Self> {
        Self::try_new(self.color, self.value + 1)
    }

    /// Same color, value - 1. `None` at 1 (no wraparound).
    #[must_use]
    pub fn decrement(self) -> Option<Self> {
        self.value
            .checked_sub(1)
            .and_then(|v| Self::try_new(self.color, v))
    }

    /// Same color, different face.
    #[must_use]
    pub fn with_value(self, value: u8) -> Option<Self> {
        Self::try_new(self.color, value)
    }

    /// Turn the die over: opposite faces sum to 7.
    #[must_use]
    pub fn flipped(self) -> Self {
        Self {
            color: self.color,
            value: MAX_FACE + MIN_FACE - self.value,
        }
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.color.letter(), self.value)
    }
}
