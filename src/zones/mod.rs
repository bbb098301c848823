//! Shared dice locations: the draft pool, the round track, the bag.
//!
//! ## Key Types
//!
//! - `DraftPool`: dice available to draft in the current round
//! - `Track`: leftovers of every closed round, one slot per round
//! - `DiceSource`: where round dice come from (`DiceBag`, `ScriptedDice`)
//!
//! The game owns all three exclusively. Anything that leaves the engine is
//! an `im::Vector` snapshot.

pub mod dice_bag;
pub mod draft_pool;
pub mod track;

pub use dice_bag::{DiceBag, DiceSource, ScriptedDice};
pub use draft_pool::DraftPool;
pub use track::Track;
