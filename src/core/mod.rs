//! Core engine types: dice, players, actions, RNG, configuration, errors.
//!
//! These are the value types every other module builds on. None of them
//! know about turns or rounds.

pub mod dice;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use dice::{Dice, DiceColor, MAX_FACE, MIN_FACE};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::GameConfig;
pub use action::{ActionKind, ActionRecord, PlayerAction};
pub use error::{ContractViolation, EffectFailure, EngineError, Rejection};
