//! Game orchestration.
//!
//! ## Key Components
//!
//! - [`Game`]: lifecycle, players, track, and the active round
//! - [`Round`]: draft pool and turn cursor (forward then backward order)
//! - [`Turn`]: held die, tool card used, controller state
//! - [`ControllerState`]: the per-turn state machine, driven by a
//!   `state x action` transition table
//!
//! All mutation goes through [`Game::apply`] and [`Game::skip_turn`]; each
//! call either fully applies or is refused without touching anything.

mod controller;
mod engine;
mod player;
mod round;
mod turn;

pub use controller::{allowed_actions, ControllerState, EffectState, Resume, StateTag, TurnContext};
pub use engine::{ActionOutcome, Game, GameStatus};
pub use player::Player;
pub use round::Round;
pub use turn::Turn;
