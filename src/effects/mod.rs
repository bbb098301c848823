//! Tool effect engine.
//!
//! - `ToolEffect`: what a tool card does, as data
//! - `InputShape`: which player operations an active effect consumes
//! - `EffectResolver`: precondition, activation and per-operation steps
//!
//! ## Guarantees
//!
//! Effects never bypass the occupied-cell rule; relaxed chains only drop
//! decorators. Cost and single use are the controller's business. A step
//! that cannot complete changes nothing.

mod effect;
mod targeting;
mod resolver;

pub use effect::ToolEffect;
pub use targeting::InputShape;
pub use resolver::{Activation, EffectContext, EffectProgress, EffectResolver, EffectSnapshot, StepOutcome};
