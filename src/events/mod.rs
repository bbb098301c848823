//! Event system for state-change notifications.
//!
//! The engine emits a [`GameEvent`] after every successful mutation.
//! Collaborators either drain them in batches or subscribe to a channel.
//!
//! ## Key Components
//!
//! - [`GameEvent`]: one observable change with its minimal payload
//! - [`EventQueue`]: buffer plus subscriber fan-out
//! - [`ChangeSet`]: what an accepted action touched, before it becomes events

mod changes;
mod event;
mod queue;

pub use changes::ChangeSet;
pub use event::GameEvent;
pub use queue::EventQueue;
