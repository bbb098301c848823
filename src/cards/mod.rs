//! Card system: definitions, cards in play, and the registry.
//!
//! ## Key Types
//!
//! - `ToolCardId` / `ObjectiveCardId`: card identities
//! - `ToolCardDefinition` / `ObjectiveCardDefinition`: loader-facing data
//! - `ToolCard`: a tool on the table (cost, effect, used flag)
//! - `PublicObjectiveCard` / `PrivateObjectiveCard`: scoring cards
//! - `CardRegistry`: binds identities to effects and scorers

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{ObjectiveCardDefinition, ObjectiveCardId, ToolCardDefinition, ToolCardId};
pub use instance::{PrivateObjectiveCard, PublicObjectiveCard, ToolCard};
pub use registry::CardRegistry;
