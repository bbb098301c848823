//! The standard card catalog, grid templates and setup builder.
//!
//! ```
//! use rust_dicedraft::games::standard;
//!
//! let registry = standard::registry();
//! for def in standard::tool_definitions() {
//!     assert!(registry.bind_tool(&def).is_ok());
//! }
//! assert_eq!(standard::grid_templates().len(), 8);
//! ```

mod builder;
mod catalog;
mod templates;

pub use builder::StandardGameBuilder;
pub use catalog::{objective_definitions, registry, tool_definitions};
pub use templates::grid_templates;
