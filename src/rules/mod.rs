//! Placement rules and rule chains.
//!
//! The turn controller consults the standing chain for every placement.
//! Tool effects that relax placement build a reduced chain with
//! [`RuleChain::without`] for one move; the standing chain never changes.

pub mod placement;

pub use placement::{PlacementPredicate, PlacementRule, RuleChain, Violation};
