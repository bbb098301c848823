//! Card definitions - static card data.
//!
//! Definitions are what a loader hands the engine: identity, name and the
//! numbers printed on the card. Behavior (the tool effect, the scoring
//! function) is bound separately by identity through the
//! [`CardRegistry`](super::CardRegistry).

use serde::{Deserialize, Serialize};

/// Identity of a tool card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToolCardId(pub u32);

impl ToolCardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ToolCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tool({})", self.0)
    }
}

/// Identity of a public objective card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectiveCardId(pub u32);

impl ObjectiveCardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObjectiveCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Objective({})", self.0)
    }
}

/// Static tool card data.
///
/// ```
/// use rust_dicedraft::cards::{ToolCardDefinition, ToolCardId};
///
/// let pliers = ToolCardDefinition::new(ToolCardId::new(1), "Grozing Pliers").with_cost(2);
/// assert_eq!(pliers.cost, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCardDefinition {
    pub id: ToolCardId,
    pub name: String,
    /// Tokens paid on activation.
    pub cost: u32,
}

impl ToolCardDefinition {
    /// Definition with the usual cost of one token.
    #[must_use]
    pub fn new(id: ToolCardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cost: 1,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }
}

/// Static public objective data. `points` multiplies whatever the bound
/// scorer counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveCardDefinition {
    pub id: ObjectiveCardId,
    pub name: String,
    pub points: u32,
}

impl ObjectiveCardDefinition {
    #[must_use]
    pub fn new(id: ObjectiveCardId, name: impl Into<String>, points: u32) -> Self {
        Self {
            id,
            name: name.into(),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids() {
        assert_eq!(ToolCardId::new(4).raw(), 4);
        assert_eq!(ToolCardId::new(4).to_string(), "Tool(4)");
        assert_eq!(ObjectiveCardId::new(2).to_string(), "Objective(2)");
    }

    #[test]
    fn test_tool_definition_default_cost() {
        let def = ToolCardDefinition::new(ToolCardId::new(1), "Lens Cutter");
        assert_eq!(def.cost, 1);
        assert_eq!(def.name, "Lens Cutter");
    }

    #[test]
    fn test_definition_deserialization() {
        let json = r#"{"id": 3, "name": "Row Color Variety", "points": 6}"#;
        let def: ObjectiveCardDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.id, ObjectiveCardId::new(3));
        assert_eq!(def.points, 6);
    }
}
