//! Card registry: binds card identities to behavior.
//!
//! Loaders produce plain definitions. The registry knows, for every card
//! identity a game may use, which tool effect or which scorer it stands for,
//! and turns definitions into playable cards.

use rustc_hash::FxHashMap;

use super::definition::{ObjectiveCardDefinition, ObjectiveCardId, ToolCardDefinition, ToolCardId};
use super::instance::{PublicObjectiveCard, ToolCard};
use crate::core::ContractViolation;
use crate::effects::ToolEffect;
use crate::scoring::PublicObjective;

/// Identity to behavior lookup.
///
/// ## Example
///
/// ```
/// use rust_dicedraft::cards::{CardRegistry, ToolCardDefinition, ToolCardId};
/// use rust_dicedraft::effects::ToolEffect;
///
/// let mut registry = CardRegistry::new();
/// registry.register_tool(ToolCardId::new(1), ToolEffect::FlipDrafted);
///
/// let def = ToolCardDefinition::new(ToolCardId::new(1), "Grinding Stone");
/// let card = registry.bind_tool(&def).unwrap();
/// assert_eq!(card.effect, ToolEffect::FlipDrafted);
///
/// let unknown = ToolCardDefinition::new(ToolCardId::new(9), "Mystery");
/// assert!(registry.bind_tool(&unknown).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    tools: FxHashMap<ToolCardId, ToolEffect>,
    objectives: FxHashMap<ObjectiveCardId, PublicObjective>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a tool card identity to its effect.
    ///
    /// Panics if the identity is already bound.
    pub fn register_tool(&mut self, id: ToolCardId, effect: ToolEffect) {
        if self.tools.contains_key(&id) {
            panic!("Tool card {id} already registered");
        }
        self.tools.insert(id, effect);
    }

    /// Bind a public objective identity to its scorer.
    ///
    /// Panics if the identity is already bound.
    pub fn register_objective(&mut self, id: ObjectiveCardId, scorer: PublicObjective) {
        if self.objectives.contains_key(&id) {
            panic!("Objective card {id} already registered");
        }
        self.objectives.insert(id, scorer);
    }

    #[must_use]
    pub fn tool_effect(&self, id: ToolCardId) -> Option<&ToolEffect> {
        self.tools.get(&id)
    }

    #[must_use]
    pub fn objective_scorer(&self, id: ObjectiveCardId) -> Option<&PublicObjective> {
        self.objectives.get(&id)
    }

    /// Build a playable tool card from its definition.
    pub fn bind_tool(&self, def: &ToolCardDefinition) -> Result<ToolCard, ContractViolation> {
        let effect = self
            .tool_effect(def.id)
            .ok_or(ContractViolation::UnboundToolCard(def.id))?;
        Ok(ToolCard::new(def.id, def.name.clone(), def.cost, effect.clone()))
    }

    /// Build a public objective card from its definition.
    pub fn bind_objective(
        &self,
        def: &ObjectiveCardDefinition,
    ) -> Result<PublicObjectiveCard, ContractViolation> {
        let scorer = self
            .objective_scorer(def.id)
            .ok_or(ContractViolation::UnboundObjective(def.id))?;
        Ok(PublicObjectiveCard::new(
            def.id,
            def.name.clone(),
            def.points,
            scorer.clone(),
        ))
    }

    #[must_use]
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn objective_count(&self) -> usize {
        self.objectives.len()
    }
}
