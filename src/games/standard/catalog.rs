//! Standard tool card and public objective catalogs.

use crate::cards::{CardRegistry, ObjectiveCardDefinition, ObjectiveCardId, ToolCardDefinition, ToolCardId};
use crate::core::DiceColor;
use crate::effects::ToolEffect;
use crate::rules::PlacementRule;
use crate::scoring::{DiceProperty, LineKind, PropertyValue, PublicObjective};

fn tool(id: u32, name: &str, cost: u32, effect: ToolEffect) -> (ToolCardDefinition, ToolEffect) {
    (ToolCardDefinition::new(ToolCardId::new(id), name).with_cost(cost), effect)
}

fn objective(id: u32, name: &str, points: u32, scorer: PublicObjective) -> (ObjectiveCardDefinition, PublicObjective) {
    (ObjectiveCardDefinition::new(ObjectiveCardId::new(id), name, points), scorer)
}

fn shades(values: &[u8]) -> PublicObjective {
    PublicObjective::set(DiceProperty::Value, values.iter().map(|v| PropertyValue::Value(*v)))
}

fn variety(line: LineKind, property: DiceProperty) -> PublicObjective {
    PublicObjective::LineVariety { line, property }
}

fn tool_catalog() -> Vec<(ToolCardDefinition, ToolEffect)> {
    vec![
        tool(1, "Grozing Pliers", 1, ToolEffect::AdjustValue),
        tool(2, "Eglomise Brush", 1, ToolEffect::move_dice([PlacementRule::ColorMatch], 1)),
        tool(3, "Copper Foil Burnisher", 1, ToolEffect::move_dice([PlacementRule::ValueMatch], 1)),
        tool(4, "Lathekin", 1, ToolEffect::move_dice([], 2)),
        tool(5, "Lens Cutter", 1, ToolEffect::SwapWithTrack),
        tool(6, "Flux Brush", 1, ToolEffect::RerollDrafted),
        tool(7, "Glazing Hammer", 1, ToolEffect::RerollPool),
        tool(10, "Grinding Stone", 1, ToolEffect::FlipDrafted),
        tool(11, "Flux Remover", 1, ToolEffect::RedrawFromBag),
        tool(
            13,
            "Soft Solder",
            2,
            ToolEffect::relaxed_placement([PlacementRule::AdjacentColor, PlacementRule::AdjacentValue]),
        ),
    ]
}

fn objective_catalog() -> Vec<(ObjectiveCardDefinition, PublicObjective)> {
    vec![
        objective(1, "Row Color Variety", 6, variety(LineKind::Row, DiceProperty::Color)),
        objective(2, "Column Color Variety", 5, variety(LineKind::Column, DiceProperty::Color)),
        objective(3, "Row Shade Variety", 5, variety(LineKind::Row, DiceProperty::Value)),
        objective(4, "Column Shade Variety", 4, variety(LineKind::Column, DiceProperty::Value)),
        objective(5, "Light Shades", 2, shades(&[1, 2])),
        objective(6, "Medium Shades", 2, shades(&[3, 4])),
        objective(7, "Deep Shades", 2, shades(&[5, 6])),
        objective(8, "Shade Variety", 5, shades(&[1, 2, 3, 4, 5, 6])),
        objective(
            9,
            "Color Variety",
            4,
            PublicObjective::set(DiceProperty::Color, DiceColor::ALL.map(PropertyValue::Color)),
        ),
        objective(10, "Color Diagonals", 1, PublicObjective::ColorDiagonals),
        objective(
            11,
            "Packed Rows",
            2,
            PublicObjective::LineThreshold {
                line: LineKind::Row,
                min_dice: 5,
            },
        ),
    ]
}

/// Every standard tool card.
#[must_use]
pub fn tool_definitions() -> Vec<ToolCardDefinition> {
    tool_catalog().into_iter().map(|(def, _)| def).collect()
}

/// Every standard public objective.
#[must_use]
pub fn objective_definitions() -> Vec<ObjectiveCardDefinition> {
    objective_catalog().into_iter().map(|(def, _)| def).collect()
}

/// A registry binding every standard card.
#[must_use]
pub fn registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    for (def, effect) in tool_catalog() {
        registry.register_tool(def.id, effect);
    }
    for (def, scorer) in objective_catalog() {
        registry.register_objective(def.id, scorer);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dice;
    use crate::grid::{Grid, Position};
    use crate::scoring::GridScorer;

    #[test]
    fn test_every_definition_binds() {
        let registry = registry();
        assert_eq!(registry.tool_count(), tool_definitions().len());
        assert_eq!(registry.objective_count(), objective_definitions().len());

        for def in tool_definitions() {
            assert!(registry.bind_tool(&def).is_ok(), "{} unbound", def.name);
        }
        for def in objective_definitions() {
            assert!(registry.bind_objective(&def).is_ok(), "{} unbound", def.name);
        }
    }

    #[test]
    fn test_light_shades_pairs() {
        let registry = registry();
        let scorer = registry.objective_scorer(ObjectiveCardId::new(5)).unwrap();

        let mut grid = Grid::blank(4, 5);
        grid.put(Position::new(0, 0), Dice::new(DiceColor::Red, 1));
        grid.put(Position::new(0, 1), Dice::new(DiceColor::Blue, 2));
        grid.put(Position::new(0, 2), Dice::new(DiceColor::Green, 1));
        assert_eq!(scorer.count(&grid), 1);
    }

    #[test]
    fn test_lathekin_obeys_all_rules() {
        let registry = registry();
        let effect = registry.tool_effect(ToolCardId::new(4)).unwrap();
        assert_eq!(effect, &ToolEffect::move_dice([], 2));
    }
}
