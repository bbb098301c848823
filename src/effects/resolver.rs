//! Effect resolution - running tool effects against the table.
//!
//! The resolver is stateless. The controller keeps an effect's progress and
//! calls, in order:
//!
//! 1. [`EffectResolver::precondition`] before charging for the card. A
//!    failure here means the card is not used at all.
//! 2. [`EffectResolver::activate`] right after charging. Immediate effects
//!    finish here.
//! 3. [`EffectResolver::step`] for every player operation the effect's
//!    input shape accepts, until it reports completion.
//!
//! A failing step leaves the model exactly as it was before that step.
//! The controller then calls [`EffectResolver::rollback`] with the
//! [`EffectSnapshot`] it took before activation, which undoes whatever the
//! effect already did (a first move, a redraw).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::effect::ToolEffect;
use crate::core::{Dice, EffectFailure, GameRng, PlayerAction};
use crate::events::ChangeSet;
use crate::grid::Grid;
use crate::rules::RuleChain;
use crate::zones::{DiceSource, DraftPool, Track};

/// Everything an effect may read or touch.
pub struct EffectContext<'a> {
    pub grid: &'a mut Grid,
    pub pool: &'a mut DraftPool,
    pub track: &'a mut Track,
    pub held: &'a mut Option<Dice>,
    pub source: &'a mut dyn DiceSource,
    pub rng: &'a mut GameRng,
    /// The chain relaxations are carved out of.
    pub standing: &'a RuleChain,
    pub changes: &'a mut ChangeSet,
}

/// Steps an interactive effect has completed so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectProgress {
    pub steps: u8,
}

/// The parts of the table an interactive effect can change before it
/// fails, as they were before activation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSnapshot {
    grid: Grid,
    held: Option<Dice>,
}

impl EffectSnapshot {
    #[must_use]
    pub fn capture(ctx: &EffectContext<'_>) -> Self {
        Self {
            grid: ctx.grid.clone(),
            held: *ctx.held,
        }
    }
}

/// Result of activating an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Immediate effect, already done.
    Completed,
    /// Waits for player operations.
    AwaitingInput,
}

/// Result of one accepted effect operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// More operations expected.
    Continue(EffectProgress),
    /// Effect finished; control returns to where it was invoked from.
    Completed,
    /// Effect finished by placing the held die; the turn is over.
    Placed,
}

/// Runs tool effects.
pub struct EffectResolver;

impl EffectResolver {
    /// Whether `effect` can be used right now. Checked before any token is
    /// spent.
    pub fn precondition(effect: &ToolEffect, ctx: &EffectContext<'_>) -> Result<(), EffectFailure> {
        if effect.needs_held_dice() && ctx.held.is_none() {
            return Err(EffectFailure::NoHeldDice);
        }

        match effect {
            ToolEffect::RerollPool => {
                if ctx.held.is_some() {
                    return Err(EffectFailure::DiceAlreadyDrafted);
                }
                if ctx.pool.is_empty() {
                    return Err(EffectFailure::EmptyPool);
                }
            }
            ToolEffect::SwapWithTrack if ctx.track.is_empty() => {
                return Err(EffectFailure::EmptyTrack);
            }
            ToolEffect::MoveDice { .. } if ctx.grid.dice_count() == 0 => {
                return Err(EffectFailure::NothingToMove);
            }
            ToolEffect::RedrawFromBag if ctx.source.remaining() == 0 => {
                return Err(EffectFailure::BagEmpty);
            }
            _ => {}
        }

        Ok(())
    }

    /// Start an effect whose precondition held.
    pub fn activate(effect: &ToolEffect, ctx: &mut EffectContext<'_>) -> Result<Activation, EffectFailure> {
        match effect {
            ToolEffect::RerollDrafted => {
                let held = (*ctx.held).ok_or(EffectFailure::NoHeldDice)?;
                let rolled = Dice::new(held.color(), ctx.rng.roll_face());
                debug!(from = %held, to = %rolled, "re-rolled held dice");
                *ctx.held = Some(rolled);
                ctx.changes.held = true;
                Ok(Activation::Completed)
            }

            ToolEffect::FlipDrafted => {
                let held = (*ctx.held).ok_or(EffectFailure::NoHeldDice)?;
                *ctx.held = Some(held.flipped());
                ctx.changes.held = true;
                Ok(Activation::Completed)
            }

            ToolEffect::RerollPool => {
                ctx.pool.reroll_all(ctx.rng);
                debug!(dice = ctx.pool.len(), "re-rolled draft pool");
                ctx.changes.pool = true;
                Ok(Activation::Completed)
            }

            ToolEffect::RedrawFromBag => {
                let held = (*ctx.held).ok_or(EffectFailure::NoHeldDice)?;
                let drawn = ctx.source.draw(ctx.rng).ok_or(EffectFailure::BagEmpty)?;
                ctx.source.give_back(held);
                debug!(returned = %held, drawn = %drawn, "redrew held dice");
                *ctx.held = Some(drawn);
                ctx.changes.held = true;
                Ok(Activation::AwaitingInput)
            }

            ToolEffect::AdjustValue
            | ToolEffect::MoveDice { .. }
            | ToolEffect::SwapWithTrack
            | ToolEffect::RelaxedPlacement { .. } => Ok(Activation::AwaitingInput),
        }
    }

    /// Apply one player operation to an interactive effect.
    ///
    /// Operations outside the effect's input shape are filtered by the
    /// controller; here they change nothing.
    pub fn step(
        effect: &ToolEffect,
        progress: EffectProgress,
        action: &PlayerAction,
        ctx: &mut EffectContext<'_>,
    ) -> Result<StepOutcome, EffectFailure> {
        if let PlayerAction::EndEffect = action {
            debug!(steps = progress.steps, "effect ended early");
            return Ok(StepOutcome::Completed);
        }

        match (effect, action) {
            (ToolEffect::AdjustValue, PlayerAction::Increment | PlayerAction::Decrement) => {
                let held = (*ctx.held).ok_or(EffectFailure::NoHeldDice)?;
                let adjusted = if let PlayerAction::Increment = action {
                    held.increment()
                } else {
                    held.decrement()
                };
                *ctx.held = Some(adjusted.ok_or(EffectFailure::ValueOutOfRange)?);
                ctx.changes.held = true;
                Ok(StepOutcome::Completed)
            }

            (ToolEffect::MoveDice { omit, moves }, PlayerAction::MoveDice { from, to }) => {
                let dice = ctx.grid.take(*from).ok_or(EffectFailure::NoDiceAtCell {
                    row: from.row,
                    col: from.col,
                })?;

                let chain = ctx.standing.without(omit);
                if let Err(violation) = chain.check(ctx.grid, dice, *to) {
                    ctx.grid.put(*from, dice);
                    return Err(EffectFailure::Placement(violation));
                }
                ctx.grid.put(*to, dice);
                ctx.changes.cell(*from);
                ctx.changes.cell(*to);
                debug!(%dice, %from, %to, "moved dice");

                let progress = EffectProgress {
                    steps: progress.steps + 1,
                };
                if progress.steps >= *moves {
                    Ok(StepOutcome::Completed)
                } else {
                    Ok(StepOutcome::Continue(progress))
                }
            }

            (ToolEffect::SwapWithTrack, PlayerAction::ChooseFromTrack { slot, index }) => {
                let held = (*ctx.held).ok_or(EffectFailure::NoHeldDice)?;
                let taken = ctx
                    .track
                    .swap(*slot, *index, held)
                    .ok_or(EffectFailure::NoDiceOnTrack {
                        slot: *slot,
                        index: *index,
                    })?;
                debug!(put = %held, taken = %taken, slot, "swapped with track");
                *ctx.held = Some(taken);
                ctx.changes.held = true;
                ctx.changes.track = true;
                Ok(StepOutcome::Completed)
            }

            (ToolEffect::RedrawFromBag, PlayerAction::ChooseValue { value }) => {
                let held = (*ctx.held).ok_or(EffectFailure::NoHeldDice)?;
                let chosen = held.with_value(*value).ok_or(EffectFailure::ValueOutOfRange)?;
                *ctx.held = Some(chosen);
                ctx.changes.held = true;
                Ok(StepOutcome::Completed)
            }

            (ToolEffect::RelaxedPlacement { omit }, PlayerAction::Place { at }) => {
                let held = (*ctx.held).ok_or(EffectFailure::NoHeldDice)?;
                ctx.standing
                    .without(omit)
                    .check(ctx.grid, held, *at)
                    .map_err(EffectFailure::Placement)?;
                ctx.grid.put(*at, held);
                *ctx.held = None;
                ctx.changes.cell(*at);
                debug!(dice = %held, %at, "placed with relaxed rules");
                Ok(StepOutcome::Placed)
            }

            _ => Ok(StepOutcome::Continue(progress)),
        }
    }

    /// Put the grid and the held die back the way `snapshot` found them.
    /// A redrawn die goes back to the source and the returned one comes out.
    pub fn rollback(effect: &ToolEffect, snapshot: &EffectSnapshot, ctx: &mut EffectContext<'_>) {
        if let (ToolEffect::RedrawFromBag, Some(drawn), Some(returned)) = (effect, *ctx.held, snapshot.held) {
            if drawn != returned && ctx.source.take(returned) {
                ctx.source.give_back(drawn);
            }
        }

        for pos in snapshot.grid.positions() {
            if ctx.grid.dice_at(pos) != snapshot.grid.dice_at(pos) {
                ctx.changes.cell(pos);
            }
        }
        if *ctx.held != snapshot.held {
            ctx.changes.held = true;
        }

        *ctx.grid = snapshot.grid.clone();
        *ctx.held = snapshot.held;
        debug!(dirty = ctx.changes.cells.len(), "effect rolled back");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceColor;
    use crate::grid::Position;
    use crate::rules::{PlacementRule, Violation};
    use crate::zones::ScriptedDice;

    /// Owns everything an `EffectContext` borrows.
    struct Table {
        grid: Grid,
        pool: DraftPool,
        track: Track,
        held: Option<Dice>,
        source: ScriptedDice,
        rng: GameRng,
        standing: RuleChain,
        changes: ChangeSet,
    }

    impl Table {
        fn new() -> Self {
            Self {
                grid: Grid::blank(3, 3),
                pool: DraftPool::new(),
                track: Track::new(2),
                held: None,
                source: ScriptedDice::default(),
                rng: GameRng::new(1),
                standing: RuleChain::standard(),
                changes: ChangeSet::new(),
            }
        }

        fn ctx(&mut self) -> EffectContext<'_> {
            EffectContext {
                grid: &mut self.grid,
                pool: &mut self.pool,
                track: &mut self.track,
                held: &mut self.held,
                source: &mut self.source,
                rng: &mut self.rng,
                standing: &self.standing,
                changes: &mut self.changes,
            }
        }
    }

    #[test]
    fn test_adjust_value_bounds() {
        let mut table = Table::new();
        table.held = Some(Dice::new(DiceColor::Red, 6));

        let result = EffectResolver::step(
            &ToolEffect::AdjustValue,
            EffectProgress::default(),
            &PlayerAction::Increment,
            &mut table.ctx(),
        );
        assert_eq!(result, Err(EffectFailure::ValueOutOfRange));
        assert_eq!(table.held, Some(Dice::new(DiceColor::Red, 6)));
        assert!(table.changes.is_empty());

        let result = EffectResolver::step(
            &ToolEffect::AdjustValue,
            EffectProgress::default(),
            &PlayerAction::Decrement,
            &mut table.ctx(),
        );
        assert_eq!(result, Ok(StepOutcome::Completed));
        assert_eq!(table.held, Some(Dice::new(DiceColor::Red, 5)));
    }

    #[test]
    fn test_preconditions() {
        let mut table = Table::new();
        assert_eq!(
            EffectResolver::precondition(&ToolEffect::FlipDrafted, &table.ctx()),
            Err(EffectFailure::NoHeldDice)
        );
        assert_eq!(
            EffectResolver::precondition(&ToolEffect::move_dice([], 1), &table.ctx()),
            Err(EffectFailure::NothingToMove)
        );
        assert_eq!(
            EffectResolver::precondition(&ToolEffect::RerollPool, &table.ctx()),
            Err(EffectFailure::EmptyPool)
        );

        table.held = Some(Dice::new(DiceColor::Blue, 2));
        assert_eq!(
            EffectResolver::precondition(&ToolEffect::SwapWithTrack, &table.ctx()),
            Err(EffectFailure::EmptyTrack)
        );
        assert_eq!(
            EffectResolver::precondition(&ToolEffect::RerollPool, &table.ctx()),
            Err(EffectFailure::DiceAlreadyDrafted)
        );
        assert_eq!(
            EffectResolver::precondition(&ToolEffect::RedrawFromBag, &table.ctx()),
            Err(EffectFailure::BagEmpty)
        );
        assert_eq!(EffectResolver::precondition(&ToolEffect::FlipDrafted, &table.ctx()), Ok(()));
    }

    #[test]
    fn test_flip_is_immediate() {
        let mut table = Table::new();
        table.held = Some(Dice::new(DiceColor::Green, 2));

        let result = EffectResolver::activate(&ToolEffect::FlipDrafted, &mut table.ctx());
        assert_eq!(result, Ok(Activation::Completed));
        assert_eq!(table.held, Some(Dice::new(DiceColor::Green, 5)));
        assert!(table.changes.held);
    }

    #[test]
    fn test_move_dice_restores_on_violation() {
        let mut table = Table::new();
        table.grid.put(Position::new(0, 0), Dice::new(DiceColor::Red, 3));
        table.grid.put(Position::new(2, 2), Dice::new(DiceColor::Red, 5));

        // Next to the other red die: refused by the adjacent color rule.
        let effect = ToolEffect::move_dice([PlacementRule::ColorMatch], 1);
        let result = EffectResolver::step(
            &effect,
            EffectProgress::default(),
            &PlayerAction::MoveDice {
                from: Position::new(0, 0),
                to: Position::new(2, 1),
            },
            &mut table.ctx(),
        );

        assert_eq!(result, Err(EffectFailure::Placement(Violation::SameColorNeighbor)));
        assert_eq!(table.grid.dice_at(Position::new(0, 0)), Some(Dice::new(DiceColor::Red, 3)));
        assert_eq!(table.grid.dice_at(Position::new(2, 1)), None);
        assert!(table.changes.is_empty());
    }

    #[test]
    fn test_move_dice_two_moves() {
        let mut table = Table::new();
        table.grid.put(Position::new(0, 0), Dice::new(DiceColor::Red, 3));
        table.grid.put(Position::new(0, 2), Dice::new(DiceColor::Blue, 4));
        let effect = ToolEffect::move_dice([], 2);

        let first = EffectResolver::step(
            &effect,
            EffectProgress::default(),
            &PlayerAction::MoveDice {
                from: Position::new(0, 0),
                to: Position::new(1, 1),
            },
            &mut table.ctx(),
        );
        assert_eq!(first, Ok(StepOutcome::Continue(EffectProgress { steps: 1 })));

        let second = EffectResolver::step(
            &effect,
            EffectProgress { steps: 1 },
            &PlayerAction::MoveDice {
                from: Position::new(0, 2),
                to: Position::new(2, 2),
            },
            &mut table.ctx(),
        );
        assert_eq!(second, Ok(StepOutcome::Completed));
        assert_eq!(table.changes.cells.len(), 4);
    }

    #[test]
    fn test_move_from_empty_cell() {
        let mut table = Table::new();
        table.grid.put(Position::new(0, 0), Dice::new(DiceColor::Red, 3));
        let result = EffectResolver::step(
            &ToolEffect::move_dice([], 1),
            EffectProgress::default(),
            &PlayerAction::MoveDice {
                from: Position::new(1, 1),
                to: Position::new(2, 2),
            },
            &mut table.ctx(),
        );
        assert_eq!(result, Err(EffectFailure::NoDiceAtCell { row: 1, col: 1 }));
    }

    #[test]
    fn test_swap_with_track() {
        let mut table = Table::new();
        table
            .track
            .fill(0, [Dice::new(DiceColor::Purple, 1)].into_iter().collect());
        table.held = Some(Dice::new(DiceColor::Yellow, 6));

        let bad = EffectResolver::step(
            &ToolEffect::SwapWithTrack,
            EffectProgress::default(),
            &PlayerAction::ChooseFromTrack { slot: 1, index: 0 },
            &mut table.ctx(),
        );
        assert_eq!(bad, Err(EffectFailure::NoDiceOnTrack { slot: 1, index: 0 }));

        let ok = EffectResolver::step(
            &ToolEffect::SwapWithTrack,
            EffectProgress::default(),
            &PlayerAction::ChooseFromTrack { slot: 0, index: 0 },
            &mut table.ctx(),
        );
        assert_eq!(ok, Ok(StepOutcome::Completed));
        assert_eq!(table.held, Some(Dice::new(DiceColor::Purple, 1)));
        assert_eq!(table.track.get(0, 0), Some(Dice::new(DiceColor::Yellow, 6)));
    }

    #[test]
    fn test_redraw_then_choose_value() {
        let mut table = Table::new();
        table.source = ScriptedDice::new([Dice::new(DiceColor::Green, 2)]);
        table.held = Some(Dice::new(DiceColor::Red, 4));

        let activation = EffectResolver::activate(&ToolEffect::RedrawFromBag, &mut table.ctx());
        assert_eq!(activation, Ok(Activation::AwaitingInput));
        assert_eq!(table.held.map(|d| d.color()), Some(DiceColor::Green));
        assert_eq!(table.source.remaining(), 1);

        let result = EffectResolver::step(
            &ToolEffect::RedrawFromBag,
            EffectProgress::default(),
            &PlayerAction::ChooseValue { value: 9 },
            &mut table.ctx(),
        );
        assert_eq!(result, Err(EffectFailure::ValueOutOfRange));

        let result = EffectResolver::step(
            &ToolEffect::RedrawFromBag,
            EffectProgress::default(),
            &PlayerAction::ChooseValue { value: 5 },
            &mut table.ctx(),
        );
        assert_eq!(result, Ok(StepOutcome::Completed));
        assert_eq!(table.held, Some(Dice::new(DiceColor::Green, 5)));
    }

    #[test]
    fn test_rollback_undoes_redraw() {
        let mut table = Table::new();
        let (r4, g2) = (Dice::new(DiceColor::Red, 4), Dice::new(DiceColor::Green, 2));
        table.source = ScriptedDice::new([g2]);
        table.held = Some(r4);
        let snapshot = EffectSnapshot::capture(&table.ctx());

        EffectResolver::activate(&ToolEffect::RedrawFromBag, &mut table.ctx()).unwrap();
        assert_eq!(table.held, Some(g2));

        EffectResolver::rollback(&ToolEffect::RedrawFromBag, &snapshot, &mut table.ctx());
        assert_eq!(table.held, Some(r4));
        assert_eq!(table.source, ScriptedDice::new([g2]));
        assert!(table.changes.held);
    }

    #[test]
    fn test_rollback_undoes_first_move() {
        let mut table = Table::new();
        let r3 = Dice::new(DiceColor::Red, 3);
        table.grid.put(Position::new(0, 0), r3);
        let effect = ToolEffect::move_dice([], 2);
        let snapshot = EffectSnapshot::capture(&table.ctx());

        EffectResolver::step(
            &effect,
            EffectProgress::default(),
            &PlayerAction::MoveDice {
                from: Position::new(0, 0),
                to: Position::new(1, 1),
            },
            &mut table.ctx(),
        )
        .unwrap();
        table.changes = ChangeSet::new();

        EffectResolver::rollback(&effect, &snapshot, &mut table.ctx());
        assert_eq!(table.grid.dice_at(Position::new(0, 0)), Some(r3));
        assert_eq!(table.grid.dice_at(Position::new(1, 1)), None);
        assert_eq!(table.changes.cells.len(), 2);
        assert!(!table.changes.held);
    }

    #[test]
    fn test_relaxed_placement_keeps_occupied_rule() {
        let mut table = Table::new();
        table.grid.put(Position::new(0, 0), Dice::new(DiceColor::Red, 3));
        table.held = Some(Dice::new(DiceColor::Red, 3));
        let effect = ToolEffect::relaxed_placement(PlacementRule::DECORATORS);

        let occupied = EffectResolver::step(
            &effect,
            EffectProgress::default(),
            &PlayerAction::Place { at: Position::new(0, 0) },
            &mut table.ctx(),
        );
        assert_eq!(occupied, Err(EffectFailure::Placement(Violation::CellOccupied)));

        // Same color and value right next to it: fine with every decorator lifted.
        let placed = EffectResolver::step(
            &effect,
            EffectProgress::default(),
            &PlayerAction::Place { at: Position::new(0, 1) },
            &mut table.ctx(),
        );
        assert_eq!(placed, Ok(StepOutcome::Placed));
        assert_eq!(table.held, None);
        assert!(table.standing.contains(PlacementRule::AdjacentColor));
    }
}
