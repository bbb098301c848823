//! Turn controller - the per-turn state machine.
//!
//! ## States
//!
//! ```text
//! Start --Draft--> Place --Place--> End
//!   |                |
//!   +--UseToolCard---+--> ToolEffect --(completed)--> back where it came from
//!   |                |
//!   +----EndTurn-----+--> End
//! ```
//!
//! An effect step that fails unwinds the whole card: the table goes back to
//! how it was before activation, the tokens are refunded and the card is
//! usable again, this turn included.
//!
//! ## Transition Table
//!
//! Every legal `(state, action)` pair maps to one handler in the
//! `TRANSITIONS` table. A handler validates first and mutates only once
//! validation passed, so a rejected action leaves the table untouched.
//! Pairs missing from the table are rejected without calling anything.
//!
//! While an effect is running, the table's `ToolEffect` rows are further
//! narrowed by the effect's [`InputShape`](crate::effects::InputShape).

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::turn::Turn;
use crate::cards::{ToolCard, ToolCardId};
use crate::core::{ActionKind, Dice, GameRng, PlayerAction, PlayerId, Rejection};
use crate::effects::{
    Activation, EffectContext, EffectProgress, EffectResolver, EffectSnapshot, StepOutcome, ToolEffect,
};
use crate::events::ChangeSet;
use crate::grid::Grid;
use crate::rules::RuleChain;
use crate::zones::{DiceSource, DraftPool, Track};

/// Controller state without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateTag {
    Start,
    Place,
    ToolEffect,
    End,
}

impl fmt::Display for StateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateTag::Start => "start",
            StateTag::Place => "place",
            StateTag::ToolEffect => "tool effect",
            StateTag::End => "end",
        };
        f.write_str(name)
    }
}

/// Where control returns once a tool effect completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resume {
    Start,
    Place,
}

impl Resume {
    fn state(self) -> ControllerState {
        match self {
            Resume::Start => ControllerState::Start,
            Resume::Place => ControllerState::Place,
        }
    }
}

/// A tool effect waiting for player operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectState {
    pub card: ToolCardId,
    pub effect: ToolEffect,
    pub resume: Resume,
    pub progress: EffectProgress,
    /// Tokens paid, refunded if the effect fails.
    pub cost: u32,
    pub snapshot: EffectSnapshot,
}

/// Where a turn is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    /// Nothing drafted yet.
    Start,
    /// Holding a drafted die.
    Place,
    ToolEffect(EffectState),
    /// Turn over; the round moves on.
    End,
}

impl ControllerState {
    #[must_use]
    pub fn tag(&self) -> StateTag {
        match self {
            ControllerState::Start => StateTag::Start,
            ControllerState::Place => StateTag::Place,
            ControllerState::ToolEffect(_) => StateTag::ToolEffect,
            ControllerState::End => StateTag::End,
        }
    }

    /// The running effect, if any.
    #[must_use]
    pub fn active_effect(&self) -> Option<&EffectState> {
        match self {
            ControllerState::ToolEffect(active) => Some(active),
            _ => None,
        }
    }
}

/// The slice of the game a turn may touch.
pub struct TurnContext<'a> {
    pub player: PlayerId,
    pub grid: &'a mut Grid,
    pub tokens: &'a mut u32,
    pub tools: &'a mut [ToolCard],
    pub pool: &'a mut DraftPool,
    pub track: &'a mut Track,
    pub source: &'a mut dyn DiceSource,
    pub rng: &'a mut GameRng,
    pub standing: &'a RuleChain,
    pub changes: &'a mut ChangeSet,
}

/// Validates, mutates, and names the next state.
type Handler = fn(&mut Turn, &mut TurnContext<'_>, &PlayerAction) -> Result<ControllerState, Rejection>;

/// `state x action -> handler`.
const TRANSITIONS: &[(StateTag, ActionKind, Handler)] = &[
    (StateTag::Start, ActionKind::Draft, draft),
    (StateTag::Start, ActionKind::UseToolCard, use_tool_card),
    (StateTag::Start, ActionKind::EndTurn, end_turn),
    (StateTag::Place, ActionKind::Place, place),
    (StateTag::Place, ActionKind::UseToolCard, use_tool_card),
    (StateTag::Place, ActionKind::EndTurn, end_turn),
    (StateTag::ToolEffect, ActionKind::Increment, effect_step),
    (StateTag::ToolEffect, ActionKind::Decrement, effect_step),
    (StateTag::ToolEffect, ActionKind::MoveDice, effect_step),
    (StateTag::ToolEffect, ActionKind::ChooseFromTrack, effect_step),
    (StateTag::ToolEffect, ActionKind::ChooseValue, effect_step),
    (StateTag::ToolEffect, ActionKind::Place, effect_step),
    (StateTag::ToolEffect, ActionKind::EndEffect, effect_step),
];

fn lookup(state: StateTag, kind: ActionKind) -> Option<Handler> {
    TRANSITIONS
        .iter()
        .find(|(s, k, _)| *s == state && *k == kind)
        .map(|(_, _, handler)| *handler)
}

/// Run `action` against `turn`. On success the turn's state has advanced.
pub(crate) fn dispatch(
    turn: &mut Turn,
    ctx: &mut TurnContext<'_>,
    action: &PlayerAction,
) -> Result<(), Rejection> {
    let state = turn.state.tag();
    let kind = action.kind();

    let handler = lookup(state, kind).ok_or_else(|| refusal(state, kind))?;
    if let Some(active) = turn.state.active_effect() {
        if !active.effect.input_shape().accepts(kind) {
            return Err(Rejection::IllegalInState { state, action: kind });
        }
    }

    match handler(turn, ctx, action) {
        Ok(next) => {
            debug!(player = %ctx.player, %kind, from = %state, to = %next.tag(), "transition");
            turn.state = next;
            Ok(())
        }
        Err(rejection @ Rejection::EffectFailed(_)) => {
            if let Some(active) = turn.state.active_effect().cloned() {
                unwind(turn, ctx, &active);
                debug!(player = %ctx.player, card = %active.card, "tool effect unwound");
                turn.state = active.resume.state();
            }
            Err(rejection)
        }
        Err(rejection) => Err(rejection),
    }
}

/// Action kinds the controller would not refuse outright in `state`.
#[must_use]
pub fn allowed_actions(state: &ControllerState) -> SmallVec<[ActionKind; 8]> {
    let tag = state.tag();
    TRANSITIONS
        .iter()
        .filter(|(s, _, _)| *s == tag)
        .map(|(_, kind, _)| *kind)
        .filter(|kind| match state.active_effect() {
            Some(active) => active.effect.input_shape().accepts(*kind),
            None => true,
        })
        .collect()
}

fn refusal(state: StateTag, kind: ActionKind) -> Rejection {
    match state {
        StateTag::Start if kind == ActionKind::Place || kind.is_effect_operation() => Rejection::NoDiceDrafted,
        _ => Rejection::IllegalInState { state, action: kind },
    }
}

fn mismatch(turn: &Turn, action: &PlayerAction) -> Rejection {
    Rejection::IllegalInState {
        state: turn.state.tag(),
        action: action.kind(),
    }
}

/// Undo a failed effect and its charge.
fn unwind(turn: &mut Turn, ctx: &mut TurnContext<'_>, active: &EffectState) {
    EffectResolver::rollback(&active.effect, &active.snapshot, &mut effect_context(&mut turn.held, ctx));

    *ctx.tokens += active.cost;
    if let Some(tool) = ctx.tools.iter_mut().find(|tool| tool.id == active.card) {
        tool.unmark_used();
    }
    turn.tool_used = None;
    ctx.changes.tool_refunded = Some(active.card);
}

fn effect_context<'b>(held: &'b mut Option<Dice>, ctx: &'b mut TurnContext<'_>) -> EffectContext<'b> {
    EffectContext {
        grid: &mut *ctx.grid,
        pool: &mut *ctx.pool,
        track: &mut *ctx.track,
        held,
        source: &mut *ctx.source,
        rng: &mut *ctx.rng,
        standing: ctx.standing,
        changes: &mut *ctx.changes,
    }
}

// === Handlers ===

fn draft(turn: &mut Turn, ctx: &mut TurnContext<'_>, action: &PlayerAction) -> Result<ControllerState, Rejection> {
    let PlayerAction::Draft { dice } = *action else {
        return Err(mismatch(turn, action));
    };

    let taken = ctx.pool.remove(dice).ok_or(Rejection::DiceNotInPool(dice))?;
    turn.held = Some(taken);
    ctx.changes.drafted = Some(taken);
    ctx.changes.pool = true;
    Ok(ControllerState::Place)
}

fn place(turn: &mut Turn, ctx: &mut TurnContext<'_>, action: &PlayerAction) -> Result<ControllerState, Rejection> {
    let PlayerAction::Place { at } = *action else {
        return Err(mismatch(turn, action));
    };
    let dice = turn.held.ok_or(Rejection::NoDiceDrafted)?;

    ctx.standing.check(ctx.grid, dice, at).map_err(Rejection::Placement)?;

    ctx.grid.put(at, dice);
    turn.held = None;
    ctx.changes.cell(at);
    Ok(ControllerState::End)
}

fn end_turn(turn: &mut Turn, ctx: &mut TurnContext<'_>, _action: &PlayerAction) -> Result<ControllerState, Rejection> {
    if let Some(dice) = turn.held.take() {
        ctx.pool.push(dice);
        ctx.changes.pool = true;
        ctx.changes.held = true;
    }
    Ok(ControllerState::End)
}

fn use_tool_card(
    turn: &mut Turn,
    ctx: &mut TurnContext<'_>,
    action: &PlayerAction,
) -> Result<ControllerState, Rejection> {
    let PlayerAction::UseToolCard { card } = *action else {
        return Err(mismatch(turn, action));
    };
    if turn.tool_used.is_some() {
        return Err(Rejection::ToolCardUsedThisTurn);
    }

    let slot = ctx
        .tools
        .iter()
        .position(|tool| tool.id == card)
        .ok_or(Rejection::UnknownToolCard(card))?;
    let tool = &ctx.tools[slot];
    if tool.is_used() {
        return Err(Rejection::ToolCardAlreadyUsed(card));
    }
    if *ctx.tokens < tool.cost {
        return Err(Rejection::InsufficientTokens {
            required: tool.cost,
            available: *ctx.tokens,
        });
    }
    let cost = tool.cost;
    let effect = tool.effect.clone();

    EffectResolver::precondition(&effect, &effect_context(&mut turn.held, ctx))
        .map_err(Rejection::EffectPrecondition)?;

    let resume = if turn.held.is_some() { Resume::Place } else { Resume::Start };
    let snapshot = EffectSnapshot::capture(&effect_context(&mut turn.held, ctx));
    let activation = EffectResolver::activate(&effect, &mut effect_context(&mut turn.held, ctx))
        .map_err(Rejection::EffectPrecondition)?;

    *ctx.tokens -= cost;
    ctx.tools[slot].mark_used();
    turn.tool_used = Some(card);
    ctx.changes.tool_used = Some(card);

    Ok(match activation {
        Activation::Completed => resume.state(),
        Activation::AwaitingInput => ControllerState::ToolEffect(EffectState {
            card,
            effect,
            resume,
            progress: EffectProgress::default(),
            cost,
            snapshot,
        }),
    })
}

fn effect_step(
    turn: &mut Turn,
    ctx: &mut TurnContext<'_>,
    action: &PlayerAction,
) -> Result<ControllerState, Rejection> {
    let ControllerState::ToolEffect(active) = &turn.state else {
        return Err(mismatch(turn, action));
    };

    let outcome = EffectResolver::step(
        &active.effect,
        active.progress,
        action,
        &mut effect_context(&mut turn.held, ctx),
    )
    .map_err(Rejection::EffectFailed)?;

    Ok(match outcome {
        StepOutcome::Continue(progress) => ControllerState::ToolEffect(EffectState {
            progress,
            ..active.clone()
        }),
        StepOutcome::Completed => active.resume.state(),
        StepOutcome::Placed => ControllerState::End,
    })
}
