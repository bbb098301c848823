//! # rust-dicedraft
//!
//! A turn engine for a dice-drafting board game: players draft dice from a
//! shared pool and place them on personal grids under placement rules,
//! spend tokens on single-use tool cards, and are scored on public and
//! private objectives at the end.
//!
//! ## Design Principles
//!
//! 1. **Atomic actions**: every player action is either fully applied or
//!    refused with a categorized [`Rejection`] and no mutation.
//!
//! 2. **Rules as data**: placement rules are a composable chain of
//!    predicates, tool effects are data interpreted by a resolver, and
//!    objectives are pluggable scorers.
//!
//! 3. **Single writer**: a [`Game`] is synchronous and owns all of its
//!    state. Games are `Send`; observers get immutable snapshots through
//!    events.
//!
//! ## Modules
//!
//! - `core`: dice, players, actions, configuration, RNG, errors
//! - `grid`: cells, constraints, grids and their templates
//! - `rules`: the placement rule chain
//! - `zones`: draft pool, round track, dice bag
//! - `cards`: tool and objective cards, identity registry
//! - `effects`: tool effect definitions and resolver
//! - `scoring`: objective scorers, final score, rankings
//! - `events`: outbound state-change events
//! - `game`: turn controller, rounds, game lifecycle
//! - `games`: ready-made standard content

pub mod core;
pub mod grid;
pub mod rules;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod scoring;
pub mod events;
pub mod game;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionRecord, ContractViolation, Dice, DiceColor, EffectFailure, EngineError,
    GameConfig, GameRng, PlayerAction, PlayerId, PlayerMap, Rejection,
};

pub use crate::grid::{Cell, Constraint, Grid, GridTemplate, Position};

pub use crate::rules::{PlacementPredicate, PlacementRule, RuleChain, Violation};

pub use crate::zones::{DiceBag, DiceSource, DraftPool, ScriptedDice, Track};

pub use crate::cards::{
    CardRegistry, ObjectiveCardDefinition, ObjectiveCardId, PrivateObjectiveCard,
    PublicObjectiveCard, ToolCard, ToolCardDefinition, ToolCardId,
};

pub use crate::effects::{EffectResolver, InputShape, ToolEffect};

pub use crate::scoring::{PublicObjective, Ranking, ScoreBreakdown};

pub use crate::events::{EventQueue, GameEvent};

pub use crate::game::{ActionOutcome, ControllerState, Game, GameStatus, StateTag};
