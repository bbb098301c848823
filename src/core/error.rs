//! Error types.
//!
//! Two classes, kept apart so callers can react differently:
//!
//! - [`Rejection`]: an expected, recoverable refusal of a player action
//!   (illegal for the current state, constraint violated, not enough
//!   tokens...). Nothing was mutated and the controller did not advance.
//! - [`ContractViolation`]: the caller broke the engine's lifecycle contract
//!   (wrong game status, missing or malformed configuration). The engine
//!   does not try to recover.
//!
//! [`EngineError`] carries either one for operations that can fail both ways.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::ActionKind;
use super::dice::Dice;
use super::player::PlayerId;
use crate::cards::{ObjectiveCardId, ToolCardId};
use crate::game::{GameStatus, StateTag};
use crate::rules::Violation;

/// Why a tool effect could not start or could not finish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum EffectFailure {
    #[error("the effect needs a drafted dice")]
    NoHeldDice,
    #[error("the effect must be used before drafting")]
    DiceAlreadyDrafted,
    #[error("the draft pool is empty")]
    EmptyPool,
    #[error("the track holds no dice")]
    EmptyTrack,
    #[error("track slot {slot} has no dice at index {index}")]
    NoDiceOnTrack { slot: usize, index: usize },
    #[error("the grid holds no dice to move")]
    NothingToMove,
    #[error("no dice at ({row}, {col})")]
    NoDiceAtCell { row: usize, col: usize },
    #[error("dice value would leave 1..=6")]
    ValueOutOfRange,
    #[error("moved dice breaks placement: {0}")]
    Placement(Violation),
    #[error("the dice bag is empty")]
    BagEmpty,
}

/// A refused player action. The game state is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Rejection {
    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: PlayerId },

    #[error("{action} is not allowed while in {state}")]
    IllegalInState { state: StateTag, action: ActionKind },

    #[error("no dice drafted yet")]
    NoDiceDrafted,

    #[error("dice {0} is not in the draft pool")]
    DiceNotInPool(Dice),

    #[error("placement rejected: {0}")]
    Placement(Violation),

    #[error("a tool card was already used this turn")]
    ToolCardUsedThisTurn,

    #[error("{0} was already used")]
    ToolCardAlreadyUsed(ToolCardId),

    #[error("{0} is not in play")]
    UnknownToolCard(ToolCardId),

    #[error("tool card needs {required} tokens, player has {available}")]
    InsufficientTokens { required: u32, available: u32 },

    #[error("tool card cannot be used now: {0}")]
    EffectPrecondition(EffectFailure),

    #[error("tool effect failed: {0}")]
    EffectFailed(EffectFailure),

    #[error("the game already has {max} players")]
    RoomFull { max: usize },
}

/// The caller invoked an operation the engine's lifecycle does not allow.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("{operation} requires status {expected:?}, game is {actual:?}")]
    WrongStatus {
        operation: &'static str,
        expected: GameStatus,
        actual: GameStatus,
    },

    #[error("the game has no players")]
    NoPlayers,

    #[error("{required} grid templates required, {available} supplied")]
    NotEnoughGridTemplates { required: usize, available: usize },

    #[error("{0} has no grid")]
    MissingGrid(PlayerId),

    #[error("{0} has no private objective")]
    MissingPrivateObjective(PlayerId),

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("{players} players but only {available} private objectives")]
    NotEnoughPrivateObjectives { players: usize, available: usize },

    #[error("the game needs {needed} dice, the source holds {available}")]
    NotEnoughDice { needed: usize, available: usize },

    #[error("needed {needed} dice for the round, source yielded {drawn}")]
    DiceExhausted { needed: usize, drawn: usize },

    #[error("grid template {title:?} is malformed: {reason}")]
    MalformedTemplate { title: String, reason: String },

    #[error("no effect is registered for {0}")]
    UnboundToolCard(ToolCardId),

    #[error("no scorer is registered for {0}")]
    UnboundObjective(ObjectiveCardId),
}

/// Either class of failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

impl EngineError {
    /// The rejection category, if this was a recoverable refusal.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            EngineError::Rejected(r) => Some(*r),
            EngineError::Contract(_) => None,
        }
    }

    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, EngineError::Contract(_))
    }
}
