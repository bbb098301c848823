//! The game: lifecycle, action routing, round bookkeeping and final scoring.
//!
//! ## Lifecycle
//!
//! ```text
//! AwaitingCards --set_cards--> AwaitingPlayers --begin_grid_choice-->
//! AwaitingGridChoice --start--> Playing --(last turn of last round)--> Ended
//! ```
//!
//! Status only moves forward. Calling an operation in the wrong status is a
//! [`ContractViolation`]; a refused player action is a [`Rejection`] and
//! leaves the game exactly as it was.
//!
//! ## Events
//!
//! Every accepted mutation queues [`GameEvent`]s carrying immutable
//! snapshots. Drain them with [`Game::drain_events`] or receive them on a
//! channel from [`Game::subscribe`].

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

use super::controller::{allowed_actions, ControllerState, StateTag, TurnContext};
use super::player::Player;
use super::round::Round;
use crate::cards::{
    CardRegistry, ObjectiveCardDefinition, PrivateObjectiveCard, PublicObjectiveCard, ToolCard,
    ToolCardDefinition,
};
use crate::core::{
    ActionKind, ActionRecord, ContractViolation, Dice, DiceColor, EngineError, GameConfig, GameRng,
    PlayerAction, PlayerId, PlayerMap, Rejection,
};
use crate::events::{ChangeSet, EventQueue, GameEvent};
use crate::grid::{Grid, GridTemplate};
use crate::rules::RuleChain;
use crate::scoring::{rank_players, score_grid, Ranking, ScoreBreakdown};
use crate::zones::{DiceBag, DiceSource, DraftPool, Track};

/// Where a game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    AwaitingCards,
    AwaitingPlayers,
    AwaitingGridChoice,
    Playing,
    Ended,
}

/// What an accepted action led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Same player, same turn, controller now in this state.
    Continue(StateTag),
    /// The turn ended and `player` is up.
    NextTurn { player: PlayerId },
    /// The round closed; `round` opened with `player` first.
    NextRound { round: usize, player: PlayerId },
    /// The last turn of the last round was played and scores are final.
    GameEnded,
}

/// One game, single writer.
///
/// ## Example
///
/// ```
/// use rust_dicedraft::cards::CardRegistry;
/// use rust_dicedraft::core::{Dice, DiceColor, GameConfig, PlayerAction};
/// use rust_dicedraft::game::{Game, GameStatus};
/// use rust_dicedraft::grid::{GridTemplate, Position};
/// use rust_dicedraft::zones::ScriptedDice;
///
/// let dice = ScriptedDice::new([
///     Dice::new(DiceColor::Red, 3),
///     Dice::new(DiceColor::Blue, 5),
///     Dice::new(DiceColor::Green, 1),
/// ]);
/// let mut game = Game::with_dice_source(GameConfig::default().with_rounds(1), dice);
///
/// game.set_cards(&CardRegistry::new(), &[], &[]).unwrap();
/// let ada = game.add_player("Ada").unwrap();
/// game.begin_grid_choice().unwrap();
/// game.assign_grid(ada, &GridTemplate::new("Plain", 4, 5, 3)).unwrap();
/// game.start().unwrap();
///
/// let red = Dice::new(DiceColor::Red, 3);
/// game.apply(ada, PlayerAction::Draft { dice: red }).unwrap();
/// game.apply(ada, PlayerAction::Place { at: Position::new(0, 0) }).unwrap();
/// game.apply(ada, PlayerAction::EndTurn).unwrap();
///
/// assert_eq!(game.status(), GameStatus::Ended);
/// assert_eq!(game.rankings().unwrap()[0].player, ada);
/// ```
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    status: GameStatus,
    players: Vec<Player>,
    tools: Vec<ToolCard>,
    publics: Vec<PublicObjectiveCard>,
    track: Track,
    round: Option<Round>,
    source: Box<dyn DiceSource>,
    /// Bag draws at round start.
    dice_rng: GameRng,
    /// Re-rolls and redraws made by tool effects.
    effect_rng: GameRng,
    /// Private objectives and grid options.
    deal_rng: GameRng,
    standing: RuleChain,
    events: EventQueue,
    history: Vector<ActionRecord>,
    scores: Option<PlayerMap<ScoreBreakdown>>,
    rankings: Vec<Ranking>,
}

fn violation(v: ContractViolation) -> ContractViolation {
    warn!(error = %v, "contract violation");
    v
}

impl Game {
    /// A game drawing from a fresh [`DiceBag`].
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let bag = DiceBag::new(config.dice_per_color);
        Self::with_dice_source(config, bag)
    }

    /// A game drawing round dice from `source`.
    ///
    /// `max_players` above 255 is clamped, since seat ids are a byte.
    #[must_use]
    pub fn with_dice_source(mut config: GameConfig, source: impl DiceSource + 'static) -> Self {
        let seat_limit = usize::from(u8::MAX);
        if config.max_players > seat_limit {
            warn!(requested = config.max_players, limit = seat_limit, "max_players clamped");
            config.max_players = seat_limit;
        }
        let root = GameRng::new(config.seed);
        Self {
            status: GameStatus::AwaitingCards,
            players: Vec::new(),
            tools: Vec::new(),
            publics: Vec::new(),
            track: Track::new(config.number_of_rounds),
            round: None,
            source: Box::new(source),
            dice_rng: root.for_context("dice"),
            effect_rng: root.for_context("effects"),
            deal_rng: root.for_context("deal"),
            standing: RuleChain::standard(),
            events: EventQueue::new(),
            history: Vector::new(),
            scores: None,
            rankings: Vec::new(),
            config,
        }
    }

    fn require(&self, operation: &'static str, expected: GameStatus) -> Result<(), ContractViolation> {
        if self.status == expected {
            return Ok(());
        }
        Err(violation(ContractViolation::WrongStatus {
            operation,
            expected,
            actual: self.status,
        }))
    }

    // === Setup ===

    /// Bind the tool cards and public objectives drawn for this game.
    ///
    /// Every definition must be bound in `registry`; otherwise nothing is
    /// stored and the status does not change.
    pub fn set_cards(
        &mut self,
        registry: &CardRegistry,
        tools: &[ToolCardDefinition],
        objectives: &[ObjectiveCardDefinition],
    ) -> Result<(), ContractViolation> {
        self.require("set_cards", GameStatus::AwaitingCards)?;

        let tools = tools
            .iter()
            .map(|def| registry.bind_tool(def))
            .collect::<Result<Vec<_>, _>>()
            .map_err(violation)?;
        let publics = objectives
            .iter()
            .map(|def| registry.bind_objective(def))
            .collect::<Result<Vec<_>, _>>()
            .map_err(violation)?;

        info!(tools = tools.len(), objectives = publics.len(), "cards set");
        self.tools = tools;
        self.publics = publics;
        self.status = GameStatus::AwaitingPlayers;
        Ok(())
    }

    /// Seat a player. Seats are handed out in join order.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, EngineError> {
        self.require("add_player", GameStatus::AwaitingPlayers)?;
        if self.players.len() >= self.config.max_players {
            return Err(Rejection::RoomFull {
                max: self.config.max_players,
            }
            .into());
        }

        let Ok(seat) = u8::try_from(self.players.len()) else {
            return Err(Rejection::RoomFull {
                max: self.config.max_players,
            }
            .into());
        };
        let id = PlayerId(seat);
        let name = name.into();
        info!(player = %id, %name, "player joined");
        self.events.emit(GameEvent::PlayerJoined {
            player: id,
            name: name.clone(),
        });
        self.players.push(Player::new(id, name));
        Ok(id)
    }

    /// Close the roster and deal every player a distinct private objective
    /// color.
    pub fn begin_grid_choice(&mut self) -> Result<(), ContractViolation> {
        self.require("begin_grid_choice", GameStatus::AwaitingPlayers)?;
        if self.players.is_empty() {
            return Err(violation(ContractViolation::NoPlayers));
        }
        if self.players.len() > DiceColor::ALL.len() {
            return Err(violation(ContractViolation::NotEnoughPrivateObjectives {
                players: self.players.len(),
                available: DiceColor::ALL.len(),
            }));
        }

        let mut colors = DiceColor::ALL;
        self.deal_rng.shuffle(&mut colors);
        for (player, color) in self.players.iter_mut().zip(colors) {
            player.set_private_objective(PrivateObjectiveCard::new(color));
        }

        info!(players = self.players.len(), "grid choice started");
        self.status = GameStatus::AwaitingGridChoice;
        Ok(())
    }

    /// Shuffle `templates` and give each player
    /// [`GameConfig::grid_options_per_player`] of them to choose from.
    pub fn deal_grid_options(
        &mut self,
        templates: &[GridTemplate],
    ) -> Result<PlayerMap<Vec<GridTemplate>>, ContractViolation> {
        self.require("deal_grid_options", GameStatus::AwaitingGridChoice)?;

        let per_player = self.config.grid_options_per_player;
        let required = per_player * self.players.len();
        if templates.len() < required {
            return Err(violation(ContractViolation::NotEnoughGridTemplates {
                required,
                available: templates.len(),
            }));
        }
        for template in templates {
            Grid::from_template(template).map_err(violation)?;
        }

        let mut deck: Vec<&GridTemplate> = templates.iter().collect();
        self.deal_rng.shuffle(&mut deck);

        let dealt = PlayerMap::new(self.players.len(), |player| {
            let start = player.index() * per_player;
            deck[start..start + per_player]
                .iter()
                .map(|template| (*template).clone())
                .collect::<Vec<_>>()
        });
        for player in &mut self.players {
            player.set_grid_options(dealt[player.id()].clone());
        }
        Ok(dealt)
    }

    /// Bind `player`'s grid. A player's first binding sticks; later calls
    /// return `Ok(false)` and change nothing.
    pub fn assign_grid(&mut self, player: PlayerId, template: &GridTemplate) -> Result<bool, ContractViolation> {
        self.require("assign_grid", GameStatus::AwaitingGridChoice)?;
        let grid = Grid::from_template(template).map_err(violation)?;
        let seat = self
            .players
            .get_mut(player.index())
            .ok_or_else(|| violation(ContractViolation::UnknownPlayer(player)))?;

        let bound = seat.bind_grid(grid);
        if bound {
            info!(player = %player, grid = %template.title, tokens = seat.tokens(), "grid assigned");
        }
        Ok(bound)
    }

    /// Begin play with round 0.
    pub fn start(&mut self) -> Result<(), ContractViolation> {
        self.require("start", GameStatus::AwaitingGridChoice)?;
        if self.players.is_empty() {
            return Err(violation(ContractViolation::NoPlayers));
        }
        if let Some(player) = self.players.iter().find(|p| p.grid().is_none()) {
            return Err(violation(ContractViolation::MissingGrid(player.id())));
        }
        if let Some(player) = self.players.iter().find(|p| p.private_objective().is_none()) {
            return Err(violation(ContractViolation::MissingPrivateObjective(player.id())));
        }
        // Rounds never return dice to the source, so every round is paid for up front.
        let needed = self
            .config
            .number_of_rounds
            .saturating_mul(self.config.dice_per_round(self.players.len()));
        let available = self.source.remaining();
        if available < needed {
            return Err(violation(ContractViolation::NotEnoughDice { needed, available }));
        }

        self.start_round(0)?;
        self.status = GameStatus::Playing;
        info!(
            players = self.players.len(),
            rounds = self.config.number_of_rounds,
            tools = self.tools.len(),
            "game started"
        );
        Ok(())
    }

    // === Play ===

    /// Apply one player action for the current turn.
    pub fn apply(&mut self, player: PlayerId, action: PlayerAction) -> Result<ActionOutcome, EngineError> {
        self.require("apply", GameStatus::Playing)?;
        let status = self.status;
        let Some(round) = self.round.as_mut() else {
            return Err(violation(ContractViolation::WrongStatus {
                operation: "apply",
                expected: GameStatus::Playing,
                actual: status,
            })
            .into());
        };

        let expected = round.current_player();
        if player != expected {
            return Err(Rejection::NotYourTurn { expected }.into());
        }
        let seat = self
            .players
            .get_mut(player.index())
            .ok_or_else(|| violation(ContractViolation::UnknownPlayer(player)))?;
        let (grid, tokens) = seat
            .table_mut()
            .ok_or_else(|| violation(ContractViolation::MissingGrid(player)))?;

        let mut changes = ChangeSet::new();
        let (turn, pool) = round.turn_and_pool_mut();
        let mut ctx = TurnContext {
            player,
            grid,
            tokens,
            tools: &mut self.tools,
            pool,
            track: &mut self.track,
            source: self.source.as_mut(),
            rng: &mut self.effect_rng,
            standing: &self.standing,
            changes: &mut changes,
        };
        if let Err(rejection) = turn.apply(&mut ctx, &action) {
            debug!(player = %player, ?action, %rejection, "action rejected");
            // Only an unwound tool effect leaves something to report.
            if !changes.is_empty() {
                self.emit_changes(player, &changes);
            }
            return Err(rejection.into());
        }

        let record = ActionRecord::new(player, action, round.index(), round.turn_index());
        let state = round.turn().state().tag();
        debug!(player = %player, ?action, state = %state, "action accepted");

        self.history.push_back(record);
        self.emit_changes(player, &changes);

        if state == StateTag::End {
            Ok(self.advance()?)
        } else {
            Ok(ActionOutcome::Continue(state))
        }
    }

    /// End the current turn whatever state it is in, for a session layer
    /// whose player timed out. A held die goes back to the pool; a running
    /// effect is abandoned (its card stays spent).
    pub fn skip_turn(&mut self) -> Result<ActionOutcome, ContractViolation> {
        self.require("skip_turn", GameStatus::Playing)?;
        let status = self.status;
        let Some(round) = self.round.as_mut() else {
            return Err(violation(ContractViolation::WrongStatus {
                operation: "skip_turn",
                expected: GameStatus::Playing,
                actual: status,
            }));
        };

        let player = round.current_player();
        let (turn, pool) = round.turn_and_pool_mut();
        let returned = turn.abort();
        if let Some(dice) = returned {
            pool.push(dice);
            self.events.emit(GameEvent::HeldDiceChanged { player, dice: None });
            self.events.emit(GameEvent::DraftPoolChanged {
                pool: round.pool().snapshot(),
            });
        }
        // Logged as the player ending their own turn.
        let record = ActionRecord::new(player, PlayerAction::EndTurn, round.index(), round.turn_index());
        self.history.push_back(record);
        info!(player = %player, returned = ?returned, "turn skipped");

        self.advance()
    }

    fn emit_changes(&mut self, player: PlayerId, changes: &ChangeSet) {
        let seat = self.players.get(player.index());

        if let Some(card) = changes.tool_used {
            self.events.emit(GameEvent::ToolCardUsed {
                player,
                card,
                tokens_left: seat.map_or(0, Player::tokens),
            });
        }
        if let Some(card) = changes.tool_refunded {
            self.events.emit(GameEvent::ToolCardRefunded {
                player,
                card,
                tokens_left: seat.map_or(0, Player::tokens),
            });
        }
        if let Some(dice) = changes.drafted {
            self.events.emit(GameEvent::DiceDrafted { player, dice });
        }
        if changes.held {
            self.events.emit(GameEvent::HeldDiceChanged {
                player,
                dice: self.round.as_ref().and_then(|r| r.turn().held()),
            });
        }
        if let Some(grid) = seat.and_then(Player::grid) {
            for &at in &changes.cells {
                self.events.emit(GameEvent::GridCellUpdated {
                    player,
                    at,
                    dice: grid.dice_at(at),
                });
            }
        }
        if changes.pool {
            if let Some(round) = &self.round {
                self.events.emit(GameEvent::DraftPoolChanged {
                    pool: round.pool().snapshot(),
                });
            }
        }
        if changes.track {
            self.events.emit(GameEvent::TrackChanged {
                track: self.track.snapshot(),
            });
        }
    }

    // === Rounds ===

    /// Draw the round's dice and open round `index`. Returns its first
    /// player. Nothing changes if the source cannot supply enough dice.
    fn start_round(&mut self, index: usize) -> Result<PlayerId, ContractViolation> {
        let player_count = self.players.len();
        let needed = self.config.dice_per_round(player_count);
        let available = self.source.remaining();
        if available < needed {
            return Err(violation(ContractViolation::DiceExhausted {
                needed,
                drawn: available,
            }));
        }

        let mut dice: Vec<Dice> = Vec::with_capacity(needed);
        while dice.len() < needed {
            let Some(drawn) = self.source.draw(&mut self.dice_rng) else {
                let drawn = dice.len();
                for back in dice {
                    self.source.give_back(back);
                }
                return Err(violation(ContractViolation::DiceExhausted { needed, drawn }));
            };
            dice.push(drawn);
        }

        let first = PlayerId((index % player_count) as u8);
        let pool = DraftPool::from_dice(dice);
        let snapshot = pool.snapshot();
        self.round = Some(Round::new(index, PlayerId::draft_order(player_count, first), pool));

        info!(round = index, first_player = %first, dice = needed, "round started");
        self.events.emit(GameEvent::RoundStarted {
            round: index,
            first_player: first,
        });
        self.events.emit(GameEvent::DraftPoolChanged { pool: snapshot });
        self.events.emit(GameEvent::TurnAdvanced {
            round: index,
            turn: 0,
            player: first,
        });
        Ok(first)
    }

    /// Move past a finished turn: next turn, next round, or final scoring.
    fn advance(&mut self) -> Result<ActionOutcome, ContractViolation> {
        let status = self.status;
        let Some(round) = self.round.as_mut() else {
            return Err(violation(ContractViolation::WrongStatus {
                operation: "advance",
                expected: GameStatus::Playing,
                actual: status,
            }));
        };

        if let Some(player) = round.advance() {
            let (index, turn) = (round.index(), round.turn_index());
            debug!(round = index, turn, player = %player, "turn advanced");
            self.events.emit(GameEvent::TurnAdvanced {
                round: index,
                turn,
                player,
            });
            return Ok(ActionOutcome::NextTurn { player });
        }

        let index = round.index();
        let leftovers = round.drain_pool();
        let count = leftovers.len();
        if !self.track.fill(index, leftovers) {
            warn!(round = index, "track slot already filled");
        }
        info!(round = index, leftovers = count, "round closed");
        self.events.emit(GameEvent::DraftPoolChanged { pool: Vector::new() });
        self.events.emit(GameEvent::TrackChanged {
            track: self.track.snapshot(),
        });

        let next = index + 1;
        if next < self.config.number_of_rounds {
            let player = self.start_round(next)?;
            Ok(ActionOutcome::NextRound { round: next, player })
        } else {
            self.finish()?;
            Ok(ActionOutcome::GameEnded)
        }
    }

    fn finish(&mut self) -> Result<(), ContractViolation> {
        let mut breakdowns = Vec::with_capacity(self.players.len());
        for player in &self.players {
            let grid = player
                .grid()
                .ok_or_else(|| violation(ContractViolation::MissingGrid(player.id())))?;
            let private = player
                .private_objective()
                .ok_or_else(|| violation(ContractViolation::MissingPrivateObjective(player.id())))?;
            breakdowns.push(score_grid(grid, &self.publics, private, player.tokens()));
        }

        let scores = PlayerMap::from_vec(breakdowns);
        let rankings = rank_players(&scores);
        for ranking in &rankings {
            info!(place = ranking.place, player = %ranking.player, score = ranking.score, "final standing");
        }

        self.round = None;
        self.status = GameStatus::Ended;
        self.events.emit(GameEvent::RankingsFinalized {
            rankings: rankings.clone(),
        });
        self.scores = Some(scores);
        self.rankings = rankings;
        info!("game ended");
        Ok(())
    }

    // === Queries ===

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players.get(player.index())
    }

    #[must_use]
    pub fn grid(&self, player: PlayerId) -> Option<&Grid> {
        self.player(player).and_then(Player::grid)
    }

    #[must_use]
    pub fn tokens(&self, player: PlayerId) -> Option<u32> {
        self.player(player).map(Player::tokens)
    }

    #[must_use]
    pub fn tool_cards(&self) -> &[ToolCard] {
        &self.tools
    }

    #[must_use]
    pub fn public_objectives(&self) -> &[PublicObjectiveCard] {
        &self.publics
    }

    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// The active round; `None` before start and after the end.
    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn pool(&self) -> Option<&DraftPool> {
        self.round.as_ref().map(Round::pool)
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.round.as_ref().map(Round::current_player)
    }

    #[must_use]
    pub fn held_dice(&self) -> Option<Dice> {
        self.round.as_ref().and_then(|r| r.turn().held())
    }

    #[must_use]
    pub fn controller_state(&self) -> Option<&ControllerState> {
        self.round.as_ref().map(|r| r.turn().state())
    }

    /// Action kinds the current player may try next. Empty outside play.
    #[must_use]
    pub fn allowed_actions(&self) -> SmallVec<[ActionKind; 8]> {
        self.controller_state().map(allowed_actions).unwrap_or_default()
    }

    /// The placement chain used outside rule-relaxing effects.
    #[must_use]
    pub fn standing_chain(&self) -> &RuleChain {
        &self.standing
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn dice_remaining(&self) -> usize {
        self.source.remaining()
    }

    /// Final scores per player. Only available once the game ended.
    pub fn scores(&self) -> Result<&PlayerMap<ScoreBreakdown>, ContractViolation> {
        self.require("scores", GameStatus::Ended)?;
        self.scores.as_ref().ok_or_else(|| {
            violation(ContractViolation::WrongStatus {
                operation: "scores",
                expected: GameStatus::Ended,
                actual: self.status,
            })
        })
    }

    /// Final standings, best first. Only available once the game ended.
    pub fn rankings(&self) -> Result<&[Ranking], ContractViolation> {
        self.require("rankings", GameStatus::Ended)?;
        Ok(&self.rankings)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.rankings.first().map(|r| r.player)
    }

    // === Events ===

    /// Take every queued event, oldest first. Only events emitted while no
    /// subscriber was attached are queued.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        self.events.pending()
    }

    /// Receive every event emitted from now on.
    ///
    /// While any receiver is alive, events go to the channels only and
    /// [`Game::drain_events`] stays empty, so a subscribed game never
    /// accumulates a backlog. Events queued before subscribing stay queued.
    /// Dropping every receiver switches back to queueing.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ToolCardId;
    use crate::effects::ToolEffect;
    use crate::grid::Position;
    use crate::zones::ScriptedDice;

    fn assert_send<T: Send>() {}

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register_tool(ToolCardId::new(1), ToolEffect::FlipDrafted);
        registry
    }

    fn seated(players: usize, rounds: usize, dice: Vec<Dice>) -> Game {
        let config = GameConfig::default().with_rounds(rounds);
        let mut game = Game::with_dice_source(config, ScriptedDice::new(dice));
        game.set_cards(&registry(), &[ToolCardDefinition::new(ToolCardId::new(1), "Grinding Stone")], &[])
            .unwrap();
        for i in 0..players {
            game.add_player(format!("p{i}")).unwrap();
        }
        game.begin_grid_choice().unwrap();
        for player in PlayerId::all(players) {
            game.assign_grid(player, &GridTemplate::new("Plain", 4, 5, 3)).unwrap();
        }
        game
    }

    fn red(value: u8) -> Dice {
        Dice::new(DiceColor::Red, value)
    }

    #[test]
    fn test_game_is_send() {
        assert_send::<Game>();
    }

    #[test]
    fn test_wrong_status_is_contract_violation() {
        let mut game = Game::new(GameConfig::default());
        let err = game.add_player("Ada").unwrap_err();
        assert!(err.is_contract_violation());

        let err = game.start().unwrap_err();
        assert!(matches!(
            err,
            ContractViolation::WrongStatus {
                operation: "start",
                expected: GameStatus::AwaitingGridChoice,
                actual: GameStatus::AwaitingCards,
            }
        ));
        assert!(game.scores().is_err());
    }

    #[test]
    fn test_unbound_card_rejected_atomically() {
        let mut game = Game::new(GameConfig::default());
        let err = game
            .set_cards(&registry(), &[ToolCardDefinition::new(ToolCardId::new(7), "Lens Cutter")], &[])
            .unwrap_err();
        assert_eq!(err, ContractViolation::UnboundToolCard(ToolCardId::new(7)));
        assert_eq!(game.status(), GameStatus::AwaitingCards);
        assert!(game.tool_cards().is_empty());
    }

    #[test]
    fn test_room_full() {
        let mut game = Game::new(GameConfig::default().with_max_players(2));
        game.set_cards(&registry(), &[], &[]).unwrap();
        game.add_player("a").unwrap();
        game.add_player("b").unwrap();

        let err = game.add_player("c").unwrap_err();
        assert_eq!(err.rejection(), Some(Rejection::RoomFull { max: 2 }));
        assert_eq!(game.player_count(), 2);
    }

    #[test]
    fn test_max_players_fits_seat_ids() {
        let config: GameConfig = serde_json::from_str(r#"{"max_players": 1000}"#).unwrap();
        let mut game = Game::new(config);
        assert_eq!(game.config().max_players, 255);

        game.set_cards(&registry(), &[], &[]).unwrap();
        for i in 0..255 {
            game.add_player(format!("p{i}")).unwrap();
        }
        assert_eq!(game.players().last().map(Player::id), Some(PlayerId(254)));

        let err = game.add_player("one too many").unwrap_err();
        assert_eq!(err.rejection(), Some(Rejection::RoomFull { max: 255 }));
        assert_eq!(game.player_count(), 255);
    }

    #[test]
    fn test_private_objectives_are_distinct() {
        let mut game = Game::new(GameConfig::default());
        game.set_cards(&registry(), &[], &[]).unwrap();
        for name in ["a", "b", "c", "d"] {
            game.add_player(name).unwrap();
        }
        game.begin_grid_choice().unwrap();

        let mut colors: Vec<DiceColor> = game
            .players()
            .iter()
            .filter_map(|p| p.private_objective().map(|card| card.color))
            .collect();
        colors.sort_by_key(|c| c.index());
        colors.dedup();
        assert_eq!(colors.len(), 4);
    }

    #[test]
    fn test_deal_grid_options() {
        let mut game = seated(2, 1, Vec::new());
        let templates: Vec<GridTemplate> = (0..8)
            .map(|i| GridTemplate::new(format!("g{i}"), 4, 5, 3))
            .collect();

        let err = game.deal_grid_options(&templates[..7]).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::NotEnoughGridTemplates {
                required: 8,
                available: 7
            }
        );

        let dealt = game.deal_grid_options(&templates).unwrap();
        let mut titles: Vec<&str> = dealt
            .iter()
            .flat_map(|(_, options)| options.iter().map(|t| t.title.as_str()))
            .collect();
        assert_eq!(titles.len(), 8);
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), 8);
        assert_eq!(game.players()[0].grid_options().len(), 4);
    }

    #[test]
    fn test_start_needs_grids() {
        let mut game = Game::new(GameConfig::default());
        game.set_cards(&registry(), &[], &[]).unwrap();
        game.add_player("a").unwrap();
        game.begin_grid_choice().unwrap();

        assert_eq!(game.start().unwrap_err(), ContractViolation::MissingGrid(PlayerId(0)));
        assert_eq!(game.status(), GameStatus::AwaitingGridChoice);
    }

    #[test]
    fn test_start_needs_enough_dice() {
        let mut game = seated(2, 1, vec![red(1), red(2)]);
        let err = game.start().unwrap_err();
        assert_eq!(err, ContractViolation::NotEnoughDice { needed: 5, available: 2 });
        assert_eq!(game.status(), GameStatus::AwaitingGridChoice);
        assert_eq!(game.dice_remaining(), 2);
    }

    #[test]
    fn test_start_needs_dice_for_every_round() {
        // Enough for round 0, not for round 1.
        let mut game = seated(1, 2, (1..=3).map(red).collect());
        game.drain_events();
        let err = game.start().unwrap_err();
        assert_eq!(err, ContractViolation::NotEnoughDice { needed: 6, available: 3 });
        assert_eq!(game.status(), GameStatus::AwaitingGridChoice);
        assert!(game.round().is_none());
        assert!(game.pending_events().is_empty());
        assert_eq!(game.dice_remaining(), 3);
    }

    #[test]
    fn test_full_bag_covers_a_full_table() {
        let mut game = Game::new(GameConfig::default());
        game.set_cards(&registry(), &[], &[]).unwrap();
        for name in ["a", "b", "c", "d"] {
            game.add_player(name).unwrap();
        }
        game.begin_grid_choice().unwrap();
        for player in PlayerId::all(4) {
            game.assign_grid(player, &GridTemplate::new("Plain", 4, 5, 3)).unwrap();
        }

        game.start().unwrap();
        assert_eq!(game.dice_remaining(), 90 - 9);
    }

    #[test]
    fn test_not_your_turn() {
        let mut game = seated(2, 1, (1..=5).map(red).collect());
        game.start().unwrap();

        let err = game
            .apply(PlayerId(1), PlayerAction::Draft { dice: red(1) })
            .unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(Rejection::NotYourTurn { expected: PlayerId(0) })
        );
        assert_eq!(game.pool().map(DraftPool::len), Some(5));
    }

    #[test]
    fn test_skip_turn_returns_held_dice() {
        let mut game = seated(2, 1, (1..=5).map(red).collect());
        game.start().unwrap();

        game.apply(PlayerId(0), PlayerAction::Draft { dice: red(2) }).unwrap();
        assert_eq!(game.pool().map(DraftPool::len), Some(4));

        let outcome = game.skip_turn().unwrap();
        assert_eq!(outcome, ActionOutcome::NextTurn { player: PlayerId(1) });
        assert_eq!(game.pool().map(DraftPool::len), Some(5));
        assert_eq!(game.held_dice(), None);
    }

    #[test]
    fn test_skipped_turn_is_recorded() {
        let mut game = seated(2, 1, (1..=5).map(red).collect());
        game.start().unwrap();

        game.apply(PlayerId(0), PlayerAction::Draft { dice: red(2) }).unwrap();
        game.skip_turn().unwrap();
        game.skip_turn().unwrap();

        let history: Vec<ActionRecord> = game.history().iter().copied().collect();
        assert_eq!(
            history,
            vec![
                ActionRecord::new(PlayerId(0), PlayerAction::Draft { dice: red(2) }, 0, 0),
                ActionRecord::new(PlayerId(0), PlayerAction::EndTurn, 0, 0),
                ActionRecord::new(PlayerId(1), PlayerAction::EndTurn, 0, 1),
            ]
        );
        assert_eq!(game.current_player(), Some(PlayerId(1)));
    }

    #[test]
    fn test_events_follow_accepted_actions() {
        let mut game = seated(1, 2, (1..=6).map(red).collect());
        game.start().unwrap();
        game.drain_events();

        game.apply(PlayerId(0), PlayerAction::Draft { dice: red(3) }).unwrap();
        let drained = game.drain_events();
        assert_eq!(
            drained[0],
            GameEvent::DiceDrafted {
                player: PlayerId(0),
                dice: red(3)
            }
        );
        assert!(matches!(drained[1], GameEvent::DraftPoolChanged { ref pool } if pool.len() == 2));

        let _ = game.apply(PlayerId(0), PlayerAction::Place { at: Position::new(1, 1) });
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_subscribed_game_keeps_no_backlog() {
        let mut game = seated(1, 2, (1..=6).map(red).collect());
        let rx = game.subscribe();
        game.start().unwrap();

        while game.status() == GameStatus::Playing {
            game.apply(PlayerId(0), PlayerAction::EndTurn).unwrap();
        }

        assert!(game.pending_events().is_empty());
        let received: Vec<GameEvent> = rx.try_iter().collect();
        assert!(matches!(received.first(), Some(GameEvent::RoundStarted { round: 0, .. })));
        assert!(matches!(received.last(), Some(GameEvent::RankingsFinalized { .. })));
    }

    #[test]
    fn test_round_rotation() {
        let mut game = seated(2, 2, (1..=6).chain(1..=4).map(red).collect());
        game.start().unwrap();
        assert_eq!(game.current_player(), Some(PlayerId(0)));

        for player in [0, 1, 1] {
            let outcome = game.apply(PlayerId(player), PlayerAction::EndTurn).unwrap();
            assert!(matches!(outcome, ActionOutcome::NextTurn { .. }));
        }
        let outcome = game.apply(PlayerId(0), PlayerAction::EndTurn).unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::NextRound {
                round: 1,
                player: PlayerId(1)
            }
        );
        assert_eq!(game.track().slot(0).map(|slot| slot.len()), Some(5));
        assert_eq!(game.history().len(), 4);
    }
}
