//! One-call setup of a standard game.

use super::catalog::{objective_definitions, registry, tool_definitions};
use super::templates::grid_templates;
use crate::core::{EngineError, GameConfig, GameRng};
use crate::game::Game;

/// Builds a [`Game`] already in `Playing`: cards drawn, players seated,
/// every player on the first grid they were dealt.
///
/// ```
/// use rust_dicedraft::game::GameStatus;
/// use rust_dicedraft::games::standard::StandardGameBuilder;
///
/// let game = StandardGameBuilder::new()
///     .player("Ada")
///     .player("Grace")
///     .build()
///     .unwrap();
///
/// assert_eq!(game.status(), GameStatus::Playing);
/// assert_eq!(game.tool_cards().len(), 3);
/// assert_eq!(game.pool().map(|p| p.len()), Some(5));
/// ```
#[derive(Clone, Debug)]
pub struct StandardGameBuilder {
    config: GameConfig,
    players: Vec<String>,
    tool_cards: usize,
    public_objectives: usize,
}

impl Default for StandardGameBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default().with_grid_options(2),
            players: Vec::new(),
            tool_cards: 3,
            public_objectives: 3,
        }
    }
}

impl StandardGameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.players.push(name.into());
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config = self.config.with_seed(seed);
        self
    }

    #[must_use]
    pub fn tool_cards(mut self, count: usize) -> Self {
        self.tool_cards = count;
        self
    }

    #[must_use]
    pub fn public_objectives(mut self, count: usize) -> Self {
        self.public_objectives = count;
        self
    }

    /// Run the whole setup sequence.
    pub fn build(self) -> Result<Game, EngineError> {
        let mut rng = GameRng::new(self.config.seed).for_context("catalog");

        let mut tools = tool_definitions();
        rng.shuffle(&mut tools);
        tools.truncate(self.tool_cards);

        let mut objectives = objective_definitions();
        rng.shuffle(&mut objectives);
        objectives.truncate(self.public_objectives);

        let mut game = Game::new(self.config);
        game.set_cards(&registry(), &tools, &objectives)?;
        for name in self.players {
            game.add_player(name)?;
        }
        game.begin_grid_choice()?;

        let dealt = game.deal_grid_options(&grid_templates())?;
        for (player, options) in dealt.iter() {
            if let Some(first) = options.first() {
                game.assign_grid(player, first)?;
            }
        }

        game.start()?;
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ContractViolation, PlayerId};
    use crate::game::GameStatus;

    #[test]
    fn test_build_two_players() {
        let game = StandardGameBuilder::new().player("a").player("b").seed(9).build().unwrap();

        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.public_objectives().len(), 3);
        for player in PlayerId::all(game.player_count()) {
            let seat = game.player(player).unwrap();
            let grid = seat.grid().unwrap();
            assert_eq!(seat.tokens(), grid.difficulty());
            assert_eq!(seat.grid_options().len(), 2);
        }
    }

    #[test]
    fn test_same_seed_same_setup() {
        let a = StandardGameBuilder::new().player("a").seed(3).build().unwrap();
        let b = StandardGameBuilder::new().player("a").seed(3).build().unwrap();

        assert_eq!(a.tool_cards(), b.tool_cards());
        assert_eq!(a.pool(), b.pool());
    }

    #[test]
    fn test_no_players() {
        let err = StandardGameBuilder::new().build().unwrap_err();
        assert_eq!(err, EngineError::from(ContractViolation::NoPlayers));
    }

    #[test]
    fn test_too_many_players_for_templates() {
        let err = StandardGameBuilder::new()
            .config(GameConfig::default())
            .player("a")
            .player("b")
            .player("c")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Contract(ContractViolation::NotEnoughGridTemplates { required: 12, .. })
        ));
    }
}
