//! Game configuration.
//!
//! A `GameConfig` fixes the numbers a game is played with. Everything that
//! depends on the seated player count (turns per round, dice per round) is
//! derived, not configured.
//!
//! ```
//! use rust_dicedraft::core::GameConfig;
//!
//! let config = GameConfig::default().with_rounds(1).with_seed(7);
//! assert_eq!(config.number_of_rounds, 1);
//! assert_eq!(config.turns_per_round(2), 4);
//! assert_eq!(config.dice_per_round(2), 5);
//! ```

use serde::{Deserialize, Serialize};

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rounds in a game.
    pub number_of_rounds: usize,

    /// Seats available before `add_player` rejects with "room full". A game
    /// clamps this to 255.
    pub max_players: usize,

    /// Dice of each color in a fresh bag.
    pub dice_per_color: u32,

    /// Grid templates offered to each player during grid choice.
    pub grid_options_per_player: usize,

    /// Seed for every random stream of the game.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            number_of_rounds: 10,
            max_players: 4,
            dice_per_color: 18,
            grid_options_per_player: 4,
            seed: 42,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        assert!(rounds > 0, "Must have at least 1 round");
        self.number_of_rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        assert!(max > 0, "Must allow at least 1 player");
        assert!(max <= 255, "At most 255 players supported");
        self.max_players = max;
        self
    }

    #[must_use]
    pub fn with_dice_per_color(mut self, count: u32) -> Self {
        self.dice_per_color = count;
        self
    }

    #[must_use]
    pub fn with_grid_options(mut self, per_player: usize) -> Self {
        self.grid_options_per_player = per_player;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Turns in one round: every player drafts twice.
    #[must_use]
    pub fn turns_per_round(&self, player_count: usize) -> usize {
        player_count * 2
    }

    /// Dice drawn into the pool at the start of each round.
    #[must_use]
    pub fn dice_per_round(&self, player_count: usize) -> usize {
        player_count * 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.number_of_rounds, 10);
        assert_eq!(config.max_players, 4);
        assert_eq!(config.dice_per_color, 18);
        assert_eq!(config.grid_options_per_player, 4);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::default()
            .with_rounds(3)
            .with_max_players(2)
            .with_dice_per_color(5)
            .with_grid_options(2)
            .with_seed(99);

        assert_eq!(config.number_of_rounds, 3);
        assert_eq!(config.max_players, 2);
        assert_eq!(config.dice_per_color, 5);
        assert_eq!(config.grid_options_per_player, 2);
        assert_eq!(config.seed, 99);
    }

    #[test]
    fn test_derived_counts() {
        let config = GameConfig::default();
        assert_eq!(config.turns_per_round(4), 8);
        assert_eq!(config.dice_per_round(4), 9);
        assert_eq!(config.dice_per_round(1), 3);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"number_of_rounds": 2}"#).unwrap();
        assert_eq!(config.number_of_rounds, 2);
        assert_eq!(config.max_players, 4);
        assert_eq!(config.seed, 42);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 round")]
    fn test_zero_rounds() {
        let _ = GameConfig::default().with_rounds(0);
    }
}
