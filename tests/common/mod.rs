//! Shared helpers for integration tests.
//!
//! Logging is quiet by default. Set `TEST_LOG` (or `RUST_LOG`) to see the
//! engine's tracing output:
//!
//! ```bash
//! TEST_LOG=debug cargo test --test game_flow_tests
//! ```

#![allow(dead_code)]

use std::sync::OnceLock;

use rust_dicedraft::cards::{CardRegistry, ToolCardDefinition};
use rust_dicedraft::core::{Dice, DiceColor, GameConfig, PlayerId};
use rust_dicedraft::game::Game;
use rust_dicedraft::grid::GridTemplate;
use rust_dicedraft::zones::ScriptedDice;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install a test subscriber once per test binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn dice(color: DiceColor, value: u8) -> Dice {
    Dice::new(color, value)
}

/// A game in `AwaitingGridChoice` whose rounds draw from `script`, every
/// player bound to a blank 4x5 grid of the given difficulty.
pub fn seated_game(
    registry: &CardRegistry,
    tools: &[ToolCardDefinition],
    players: usize,
    rounds: usize,
    difficulty: u32,
    script: Vec<Dice>,
) -> Game {
    let config = GameConfig::default().with_rounds(rounds);
    let mut game = Game::with_dice_source(config, ScriptedDice::new(script));
    game.set_cards(registry, tools, &[]).unwrap();
    for i in 0..players {
        game.add_player(format!("player {i}")).unwrap();
    }
    game.begin_grid_choice().unwrap();
    for player in PlayerId::all(players) {
        game.assign_grid(player, &GridTemplate::new("Blank", 4, 5, difficulty))
            .unwrap();
    }
    game
}
