//! Headless simulation mode
//!
//! Plays a number of games back to back with the [`Autopilot`] at the wheel,
//! collecting [`SessionStats`] as it goes. Nothing is drawn; progress goes to
//! the log and a summary is printed at the end.
//!
//! # Example
//!
//! ```rust
//! use ring_snake::game::GameConfig;
//! use ring_snake::modes::{SimulateConfig, SimulateMode};
//!
//! let config = SimulateConfig {
//!     games: 3,
//!     max_ticks: 200,
//!     seed: 7,
//!     ..SimulateConfig::new(GameConfig::small())
//! };
//! let mut mode = SimulateMode::new(config).unwrap();
//! let stats = mode.run().unwrap();
//! assert_eq!(stats.games_played(), 3);
//! ```

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::autopilot::Autopilot;
use crate::game::{GameConfig, GameEngine};
use crate::metrics::{GameOutcome, SessionStats};

/// Configuration for simulation mode
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    /// Number of games to play
    pub games: u32,

    /// Stop a game after this many ticks
    pub max_ticks: u32,

    /// Seed for obstacle and food placement
    pub seed: u64,

    /// Log a progress line every N games
    pub log_frequency: u32,

    /// Rolling window for averaged statistics
    pub stats_window: usize,

    /// Game configuration (grid size, obstacles, scoring)
    pub game_config: GameConfig,
}

impl SimulateConfig {
    pub fn new(game_config: GameConfig) -> Self {
        Self {
            games: 10,
            max_ticks: 10_000,
            seed: 0,
            log_frequency: 10,
            stats_window: 100,
            game_config,
        }
    }
}

/// Plays seeded games with the autopilot
pub struct SimulateMode {
    engine: GameEngine,
    autopilot: Autopilot,
    stats: SessionStats,
    config: SimulateConfig,
}

impl SimulateMode {
    pub fn new(config: SimulateConfig) -> Result<Self> {
        let engine = GameEngine::from_seed(config.game_config.clone(), config.seed)
            .context("Failed to set up game engine")?;
        let stats = SessionStats::new(config.stats_window)
            .context("Statistics window must hold at least one game")?;

        Ok(Self {
            engine,
            autopilot: Autopilot::new(),
            stats,
            config,
        })
    }

    /// Play every configured game and return the collected statistics
    pub fn run(&mut self) -> Result<&SessionStats> {
        for game in 1..=self.config.games {
            if game > 1 {
                self.engine.reset().context("Failed to reset game")?;
            }

            let outcome = self.run_game();
            let snake_len = self.engine.snake().len();
            self.stats
                .on_game_over(self.engine.score(), self.engine.ticks(), snake_len, outcome);

            info!(
                game,
                score = self.engine.score(),
                ticks = self.engine.ticks(),
                length = snake_len,
                ?outcome,
                "game finished"
            );

            if self.config.log_frequency > 0 && game % self.config.log_frequency == 0 {
                info!("[Game {}/{}] {}", game, self.config.games, self.stats.format_summary());
            }
        }

        Ok(&self.stats)
    }

    /// Play the current game until it ends or hits the tick limit
    fn run_game(&mut self) -> GameOutcome {
        while !self.engine.status().is_finished() {
            if self.engine.ticks() >= self.config.max_ticks {
                debug!(ticks = self.engine.ticks(), "tick limit reached");
                break;
            }

            let action = self.autopilot.choose(&self.engine);
            let result = self.engine.step(action);
            self.stats.on_step(&result);
        }

        GameOutcome::from_status(self.engine.status())
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Print simulation header information
    pub fn print_header(&self) {
        let game = &self.config.game_config;
        println!("{}", "=".repeat(70));
        println!("Ring Snake - headless simulation");
        println!("{}", "=".repeat(70));
        println!("Games: {}", self.config.games);
        println!("Grid: {}x{}", game.grid_width, game.grid_height);
        println!(
            "Obstacles: {}..={} (border {})",
            game.min_obstacles,
            game.max_obstacles,
            if game.obstacles_exclude_border { "kept clear" } else { "allowed" }
        );
        println!("Tick limit: {}", self.config.max_ticks);
        println!("Seed: {}", self.config.seed);
        println!("{}", "=".repeat(70));
        println!();
    }
}
