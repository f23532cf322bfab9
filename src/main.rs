use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ring_snake::game::GameConfig;
use ring_snake::modes::{SimulateConfig, SimulateMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ring_snake")]
#[command(version, about = "Snake game core built on a ring buffer")]
struct Cli {
    /// Run mode (only 'simulate' is available headless)
    #[arg(long, default_value = "simulate")]
    mode: Mode,

    /// JSON game config; grid flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Play without obstacles
    #[arg(long)]
    no_obstacles: bool,

    /// Number of games to simulate
    #[arg(long, default_value = "10")]
    games: u32,

    /// Tick limit per game
    #[arg(long, default_value = "10000")]
    max_ticks: u32,

    /// Seed for obstacle and food placement
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Log a progress summary every N games (0 disables it)
    #[arg(long, default_value = "10")]
    log_frequency: u32,

    /// Number of recent games averaged in the summary
    #[arg(long, default_value = "100")]
    stats_window: usize,

    /// Log every game event
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Autopilot plays seeded games and reports statistics
    Simulate,
}

/// Filter used when `RUST_LOG` is not set
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn game_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if cli.no_obstacles {
        config = config.without_obstacles();
    }

    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

fn simulate_config(cli: &Cli, game_config: GameConfig) -> SimulateConfig {
    SimulateConfig {
        games: cli.games,
        max_ticks: cli.max_ticks,
        seed: cli.seed,
        log_frequency: cli.log_frequency,
        stats_window: cli.stats_window,
        game_config,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let game_config = game_config(&cli)?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Simulate => {
            let mut mode = SimulateMode::new(simulate_config(&cli, game_config))?;
            mode.print_header();
            let stats = mode.run()?;

            println!("Simulation complete!");
            println!("{}", stats.format_summary());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_shows_progress() {
        assert_eq!(default_filter(false), "info");
        assert_eq!(default_filter(true), "debug");
    }

    #[test]
    fn test_defaults_match_simulate_config() {
        let cli = Cli::try_parse_from(["ring_snake"]).unwrap();
        let config = simulate_config(&cli, GameConfig::default());
        let defaults = SimulateConfig::new(GameConfig::default());

        assert_eq!(config.games, defaults.games);
        assert_eq!(config.max_ticks, defaults.max_ticks);
        assert_eq!(config.seed, defaults.seed);
        assert_eq!(config.log_frequency, defaults.log_frequency);
        assert_eq!(config.stats_window, defaults.stats_window);
    }

    #[test]
    fn test_logging_flags_reach_simulation() {
        let cli = Cli::try_parse_from([
            "ring_snake",
            "--log-frequency",
            "0",
            "--stats-window",
            "25",
            "--width",
            "12",
            "--no-obstacles",
        ])
        .unwrap();
        let game = game_config(&cli).unwrap();
        let config = simulate_config(&cli, game);

        assert_eq!(config.log_frequency, 0);
        assert_eq!(config.stats_window, 25);
        assert_eq!(config.game_config.grid_width, 12);
        assert_eq!(config.game_config.max_obstacles, 0);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let cli = Cli::try_parse_from(["ring_snake", "--height", "0"]).unwrap();
        assert!(game_config(&cli).is_err());
    }
}
