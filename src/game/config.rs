use std::{fs, ops::RangeInclusive, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{action::Direction, error::GameError, state::Grid};

/// Configuration for the game
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it changes:
///
/// ```rust
/// use ring_snake::game::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "grid_width": 12 }"#).unwrap();
/// assert_eq!(config.grid_width, 12);
/// assert_eq!(config.grid_height, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Heading of a freshly spawned snake
    pub start_direction: Direction,
    /// Fewest obstacles placed per game
    pub min_obstacles: usize,
    /// Most obstacles placed per game
    pub max_obstacles: usize,
    /// Keep the outermost ring of cells free of obstacles
    pub obstacles_exclude_border: bool,
    /// Points awarded per food eaten
    pub food_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            start_direction: Direction::Right,
            min_obstacles: 5,
            max_obstacles: 15,
            obstacles_exclude_border: true,
            food_score: 10,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Same grid, no obstacles at all
    pub fn without_obstacles(self) -> Self {
        Self {
            min_obstacles: 0,
            max_obstacles: 0,
            ..self
        }
    }

    pub fn obstacle_range(&self) -> RangeInclusive<usize> {
        self.min_obstacles..=self.max_obstacles
    }

    /// Grid described by this configuration
    pub fn grid(&self) -> Result<Grid, GameError> {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Check every value the engine relies on
    pub fn validate(&self) -> Result<(), GameError> {
        self.grid()?;
        if self.min_obstacles > self.max_obstacles {
            return Err(GameError::InvalidObstacleRange {
                min: self.min_obstacles,
                max: self.max_obstacles,
            });
        }
        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }
}
