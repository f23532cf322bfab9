//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A host shell drives it one tick at a time and reads state back for display.

pub mod action;
pub mod arena;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use arena::Arena;
pub use config::GameConfig;
pub use engine::{CollisionType, GameEngine, GameStatus, Snapshot, StepInfo, StepResult};
pub use error::GameError;
pub use state::{Grid, Position, SnakeBody};
