use thiserror::Error;

use crate::ring_buffer::CapacityError;

/// Errors raised while setting up a game. Nothing fails once play has started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("grid must be at least 1x1 and fit in i32 coordinates, got {width}x{height}")]
    InvalidGrid { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("snake lives on a {width}x{height} grid but the game grid is {expected_width}x{expected_height}")]
    GridMismatch {
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },

    #[error("snake body needs at least one cell")]
    EmptyBody,

    #[error("snake body of {len} cells does not fit a grid of {capacity} cells")]
    BodyTooLong { len: usize, capacity: usize },

    #[error("obstacle count range {min}..={max} is empty")]
    InvalidObstacleRange { min: usize, max: usize },

    #[error(transparent)]
    Capacity(#[from] CapacityError),
}
