use thiserror::Error;

use crate::config::{MAX_GRID_HEIGHT, MAX_GRID_WIDTH};

/// Errors produced by the grid, spawner and settings layers.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum GameError {
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("cell ({x}, {y}) is not free")]
    CellOccupied { x: i32, y: i32 },

    #[error("no free cell left for an item")]
    BoardFull,

    #[error(
        "grid {width}x{height} is out of range, need 3x3 up to {}x{}",
        MAX_GRID_WIDTH,
        MAX_GRID_HEIGHT
    )]
    InvalidGridSize { width: u16, height: u16 },

    #[error("movement interval must be greater than zero")]
    InvalidInterval,

    #[error("collision force must be a finite, non-negative number")]
    InvalidForce,

    #[error("settings: {0}")]
    Settings(String),
}
