use thiserror::Error;

use super::state::Position;

/// Errors raised by board setup and item placement
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Every cell is occupied, so nothing more can be placed
    #[error("no free cell left on the board after {attempts} random attempts")]
    BoardFull { attempts: u32 },
    /// The configuration cannot describe a playable board
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// An item was staged on a cell the snake already covers
    #[error("cell ({}, {}) is covered by the snake", .0.x, .0.y)]
    CellTaken(Position),
}
