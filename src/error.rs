use thiserror::Error;

use crate::board::Rect;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Rectangle with inverted corners or outside the grid.
    #[error("invalid rectangle ({r1}, {c1}, {r2}, {c2}) for a {rows}x{cols} grid")]
    InvalidRectangle { r1: i64, c1: i64, r2: i64, c2: i64, rows: usize, cols: usize },

    /// A real move that is not a legal capture on our copy of the grid.
    #[error("game state desync: {rect} is not a legal capture on the current grid")]
    GameStateDesync { rect: Rect },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("no game in progress")]
    NoSession,

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
