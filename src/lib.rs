// Rectangle-capture engine: board model, move generation, negamax search
pub mod board;
pub mod config;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod selfplay;
pub mod session;

pub use board::{Grid, Move, Player, Position, Rect};
pub use config::EngineConfig;
pub use error::EngineError;
pub use session::GameSession;
