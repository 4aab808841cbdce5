pub mod grid;
pub mod position;
pub mod rect;
pub mod territory;

pub use grid::Grid;
pub use position::{MoveRecord, Position};
pub use rect::{Move, Rect, PASS_SENTINEL};
pub use territory::{Player, Territory};
