use crate::board::{Grid, Rect};
use crate::movegen::for_each_overlapping;

/// Returns true if, with `rect` already captured on `grid`, no legal capture
/// (by either side) overlaps it. Such a capture can never be stolen back.
pub fn is_safe_after_capture(grid: &Grid, rect: Rect) -> bool {
    !for_each_overlapping(grid, rect, |_| true)
}
