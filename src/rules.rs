use crate::board::{Grid, Rect};
use crate::error::{EngineError, Result};

pub const TARGET_SUM: u32 = 10;

const TOP: u8 = 1 << 0;
const BOTTOM: u8 = 1 << 1;
const LEFT: u8 = 1 << 2;
const RIGHT: u8 = 1 << 3;
const ALL_SIDES: u8 = TOP | BOTTOM | LEFT | RIGHT;

/// A rectangle is a legal capture when its non-zero cells sum to exactly 10
/// and each of its four bounding lines holds at least one non-zero cell.
#[inline]
pub fn is_valid(grid: &Grid, rect: Rect) -> bool {
    debug_assert!(rect.fits(grid.rows(), grid.cols()), "rectangle {} outside {}x{} grid", rect, grid.rows(), grid.cols());
    let mut sum = 0u32;
    let mut sides = 0u8;
    for r in rect.r1..=rect.r2 {
        for c in rect.c1..=rect.c2 {
            let v = grid.get(r, c);
            if v == 0 { continue; }
            sum += v as u32;
            if sum > TARGET_SUM { return false; }
            if r == rect.r1 { sides |= TOP; }
            if r == rect.r2 { sides |= BOTTOM; }
            if c == rect.c1 { sides |= LEFT; }
            if c == rect.c2 { sides |= RIGHT; }
        }
    }
    sum == TARGET_SUM && sides == ALL_SIDES
}

/// Bounds check for rectangles arriving from outside the engine.
pub fn check_rect(grid: &Grid, rect: Rect) -> Result<()> {
    if rect.fits(grid.rows(), grid.cols()) { return Ok(()); }
    Err(EngineError::InvalidRectangle {
        r1: rect.r1 as i64,
        c1: rect.c1 as i64,
        r2: rect.r2 as i64,
        c2: rect.c2 as i64,
        rows: grid.rows(),
        cols: grid.cols(),
    })
}
