use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Closed cell range `[r1, r2] x [c1, c2]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub r1: usize,
    pub c1: usize,
    pub r2: usize,
    pub c2: usize,
}

impl Rect {
    /// Builds a rectangle from wire integers, rejecting negative or inverted corners.
    pub fn new(r1: i64, c1: i64, r2: i64, c2: i64, rows: usize, cols: usize) -> Result<Self> {
        let bad = EngineError::InvalidRectangle { r1, c1, r2, c2, rows, cols };
        if r1 < 0 || c1 < 0 || r2 < r1 || c2 < c1 { return Err(bad); }
        let rect = Rect { r1: r1 as usize, c1: c1 as usize, r2: r2 as usize, c2: c2 as usize };
        if !rect.fits(rows, cols) { return Err(bad); }
        Ok(rect)
    }

    pub fn fits(&self, rows: usize, cols: usize) -> bool {
        self.r1 <= self.r2 && self.c1 <= self.c2 && self.r2 < rows && self.c2 < cols
    }

    pub fn height(&self) -> usize { self.r2 - self.r1 + 1 }
    pub fn width(&self) -> usize { self.c2 - self.c1 + 1 }
    pub fn area(&self) -> usize { self.height() * self.width() }

    pub fn contains(&self, r: usize, c: usize) -> bool {
        r >= self.r1 && r <= self.r2 && c >= self.c1 && c <= self.c2
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.r2 < other.r1 || other.r2 < self.r1 || self.c2 < other.c1 || other.c2 < self.c1)
    }

    /// Row-major iterator over every cell in the rectangle.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (c1, c2) = (self.c1, self.c2);
        (self.r1..=self.r2).flat_map(move |r| (c1..=c2).map(move |c| (r, c)))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r1, self.c1, self.r2, self.c2)
    }
}

/// A turn: capture a rectangle or pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Capture(Rect),
    Pass,
}

pub const PASS_SENTINEL: [i64; 4] = [-1, -1, -1, -1];

impl Move {
    /// Parses the four wire integers; `-1 -1 -1 -1` is a pass.
    pub fn from_ints(v: [i64; 4], rows: usize, cols: usize) -> Result<Self> {
        if v == PASS_SENTINEL { return Ok(Move::Pass); }
        Rect::new(v[0], v[1], v[2], v[3], rows, cols).map(Move::Capture)
    }

    pub fn to_ints(&self) -> [i64; 4] {
        match *self {
            Move::Capture(r) => [r.r1 as i64, r.c1 as i64, r.r2 as i64, r.c2 as i64],
            Move::Pass => PASS_SENTINEL,
        }
    }

    pub fn rect(&self) -> Option<Rect> {
        match *self { Move::Capture(r) => Some(r), Move::Pass => None }
    }

    pub fn is_pass(&self) -> bool { matches!(self, Move::Pass) }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Capture(r) => write!(f, "{}", r),
            Move::Pass => write!(f, "-1 -1 -1 -1"),
        }
    }
}
