use crate::board::{Grid, Player, Rect, Territory};
use crate::rules::{self, TARGET_SUM};

/// Half-open search window `[r0, r1) x [c0, c1)`, always clipped to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub r0: usize,
    pub r1: usize,
    pub c0: usize,
    pub c1: usize,
}

impl Region {
    pub fn full(grid: &Grid) -> Self {
        Self { r0: 0, r1: grid.rows(), c0: 0, c1: grid.cols() }
    }

    /// The opponent's rectangle grown by `margin` cells on every side.
    pub fn around(rect: Rect, margin: usize, grid: &Grid) -> Self {
        Self {
            r0: rect.r1.saturating_sub(margin),
            r1: (rect.r2 + margin + 1).min(grid.rows()),
            c0: rect.c1.saturating_sub(margin),
            c1: (rect.c2 + margin + 1).min(grid.cols()),
        }
    }

    /// Turn 1 sees the whole board; later turns rotate through the four
    /// quadrants by `turn % 4` (upper-left, upper-right, lower-left, lower-right),
    /// each widened by `margin`.
    pub fn quadrant(turn: u32, grid: &Grid, margin: usize) -> Self {
        let (rows, cols) = (grid.rows(), grid.cols());
        if turn <= 1 { return Self::full(grid); }
        let (hr, hc) = ((rows + 1) / 2, (cols + 1) / 2);
        let (r0, r1, c0, c1) = match turn % 4 {
            0 => (0, hr, 0, hc),
            1 => (0, hr, hc, cols),
            2 => (hr, rows, 0, hc),
            _ => (hr, rows, hc, cols),
        };
        Self {
            r0: r0.saturating_sub(margin),
            r1: (r1 + margin).min(rows),
            c0: c0.saturating_sub(margin),
            c1: (c1 + margin).min(cols),
        }
    }

    pub fn height(&self) -> usize { self.r1.saturating_sub(self.r0) }
    pub fn width(&self) -> usize { self.c1.saturating_sub(self.c0) }
    pub fn is_empty(&self) -> bool { self.height() == 0 || self.width() == 0 }
}

/// Visits every legal rectangle inside `region` whose height and width are at
/// most `max_span`, in (r1, r2, c1, c2) ascending order. The callback returns
/// `true` to stop early. Returns whether the walk was stopped.
pub fn for_each_legal_bounded<F: FnMut(Rect) -> bool>(grid: &Grid, region: Region, max_span: usize, mut f: F) -> bool {
    if region.is_empty() || max_span == 0 { return false; }
    let mut col_sum = vec![0u32; grid.cols()];
    for r1 in region.r0..region.r1 {
        col_sum.iter_mut().for_each(|s| *s = 0);
        let r_last = r1.saturating_add(max_span).min(region.r1);
        for r2 in r1..r_last {
            for c in region.c0..region.c1 { col_sum[c] += grid.get(r2, c) as u32; }
            for c1 in region.c0..region.c1 {
                let c_last = c1.saturating_add(max_span).min(region.c1);
                let mut sum = 0u32;
                for c2 in c1..c_last {
                    sum += col_sum[c2];
                    // sums only grow to the right
                    if sum > TARGET_SUM { break; }
                    if sum < TARGET_SUM { continue; }
                    let rect = Rect { r1, c1, r2, c2 };
                    if rules::is_valid(grid, rect) && f(rect) { return true; }
                }
            }
        }
    }
    false
}

/// Visits every legal rectangle that shares at least one cell with `target`,
/// in (r1, r2, c1, c2) order. Starts are bounded by `target`'s bottom-right
/// corner and ends by its top-left, so nothing else is generated.
pub fn for_each_overlapping<F: FnMut(Rect) -> bool>(grid: &Grid, target: Rect, mut f: F) -> bool {
    debug_assert!(target.fits(grid.rows(), grid.cols()));
    let mut col_sum = vec![0u32; grid.cols()];
    for r1 in 0..=target.r2 {
        col_sum.iter_mut().for_each(|s| *s = 0);
        for r2 in r1..grid.rows() {
            for (c, s) in col_sum.iter_mut().enumerate() { *s += grid.get(r2, c) as u32; }
            if r2 < target.r1 { continue; }
            for c1 in 0..=target.c2 {
                let mut sum = 0u32;
                for c2 in c1..grid.cols() {
                    sum += col_sum[c2];
                    if sum > TARGET_SUM { break; }
                    if c2 < target.c1 || sum < TARGET_SUM { continue; }
                    let rect = Rect { r1, c1, r2, c2 };
                    if rules::is_valid(grid, rect) && f(rect) { return true; }
                }
            }
        }
    }
    false
}

pub fn for_each_legal<F: FnMut(Rect) -> bool>(grid: &Grid, region: Region, f: F) -> bool {
    for_each_legal_bounded(grid, region, usize::MAX, f)
}

/// All legal rectangles in deterministic (r1, r2, c1, c2) order.
pub fn legal_moves(grid: &Grid, region: Region) -> Vec<Rect> {
    let mut moves = Vec::new();
    for_each_legal(grid, region, |rect| { moves.push(rect); false });
    moves
}

pub fn has_legal_move(grid: &Grid, region: Region) -> bool {
    for_each_legal(grid, region, |_| true)
}

/// First legal rectangle on a walk from the largest area down; always a
/// maximum-area capture within `region`.
pub fn max_area_move(grid: &Grid, region: Region) -> Option<Rect> {
    let (h_max, w_max) = (region.height(), region.width());
    for area in (1..=h_max * w_max).rev() {
        for h in (1..=h_max).rev() {
            if area % h != 0 { continue; }
            let w = area / h;
            if w > w_max { continue; }
            for r1 in region.r0..=region.r1 - h {
                for c1 in region.c0..=region.c1 - w {
                    let rect = Rect { r1, c1, r2: r1 + h - 1, c2: c1 + w - 1 };
                    if rules::is_valid(grid, rect) { return Some(rect); }
                }
            }
        }
    }
    None
}

/// Height-then-width descent that skips every shape not larger than the best
/// area found so far. Finds a maximum-area capture, not necessarily the same
/// one as [`max_area_move`].
pub fn max_area_move_pruned(grid: &Grid, region: Region) -> Option<Rect> {
    let mut best: Option<Rect> = None;
    let mut best_area = 0usize;
    for h in (1..=region.height()).rev() {
        for w in (1..=region.width()).rev() {
            if h * w <= best_area { break; }
            for r1 in region.r0..=region.r1 - h {
                for c1 in region.c0..=region.c1 - w {
                    let rect = Rect { r1, c1, r2: r1 + h - 1, c2: c1 + w - 1 };
                    if rect.area() > best_area && rules::is_valid(grid, rect) {
                        best_area = rect.area();
                        best = Some(rect);
                    }
                }
            }
        }
    }
    best
}

pub fn count_owned(territory: &Territory, rect: Rect, player: Player) -> u32 {
    rect.cells().filter(|&(r, c)| territory.get(r, c) == Some(player)).count() as u32
}

/// Legal rectangle in `region` that takes the most cells from `mover`'s
/// opponent, larger area breaking ties. Any legal rectangle beats none.
pub fn best_steal_move(grid: &Grid, territory: &Territory, region: Region, max_span: usize, mover: Player) -> Option<Rect> {
    let victim = mover.other();
    let mut best: Option<(Rect, u32)> = None;
    for_each_legal_bounded(grid, region, max_span, |rect| {
        let steal = count_owned(territory, rect, victim);
        let better = match best {
            None => true,
            Some((b, s)) => steal > s || (steal == s && rect.area() > b.area()),
        };
        if better { best = Some((rect, steal)); }
        false
    });
    best.map(|(r, _)| r)
}
