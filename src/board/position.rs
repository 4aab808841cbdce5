use crate::board::{Grid, Move, Player, Rect, Territory};
use crate::error::{EngineError, Result};
use crate::rules;

/// Everything needed to take a move back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub player: Player,
    /// Cells that belonged to `player.other()` before the capture.
    pub stolen: u32,
    prior: Vec<(u8, Option<Player>)>,
    was_passed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    grid: Grid,
    territory: Territory,
    passed: bool,
}

impl Position {
    pub fn new(grid: Grid) -> Self {
        let territory = Territory::new(grid.rows(), grid.cols());
        Self { grid, territory, passed: false }
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn territory(&self) -> &Territory { &self.territory }
    pub fn rows(&self) -> usize { self.grid.rows() }
    pub fn cols(&self) -> usize { self.grid.cols() }

    /// Whether the most recent applied move was a pass.
    pub fn last_was_pass(&self) -> bool { self.passed }

    pub fn is_valid(&self, rect: Rect) -> bool { rules::is_valid(&self.grid, rect) }

    /// Captures without any legality check. Search-internal; the caller only
    /// feeds rectangles produced by the move generator.
    pub fn apply(&mut self, mv: Move, player: Player) -> MoveRecord {
        let was_passed = self.passed;
        let rect = match mv {
            Move::Pass => {
                self.passed = true;
                return MoveRecord { mv, player, stolen: 0, prior: Vec::new(), was_passed };
            }
            Move::Capture(rect) => rect,
        };
        debug_assert!(rect.fits(self.rows(), self.cols()), "rectangle {} outside grid", rect);
        let victim = Some(player.other());
        let mut prior = Vec::with_capacity(rect.area());
        let mut stolen = 0u32;
        for (r, c) in rect.cells() {
            let owner = self.territory.get(r, c);
            prior.push((self.grid.get(r, c), owner));
            if owner == victim { stolen += 1; }
            self.grid.set(r, c, 0);
            self.territory.set(r, c, Some(player));
        }
        self.passed = false;
        MoveRecord { mv, player, stolen, prior, was_passed }
    }

    /// Restores the cells touched by `record`. Records must be undone in
    /// reverse order of application.
    pub fn undo(&mut self, record: MoveRecord) {
        if let Move::Capture(rect) = record.mv {
            for ((r, c), (value, owner)) in rect.cells().zip(record.prior) {
                self.grid.set(r, c, value);
                self.territory.set(r, c, owner);
            }
        }
        self.passed = record.was_passed;
    }

    /// Applies a move received from outside the engine. The rectangle must be
    /// inside the grid and a legal capture on the current cells.
    pub fn play_checked(&mut self, mv: Move, player: Player) -> Result<MoveRecord> {
        if let Move::Capture(rect) = mv {
            rules::check_rect(&self.grid, rect)?;
            if !self.is_valid(rect) { return Err(EngineError::GameStateDesync { rect }); }
        }
        Ok(self.apply(mv, player))
    }
}
