use serde::{Deserialize, Serialize};

use crate::board::{Grid, Rect, Territory};
use crate::search::safety::is_safe_after_capture;

/// Window bound. Weights are capped at [`MAX_WEIGHT`] and depth at
/// `config::MAX_DEPTH`, so no score on a board that fits in memory gets near it.
pub const INF_SCORE: i64 = 1 << 60;

/// Largest accepted magnitude for any [`EvalWeights`] field.
pub const MAX_WEIGHT: i32 = 1_000_000;

/// Scores a position for `Player::Me`. Implementations must be pure.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, territory: &Territory) -> i64;

    /// Extra credit for the mover, scored at the ply the capture is made.
    /// `grid` already has `rect` captured.
    fn move_bonus(&self, _grid: &Grid, _rect: Rect, _stolen: u32) -> i64 { 0 }

    fn name(&self) -> &'static str;
}

/// Our cells minus the opponent's.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerritoryDiff;

impl Evaluator for TerritoryDiff {
    fn evaluate(&self, territory: &Territory) -> i64 { territory.differential() as i64 }
    fn name(&self) -> &'static str { "territory" }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub cell: i32,
    pub steal_bonus: i32,
    pub safe_bonus: i32,
}

impl Default for EvalWeights {
    fn default() -> Self { Self { cell: 1, steal_bonus: 0, safe_bonus: 0 } }
}

impl EvalWeights {
    /// Steal-heavy weighting: taking a cell back is worth ten owned cells,
    /// a capture nobody can retake is worth thirty.
    pub fn aggressive() -> Self { Self { cell: 10, steal_bonus: 100, safe_bonus: 300 } }

    pub fn is_baseline(&self) -> bool { self.steal_bonus == 0 && self.safe_bonus == 0 }

    pub fn within_limits(&self) -> bool {
        [self.cell, self.steal_bonus, self.safe_bonus].iter().all(|w| w.unsigned_abs() <= MAX_WEIGHT as u32)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WeightedEval {
    pub weights: EvalWeights,
}

impl WeightedEval {
    pub fn new(weights: EvalWeights) -> Self { Self { weights } }
}

impl Evaluator for WeightedEval {
    fn evaluate(&self, territory: &Territory) -> i64 { self.weights.cell as i64 * territory.differential() as i64 }

    fn move_bonus(&self, grid: &Grid, rect: Rect, stolen: u32) -> i64 {
        let mut bonus = self.weights.steal_bonus as i64 * stolen as i64;
        if self.weights.safe_bonus != 0 && is_safe_after_capture(grid, rect) { bonus += self.weights.safe_bonus as i64; }
        bonus
    }

    fn name(&self) -> &'static str { "weighted" }
}

/// Baseline when the weights carry no move bonuses, weighted otherwise.
pub fn from_weights(weights: EvalWeights) -> Box<dyn Evaluator> {
    if weights.is_baseline() && weights.cell == 1 { Box::new(TerritoryDiff) } else { Box::new(WeightedEval::new(weights)) }
}
