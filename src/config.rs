use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::search::eval::{EvalWeights, MAX_WEIGHT};

/// Deepest search any schedule may ask for.
pub const MAX_DEPTH: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Depth-scheduled negamax with alpha-beta.
    Negamax,
    /// No lookahead: biggest capture early or after an opponent pass,
    /// otherwise the capture that takes back the most cells.
    Greedy,
}

impl std::str::FromStr for Strategy {
    type Err = EngineError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "negamax" | "search" => Ok(Strategy::Negamax),
            "greedy" => Ok(Strategy::Greedy),
            other => Err(EngineError::Config(format!("unknown strategy {:?}", other))),
        }
    }
}

/// Search depth keyed by the number of own moves already made (0 on our
/// first move). Up to `steps[i].0` moves use `steps[i].1`; past the last
/// step the depth grows by one per move up to `cap`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthSchedule {
    pub steps: Vec<(u32, u32)>,
    pub cap: u32,
    /// Overrides the table when set.
    pub fixed: Option<u32>,
}

impl Default for DepthSchedule {
    fn default() -> Self {
        Self { steps: vec![(5, 2), (9, 3), (12, 4), (14, 5)], cap: 8, fixed: None }
    }
}

impl DepthSchedule {
    pub fn fixed(depth: u32) -> Self { Self { fixed: Some(depth), ..Self::default() } }

    pub fn depth_for(&self, moves_made: u32) -> u32 {
        if let Some(d) = self.fixed { return d.max(1); }
        let cap = self.cap.max(1);
        for &(max_turn, depth) in &self.steps {
            if moves_made <= max_turn { return depth.clamp(1, cap); }
        }
        match self.steps.last() {
            Some(&(last_turn, depth)) => depth.saturating_add(moves_made - last_turn).clamp(1, cap),
            None => cap,
        }
    }
}

/// Share of the remaining clock spent on one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBudget {
    pub divisor: u64,
    pub safety_margin_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for TimeBudget {
    fn default() -> Self { Self { divisor: 10, safety_margin_ms: 30, min_ms: 5, max_ms: 2_000 } }
}

impl TimeBudget {
    pub fn movetime(&self, my_time_ms: i64) -> Duration {
        let remaining = my_time_ms.max(0) as u64;
        let share = (remaining / self.divisor.max(1)).saturating_sub(self.safety_margin_ms);
        Duration::from_millis(share.clamp(self.min_ms, self.max_ms.max(self.min_ms)))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy: Strategy,
    pub eval: EvalWeights,
    pub depth: DepthSchedule,
    pub time: TimeBudget,
    pub order_moves: bool,
    /// Greedy: own turns that always go for the biggest capture.
    pub opening_turns: u32,
    /// Greedy: widening of the turn's quadrant.
    pub quadrant_margin: usize,
    /// Greedy: widening of the opponent's last rectangle when stealing.
    pub steal_margin: usize,
    /// Greedy: longest side of a steal candidate.
    pub steal_max_span: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Negamax,
            eval: EvalWeights::default(),
            depth: DepthSchedule::default(),
            time: TimeBudget::default(),
            order_moves: true,
            opening_turns: 4,
            quadrant_margin: 2,
            steal_margin: 3,
            steal_max_span: 8,
        }
    }
}

impl EngineConfig {
    pub fn greedy() -> Self { Self { strategy: Strategy::Greedy, ..Self::default() } }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| EngineError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| EngineError::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.time.divisor == 0 { return Err(EngineError::Config("time.divisor must be positive".into())); }
        if self.depth.cap == 0 { return Err(EngineError::Config("depth.cap must be positive".into())); }
        if self.depth.cap > MAX_DEPTH || self.depth.fixed.map_or(false, |d| d > MAX_DEPTH) {
            return Err(EngineError::Config(format!("search depth above {}", MAX_DEPTH)));
        }
        if !self.eval.within_limits() {
            return Err(EngineError::Config(format!("eval weights must lie within +/-{}", MAX_WEIGHT)));
        }
        if self.steal_max_span == 0 { return Err(EngineError::Config("steal_max_span must be positive".into())); }
        if self.depth.steps.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(EngineError::Config("depth.steps turns must be increasing".into()));
        }
        Ok(())
    }
}
