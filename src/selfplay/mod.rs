use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::{Grid, Move, Player};
use crate::config::{EngineConfig, TimeBudget};
use crate::error::{EngineError, Result};
use crate::session::GameSession;

/// Two configurations, `a` and `b`, play each other; colours alternate per game.
#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub rows: usize,
    pub cols: usize,
    pub seed: u64,
    pub max_plies: usize,
    pub movetime_ms: u64,
    pub a: EngineConfig,
    pub b: EngineConfig,
    /// Optional board list (one board per line, rows separated by spaces).
    /// Random boards are used when absent or empty.
    pub boards_path: Option<PathBuf>,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 10,
            rows: 10,
            cols: 17,
            seed: 42,
            max_plies: 400,
            movetime_ms: 100,
            a: EngineConfig::default(),
            b: EngineConfig::greedy(),
            boards_path: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub board: Vec<String>,
    pub a_first: bool,
    pub moves: Vec<[i64; 4]>,
    pub cells_a: i32,
    pub cells_b: i32,
    /// 1 when `a` owns more cells, -1 when `b` does, 0 on a tie.
    pub result: i8,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub games: usize,
    pub wins_a: usize,
    pub wins_b: usize,
    pub draws: usize,
    pub avg_margin_a: f64,
}

impl MatchReport {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut rep = MatchReport { games: records.len(), ..Default::default() };
        let mut margin = 0i64;
        for g in records {
            match g.result { 1 => rep.wins_a += 1, -1 => rep.wins_b += 1, _ => rep.draws += 1 }
            margin += (g.cells_a - g.cells_b) as i64;
        }
        if rep.games > 0 { rep.avg_margin_a = margin as f64 / rep.games as f64; }
        rep
    }
}

pub fn random_grid(rows: usize, cols: usize, rng: &mut SmallRng) -> Result<Grid> {
    let cells: Vec<Vec<u8>> = (0..rows).map(|_| (0..cols).map(|_| rng.gen_range(1..=9u8)).collect()).collect();
    Grid::from_rows(&cells)
}

pub fn load_boards<P: AsRef<Path>>(path: P) -> Result<Vec<Grid>> {
    let text = std::fs::read_to_string(path.as_ref())
        .map_err(|e| EngineError::Config(format!("{}: {}", path.as_ref().display(), e)))?;
    let mut out = Vec::new();
    for line in text.lines() {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') { continue; }
        let rows: Vec<&str> = raw.split_whitespace().collect();
        out.push(Grid::parse_rows(&rows)?);
    }
    Ok(out)
}

fn fixed_clock(mut cfg: EngineConfig, movetime_ms: u64) -> EngineConfig {
    cfg.time = TimeBudget { divisor: 1, safety_margin_ms: 0, min_ms: movetime_ms, max_ms: movetime_ms };
    cfg
}

/// Plays one game to two consecutive passes (or `max_plies`).
pub fn play_game(grid: Grid, a: &EngineConfig, b: &EngineConfig, a_first: bool, movetime_ms: u64, max_plies: usize) -> Result<GameRecord> {
    let board: Vec<String> = grid.to_rows().iter().map(|r| r.iter().map(|d| char::from(b'0' + d)).collect()).collect();
    let mut sa = GameSession::new(grid.clone(), a_first, fixed_clock(a.clone(), movetime_ms));
    let mut sb = GameSession::new(grid, !a_first, fixed_clock(b.clone(), movetime_ms));
    let clock = movetime_ms as i64;
    let mut moves = Vec::new();
    let mut a_to_move = a_first;
    let mut passes = 0;
    while passes < 2 && moves.len() < max_plies {
        let (mover, other) = if a_to_move { (&mut sa, &mut sb) } else { (&mut sb, &mut sa) };
        let mv = mover.calculate_move(clock, clock)?;
        other.record_opponent_move(mv)?;
        passes = if mv == Move::Pass { passes + 1 } else { 0 };
        moves.push(mv.to_ints());
        a_to_move = !a_to_move;
    }
    let territory = sa.position().territory();
    let (cells_a, cells_b) = (territory.count(Player::Me), territory.count(Player::Opponent));
    let result = (cells_a - cells_b).signum() as i8;
    debug!("game done: {} plies, a={} b={}", moves.len(), cells_a, cells_b);
    Ok(GameRecord { board, a_first, moves, cells_a, cells_b, result })
}

pub fn generate_games(params: &SelfPlayParams) -> Result<Vec<GameRecord>> {
    generate_games_with(params, |_| {})
}

/// Games run in parallel on the rayon pool; `on_game` fires as each finishes.
/// Per-game seeds make the output independent of scheduling.
pub fn generate_games_with<F>(params: &SelfPlayParams, on_game: F) -> Result<Vec<GameRecord>>
where
    F: Fn(&GameRecord) + Sync + Send,
{
    let boards = match params.boards_path { Some(ref p) => load_boards(p)?, None => Vec::new() };
    info!("self-play: {} games, {} preset boards, {}ms per move", params.games, boards.len(), params.movetime_ms);
    (0..params.games)
        .into_par_iter()
        .map(|gi| {
            let mut rng = SmallRng::seed_from_u64(params.seed ^ (gi as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
            let grid = if boards.is_empty() { random_grid(params.rows, params.cols, &mut rng)? } else { boards[gi % boards.len()].clone() };
            let rec = play_game(grid, &params.a, &params.b, gi % 2 == 0, params.movetime_ms, params.max_plies)?;
            on_game(&rec);
            Ok(rec)
        })
        .collect()
}

pub fn write_report<P: AsRef<Path>>(path: P, report: &MatchReport, records: &[GameRecord]) -> anyhow::Result<()> {
    let payload = serde_json::json!({ "summary": report, "games": records });
    std::fs::write(path, serde_json::to_string_pretty(&payload)?)?;
    Ok(())
}
