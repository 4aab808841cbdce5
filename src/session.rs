use log::{debug, info};

use crate::board::{Grid, Move, Player, Position};
use crate::config::{EngineConfig, Strategy};
use crate::error::Result;
use crate::movegen::{best_steal_move, max_area_move, Region};
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::search::eval;

/// One game from our side of the table.
///
/// The turn counter counts our own decisions only: `calculate_move` bumps it
/// once per call, opponent moves never touch it.
pub struct GameSession {
    pos: Position,
    first: bool,
    turn: u32,
    captures: u32,
    initial_sum: u32,
    last_opponent: Option<Move>,
    config: EngineConfig,
    searcher: Searcher,
}

impl GameSession {
    pub fn new(grid: Grid, first: bool, config: EngineConfig) -> Self {
        let initial_sum = grid.sum();
        let searcher = Searcher::new(eval::from_weights(config.eval));
        info!("new game {}x{} first={} strategy={:?} eval={}", grid.rows(), grid.cols(), first, config.strategy, searcher.evaluator().name());
        Self { pos: Position::new(grid), first, turn: 0, captures: 0, initial_sum, last_opponent: None, config, searcher }
    }

    pub fn position(&self) -> &Position { &self.pos }
    pub fn turn(&self) -> u32 { self.turn }
    pub fn is_first(&self) -> bool { self.first }
    pub fn last_opponent_move(&self) -> Option<Move> { self.last_opponent }
    pub fn captures(&self) -> u32 { self.captures }
    pub fn initial_sum(&self) -> u32 { self.initial_sum }
    pub fn config(&self) -> &EngineConfig { &self.config }

    /// Cells we own minus cells the opponent owns.
    pub fn score(&self) -> i32 { self.pos.territory().differential() }

    /// Search depth the next own move will use; `turn` counts moves already made.
    pub fn next_search_depth(&self) -> u32 { self.config.depth.depth_for(self.turn) }

    /// Picks our move, plays it on the internal board and returns it.
    pub fn calculate_move(&mut self, my_time_ms: i64, opp_time_ms: i64) -> Result<Move> {
        self.turn += 1;
        let mv = match self.config.strategy {
            Strategy::Negamax => self.search_move(my_time_ms),
            Strategy::Greedy => self.greedy_move(),
        };
        debug!("turn {} my_time={} opp_time={} -> {}", self.turn, my_time_ms, opp_time_ms, mv);
        self.play(mv, Player::Me)?;
        Ok(mv)
    }

    /// Applies the opponent's move. Returns the number of our cells it took.
    pub fn record_opponent_move(&mut self, mv: Move) -> Result<u32> {
        let stolen = self.play(mv, Player::Opponent)?;
        self.last_opponent = Some(mv);
        Ok(stolen)
    }

    fn play(&mut self, mv: Move, player: Player) -> Result<u32> {
        let record = self.pos.play_checked(mv, player)?;
        if !mv.is_pass() { self.captures += 1; }
        debug_assert_eq!(self.pos.grid().sum() + 10 * self.captures, self.initial_sum);
        Ok(record.stolen)
    }

    fn search_move(&mut self, my_time_ms: i64) -> Move {
        let params = SearchParams {
            max_depth: self.config.depth.depth_for(self.turn.saturating_sub(1)),
            movetime: Some(self.config.time.movetime(my_time_ms)),
            max_nodes: None,
            order_moves: self.config.order_moves,
        };
        let res = self.searcher.search_with_params(&mut self.pos, params);
        info!(
            "turn {} depth {}/{} score {} nodes {} aborted {} -> {}",
            self.turn, res.depth, params.max_depth, res.score, res.nodes, res.aborted, res.best
        );
        res.best
    }

    fn greedy_move(&self) -> Move {
        let grid = self.pos.grid();
        let quadrant = Region::quadrant(self.turn, grid, self.config.quadrant_margin);
        let biggest = || {
            max_area_move(grid, quadrant).or_else(|| max_area_move(grid, Region::full(grid)))
        };
        let pick = match self.last_opponent {
            Some(Move::Capture(opp)) if self.turn > self.config.opening_turns => {
                let around = Region::around(opp, self.config.steal_margin, grid);
                best_steal_move(grid, self.pos.territory(), around, self.config.steal_max_span, Player::Me).or_else(biggest)
            }
            _ => biggest(),
        };
        pick.map_or(Move::Pass, Move::Capture)
    }
}
