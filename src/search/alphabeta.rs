use std::cmp::Reverse;
use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Move, Player, Position, Rect};
use crate::movegen::{legal_moves, Region};
use crate::search::eval::{Evaluator, TerritoryDiff, INF_SCORE};

/// Nodes between deadline checks.
const TIME_CHECK_MASK: u64 = 0xFF;

#[derive(Default, Debug, Clone, Copy)]
pub struct SearchParams {
    pub max_depth: u32,
    pub movetime: Option<Duration>,
    pub max_nodes: Option<u64>,
    /// Try larger captures first. Changes which of several equal moves wins,
    /// never the value.
    pub order_moves: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best: Move,
    pub score: i64,
    pub nodes: u64,
    /// Deepest fully completed iteration.
    pub depth: u32,
    pub aborted: bool,
}

pub struct Searcher {
    evaluator: Box<dyn Evaluator>,
    nodes: u64,
    node_limit: u64,
    deadline: Option<Instant>,
    aborted: bool,
    max_depth: u32,
    order_moves: bool,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(Box::new(TerritoryDiff)) }
}

impl Searcher {
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            evaluator,
            nodes: 0,
            node_limit: u64::MAX,
            deadline: None,
            aborted: false,
            max_depth: 0,
            order_moves: false,
        }
    }

    pub fn evaluator(&self) -> &dyn Evaluator { self.evaluator.as_ref() }
    pub fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator>) { self.evaluator = evaluator; }
    pub fn nodes(&self) -> u64 { self.nodes }

    /// Fixed-depth search with no time or node limit.
    pub fn search_depth(&mut self, pos: &mut Position, depth: u32) -> SearchResult {
        let params = SearchParams { max_depth: depth, ..SearchParams::default() };
        self.search_with_params(pos, params)
    }

    /// Iterative deepening from depth 1 up to `params.max_depth`. `pos` is
    /// left exactly as it was on entry.
    pub fn search_with_params(&mut self, pos: &mut Position, params: SearchParams) -> SearchResult {
        self.nodes = 0;
        self.aborted = false;
        self.node_limit = params.max_nodes.unwrap_or(u64::MAX);
        self.deadline = params.movetime.map(|d| Instant::now() + d);
        self.order_moves = params.order_moves;

        let root_moves = legal_moves(pos.grid(), Region::full(pos.grid()));
        let Some(&first) = root_moves.first() else {
            let score = self.evaluator.evaluate(pos.territory());
            return SearchResult { best: Move::Pass, score, nodes: self.nodes, depth: 0, aborted: false };
        };

        let mut best = Move::Capture(first);
        let mut best_score = -INF_SCORE;
        let mut completed = 0u32;
        for d in 1..=params.max_depth.max(1) {
            self.max_depth = d;
            let (score, mv) = self.negamax(pos, 0, -INF_SCORE, INF_SCORE, 1);
            if self.aborted {
                // A partial first iteration still ranks the root moves it finished.
                if completed == 0 && !mv.is_pass() { best = mv; best_score = score; }
                break;
            }
            completed = d;
            best = mv;
            best_score = score;
            debug!("depth {} score {} best {} nodes {}", d, score, mv, self.nodes);
            if let Some(dl) = self.deadline { if Instant::now() >= dl { break; } }
        }
        SearchResult { best, score: best_score, nodes: self.nodes, depth: completed, aborted: self.aborted }
    }

    fn out_of_budget(&mut self) -> bool {
        if self.aborted { return true; }
        if self.nodes >= self.node_limit { self.aborted = true; }
        if self.nodes & TIME_CHECK_MASK == 0 {
            if let Some(dl) = self.deadline { if Instant::now() >= dl { self.aborted = true; } }
        }
        self.aborted
    }

    fn terminal(&self, pos: &Position, color: i32) -> (i64, Move) {
        (color as i64 * self.evaluator.evaluate(pos.territory()), Move::Pass)
    }

    fn negamax(&mut self, pos: &mut Position, depth: u32, mut alpha: i64, beta: i64, color: i32) -> (i64, Move) {
        self.nodes += 1;
        if self.out_of_budget() || depth >= self.max_depth { return self.terminal(pos, color); }

        let mut moves = legal_moves(pos.grid(), Region::full(pos.grid()));
        if moves.is_empty() { return self.terminal(pos, color); }
        if self.order_moves { moves.sort_by_key(|r| Reverse(r.area())); }

        let mover = Player::from_sign(color);
        let mut best_value = i64::MIN;
        let mut best_move = Move::Pass;
        for rect in moves {
            let record = pos.apply(Move::Capture(rect), mover);
            let bonus = self.evaluator.move_bonus(pos.grid(), rect, record.stolen);
            // value = bonus - child, so the child's window shifts by the bonus
            let (child, _) = self.negamax(pos, depth + 1, bonus - beta, bonus - alpha, -color);
            let value = bonus - child;
            pos.undo(record);
            if self.aborted { break; }
            if value > best_value {
                best_value = value;
                best_move = Move::Capture(rect);
                alpha = alpha.max(value);
            }
            if alpha >= beta { break; }
        }
        if best_move.is_pass() { return self.terminal(pos, color); }
        (best_value, best_move)
    }
}

/// Exhaustive negamax without pruning, same value convention as [`Searcher`].
/// Exponential; only meant for small boards.
pub fn minimax_reference(pos: &mut Position, max_depth: u32, evaluator: &dyn Evaluator) -> (i64, Move) {
    fn walk(pos: &mut Position, depth: u32, max_depth: u32, color: i32, ev: &dyn Evaluator) -> (i64, Move) {
        let leaf = (color as i64 * ev.evaluate(pos.territory()), Move::Pass);
        if depth >= max_depth { return leaf; }
        let moves: Vec<Rect> = legal_moves(pos.grid(), Region::full(pos.grid()));
        if moves.is_empty() { return leaf; }
        let mover = Player::from_sign(color);
        let mut best = (i64::MIN, Move::Pass);
        for rect in moves {
            let record = pos.apply(Move::Capture(rect), mover);
            let bonus = ev.move_bonus(pos.grid(), rect, record.stolen);
            let (child, _) = walk(pos, depth + 1, max_depth, -color, ev);
            pos.undo(record);
            let value = bonus - child;
            if value > best.0 { best = (value, Move::Capture(rect)); }
        }
        best
    }
    walk(pos, 0, max_depth, 1, evaluator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;

    #[test]
    fn search_leaves_position_untouched() {
        let mut p = Position::new(Grid::parse_rows(&["1928", "5546", "3737"]).unwrap());
        let before = p.clone();
        let mut s = Searcher::default();
        let r = s.search_depth(&mut p, 3);
        assert!(!r.best.is_pass());
        assert_eq!(p, before);
    }

    #[test]
    fn node_limit_aborts_with_a_legal_move() {
        let mut p = Position::new(Grid::parse_rows(&["19191", "28282", "37373", "46464"]).unwrap());
        let mut s = Searcher::default();
        let params = SearchParams { max_depth: 8, max_nodes: Some(50), ..SearchParams::default() };
        let r = s.search_with_params(&mut p, params);
        assert!(r.aborted);
        let rect = r.best.rect().expect("a capture, not a pass");
        assert!(p.is_valid(rect));
    }
}
