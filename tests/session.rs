use mushbot::board::{Grid, Move, Player, Rect};
use mushbot::config::{DepthSchedule, EngineConfig, Strategy};
use mushbot::movegen::{best_steal_move, max_area_move, Region};
use mushbot::selfplay::random_grid;
use mushbot::{EngineError, GameSession};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn rect(r1: usize, c1: usize, r2: usize, c2: usize) -> Rect { Rect { r1, c1, r2, c2 } }

#[test]
fn own_move_is_applied_internally() {
    let grid = Grid::parse_rows(&["123", "450", "000"]).unwrap();
    let mut s = GameSession::new(grid, true, EngineConfig::default());
    let mv = s.calculate_move(10_000, 10_000).unwrap();
    assert_eq!(mv, Move::Capture(rect(0, 1, 1, 2)));
    assert_eq!(s.position().territory().count(Player::Me), 4);
    assert_eq!(s.position().grid().sum(), s.initial_sum() - 10);
    assert_eq!(s.captures(), 1);
    // nothing left to take
    assert_eq!(s.calculate_move(10_000, 10_000).unwrap(), Move::Pass);
    assert_eq!(s.turn(), 2);
}

#[test]
fn opponent_desync_is_fatal_and_leaves_state_alone() {
    let grid = Grid::parse_rows(&["123", "450", "000"]).unwrap();
    let mut s = GameSession::new(grid, false, EngineConfig::default());
    let before = s.position().clone();
    let err = s.record_opponent_move(Move::Capture(rect(0, 0, 1, 1))).unwrap_err();
    assert!(matches!(err, EngineError::GameStateDesync { .. }));
    assert_eq!(s.position(), &before);
    assert_eq!(s.last_opponent_move(), None);
    let err = s.record_opponent_move(Move::Capture(rect(0, 0, 5, 0))).unwrap_err();
    assert!(matches!(err, EngineError::InvalidRectangle { .. }));
}

#[test]
fn opponent_pass_is_remembered_but_not_applied() {
    let grid = Grid::parse_rows(&["19", "55"]).unwrap();
    let mut s = GameSession::new(grid, false, EngineConfig::default());
    let before = s.position().grid().clone();
    assert_eq!(s.record_opponent_move(Move::Pass).unwrap(), 0);
    assert_eq!(s.last_opponent_move(), Some(Move::Pass));
    assert!(s.position().last_was_pass());
    assert_eq!(s.position().grid(), &before);
    assert_eq!(s.captures(), 0);
}

#[test]
fn greedy_steals_back_after_the_opening() {
    let grid = Grid::parse_rows(&["255819"]).unwrap();
    let cfg = EngineConfig { strategy: Strategy::Greedy, opening_turns: 0, ..EngineConfig::default() };
    let mut s = GameSession::new(grid, false, cfg);
    s.record_opponent_move(Move::Capture(rect(0, 1, 0, 2))).unwrap();
    let mv = s.calculate_move(1_000, 1_000).unwrap();
    assert_eq!(mv, Move::Capture(rect(0, 0, 0, 3)));
    assert_eq!(s.score(), 4);
}

#[test]
fn greedy_takes_biggest_after_an_opponent_pass() {
    let grid = Grid::parse_rows(&["1234", "0000", "0019"]).unwrap();
    let cfg = EngineConfig { strategy: Strategy::Greedy, opening_turns: 0, ..EngineConfig::default() };
    let mut s = GameSession::new(grid, false, cfg);
    s.record_opponent_move(Move::Pass).unwrap();
    assert_eq!(s.calculate_move(1_000, 1_000).unwrap(), Move::Capture(rect(0, 0, 0, 3)));
}

#[test]
fn conservation_holds_over_a_full_game() {
    let grid = Grid::parse_rows(&["19283746", "55463728", "91827364", "28375546"]).unwrap();
    let cfg = EngineConfig { depth: DepthSchedule::fixed(2), ..EngineConfig::default() };
    let mut me = GameSession::new(grid.clone(), true, cfg);
    let mut opp = GameSession::new(grid, false, EngineConfig::greedy());
    let mut passes = 0;
    let mut my_turn = true;
    while passes < 2 {
        let (mover, other) = if my_turn { (&mut me, &mut opp) } else { (&mut opp, &mut me) };
        let mv = mover.calculate_move(5_000, 5_000).unwrap();
        other.record_opponent_move(mv).unwrap();
        passes = if mv.is_pass() { passes + 1 } else { 0 };
        my_turn = !my_turn;
        assert_eq!(me.position().grid().sum() + 10 * me.captures(), me.initial_sum());
        assert_eq!(me.position().grid(), opp.position().grid());
    }
    assert_eq!(me.score(), -opp.score());
}

#[test]
fn greedy_opening_stays_in_the_turn_quadrant_despite_opponent_captures() {
    let grid = random_grid(10, 17, &mut SmallRng::seed_from_u64(21)).unwrap();
    let cfg = EngineConfig::greedy();
    let mut me = GameSession::new(grid.clone(), false, cfg.clone());
    let mut opp = GameSession::new(grid, true, EngineConfig::greedy());
    for turn in 1..=cfg.opening_turns + 1 {
        let theirs = opp.calculate_move(1_000, 1_000).unwrap();
        assert!(!theirs.is_pass());
        me.record_opponent_move(theirs).unwrap();

        let g = me.position().grid().clone();
        let biggest = max_area_move(&g, Region::quadrant(turn, &g, cfg.quadrant_margin))
            .or_else(|| max_area_move(&g, Region::full(&g)));
        let expected = if turn <= cfg.opening_turns {
            biggest
        } else {
            let around = Region::around(theirs.rect().unwrap(), cfg.steal_margin, &g);
            best_steal_move(&g, me.position().territory(), around, cfg.steal_max_span, Player::Me).or(biggest)
        };
        let mine = me.calculate_move(1_000, 1_000).unwrap();
        assert_eq!(me.turn(), turn);
        assert_eq!(Some(mine), expected.map(Move::Capture), "turn {}", turn);
        opp.record_opponent_move(mine).unwrap();
    }
}
