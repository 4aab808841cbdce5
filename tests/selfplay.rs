use mushbot::config::{DepthSchedule, EngineConfig};
use mushbot::board::Grid;
use mushbot::selfplay::{generate_games, load_boards, MatchReport, SelfPlayParams};
use std::fs::{create_dir_all, write};
use std::path::Path;

#[test]
fn greedy_selfplay_is_deterministic_by_seed() {
    let params = SelfPlayParams {
        games: 4, rows: 4, cols: 6, seed: 9, max_plies: 60, movetime_ms: 50,
        a: EngineConfig::greedy(), b: EngineConfig::greedy(), boards_path: None,
    };
    let g1 = generate_games(&params).unwrap();
    let g2 = generate_games(&params).unwrap();
    assert_eq!(g1, g2);
    assert_eq!(g1.len(), 4);
    assert!(g1[0].a_first && !g1[1].a_first);
}

#[test]
fn search_vs_greedy_games_finish_with_consistent_scores() {
    let a = EngineConfig { depth: DepthSchedule::fixed(2), ..EngineConfig::default() };
    let params = SelfPlayParams {
        games: 2, rows: 4, cols: 5, seed: 1, max_plies: 60, movetime_ms: 200,
        a, b: EngineConfig::greedy(), boards_path: None,
    };
    let games = generate_games(&params).unwrap();
    for g in &games {
        assert!(g.cells_a + g.cells_b <= 20);
        assert_eq!(g.result, (g.cells_a - g.cells_b).signum() as i8);
        assert!(g.moves.len() < 60, "game did not end by passes");
        assert_eq!(g.moves[g.moves.len() - 1], [-1, -1, -1, -1]);
    }
    let rep = MatchReport::from_records(&games);
    assert_eq!(rep.wins_a + rep.wins_b + rep.draws, 2);
}

#[test]
fn preset_boards_skip_comments_and_blank_lines() {
    let outdir = Path::new("target/selfplay_test");
    create_dir_all(outdir).unwrap();
    let path = outdir.join("boards.txt");
    write(&path, "# two boards\n1928 5546\n\n  255819  \n").unwrap();
    let boards = load_boards(&path).unwrap();
    assert_eq!(boards, vec![
        Grid::parse_rows(&["1928", "5546"]).unwrap(),
        Grid::parse_rows(&["255819"]).unwrap(),
    ]);

    let params = SelfPlayParams {
        games: 2, max_plies: 40, movetime_ms: 50,
        a: EngineConfig::greedy(), b: EngineConfig::greedy(),
        boards_path: Some(path.clone()), ..SelfPlayParams::default()
    };
    let games = generate_games(&params).unwrap();
    assert_eq!(games[0].board, vec!["1928".to_string(), "5546".to_string()]);
    assert_eq!(games[1].board, vec!["255819".to_string()]);
}

#[test]
fn malformed_preset_board_is_an_error() {
    let outdir = Path::new("target/selfplay_test");
    create_dir_all(outdir).unwrap();
    let path = outdir.join("bad_boards.txt");
    write(&path, "1928 554\n").unwrap();
    assert!(load_boards(&path).is_err());
    assert!(load_boards(outdir.join("missing.txt")).is_err());
}
