use mushbot::board::{Grid, Move, Player, Position, Rect};
use mushbot::movegen::{legal_moves, Region};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_position(rows: usize, cols: usize, seed: u64) -> Position {
    let mut rng = SmallRng::seed_from_u64(seed);
    let cells: Vec<Vec<u8>> = (0..rows).map(|_| (0..cols).map(|_| rng.gen_range(1..=9)).collect()).collect();
    Position::new(Grid::from_rows(&cells).unwrap())
}

#[test]
fn captures_conserve_value() {
    for seed in 0..25u64 {
        let mut pos = random_position(6, 7, seed);
        let original = pos.grid().sum();
        let mut rng = SmallRng::seed_from_u64(seed ^ 0xABCD);
        let mut captures = 0u32;
        let mut player = Player::Me;
        loop {
            let moves = legal_moves(pos.grid(), Region::full(pos.grid()));
            if moves.is_empty() { break; }
            let rect = moves[rng.gen_range(0..moves.len())];
            pos.play_checked(Move::Capture(rect), player).expect("legal capture");
            captures += 1;
            player = player.other();
            assert_eq!(pos.grid().sum() + 10 * captures, original);
        }
        // boards start without zeros, so every zero cell has an owner
        let owned = pos.territory().count(Player::Me) + pos.territory().count(Player::Opponent);
        assert_eq!(owned as usize, 6 * 7 - pos.grid().nonzero_count());
    }
}

#[test]
fn apply_then_undo_restores_every_legal_capture() {
    for seed in 0..10u64 {
        let mut pos = random_position(5, 6, 100 + seed);
        let mut rng = SmallRng::seed_from_u64(seed);
        // a few real captures first so territory holds both owners
        for i in 0..3 {
            let moves = legal_moves(pos.grid(), Region::full(pos.grid()));
            if moves.is_empty() { break; }
            let rect = moves[rng.gen_range(0..moves.len())];
            pos.apply(Move::Capture(rect), if i % 2 == 0 { Player::Me } else { Player::Opponent });
        }
        let snapshot = pos.clone();
        for rect in legal_moves(pos.grid(), Region::full(pos.grid())) {
            for player in [Player::Me, Player::Opponent] {
                let record = pos.apply(Move::Capture(rect), player);
                pos.undo(record);
                assert_eq!(pos, snapshot, "undo of {} by {:?} left residue", rect, player);
            }
        }
    }
}

#[test]
fn undo_restores_grid_edge_rectangles() {
    let mut pos = Position::new(Grid::parse_rows(&["19", "00", "37"]).unwrap());
    let corners = [Rect { r1: 0, c1: 0, r2: 0, c2: 1 }, Rect { r1: 2, c1: 0, r2: 2, c2: 1 }];
    let before = pos.clone();
    let a = pos.apply(Move::Capture(corners[0]), Player::Me);
    let b = pos.apply(Move::Capture(corners[1]), Player::Opponent);
    assert_eq!(pos.grid().sum(), 0);
    pos.undo(b);
    pos.undo(a);
    assert_eq!(pos, before);
}

#[test]
fn steal_recolours_zero_cells() {
    let mut pos = Position::new(Grid::parse_rows(&["2558"]).unwrap());
    let inner = Rect { r1: 0, c1: 1, r2: 0, c2: 2 };
    pos.play_checked(Move::Capture(inner), Player::Opponent).unwrap();
    let rec = pos.play_checked(Move::Capture(Rect { r1: 0, c1: 0, r2: 0, c2: 3 }), Player::Me).unwrap();
    assert_eq!(rec.stolen, 2);
    assert_eq!(pos.territory().count(Player::Me), 4);
    assert_eq!(pos.territory().count(Player::Opponent), 0);
}
