use crate::board::{Move, Player, Position};
use crate::movegen::{legal_moves, Region};

// Capture-tree perft using apply/undo (no cloning). A side with no legal
// capture ends the line, counted as one leaf.
pub fn perft(pos: &mut Position, depth: u32, player: Player) -> u64 {
    if depth == 0 { return 1; }
    let moves = legal_moves(pos.grid(), Region::full(pos.grid()));
    if moves.is_empty() { return 1; }
    let mut nodes = 0u64;
    for rect in moves {
        let record = pos.apply(Move::Capture(rect), player);
        nodes += perft(pos, depth - 1, player.other());
        pos.undo(record);
    }
    nodes
}
