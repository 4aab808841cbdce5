use clap::Parser;
use mushbot::board::{Grid, Move, Player, Position};
use mushbot::movegen::{legal_moves, Region};
use mushbot::perft::perft;
use mushbot::selfplay::random_grid;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Count capture sequences to a fixed depth")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Board rows as digit strings; a random 10x17 board when omitted
    #[arg(value_name = "ROW")]
    rows: Vec<String>,
    /// Seed for the random board
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let grid = if args.rows.is_empty() {
        random_grid(10, 17, &mut SmallRng::seed_from_u64(args.seed))?
    } else {
        Grid::parse_rows(&args.rows)?
    };
    let base = Position::new(grid);
    let depth = args.depth;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 || depth == 0 {
            perft(&mut base.clone(), depth, Player::Me)
        } else {
            let root = legal_moves(base.grid(), Region::full(base.grid()));
            if root.is_empty() {
                1
            } else {
                root.par_iter().map(|&rect| {
                    let mut p = base.clone();
                    p.apply(Move::Capture(rect), Player::Me);
                    perft(&mut p, depth - 1, Player::Opponent)
                }).sum()
            }
        };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
