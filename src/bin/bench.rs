use clap::Parser;
use mushbot::board::Position;
use mushbot::search::eval::from_weights;
use mushbot::search::{EvalWeights, SearchParams, Searcher};
use mushbot::selfplay::random_grid;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "mushbot-bench", version, about = "Benchmark mushbot search speed on a random board")]
struct Args {
    #[arg(long, default_value_t = 10)]
    rows: usize,

    #[arg(long, default_value_t = 17)]
    cols: usize,

    /// Board seed
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Movetime in milliseconds
    #[arg(long, default_value_t = 1000)]
    movetime: u64,

    /// Maximum search depth
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Use the steal-heavy evaluation
    #[arg(long, default_value_t = false)]
    aggressive: bool,

    /// Disable largest-first move ordering
    #[arg(long, default_value_t = false)]
    no_ordering: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut pos = Position::new(random_grid(args.rows, args.cols, &mut rng)?);

    let weights = if args.aggressive { EvalWeights::aggressive() } else { EvalWeights::default() };
    let mut s = Searcher::new(from_weights(weights));
    let p = SearchParams {
        max_depth: args.depth,
        movetime: Some(Duration::from_millis(args.movetime)),
        max_nodes: None,
        order_moves: !args.no_ordering,
    };

    let t0 = Instant::now();
    let res = s.search_with_params(&mut pos, p);
    let dt = t0.elapsed();
    let nps = if dt.as_secs_f64() > 0.0 { res.nodes as f64 / dt.as_secs_f64() } else { 0.0 };
    println!(
        "bestmove={} score={} depth={} aborted={} nodes={} elapsed={:.3}s nps={:.1}",
        res.best, res.score, res.depth, res.aborted, res.nodes, dt.as_secs_f64(), nps
    );
    Ok(())
}
