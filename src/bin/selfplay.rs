use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mushbot::config::{EngineConfig, Strategy};
use mushbot::search::EvalWeights;
use mushbot::selfplay::{generate_games_with, write_report, MatchReport, SelfPlayParams};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mushbot-selfplay", about = "Play engine configurations against each other and report results")]
struct Args {
    #[arg(long, default_value_t = 20)]
    games: usize,
    #[arg(long, default_value_t = 10)]
    rows: usize,
    #[arg(long, default_value_t = 17)]
    cols: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 100)]
    movetime_ms: u64,
    #[arg(long, default_value_t = 400)]
    max_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// JSON config for side A (defaults to negamax)
    #[arg(long)]
    a_config: Option<PathBuf>,
    /// JSON config for side B (defaults to greedy)
    #[arg(long)]
    b_config: Option<PathBuf>,
    #[arg(long)]
    a_strategy: Option<Strategy>,
    #[arg(long)]
    b_strategy: Option<Strategy>,
    /// Use the steal-heavy evaluation weights for side A
    #[arg(long, default_value_t = false)]
    a_aggressive: bool,
    /// File of preset boards (one per line, rows separated by spaces)
    #[arg(long)]
    boards: Option<PathBuf>,
    /// Optional: write summary and games as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn load(path: &Option<PathBuf>, fallback: EngineConfig) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::from_json_file(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(fallback),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let mut cfg_a = load(&a.a_config, EngineConfig::default())?;
    let mut cfg_b = load(&a.b_config, EngineConfig::greedy())?;
    if let Some(s) = a.a_strategy { cfg_a.strategy = s; }
    if let Some(s) = a.b_strategy { cfg_b.strategy = s; }
    if a.a_aggressive { cfg_a.eval = EvalWeights::aggressive(); }

    let params = SelfPlayParams {
        games: a.games,
        rows: a.rows,
        cols: a.cols,
        seed: a.seed,
        max_plies: a.max_plies,
        movetime_ms: a.movetime_ms,
        a: cfg_a,
        b: cfg_b,
        boards_path: a.boards,
    };
    eprintln!("Playing {} games ({:?} vs {:?}, {}ms/move, threads={})", a.games, params.a.strategy, params.b.strategy, a.movetime_ms, a.threads);

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}] {msg}")?);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads.max(1)).build()?;
    let records = pool.install(|| generate_games_with(&params, |g| {
        pb.set_message(format!("last: {}-{}", g.cells_a, g.cells_b));
        pb.inc(1);
    }))?;
    pb.finish_and_clear();

    let report = MatchReport::from_records(&records);
    println!(
        "games={} wins_a={} wins_b={} draws={} avg_margin_a={:.2}",
        report.games, report.wins_a, report.wins_b, report.draws, report.avg_margin_a
    );
    if let Some(path) = a.json_out {
        write_report(&path, &report, &records)?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}
