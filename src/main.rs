use anyhow::{Context, Result};
use clap::Parser;
use mushbot::config::{DepthSchedule, EngineConfig, Strategy};
use mushbot::protocol::Protocol;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play the sum-to-ten rectangle game over the referee line protocol", long_about = None)]
struct Args {
    /// JSON engine config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Move selection: 'negamax' or 'greedy'
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Fixed search depth instead of the turn schedule
    #[arg(long)]
    depth: Option<u32>,

    /// Weight per owned cell in the evaluation
    #[arg(long)]
    cell_weight: Option<i32>,

    /// Bonus per cell taken back from the opponent
    #[arg(long)]
    steal_bonus: Option<i32>,

    /// Bonus for a capture no legal rectangle can overlap afterwards
    #[arg(long)]
    safe_bonus: Option<i32>,

    /// Search candidates in enumeration order instead of largest first
    #[arg(long)]
    no_ordering: bool,
}

fn build_config(args: &Args) -> Result<EngineConfig> {
    let mut cfg = match args.config {
        Some(ref p) => EngineConfig::from_json_file(p).with_context(|| format!("loading {}", p.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(s) = args.strategy { cfg.strategy = s; }
    if let Some(d) = args.depth { cfg.depth = DepthSchedule::fixed(d); }
    if let Some(w) = args.cell_weight { cfg.eval.cell = w; }
    if let Some(b) = args.steal_bonus { cfg.eval.steal_bonus = b; }
    if let Some(b) = args.safe_bonus { cfg.eval.safe_bonus = b; }
    if args.no_ordering { cfg.order_moves = false; }
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = build_config(&args)?;
    log::info!("config: {}", serde_json::to_string(&cfg)?);

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    Protocol::new(cfg).run(stdin.lock(), &mut out)
}
