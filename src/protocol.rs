use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};

use crate::board::{Grid, Move};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::session::GameSession;

/// Line protocol spoken with the referee:
///
/// ```text
/// READY FIRST|SECOND   -> OK
/// INIT <row> <row> ...    digit rows, starts a game
/// TIME <my_ms> <opp_ms> -> r1 c1 r2 c2 (or -1 -1 -1 -1 to pass)
/// OPP r1 c1 r2 c2 <ms>    opponent's move
/// FINISH                  end of game
/// ```
pub struct Protocol {
    config: EngineConfig,
    first: bool,
    session: Option<GameSession>,
}

fn parse_int(tok: Option<&str>, what: &str) -> Result<i64> {
    let tok = tok.with_context(|| format!("missing {}", what))?;
    tok.parse::<i64>().with_context(|| format!("bad {}: {:?}", what, tok))
}

impl Protocol {
    pub fn new(config: EngineConfig) -> Self { Self { config, first: false, session: None } }

    pub fn session(&self) -> Option<&GameSession> { self.session.as_ref() }

    fn session_mut(&mut self) -> Result<&mut GameSession> {
        self.session.as_mut().ok_or(EngineError::NoSession).context("command before INIT")
    }

    /// Handles one line. Returns `false` once the game is over.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else { return Ok(true) };
        match cmd {
            "READY" => {
                self.first = match parts.next() {
                    Some("FIRST") => true,
                    Some("SECOND") => false,
                    other => bail!("READY expects FIRST or SECOND, got {:?}", other),
                };
                writeln!(out, "OK")?;
                out.flush()?;
            }
            "INIT" => {
                let rows: Vec<&str> = parts.collect();
                let grid = Grid::parse_rows(&rows).context("INIT board")?;
                info!("INIT {}x{} first={}", grid.rows(), grid.cols(), self.first);
                self.session = Some(GameSession::new(grid, self.first, self.config.clone()));
            }
            "TIME" => {
                let my_time = parse_int(parts.next(), "my time")?;
                let opp_time = parse_int(parts.next(), "opponent time")?;
                let mv = self.session_mut()?.calculate_move(my_time, opp_time)?;
                writeln!(out, "{}", mv)?;
                out.flush()?;
            }
            "OPP" => {
                let mut v = [0i64; 4];
                for (i, slot) in v.iter_mut().enumerate() { *slot = parse_int(parts.next(), &format!("coordinate {}", i))?; }
                let time = parse_int(parts.next(), "opponent time")?;
                let session = self.session_mut()?;
                let (rows, cols) = (session.position().rows(), session.position().cols());
                let mv = Move::from_ints(v, rows, cols).context("OPP move")?;
                let stolen = session.record_opponent_move(mv).with_context(|| format!("OPP {}", mv))?;
                debug!("opponent {} took {} of our cells ({}ms)", mv, stolen, time);
            }
            "FINISH" => {
                if let Some(s) = self.session.take() {
                    info!("game over after {} own turns, differential {}", s.turn(), s.score());
                }
                return Ok(false);
            }
            other => {
                warn!("unknown command {:?}", other);
                bail!("invalid command {:?}", other);
            }
        }
        Ok(true)
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("reading stdin")?;
            if !self.handle_line(line.trim(), out)? { break; }
        }
        Ok(())
    }
}
