//! The line protocol spoken on stdin/stdout.
//!
//! ```text
//! PLAY <fen> [moves <uci>...]   -> info depth .. score .. pv ..
//!                                  bestmove <uci>
//! TEST <fen>                    -> moves, eval and perft lines
//! NEWGAME                       -> (no output) forget the transposition table
//! EXIT
//! ```
//!
//! Every command may carry a leading `GET `.

use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::debug;
use xorchess_core::search::{format_line, is_mate_score};
use xorchess_core::{
    Color, MATE_SCORE, Position, Score, SearchLimits, SearchReport, TableStats,
    TranspositionTable, evaluate, get_bot_move, legal_moves, move_to_uci, perft,
    play_uci_moves,
};

/// Depths reported by `TEST`.
const TEST_PERFT_DEPTHS: std::ops::RangeInclusive<u8> = 1..=3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// FEN, then an optional `moves` list.
    Play(&'a str),
    Test(&'a str),
    NewGame,
    Exit,
}

/// `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command<'_>>> {
    let line = line.trim();
    let line = line.strip_prefix("GET ").map(str::trim_start).unwrap_or(line);
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim()))
        .unwrap_or((line, ""));

    let cmd = match word.to_ascii_uppercase().as_str() {
        "EXIT" | "QUIT" => Command::Exit,
        "NEWGAME" => Command::NewGame,
        "PLAY" | "TEST" if rest.is_empty() => bail!("{word} needs a FEN"),
        "PLAY" => Command::Play(rest),
        "TEST" => Command::Test(rest),
        _ => bail!("unknown command {word:?}"),
    };
    Ok(Some(cmd))
}

/// Split `<fen> [moves ...]` and play the moves.
fn setup_position(arg: &str) -> Result<Position> {
    let (fen, moves) = match arg.split_once(" moves") {
        Some((fen, moves)) => (fen, Some(moves)),
        None => (arg, None),
    };
    let mut pos = Position::from_fen(fen.trim()).with_context(|| format!("bad FEN {fen:?}"))?;
    if let Some(moves) = moves {
        let list: Vec<&str> = moves.split_whitespace().collect();
        let played = play_uci_moves(&mut pos, list.iter().copied());
        if played != list.len() {
            bail!("illegal move {:?}", list[played]);
        }
    }
    Ok(pos)
}

/// Score as seen by the side to move, in UCI's `cp` / `mate` form.
pub fn format_score(score: Score, side: Color) -> String {
    let relative = match side {
        Color::White => score,
        Color::Black => -score,
    };
    if is_mate_score(relative) {
        let plies = MATE_SCORE - relative.abs();
        let moves = (plies + 1) / 2;
        let moves = if relative > 0 { moves } else { -moves };
        format!("mate {moves}")
    } else {
        format!("cp {relative}")
    }
}

pub struct Session {
    table: TranspositionTable,
    limits: SearchLimits,
}

impl Session {
    pub fn new(table: TranspositionTable, limits: SearchLimits) -> Self {
        Self { table, limits }
    }

    /// Run one command. `EXIT` is left to the caller.
    pub fn handle(&mut self, cmd: Command<'_>, out: &mut impl Write) -> Result<()> {
        match cmd {
            Command::Play(arg) => self.play(arg, out),
            Command::Test(arg) => test(arg, out),
            Command::NewGame => {
                self.table.clear();
                Ok(())
            }
            Command::Exit => Ok(()),
        }
    }

    fn play(&mut self, arg: &str, out: &mut impl Write) -> Result<()> {
        let mut pos = setup_position(arg)?;
        let report = get_bot_move(&mut pos, &mut self.table, &self.limits)?;
        debug!(nodes = report.nodes, "play answered");
        write_report(&pos, &report, out)
    }

    pub fn finish(self) -> TableStats {
        self.table.teardown()
    }
}

fn write_report(pos: &Position, report: &SearchReport, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "info depth {} score {} nodes {} time {} pv {}",
        report.depth,
        format_score(report.score, pos.side_to_move()),
        report.nodes,
        report.elapsed.as_millis(),
        format_line(pos, &report.pv)
    )?;
    match &report.best_move {
        Some(mv) => writeln!(out, "bestmove {}", move_to_uci(mv, pos))?,
        None => writeln!(out, "bestmove 0000")?,
    }
    Ok(())
}

fn test(arg: &str, out: &mut impl Write) -> Result<()> {
    let mut pos = setup_position(arg)?;
    let mut names: Vec<String> = legal_moves(&pos)
        .iter()
        .map(|mv| move_to_uci(mv, &pos))
        .collect();
    names.sort();
    writeln!(out, "moves {} {}", names.len(), names.join(" "))?;
    writeln!(out, "eval {}", evaluate(&pos))?;
    for depth in TEST_PERFT_DEPTHS {
        writeln!(out, "perft {depth} {}", perft(&mut pos, depth))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
