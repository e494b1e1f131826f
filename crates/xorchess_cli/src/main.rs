//! xorchess line-protocol engine.
//!
//! Reads `PLAY`/`TEST`/`EXIT` commands from stdin and answers on stdout.
//! Logs go to stderr.

mod config;
mod protocol;

use std::env;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xorchess_core::TranspositionTable;

use crate::config::{CliArgs, DEFAULT_CONFIG_PATH, EngineConfig};
use crate::protocol::{Command, Session, parse_command};

fn print_usage() {
    println!("xorchess line-protocol engine");
    println!();
    println!("Usage:");
    println!("  xorchess [--config FILE] [--depth N] [--time MS]");
    println!();
    println!("Configuration is read from {DEFAULT_CONFIG_PATH} when --config is not given.");
    println!();
    println!("Commands (one per line, optional GET prefix):");
    println!("  PLAY <fen> [moves <uci>...]");
    println!("  TEST <fen>");
    println!("  NEWGAME");
    println!("  EXIT");
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = CliArgs::parse(&args)?;
    if cli.help {
        print_usage();
        return Ok(());
    }

    let mut config = EngineConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    init_logging(&config.log_filter);

    let limits = config.limits();
    info!(depth = limits.depth, move_time = ?limits.move_time, "engine ready");

    let table = TranspositionTable::init().context("allocating the transposition table")?;
    let mut session = Session::new(table, limits);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let outcome = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Exit)) => break,
            Ok(Some(cmd)) => session.handle(cmd, &mut stdout),
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            warn!(line = %line, "{err:#}");
            writeln!(stdout, "error {err:#}")?;
        }
        stdout.flush()?;
    }

    let stats = session.finish();
    info!(
        probes = stats.probes,
        hits = stats.hits,
        stores = stats.stores,
        "shutting down"
    );
    Ok(())
}
