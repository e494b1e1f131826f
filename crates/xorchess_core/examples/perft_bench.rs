//! Perft throughput for profiling.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p xorchess_core -- [depth] [fen]
//!
//!   # Kiwipete at depth 4
//!   cargo flamegraph --example perft_bench -p xorchess_core -- 4 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"

use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use xorchess_core::{Position, perft};

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    (
        "Position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ),
    (
        "Position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ),
];

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn timed(pos: &mut Position, depth: u8) -> (u64, Duration) {
    let start = Instant::now();
    let nodes = perft(pos, depth);
    (nodes, start.elapsed())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);

    if let Some(fen) = args.get(2) {
        let mut pos = match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(err) => {
                eprintln!("bad fen: {err}");
                return ExitCode::FAILURE;
            }
        };
        let (nodes, elapsed) = timed(&mut pos, depth);
        println!("{nodes} nodes in {elapsed:.3?} ({:.0} nps)", nps(nodes, elapsed));
        return ExitCode::SUCCESS;
    }

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;
    for (name, fen) in TEST_POSITIONS {
        let Ok(mut pos) = Position::from_fen(fen) else {
            eprintln!("skipping {name}");
            continue;
        };
        let (nodes, elapsed) = timed(&mut pos, depth);
        total_nodes += nodes;
        total_time += elapsed;
        println!(
            "{name:.<30} {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
    ExitCode::SUCCESS
}
