use std::time::Instant;

use rayon::prelude::*;

use xorchess_core::{Position, perft, perft_divide};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 1_000_000;

fn parse_epd_line(line: &str) -> Option<(String, Vec<(u8, u64)>)> {
    let mut parts = line.split(';');
    let fen = parts.next()?.trim();
    if fen.is_empty() {
        return None;
    }

    let mut depths = Vec::new();
    for part in parts {
        let mut items = part.split_whitespace();
        let (Some(key), Some(val)) = (items.next(), items.next()) else {
            continue;
        };
        let Some(depth) = key.strip_prefix('D') else {
            continue;
        };
        let depth: u8 = depth
            .parse()
            .unwrap_or_else(|_| panic!("invalid depth token in EPD: {key}"));
        let expected: u64 = val
            .parse()
            .unwrap_or_else(|_| panic!("invalid node count in EPD: {val}"));
        depths.push((depth, expected));
    }
    if depths.is_empty() {
        return None;
    }
    depths.sort_by_key(|(d, _)| *d);
    Some((fen.to_string(), depths))
}

#[test]
fn perft_from_standard_epd() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();
    let cases: Vec<(usize, String, Vec<(u8, u64)>)> = include_str!("standard.epd")
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_epd_line(line.trim()).map(|(f, d)| (idx, f, d)))
        .collect();
    assert!(!cases.is_empty());

    cases.par_iter().for_each(|(idx, fen, depths)| {
        let start = Instant::now();
        let mut total_nodes = 0u64;
        for &(depth, expected) in depths {
            if !full && expected > NODE_LIMIT {
                eprintln!("skipping case {} depth {depth}; set {FULL_PERFT_ENV}=1 to run", idx + 1);
                continue;
            }
            let mut pos = Position::from_fen(fen).expect("valid EPD position");
            let before = pos;
            let got = perft(&mut pos, depth);
            assert_eq!(got, expected, "perft mismatch for '{fen}' at depth {depth}");
            assert_eq!(pos, before, "perft left '{fen}' modified");
            total_nodes += got;
        }
        println!(
            "case {:03}: {total_nodes} nodes in {:.3?}",
            idx + 1,
            start.elapsed()
        );
    });
}

#[test]
fn perft_divide_sums_to_perft() {
    let mut pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .expect("kiwipete");
    let split = perft_divide(&mut pos, 2);
    assert_eq!(split.len(), 48);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 2039);
    assert!(split.iter().any(|(m, _)| m == "e1g1"));
    assert!(split.iter().any(|(m, _)| m == "e1c1"));
}

#[test]
fn perft_depth_zero_is_one() {
    let mut pos = Position::startpos();
    assert_eq!(perft(&mut pos, 0), 1);
}
