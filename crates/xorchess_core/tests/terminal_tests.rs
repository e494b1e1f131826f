//! Positions without legal moves, seen through movegen and search.

use xorchess_core::{
    Color, MATE_SCORE, Position, SearchLimits, TranspositionTable, get_bot_move, in_check,
    legal_moves, play_uci_moves,
};

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).expect("valid fen")
}

#[test]
fn test_stalemate_king_in_corner() {
    let pos = pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(legal_moves(&pos).is_empty());
    assert!(!in_check(&pos, Color::Black));
}

#[test]
fn test_stalemate_king_and_pawn() {
    let pos = pos("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");
    assert!(legal_moves(&pos).is_empty());
    assert!(!in_check(&pos, Color::Black));
}

#[test]
fn test_back_rank_mate() {
    let pos = pos("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
    assert!(legal_moves(&pos).is_empty());
    assert!(in_check(&pos, Color::Black));
}

#[test]
fn test_search_reports_stalemate_as_draw() {
    let mut table = TranspositionTable::init().expect("table");
    let mut pos = pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    let report = get_bot_move(&mut pos, &mut table, &SearchLimits::depth(3)).expect("search");
    assert_eq!(report.best_move, None);
    assert_eq!(report.score, 0);
}

#[test]
fn test_search_after_scholars_mate() {
    let mut pos = Position::startpos();
    let played = play_uci_moves(
        &mut pos,
        ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    assert_eq!(played, 7);
    assert!(legal_moves(&pos).is_empty());

    let mut table = TranspositionTable::init().expect("table");
    let report = get_bot_move(&mut pos, &mut table, &SearchLimits::depth(2)).expect("search");
    assert_eq!(report.best_move, None);
    assert_eq!(report.score, MATE_SCORE);
}

#[test]
fn test_search_finds_back_rank_mate_for_black() {
    let mut table = TranspositionTable::init().expect("table");
    let mut pos = pos("6k1/8/8/8/8/8/5PPP/r5K1 w - - 0 1");
    // The a1 rook checks along the first rank and the pawns box the king in.
    assert!(in_check(&pos, Color::White));
    assert!(legal_moves(&pos).is_empty());
    let report = get_bot_move(&mut pos, &mut table, &SearchLimits::depth(1)).expect("search");
    assert_eq!(report.score, -MATE_SCORE);
}
