use super::*;

#[test]
fn test_formats_quiet_and_double_push() {
    let pos = Position::startpos();
    let mv = parse_uci_move(&pos, "e2e4").expect("legal");
    assert_eq!(move_to_uci(&mv, &pos), "e2e4");
    assert!(parse_uci_move(&pos, "e2e5").is_none());
}

#[test]
fn test_formats_promotions() {
    let pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("fen");
    for txt in ["a7a8q", "a7a8n", "a7b8r", "a7b8b"] {
        let mv = parse_uci_move(&pos, txt).expect("legal promotion");
        assert_eq!(move_to_uci(&mv, &pos), txt);
    }
    assert!(parse_uci_move(&pos, "a7a8").is_none());
    assert!(parse_uci_move(&pos, "a7a8k").is_none());
}

#[test]
fn test_formats_castling_as_king_move() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").expect("fen");
    let mv = parse_uci_move(&pos, "e8c8").expect("castle");
    assert_eq!(move_to_uci(&mv, &pos), "e8c8");
    assert_eq!(mv.toggles().count(), 2);
}

#[test]
fn test_play_uci_moves_stops_at_illegal() {
    let mut pos = Position::startpos();
    let applied = play_uci_moves(&mut pos, ["e2e4", "e7e5", "e1e3", "d2d4"]);
    assert_eq!(applied, 2);
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.en_passant(), Some(44));
}

#[test]
fn test_rejects_garbage() {
    let pos = Position::startpos();
    assert!(parse_uci_move(&pos, "").is_none());
    assert!(parse_uci_move(&pos, "e2").is_none());
    assert!(parse_uci_move(&pos, "z9e4").is_none());
    assert!(parse_uci_move(&pos, "e2e4qq").is_none());
}
