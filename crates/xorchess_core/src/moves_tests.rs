use super::*;
use crate::board::TURN;

const WHITE_PAWN: Piece = Piece::new(Color::White, PieceKind::Pawn);
const WHITE_QUEEN: Piece = Piece::new(Color::White, PieceKind::Queen);
const BLACK_ROOK: Piece = Piece::new(Color::Black, PieceKind::Rook);
const BLACK_KNIGHT: Piece = Piece::new(Color::Black, PieceKind::Knight);

#[test]
fn test_kind_codes() {
    for kind in [
        MoveKind::Quiet,
        MoveKind::Capture,
        MoveKind::Promotion,
        MoveKind::CapturePromotion,
    ] {
        assert_eq!(MoveKind::from_code(kind.code()), kind);
    }
}

#[test]
fn test_capture_promotion_toggles() {
    let mv = Move::capture_promotion(
        WHITE_PAWN,
        Bitboard::from_square(49),
        BLACK_ROOK,
        Bitboard::from_square(56),
        WHITE_QUEEN,
        TURN,
    );
    assert_eq!(mv.toggles().count(), 3);
    assert!(mv.is_capture());
    assert_eq!(mv.victim(), Some(BLACK_ROOK));
    assert_eq!(mv.promotion_kind(), Some(PieceKind::Queen));
    assert_eq!(mv.mover(), WHITE_PAWN);
    let slots = mv.toggle_slots();
    assert!(slots.iter().all(Option::is_some));
}

#[test]
fn test_order_score_ranks_captures() {
    let pawn_takes_rook = Move::capture(
        WHITE_PAWN,
        Bitboard::from_squares(&[28, 37]),
        BLACK_ROOK,
        Bitboard::from_square(37),
        TURN,
    );
    let queen_takes_rook = Move::capture(
        WHITE_QUEEN,
        Bitboard::from_squares(&[21, 37]),
        BLACK_ROOK,
        Bitboard::from_square(37),
        TURN,
    );
    let pawn_takes_knight = Move::capture(
        WHITE_PAWN,
        Bitboard::from_squares(&[28, 35]),
        BLACK_KNIGHT,
        Bitboard::from_square(35),
        TURN,
    );
    let quiet = Move::quiet(WHITE_PAWN, Bitboard::from_squares(&[12, 20]), TURN);

    assert!(pawn_takes_rook.order_score() > queen_takes_rook.order_score());
    assert!(queen_takes_rook.order_score() > pawn_takes_knight.order_score());
    assert!(pawn_takes_knight.order_score() > quiet.order_score());
    assert_eq!(quiet.order_score(), 0);
    assert_eq!(quiet.victim(), None);
    assert_eq!(quiet.promotion_kind(), None);
}

#[test]
fn test_squares_of_quiet_and_promotion() {
    let pos = Position::from_fen("4k3/1P6/8/8/8/8/4P3/4K3 w - - 0 1").expect("fen");
    let push = Move::quiet(WHITE_PAWN, Bitboard::from_squares(&[12, 20]), TURN);
    assert_eq!(push.squares(&pos), (12, 20));

    let promote = Move::promotion(
        WHITE_PAWN,
        Bitboard::from_square(49),
        WHITE_QUEEN,
        Bitboard::from_square(57),
        TURN,
    );
    assert_eq!(promote.squares(&pos), (49, 57));
}
