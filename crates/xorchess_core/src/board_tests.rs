use super::*;

#[test]
fn test_startpos_layout() {
    let pos = Position::startpos();
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.castling_rights(), CASTLING_RIGHTS);
    assert_eq!(pos.en_passant(), None);
    assert_eq!(pos.occupancy(Color::White), Bitboard(0xFFFF));
    assert_eq!(pos.occupancy(Color::Black), Bitboard(0xFFFF_0000_0000_0000));
    assert_eq!(pos.king_square(Color::White), Some(4));
    assert_eq!(pos.king_square(Color::Black), Some(60));
    assert_eq!(
        pos.piece_at(3),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
    assert_eq!(pos.piece_at(35), None);
    assert!(pos.validate().is_ok());
}

#[test]
fn test_info_bits_share_rank_one_with_pieces() {
    // Castling and turn flags live on a1, b1, h1 and h8 without touching piece boards.
    let pos = Position::startpos();
    assert_eq!(pos.info(), Bitboard::from_squares(&[0, 1, 7, 56, 63]));
}

fn startpos_boards() -> [Bitboard; BOARD_ARRAY_SIZE] {
    *Position::startpos().boards()
}

#[test]
fn test_from_boards_accepts_valid() {
    let pos = Position::from_boards(startpos_boards()).expect("valid");
    assert_eq!(pos, Position::startpos());
}

#[test]
fn test_from_boards_rejects_overlap() {
    let mut boards = startpos_boards();
    boards[Piece::new(Color::White, PieceKind::Knight).slot()] |= Bitboard::from_square(0);
    boards[WHITE_PCS] |= Bitboard::from_square(0);
    assert_eq!(
        Position::from_boards(boards),
        Err(MalformedPosition::OverlappingPieces { square: 0 })
    );
}

#[test]
fn test_from_boards_rejects_stale_union() {
    let mut boards = startpos_boards();
    boards[BLACK_PCS] = Bitboard::EMPTY;
    assert_eq!(
        Position::from_boards(boards),
        Err(MalformedPosition::UnionMismatch {
            color: Color::Black
        })
    );
}

#[test]
fn test_from_boards_rejects_bad_info() {
    let mut boards = startpos_boards();
    boards[INFO] |= Bitboard::from_squares(&[16, 44]);
    assert_eq!(
        Position::from_boards(boards),
        Err(MalformedPosition::MultipleEnPassant)
    );

    let mut boards = startpos_boards();
    boards[INFO] |= Bitboard::from_square(2);
    assert_eq!(
        Position::from_boards(boards),
        Err(MalformedPosition::EnPassantOnBackRank)
    );

    let mut boards = startpos_boards();
    boards[RESERVED] = Bitboard::from_square(30);
    assert_eq!(
        Position::from_boards(boards),
        Err(MalformedPosition::ReservedSlotNotEmpty)
    );
}

#[test]
fn test_from_boards_rejects_extra_king() {
    let mut boards = startpos_boards();
    boards[Piece::new(Color::White, PieceKind::King).slot()] |= Bitboard::from_square(20);
    boards[WHITE_PCS] |= Bitboard::from_square(20);
    assert_eq!(
        Position::from_boards(boards),
        Err(MalformedPosition::KingCount {
            color: Color::White,
            count: 2
        })
    );
}

#[test]
fn test_apply_recomputes_unions() {
    let mut pos = Position::startpos();
    let knight = Piece::new(Color::White, PieceKind::Knight);
    let mv = Move::quiet(knight, Bitboard::from_squares(&[6, 21]), TURN);
    pos.apply(&mv);
    assert!(pos.occupancy(Color::White).contains(21));
    assert!(!pos.occupancy(Color::White).contains(6));
    assert_eq!(pos.side_to_move(), Color::Black);
    assert!(pos.validate().is_ok());
    pos.apply(&mv);
    assert_eq!(pos, Position::startpos());
}
