//! Packed-bitboard position.
//!
//! A position is sixteen bitboards: twelve piece boards, the two colour
//! unions, the INFO word and one reserved slot. INFO packs the state that is
//! not a piece:
//!
//! - castling rights on the rook home squares (`h1`, `a1`, `h8`, `a8`),
//! - the side to move on `b1` (set = white),
//! - the en-passant target as a single bit on rank 3 or rank 6.
//!
//! Moves are XOR masks over these slots (see [`crate::moves`]), so applying a
//! move twice restores the position bit for bit.

use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::fen::{FenError, parse_fen};
use crate::moves::Move;
use crate::types::*;
use crate::zobrist::ZOBRIST;

pub const BOARD_ARRAY_SIZE: usize = 16;
pub const WHITE_PCS: usize = 12;
pub const BLACK_PCS: usize = 13;
pub const INFO: usize = 14;
pub const RESERVED: usize = 15;

pub const WHITE_KINGSIDE: Bitboard = Bitboard::from_square(7);
pub const WHITE_QUEENSIDE: Bitboard = Bitboard::from_square(0);
pub const BLACK_KINGSIDE: Bitboard = Bitboard::from_square(63);
pub const BLACK_QUEENSIDE: Bitboard = Bitboard::from_square(56);
pub const CASTLING_RIGHTS: Bitboard = Bitboard(
    WHITE_KINGSIDE.0 | WHITE_QUEENSIDE.0 | BLACK_KINGSIDE.0 | BLACK_QUEENSIDE.0,
);
pub const TURN: Bitboard = Bitboard::from_square(1);
pub const EN_PASSANT_SQUARES: Bitboard = Bitboard(Bitboard::RANK_3.0 | Bitboard::RANK_6.0);

/// Castling flags in the order used by hashing and move encoding.
pub const CASTLING_FLAGS: [Bitboard; 4] = [
    WHITE_KINGSIDE,
    WHITE_QUEENSIDE,
    BLACK_KINGSIDE,
    BLACK_QUEENSIDE,
];

/// Both castling rights belonging to `color`.
pub const fn castling_rights_of(color: Color) -> Bitboard {
    match color {
        Color::White => Bitboard(WHITE_KINGSIDE.0 | WHITE_QUEENSIDE.0),
        Color::Black => Bitboard(BLACK_KINGSIDE.0 | BLACK_QUEENSIDE.0),
    }
}

/// Structural violations rejected when a position is built from raw boards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedPosition {
    #[error("two piece boards both occupy square {square}")]
    OverlappingPieces { square: u8 },
    #[error("{color:?} union board does not match its piece boards")]
    UnionMismatch { color: Color },
    #[error("more than one en-passant square is set")]
    MultipleEnPassant,
    #[error("INFO has bits outside castling rights, turn and ranks 3/6")]
    EnPassantOnBackRank,
    #[error("{color:?} has {count} kings")]
    KingCount { color: Color, count: u32 },
    #[error("reserved board slot is not empty")]
    ReservedSlotNotEmpty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    boards: [Bitboard; BOARD_ARRAY_SIZE],
}

impl Position {
    pub fn startpos() -> Self {
        let mut boards = [Bitboard::EMPTY; BOARD_ARRAY_SIZE];
        let back = [
            (PieceKind::Rook, [0u8, 7]),
            (PieceKind::Knight, [1, 6]),
            (PieceKind::Bishop, [2, 5]),
        ];
        for color in [Color::White, Color::Black] {
            let base = if color == Color::White { 0 } else { 56 };
            let pawns = if color == Color::White {
                Bitboard::RANK_2
            } else {
                Bitboard::RANK_7
            };
            boards[Piece::new(color, PieceKind::Pawn).slot()] = pawns;
            for (kind, files) in back {
                boards[Piece::new(color, kind).slot()] =
                    Bitboard::from_squares(&[base + files[0], base + files[1]]);
            }
            boards[Piece::new(color, PieceKind::Queen).slot()] = Bitboard::from_square(base + 3);
            boards[Piece::new(color, PieceKind::King).slot()] = Bitboard::from_square(base + 4);
        }
        boards[INFO] = CASTLING_RIGHTS | TURN;

        let mut pos = Position { boards };
        pos.recompute_unions();
        pos
    }

    /// Convenience wrapper around [`parse_fen`].
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    /// Build a position from all sixteen slots, unions included.
    pub fn from_boards(boards: [Bitboard; BOARD_ARRAY_SIZE]) -> Result<Self, MalformedPosition> {
        let pos = Position { boards };
        pos.validate()?;
        Ok(pos)
    }

    /// Build a position from the twelve piece boards and INFO; unions are derived.
    pub fn from_pieces(pieces: [Bitboard; 12], info: Bitboard) -> Result<Self, MalformedPosition> {
        let mut boards = [Bitboard::EMPTY; BOARD_ARRAY_SIZE];
        boards[..12].copy_from_slice(&pieces);
        boards[INFO] = info;
        let mut pos = Position { boards };
        pos.recompute_unions();
        pos.validate()?;
        Ok(pos)
    }

    pub fn validate(&self) -> Result<(), MalformedPosition> {
        if self.boards[RESERVED].any() {
            return Err(MalformedPosition::ReservedSlotNotEmpty);
        }

        let mut seen = Bitboard::EMPTY;
        for board in &self.boards[..12] {
            if let Some(square) = (seen & *board).lsb() {
                return Err(MalformedPosition::OverlappingPieces { square });
            }
            seen |= *board;
        }

        for color in [Color::White, Color::Black] {
            if self.boards[union_slot(color)] != self.union_of(color) {
                return Err(MalformedPosition::UnionMismatch { color });
            }
            let count = self.piece_bb(Piece::new(color, PieceKind::King)).popcount();
            if count != 1 {
                return Err(MalformedPosition::KingCount { color, count });
            }
        }

        let info = self.boards[INFO];
        if (info & !(CASTLING_RIGHTS | TURN | EN_PASSANT_SQUARES)).any() {
            return Err(MalformedPosition::EnPassantOnBackRank);
        }
        if (info & EN_PASSANT_SQUARES).more_than_one() {
            return Err(MalformedPosition::MultipleEnPassant);
        }
        Ok(())
    }

    #[inline]
    pub fn boards(&self) -> &[Bitboard; BOARD_ARRAY_SIZE] {
        &self.boards
    }

    #[inline]
    pub fn piece_bb(&self, piece: Piece) -> Bitboard {
        self.boards[piece.slot()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.boards[union_slot(color)]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.boards[WHITE_PCS] | self.boards[BLACK_PCS]
    }

    #[inline]
    pub fn info(&self) -> Bitboard {
        self.boards[INFO]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        if (self.boards[INFO] & TURN).any() {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Castling rights still held, as a subset of [`CASTLING_RIGHTS`].
    #[inline]
    pub fn castling_rights(&self) -> Bitboard {
        self.boards[INFO] & CASTLING_RIGHTS
    }

    #[inline]
    pub fn en_passant(&self) -> Option<u8> {
        (self.boards[INFO] & EN_PASSANT_SQUARES).lsb()
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        if !self.occupied().contains(sq) {
            return None;
        }
        (0..12)
            .find(|&slot| self.boards[slot].contains(sq))
            .and_then(Piece::from_slot)
    }

    pub fn king_square(&self, color: Color) -> Option<u8> {
        self.piece_bb(Piece::new(color, PieceKind::King)).lsb()
    }

    /// XOR every toggle of `mv` into its piece board and the info mask into
    /// INFO, then rebuild both unions. Its own inverse.
    #[inline]
    pub fn apply(&mut self, mv: &Move) {
        for toggle in mv.toggles() {
            self.boards[toggle.piece.slot()] ^= toggle.mask;
        }
        self.boards[INFO] ^= mv.info();
        self.recompute_unions();
    }

    pub fn zobrist_hash(&self) -> u64 {
        ZOBRIST.hash(self)
    }

    fn union_of(&self, color: Color) -> Bitboard {
        let first = color.idx() * 6;
        self.boards[first..first + 6]
            .iter()
            .fold(Bitboard::EMPTY, |acc, bb| acc | *bb)
    }

    fn recompute_unions(&mut self) {
        self.boards[WHITE_PCS] = self.union_of(Color::White);
        self.boards[BLACK_PCS] = self.union_of(Color::Black);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

const fn union_slot(color: Color) -> usize {
    match color {
        Color::White => WHITE_PCS,
        Color::Black => BLACK_PCS,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
