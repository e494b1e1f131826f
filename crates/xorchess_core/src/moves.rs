//! Reversible move descriptors.
//!
//! A [`Move`] is up to three `(piece, mask)` toggles plus an INFO mask. Every
//! field is an XOR mask computed from the position the move was generated in,
//! so [`Position::apply`] is its own inverse.

use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::types::*;

/// Upper bound on pseudo-legal moves in any reachable position.
pub const MAX_MOVES: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Includes castling, which toggles king and rook.
    Quiet,
    /// Includes en passant.
    Capture,
    Promotion,
    CapturePromotion,
}

impl MoveKind {
    pub const fn code(self) -> u64 {
        match self {
            MoveKind::Quiet => 0,
            MoveKind::Capture => 1,
            MoveKind::Promotion => 2,
            MoveKind::CapturePromotion => 3,
        }
    }

    pub const fn from_code(code: u64) -> MoveKind {
        match code & 3 {
            0 => MoveKind::Quiet,
            1 => MoveKind::Capture,
            2 => MoveKind::Promotion,
            _ => MoveKind::CapturePromotion,
        }
    }
}

/// One piece board and the squares to flip on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Toggle {
    pub piece: Piece,
    pub mask: Bitboard,
}

impl Toggle {
    pub const fn new(piece: Piece, mask: Bitboard) -> Self {
        Self { piece, mask }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    mover: Toggle,
    // Present extra toggles always form a prefix.
    extra: [Option<Toggle>; 2],
    info: Bitboard,
}

impl Move {
    /// A piece moving between the two squares of `mask`.
    pub const fn quiet(piece: Piece, mask: Bitboard, info: Bitboard) -> Self {
        Self {
            kind: MoveKind::Quiet,
            mover: Toggle::new(piece, mask),
            extra: [None, None],
            info,
        }
    }

    /// King and rook moving together.
    pub const fn castle(
        king: Piece,
        king_mask: Bitboard,
        rook: Piece,
        rook_mask: Bitboard,
        info: Bitboard,
    ) -> Self {
        Self {
            kind: MoveKind::Quiet,
            mover: Toggle::new(king, king_mask),
            extra: [Some(Toggle::new(rook, rook_mask)), None],
            info,
        }
    }

    /// `victim_mask` is the captured square, which differs from the
    /// destination only for en passant.
    pub const fn capture(
        piece: Piece,
        mask: Bitboard,
        victim: Piece,
        victim_mask: Bitboard,
        info: Bitboard,
    ) -> Self {
        Self {
            kind: MoveKind::Capture,
            mover: Toggle::new(piece, mask),
            extra: [Some(Toggle::new(victim, victim_mask)), None],
            info,
        }
    }

    pub const fn promotion(
        pawn: Piece,
        from: Bitboard,
        promoted: Piece,
        to: Bitboard,
        info: Bitboard,
    ) -> Self {
        Self {
            kind: MoveKind::Promotion,
            mover: Toggle::new(pawn, from),
            extra: [Some(Toggle::new(promoted, to)), None],
            info,
        }
    }

    pub const fn capture_promotion(
        pawn: Piece,
        from: Bitboard,
        victim: Piece,
        to: Bitboard,
        promoted: Piece,
        info: Bitboard,
    ) -> Self {
        Self {
            kind: MoveKind::CapturePromotion,
            mover: Toggle::new(pawn, from),
            extra: [Some(Toggle::new(victim, to)), Some(Toggle::new(promoted, to))],
            info,
        }
    }

    pub(crate) const fn from_parts(
        kind: MoveKind,
        mover: Toggle,
        extra: [Option<Toggle>; 2],
        info: Bitboard,
    ) -> Self {
        Self {
            kind,
            mover,
            extra,
            info,
        }
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub fn toggles(&self) -> impl Iterator<Item = &Toggle> {
        std::iter::once(&self.mover).chain(self.extra.iter().flatten())
    }

    /// All three toggle slots, absent ones as `None`.
    #[inline]
    pub fn toggle_slots(&self) -> [Option<Toggle>; 3] {
        [Some(self.mover), self.extra[0], self.extra[1]]
    }

    #[inline]
    pub fn info(&self) -> Bitboard {
        self.info
    }

    /// The piece that moves (the pawn, for promotions).
    pub fn mover(&self) -> Piece {
        self.mover.piece
    }

    pub fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::CapturePromotion)
    }

    pub fn victim(&self) -> Option<Piece> {
        if self.is_capture() {
            self.extra[0].map(|t| t.piece)
        } else {
            None
        }
    }

    pub fn promotion_kind(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion => self.extra[0].map(|t| t.piece.kind),
            MoveKind::CapturePromotion => self.extra[1].map(|t| t.piece.kind),
            _ => None,
        }
    }

    /// Origin and destination squares, read against the position the move
    /// was generated in (before it is applied).
    pub fn squares(&self, pos: &Position) -> (u8, u8) {
        let first = self.mover.mask;
        let from = first & pos.piece_bb(self.mover.piece);
        let to = match self.kind {
            MoveKind::Promotion | MoveKind::CapturePromotion => self
                .toggles()
                .last()
                .map_or(Bitboard::EMPTY, |t| t.mask),
            _ => first & !pos.piece_bb(self.mover.piece),
        };
        (from.lsb().unwrap_or(0), to.lsb().unwrap_or(0))
    }

    /// Ordering priority: captures by most valuable victim then least
    /// valuable attacker, promotions by promoted piece, quiet moves last.
    pub fn order_score(&self) -> i32 {
        let attacker = self.mover().kind.order_value();
        let promotion = self.promotion_kind().map_or(0, |k| k.order_value() * 10);
        match self.kind {
            MoveKind::Quiet => 0,
            MoveKind::Promotion => 1000 + promotion - attacker,
            MoveKind::Capture | MoveKind::CapturePromotion => {
                let victim = self.victim().map_or(0, |v| v.kind.order_value());
                1000 + victim * 10 - attacker + promotion
            }
        }
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod moves_tests;
