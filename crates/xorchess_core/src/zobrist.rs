//! Zobrist keys for the transposition table.
//!
//! The position hash XORs:
//! - one key per occupied (piece, square), 12 × 64 values,
//! - one key per INFO flag that is set (white kingside, white queenside,
//!   black kingside, black queenside, white to move),
//! - the file key of the en-passant square, if any.
//!
//! Keys come from xorshift64 with a fixed seed, in that generation order
//! (pieces, en-passant files, info flags), so hashes are stable across runs.

use crate::board::{CASTLING_FLAGS, EN_PASSANT_SQUARES, Position, TURN};
use crate::types::Piece;

const SEED: u64 = 0x9E37_79B9_7F4A_7C55;

pub struct ZobristKeys {
    /// Indexed by piece slot then square.
    pub pieces: [[u64; 64]; 12],
    /// Indexed by file of the en-passant square.
    pub en_passant: [u64; 8],
    /// White kingside, white queenside, black kingside, black queenside, white to move.
    pub info: [u64; 5],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = SEED;

        let mut pieces = [[0u64; 64]; 12];
        let mut slot = 0;
        while slot < 12 {
            let mut sq = 0;
            while sq < 64 {
                state = xorshift64(state);
                pieces[slot][sq] = state;
                sq += 1;
            }
            slot += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        let mut info = [0u64; 5];
        let mut i = 0;
        while i < 5 {
            state = xorshift64(state);
            info[i] = state;
            i += 1;
        }

        Self {
            pieces,
            en_passant,
            info,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.slot()][sq as usize]
    }

    pub fn hash(&self, pos: &Position) -> u64 {
        let boards = pos.boards();
        let mut hash = 0u64;
        for (slot, keys) in self.pieces.iter().enumerate() {
            for sq in boards[slot] {
                hash ^= keys[sq as usize];
            }
        }

        let info = pos.info();
        for (key, flag) in self.info.iter().zip(CASTLING_FLAGS.iter().chain([&TURN])) {
            if (info & *flag).any() {
                hash ^= key;
            }
        }
        if let Some(sq) = (info & EN_PASSANT_SQUARES).lsb() {
            hash ^= self.en_passant[(sq % 8) as usize];
        }
        hash
    }
}

/// Keys computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
