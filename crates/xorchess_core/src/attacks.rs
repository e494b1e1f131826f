//! Per-piece attack sets.
//!
//! - Knights and kings: 64-entry tables built at compile time.
//! - Pawns: set-wise shifts with edge-file masks.
//! - Ranks and diagonals: one first-rank line table indexed by the six inner
//!   occupancy bits of the line. Diagonal occupancy is gathered onto the top
//!   byte by a B-file multiply.
//! - Files: first-blocker isolation. The lowest blocker above comes from
//!   two's complement, the highest blocker below from a leading-zero count.

use crate::bitboard::Bitboard;
use crate::types::Color;

pub static KNIGHT_ATTACKS: [Bitboard; 64] = {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        let bb = 1u64 << sq;
        let mut result = 0u64;
        result |= (bb << 17) & Bitboard::NOT_FILE_A.0;
        result |= (bb << 15) & Bitboard::NOT_FILE_H.0;
        result |= (bb << 10) & Bitboard::NOT_FILE_AB.0;
        result |= (bb << 6) & Bitboard::NOT_FILE_GH.0;
        result |= (bb >> 6) & Bitboard::NOT_FILE_AB.0;
        result |= (bb >> 10) & Bitboard::NOT_FILE_GH.0;
        result |= (bb >> 15) & Bitboard::NOT_FILE_A.0;
        result |= (bb >> 17) & Bitboard::NOT_FILE_H.0;
        attacks[sq as usize] = Bitboard(result);
        sq += 1;
    }
    attacks
};

pub static KING_ATTACKS: [Bitboard; 64] = {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        let bb = 1u64 << sq;
        let mut result = (bb << 8) | (bb >> 8);
        result |= ((bb << 1) | (bb << 9) | (bb >> 7)) & Bitboard::NOT_FILE_A.0;
        result |= ((bb >> 1) | (bb << 7) | (bb >> 9)) & Bitboard::NOT_FILE_H.0;
        attacks[sq as usize] = Bitboard(result);
        sq += 1;
    }
    attacks
};

/// `FIRST_RANK_ATTACKS[file][inner]`: squares a slider on `file` of the first
/// rank attacks, given occupancy bits b..g as `inner`. Edge squares never block
/// anything beyond themselves, so six bits suffice.
pub static FIRST_RANK_ATTACKS: [[u8; 64]; 8] = {
    let mut table = [[0u8; 64]; 8];
    let mut file = 0usize;
    while file < 8 {
        let mut inner = 0usize;
        while inner < 64 {
            let occupied = (inner << 1) as u8;
            let mut attacks = 0u8;
            let mut f = file + 1;
            while f < 8 {
                attacks |= 1u8 << f;
                if occupied & (1u8 << f) != 0 {
                    break;
                }
                f += 1;
            }
            let mut f = file;
            while f > 0 {
                f -= 1;
                attacks |= 1u8 << f;
                if occupied & (1u8 << f) != 0 {
                    break;
                }
            }
            table[file][inner] = attacks;
            inner += 1;
        }
        file += 1;
    }
    table
};

/// a1-h8 direction diagonal through each square, the square included.
pub static DIAGONAL_MASKS: [Bitboard; 64] = {
    let mut masks = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let mut other = 0usize;
        while other < 64 {
            if (other % 8) as i32 - (other / 8) as i32 == (sq % 8) as i32 - (sq / 8) as i32 {
                masks[sq].0 |= 1u64 << other;
            }
            other += 1;
        }
        sq += 1;
    }
    masks
};

/// h1-a8 direction diagonal through each square, the square included.
pub static ANTI_DIAGONAL_MASKS: [Bitboard; 64] = {
    let mut masks = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let mut other = 0usize;
        while other < 64 {
            if other % 8 + other / 8 == sq % 8 + sq / 8 {
                masks[sq].0 |= 1u64 << other;
            }
            other += 1;
        }
        sq += 1;
    }
    masks
};

const FILL_ALL_RANKS: u64 = 0x0101_0101_0101_0101;

#[inline(always)]
pub fn knight_attacks(sq: u8) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

#[inline(always)]
pub fn king_attacks(sq: u8) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

/// Squares attacked by every pawn in `pawns`.
#[inline(always)]
pub fn pawn_attacks(pawns: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => pawns.north_east() | pawns.north_west(),
        Color::Black => pawns.south_east() | pawns.south_west(),
    }
}

#[inline]
pub fn rank_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    let shift = sq & !7;
    let inner = ((occupied.0 >> (shift + 1)) & 0x3F) as usize;
    Bitboard((FIRST_RANK_ATTACKS[(sq & 7) as usize][inner] as u64) << shift)
}

/// Attacks along a diagonal `line` through `sq`.
#[inline]
fn line_attacks(sq: u8, occupied: Bitboard, line: Bitboard) -> Bitboard {
    // One square per file, so the multiply stacks them on the top byte by file.
    let inner = ((line.0 & occupied.0).wrapping_mul(Bitboard::FILE_B.0) >> 58) as usize;
    let fill = (FIRST_RANK_ATTACKS[(sq & 7) as usize][inner] as u64).wrapping_mul(FILL_ALL_RANKS);
    Bitboard(line.0 & fill)
}

#[inline]
pub fn diagonal_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    line_attacks(sq, occupied, DIAGONAL_MASKS[sq as usize])
}

#[inline]
pub fn anti_diagonal_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    line_attacks(sq, occupied, ANTI_DIAGONAL_MASKS[sq as usize])
}

#[inline]
pub fn file_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    let bit = 1u64 << sq;
    let file = Bitboard::FILE_A.0 << (sq & 7);

    let above = Bitboard(file & !((bit << 1).wrapping_sub(1)));
    let first_up = (above & occupied).isolate_lsb();
    let up = above & Bitboard((first_up.0 << 1).wrapping_sub(1));

    // With no blocker below, everything down to rank 1 is reachable.
    let below = Bitboard(file & (bit - 1));
    let first_down = (below & occupied).msb().unwrap_or(0);
    let down = below & Bitboard(!((1u64 << first_down) - 1));

    up | down
}

#[inline]
pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    diagonal_attacks(sq, occupied) | anti_diagonal_attacks(sq, occupied)
}

#[inline]
pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    rank_attacks(sq, occupied) | file_attacks(sq, occupied)
}

#[inline]
pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
