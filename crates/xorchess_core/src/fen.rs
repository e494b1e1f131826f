//! Forsyth-Edwards Notation.
//!
//! Board, side to move, castling and en passant are read; the halfmove and
//! fullmove counters are accepted and ignored. Serialization writes `0 1`.

use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::board::*;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 3 fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("invalid piece character {0:?}")]
    BadPiece(char),
    #[error("rank {rank} does not describe exactly 8 files")]
    BadRankLength { rank: u8 },
    #[error("invalid side to move {0:?}")]
    BadSide(String),
    #[error("invalid castling character {0:?}")]
    BadCastling(char),
    #[error("invalid en-passant square {0:?}")]
    BadEnPassant(String),
    #[error(transparent)]
    Malformed(#[from] MalformedPosition),
}

pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(FenError::FieldCount(fields.len()));
    }

    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut pieces = [Bitboard::EMPTY; 12];
    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file = 0u8;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as u8;
            } else {
                let piece = Piece::from_char(ch).ok_or(FenError::BadPiece(ch))?;
                if file >= 8 {
                    return Err(FenError::BadRankLength { rank: rank + 1 });
                }
                pieces[piece.slot()] |= Bitboard::from_square(rank * 8 + file);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::BadRankLength { rank: rank + 1 });
            }
        }
        if file != 8 {
            return Err(FenError::BadRankLength { rank: rank + 1 });
        }
    }

    let mut info = match fields[1] {
        "w" => TURN,
        "b" => Bitboard::EMPTY,
        other => return Err(FenError::BadSide(other.to_string())),
    };

    if fields[2] != "-" {
        for ch in fields[2].chars() {
            info |= match ch {
                'K' => WHITE_KINGSIDE,
                'Q' => WHITE_QUEENSIDE,
                'k' => BLACK_KINGSIDE,
                'q' => BLACK_QUEENSIDE,
                _ => return Err(FenError::BadCastling(ch)),
            };
        }
    }

    // A missing en-passant field reads as "-".
    if let Some(&ep) = fields.get(3).filter(|&&ep| ep != "-") {
        let sq = coord_to_sq(ep)
            .filter(|&sq| EN_PASSANT_SQUARES.contains(sq))
            .ok_or_else(|| FenError::BadEnPassant(ep.to_string()))?;
        info |= Bitboard::from_square(sq);
    }

    Ok(Position::from_pieces(pieces, info)?)
}

pub fn to_fen(pos: &Position) -> String {
    let mut out = String::with_capacity(90);
    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            match pos.piece_at(rank * 8 + file) {
                Some(piece) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match pos.side_to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let rights = pos.castling_rights();
    if rights.is_empty() {
        out.push('-');
    } else {
        for (flag, ch) in CASTLING_FLAGS.iter().zip(['K', 'Q', 'k', 'q']) {
            if (rights & *flag).any() {
                out.push(ch);
            }
        }
    }

    out.push(' ');
    match pos.en_passant() {
        Some(sq) => out.push_str(&sq_to_coord(sq)),
        None => out.push('-'),
    }
    out.push_str(" 0 1");
    out
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
