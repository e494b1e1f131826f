//! Pseudo-legal move generation.
//!
//! The generator emits every move of the side to move, ordered for search,
//! without filtering moves that leave the mover's king attacked. Callers
//! filter by applying the move and testing [`in_check`]; [`legal_moves`] does
//! exactly that.

use std::cmp::Reverse;

use crate::attacks::*;
use crate::bitboard::Bitboard;
use crate::board::*;
use crate::moves::{MAX_MOVES, Move};
use crate::types::*;
use crate::EngineError;

/// Castling geometry for one right.
struct CastleRule {
    right: Bitboard,
    king_from: u8,
    king_to: u8,
    rook_from: u8,
    rook_to: u8,
    /// Squares that must be empty.
    between: Bitboard,
    /// Squares the king starts on, crosses and lands on.
    king_path: Bitboard,
}

const fn castle_rule(right: Bitboard, rank: u8, kingside: bool) -> CastleRule {
    let base = rank * 8;
    if kingside {
        CastleRule {
            right,
            king_from: base + 4,
            king_to: base + 6,
            rook_from: base + 7,
            rook_to: base + 5,
            between: Bitboard::from_squares(&[base + 5, base + 6]),
            king_path: Bitboard::from_squares(&[base + 4, base + 5, base + 6]),
        }
    } else {
        CastleRule {
            right,
            king_from: base + 4,
            king_to: base + 2,
            rook_from: base,
            rook_to: base + 3,
            between: Bitboard::from_squares(&[base + 1, base + 2, base + 3]),
            king_path: Bitboard::from_squares(&[base + 4, base + 3, base + 2]),
        }
    }
}

const WHITE_CASTLES: [CastleRule; 2] = [
    castle_rule(WHITE_KINGSIDE, 0, true),
    castle_rule(WHITE_QUEENSIDE, 0, false),
];
const BLACK_CASTLES: [CastleRule; 2] = [
    castle_rule(BLACK_KINGSIDE, 7, true),
    castle_rule(BLACK_QUEENSIDE, 7, false),
];

/// Every square attacked by `by`, own pieces included.
pub fn attacked_squares(pos: &Position, by: Color) -> Bitboard {
    let occupied = pos.occupied();
    let piece = |kind| pos.piece_bb(Piece::new(by, kind));

    let mut attacks = pawn_attacks(piece(PieceKind::Pawn), by);
    for sq in piece(PieceKind::Knight) {
        attacks |= knight_attacks(sq);
    }
    for sq in piece(PieceKind::Bishop) | piece(PieceKind::Queen) {
        attacks |= bishop_attacks(sq, occupied);
    }
    for sq in piece(PieceKind::Rook) | piece(PieceKind::Queen) {
        attacks |= rook_attacks(sq, occupied);
    }
    for sq in piece(PieceKind::King) {
        attacks |= king_attacks(sq);
    }
    attacks
}

/// Is `color`'s king attacked by the other side?
pub fn in_check(pos: &Position, color: Color) -> bool {
    let king = pos.piece_bb(Piece::new(color, PieceKind::King));
    (king & attacked_squares(pos, color.other())).any()
}

/// Allocate a move list and fill it with the ordered pseudo-legal moves.
pub fn generate_moves(pos: &Position) -> Result<Vec<Move>, EngineError> {
    let mut moves = Vec::new();
    moves
        .try_reserve_exact(MAX_MOVES)
        .map_err(|_| EngineError::Allocation { what: "move list" })?;
    pseudo_moves_into(pos, &mut moves);
    Ok(moves)
}

/// Append the ordered pseudo-legal moves of the side to move to `out`.
pub fn pseudo_moves_into(pos: &Position, out: &mut Vec<Move>) {
    let start = out.len();
    let us = pos.side_to_move();
    let mut generator = Generator {
        pos,
        us,
        own: pos.occupancy(us),
        enemy: pos.occupancy(us.other()),
        occupied: pos.occupied(),
        base_info: TURN | (pos.info() & EN_PASSANT_SQUARES),
        out,
    };
    generator.pawn_moves();
    generator.piece_moves();
    generator.king_moves();
    debug_assert!(generator.out.len() - start <= MAX_MOVES);

    // Stable, so equal keys keep generation order.
    out[start..].sort_by_key(|mv| Reverse(mv.order_score()));
}

/// Moves that do not leave the mover's king attacked.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(MAX_MOVES);
    legal_moves_into(pos, &mut moves);
    moves
}

pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    let start = out.len();
    pseudo_moves_into(pos, out);
    let us = pos.side_to_move();
    let mut scratch = *pos;
    let mut i = start;
    while i < out.len() {
        let mv = out[i];
        scratch.apply(&mv);
        let legal = !in_check(&scratch, us);
        scratch.apply(&mv);
        if legal {
            i += 1;
        } else {
            out.remove(i);
        }
    }
}

struct Generator<'a> {
    pos: &'a Position,
    us: Color,
    own: Bitboard,
    enemy: Bitboard,
    occupied: Bitboard,
    /// Flips the turn and clears the current en-passant square.
    base_info: Bitboard,
    out: &'a mut Vec<Move>,
}

impl Generator<'_> {
    fn piece(&self, kind: PieceKind) -> Piece {
        Piece::new(self.us, kind)
    }

    /// Enemy piece on `sq`, scanning pawn to queen. A king is never a victim.
    fn victim_at(&self, sq: u8) -> Option<Piece> {
        PieceKind::ALL[..5]
            .iter()
            .map(|&kind| Piece::new(self.us.other(), kind))
            .find(|&piece| self.pos.piece_bb(piece).contains(sq))
    }

    /// Base info mask plus any castling right tied to a corner this move
    /// leaves or lands on.
    fn info_for(&self, from: u8, to: u8) -> Bitboard {
        let touched = Bitboard::from_square(from) | Bitboard::from_square(to);
        self.base_info | (self.pos.info() & touched & CASTLING_RIGHTS)
    }

    fn push_targets(&mut self, piece: Piece, from: u8, targets: Bitboard, extra_info: Bitboard) {
        for to in targets {
            let mask = Bitboard::from_square(from) | Bitboard::from_square(to);
            let info = self.info_for(from, to) | extra_info;
            if self.enemy.contains(to) {
                if let Some(victim) = self.victim_at(to) {
                    self.out.push(Move::capture(
                        piece,
                        mask,
                        victim,
                        Bitboard::from_square(to),
                        info,
                    ));
                }
            } else {
                self.out.push(Move::quiet(piece, mask, info));
            }
        }
    }

    fn push_pawn_move(&mut self, from: u8, to: u8) {
        let pawn = self.piece(PieceKind::Pawn);
        let from_bb = Bitboard::from_square(from);
        let to_bb = Bitboard::from_square(to);
        let info = self.info_for(from, to);
        let victim = if self.enemy.contains(to) {
            match self.victim_at(to) {
                Some(victim) => Some(victim),
                None => return,
            }
        } else {
            None
        };

        if (to_bb & (Bitboard::RANK_1 | Bitboard::RANK_8)).any() {
            for kind in PieceKind::PROMOTIONS {
                let promoted = self.piece(kind);
                self.out.push(match victim {
                    Some(victim) => {
                        Move::capture_promotion(pawn, from_bb, victim, to_bb, promoted, info)
                    }
                    None => Move::promotion(pawn, from_bb, promoted, to_bb, info),
                });
            }
        } else {
            self.out.push(match victim {
                Some(victim) => Move::capture(pawn, from_bb | to_bb, victim, to_bb, info),
                None => Move::quiet(pawn, from_bb | to_bb, info),
            });
        }
    }

    fn pawn_moves(&mut self) {
        let pawns = self.pos.piece_bb(self.piece(PieceKind::Pawn));
        let empty = !self.occupied;

        let (single, double_rank, forward) = match self.us {
            Color::White => (pawns.north() & empty, Bitboard::RANK_3, 8i8),
            Color::Black => (pawns.south() & empty, Bitboard::RANK_6, -8i8),
        };
        let double = match self.us {
            Color::White => (single & double_rank).north() & empty,
            Color::Black => (single & double_rank).south() & empty,
        };

        for to in single {
            self.push_pawn_move((to as i8 - forward) as u8, to);
        }
        for to in double {
            let from = (to as i8 - 2 * forward) as u8;
            let skipped = (to as i8 - forward) as u8;
            let pawn = self.piece(PieceKind::Pawn);
            let mask = Bitboard::from_square(from) | Bitboard::from_square(to);
            let info = self.base_info | Bitboard::from_square(skipped);
            self.out.push(Move::quiet(pawn, mask, info));
        }

        let (west, east) = match self.us {
            Color::White => (pawns.north_west(), pawns.north_east()),
            Color::Black => (pawns.south_west(), pawns.south_east()),
        };
        for to in west & self.enemy {
            self.push_pawn_move((to as i8 - forward + 1) as u8, to);
        }
        for to in east & self.enemy {
            self.push_pawn_move((to as i8 - forward - 1) as u8, to);
        }

        self.en_passant(pawns, forward);
    }

    fn en_passant(&mut self, pawns: Bitboard, forward: i8) {
        let target_rank = match self.us {
            Color::White => Bitboard::RANK_6,
            Color::Black => Bitboard::RANK_3,
        };
        let Some(target) = (self.pos.info() & target_rank).lsb() else {
            return;
        };
        let captured = (target as i8 - forward) as u8;
        let victim = Piece::new(self.us.other(), PieceKind::Pawn);
        if !self.pos.piece_bb(victim).contains(captured) {
            return;
        }
        // Our pawns attacking the target are the squares an enemy pawn there would attack.
        let attackers = pawn_attacks(Bitboard::from_square(target), self.us.other()) & pawns;
        let pawn = self.piece(PieceKind::Pawn);
        for from in attackers {
            let mask = Bitboard::from_square(from) | Bitboard::from_square(target);
            self.out.push(Move::capture(
                pawn,
                mask,
                victim,
                Bitboard::from_square(captured),
                self.base_info,
            ));
        }
    }

    fn piece_moves(&mut self) {
        let movable = !self.own;
        for kind in [
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ] {
            let piece = self.piece(kind);
            for from in self.pos.piece_bb(piece) {
                let attacks = match kind {
                    PieceKind::Knight => knight_attacks(from),
                    PieceKind::Bishop => bishop_attacks(from, self.occupied),
                    PieceKind::Rook => rook_attacks(from, self.occupied),
                    _ => queen_attacks(from, self.occupied),
                };
                self.push_targets(piece, from, attacks & movable, Bitboard::EMPTY);
            }
        }
    }

    fn king_moves(&mut self) {
        let king = self.piece(PieceKind::King);
        let Some(from) = self.pos.piece_bb(king).lsb() else {
            return;
        };
        let own_rights = self.pos.info() & castling_rights_of(self.us);
        self.push_targets(king, from, king_attacks(from) & !self.own, own_rights);

        if own_rights.is_empty() {
            return;
        }
        let rules = match self.us {
            Color::White => &WHITE_CASTLES,
            Color::Black => &BLACK_CASTLES,
        };
        let rook = self.piece(PieceKind::Rook);
        let mut enemy_attacks = None;
        for rule in rules {
            if !own_rights.contains_all(rule.right)
                || from != rule.king_from
                || !self.pos.piece_bb(rook).contains(rule.rook_from)
                || (self.occupied & rule.between).any()
            {
                continue;
            }
            let attacked =
                *enemy_attacks.get_or_insert_with(|| attacked_squares(self.pos, self.us.other()));
            if (attacked & rule.king_path).any() {
                continue;
            }
            self.out.push(Move::castle(
                king,
                Bitboard::from_squares(&[rule.king_from, rule.king_to]),
                rook,
                Bitboard::from_squares(&[rule.rook_from, rule.rook_to]),
                self.base_info | own_rights,
            ));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
