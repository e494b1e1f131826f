use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Slow reference: walk each ray square by square until the first blocker.
fn walk_rays(sq: u8, occupied: Bitboard, directions: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(df, dr) in directions {
        let mut file = (sq % 8) as i8 + df;
        let mut rank = (sq / 8) as i8 + dr;
        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let target = (rank * 8 + file) as u8;
            attacks |= Bitboard::from_square(target);
            if occupied.contains(target) {
                break;
            }
            file += df;
            rank += dr;
        }
    }
    attacks
}

const FILE_DIRS: [(i8, i8); 2] = [(0, 1), (0, -1)];
const RANK_DIRS: [(i8, i8); 2] = [(1, 0), (-1, 0)];
const DIAGONAL_DIRS: [(i8, i8); 2] = [(1, 1), (-1, -1)];
const ANTI_DIAGONAL_DIRS: [(i8, i8); 2] = [(-1, 1), (1, -1)];

fn occupancies() -> Vec<Bitboard> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut out = vec![Bitboard::EMPTY, Bitboard::ALL];
    for _ in 0..200 {
        // Sparse and dense boards both matter for blockers.
        let a: u64 = rng.r#gen();
        let b: u64 = rng.r#gen();
        out.push(Bitboard(a & b));
        out.push(Bitboard(a | b));
        out.push(Bitboard(a));
    }
    out
}

#[test]
fn test_line_attacks_match_ray_walk() {
    for occupied in occupancies() {
        for sq in 0..64u8 {
            assert_eq!(
                rank_attacks(sq, occupied),
                walk_rays(sq, occupied, &RANK_DIRS),
                "rank sq={sq} occ={:#x}",
                occupied.0
            );
            assert_eq!(
                file_attacks(sq, occupied),
                walk_rays(sq, occupied, &FILE_DIRS),
                "file sq={sq} occ={:#x}",
                occupied.0
            );
            assert_eq!(
                diagonal_attacks(sq, occupied),
                walk_rays(sq, occupied, &DIAGONAL_DIRS),
                "diagonal sq={sq} occ={:#x}",
                occupied.0
            );
            assert_eq!(
                anti_diagonal_attacks(sq, occupied),
                walk_rays(sq, occupied, &ANTI_DIAGONAL_DIRS),
                "anti-diagonal sq={sq} occ={:#x}",
                occupied.0
            );
        }
    }
}

#[test]
fn test_queen_is_rook_plus_bishop() {
    let occupied = Bitboard::from_squares(&[12, 27, 44, 50]);
    for sq in 0..64u8 {
        assert_eq!(
            queen_attacks(sq, occupied),
            rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
        );
    }
}

#[test]
fn test_file_attacks_edges() {
    // h8 has nothing above, a1 nothing below.
    assert_eq!(file_attacks(63, Bitboard::EMPTY).popcount(), 7);
    assert_eq!(file_attacks(0, Bitboard::EMPTY).popcount(), 7);
    let blocked = file_attacks(0, Bitboard::from_square(8));
    assert_eq!(blocked, Bitboard::from_square(8));
}

#[test]
fn test_knight_attacks() {
    assert_eq!(knight_attacks(28).popcount(), 8);
    let corner = knight_attacks(0);
    assert_eq!(corner, Bitboard::from_squares(&[10, 17]));
    assert_eq!(knight_attacks(7).popcount(), 2);
}

#[test]
fn test_king_attacks() {
    assert_eq!(king_attacks(28).popcount(), 8);
    assert_eq!(king_attacks(0), Bitboard::from_squares(&[1, 8, 9]));
    assert_eq!(king_attacks(63).popcount(), 3);
}

#[test]
fn test_pawn_attacks_are_set_wise() {
    let pawns = Bitboard::from_squares(&[8, 28]); // a2, e4
    assert_eq!(
        pawn_attacks(pawns, Color::White),
        Bitboard::from_squares(&[17, 35, 37])
    );
    let black = Bitboard::from_square(55); // h7
    assert_eq!(pawn_attacks(black, Color::Black), Bitboard::from_square(46));
}

#[test]
fn test_first_rank_table_empty_line() {
    for file in 0..8 {
        assert_eq!(FIRST_RANK_ATTACKS[file][0].count_ones(), 7);
    }
}
