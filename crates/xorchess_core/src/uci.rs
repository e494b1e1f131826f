use crate::{board::Position, movegen::legal_moves, moves::Move, types::*};

/// Long algebraic form of `mv` as played from `pos`, e.g. `e2e4`, `e7e8q`.
/// Castling is written as the king's two-square move.
pub fn move_to_uci(mv: &Move, pos: &Position) -> String {
    let (from, to) = mv.squares(pos);
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(from));
    s.push_str(&sq_to_coord(to));
    if let Some(kind) = mv.promotion_kind() {
        s.push(kind.to_char());
    }
    s
}

/// Find the legal move in `pos` that `txt` names.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt[4..].chars().next() {
        Some(c) => Some(PieceKind::from_char(c).filter(|k| PieceKind::PROMOTIONS.contains(k))?),
        None => None,
    };

    legal_moves(pos)
        .into_iter()
        .find(|mv| mv.squares(pos) == (from, to) && mv.promotion_kind() == promo)
}

/// Apply a sequence of UCI moves, stopping at the first one that is not legal.
/// Returns how many moves were applied.
pub fn play_uci_moves<'a>(pos: &mut Position, moves: impl IntoIterator<Item = &'a str>) -> usize {
    let mut applied = 0;
    for txt in moves {
        let Some(mv) = parse_uci_move(pos, txt) else {
            break;
        };
        pos.apply(&mv);
        applied += 1;
    }
    applied
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
