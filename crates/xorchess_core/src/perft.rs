use crate::{
    board::Position,
    movegen::{in_check, pseudo_moves_into},
    moves::{MAX_MOVES, Move},
};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        buf.clear();
        pseudo_moves_into(pos, buf);

        let us = pos.side_to_move();
        let mut nodes = 0u64;
        for mv in buf.iter() {
            pos.apply(mv);
            if !in_check(pos, us) {
                nodes += if depth == 1 {
                    1
                } else {
                    inner(pos, depth - 1, rest)
                };
            }
            pos.apply(mv);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(MAX_MOVES); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Perft split by root move, in generation order, as `(uci, nodes)`.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(String, u64)> {
    let mut root = Vec::with_capacity(MAX_MOVES);
    pseudo_moves_into(pos, &mut root);
    let us = pos.side_to_move();

    let mut out = Vec::with_capacity(root.len());
    for mv in &root {
        let name = crate::uci::move_to_uci(mv, pos);
        pos.apply(mv);
        if !in_check(pos, us) {
            out.push((name, perft(pos, depth.saturating_sub(1))));
        }
        pos.apply(mv);
    }
    out
}
