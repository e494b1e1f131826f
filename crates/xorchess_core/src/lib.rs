pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod eval;
pub mod fen;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod search;
pub mod time_control;
pub mod tt;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use bitboard::Bitboard;
pub use board::{MalformedPosition, Position};
pub use eval::{EvalTerms, blend, eval_terms, evaluate};
pub use fen::{FenError, parse_fen, to_fen};
pub use movegen::{attacked_squares, generate_moves, in_check, legal_moves};
pub use moves::{MAX_MOVES, Move, MoveKind, Toggle};
pub use perft::{perft, perft_divide};
pub use search::{
    INFINITY, MATE_SCORE, MoveGuard, SearchReport, SearchResult, get_bot_move, search,
};
pub use time_control::*;
pub use tt::{Bound, TableEntry, TableStats, TranspositionTable, decode_move, encode_move};
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

use thiserror::Error;

/// Failures the search can report instead of a result.
///
/// Broken internal invariants are not errors; they panic.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A `try_reserve` for a move list or the table failed.
    #[error("failed to allocate {what}")]
    Allocation { what: &'static str },
    #[error(transparent)]
    Malformed(#[from] MalformedPosition),
}
