//! Transposition table and compact move encoding.
//!
//! 65536 buckets indexed by the low 16 bits of the Zobrist hash. A bucket
//! holds at most [`BUCKET_DEPTH`] entries, newest first; storing into a full
//! bucket evicts the oldest. Entries remember the best move found for a
//! position, which search tries first on the next visit.
//!
//! Moves are stored as a single `u64`:
//!
//! | bits  | field                                              |
//! |-------|----------------------------------------------------|
//! | 0-1   | move kind                                          |
//! | 2-5   | first toggle piece                                 |
//! | 6-17  | first toggle squares (two 6-bit fields)            |
//! | 18-21 | second toggle piece                                |
//! | 22-33 | second toggle squares (two 6-bit fields)           |
//! | 34-37 | third toggle piece                                 |
//! | 38-43 | third toggle square                                |
//! | 44-47 | castling flags (WK, WQ, BK, BQ)                    |
//! | 48    | side-to-move flag                                  |
//! | 49-60 | en-passant squares (two 6-bit fields, 0 = absent)  |
//!
//! A one-square mask stores its square in both fields. An absent toggle
//! stores piece id 15.

use smallvec::SmallVec;
use tracing::trace;

use crate::EngineError;
use crate::bitboard::Bitboard;
use crate::board::{CASTLING_FLAGS, EN_PASSANT_SQUARES, TURN};
use crate::moves::{Move, MoveKind, Toggle};
use crate::types::Piece;

pub const TABLE_BUCKETS: usize = 1 << 16;
pub const BUCKET_DEPTH: usize = 4;
pub const MAX_STORED_DEPTH: u8 = 63;

const NO_PIECE: u64 = 15;
const CASTLING_SHIFT: u32 = 44;
const TURN_SHIFT: u32 = 48;
const EN_PASSANT_SHIFTS: [u32; 2] = [49, 55];

struct ToggleLayout {
    piece: u32,
    first: u32,
    second: Option<u32>,
}

const TOGGLE_LAYOUT: [ToggleLayout; 3] = [
    ToggleLayout {
        piece: 2,
        first: 6,
        second: Some(12),
    },
    ToggleLayout {
        piece: 18,
        first: 22,
        second: Some(28),
    },
    ToggleLayout {
        piece: 34,
        first: 38,
        second: None,
    },
];

#[inline]
fn field(code: u64, shift: u32, width: u32) -> u64 {
    (code >> shift) & ((1 << width) - 1)
}

/// Pack a move into 61 bits.
///
/// The third toggle only ever occurs in capture-promotions, where it adds the
/// promoted piece on one square, so it keeps a single square field.
pub fn encode_move(mv: &Move) -> u64 {
    let mut code = mv.kind().code();

    for (toggle, layout) in mv.toggle_slots().iter().zip(&TOGGLE_LAYOUT) {
        let Some(toggle) = toggle else {
            code |= NO_PIECE << layout.piece;
            continue;
        };
        let mut squares = toggle.mask;
        let first = squares.pop_lsb().unwrap_or(0) as u64;
        let second = squares.lsb().map_or(first, u64::from);
        code |= (toggle.piece.slot() as u64) << layout.piece;
        code |= first << layout.first;
        if let Some(shift) = layout.second {
            code |= second << shift;
        }
    }

    let info = mv.info();
    for (i, flag) in CASTLING_FLAGS.iter().enumerate() {
        if (info & *flag).any() {
            code |= 1 << (CASTLING_SHIFT + i as u32);
        }
    }
    if (info & TURN).any() {
        code |= 1 << TURN_SHIFT;
    }
    let mut en_passant = info & EN_PASSANT_SQUARES;
    for shift in EN_PASSANT_SHIFTS {
        code |= (en_passant.pop_lsb().unwrap_or(0) as u64) << shift;
    }
    code
}

/// Inverse of [`encode_move`]. `None` if the code names a piece id that is
/// neither a piece slot nor absent, or has no first toggle.
pub fn decode_move(code: u64) -> Option<Move> {
    let kind = MoveKind::from_code(code);

    let mut toggles = [None; 3];
    for (slot, layout) in toggles.iter_mut().zip(&TOGGLE_LAYOUT) {
        let id = field(code, layout.piece, 4);
        if id == NO_PIECE {
            continue;
        }
        let piece = Piece::from_slot(id as usize)?;
        let mut mask = Bitboard::from_square(field(code, layout.first, 6) as u8);
        if let Some(shift) = layout.second {
            mask |= Bitboard::from_square(field(code, shift, 6) as u8);
        }
        *slot = Some(Toggle::new(piece, mask));
    }

    let mut info = Bitboard::EMPTY;
    for (i, flag) in CASTLING_FLAGS.iter().enumerate() {
        if field(code, CASTLING_SHIFT + i as u32, 1) == 1 {
            info |= *flag;
        }
    }
    if field(code, TURN_SHIFT, 1) == 1 {
        info |= TURN;
    }
    for shift in EN_PASSANT_SHIFTS {
        // Square 0 marks an absent field.
        info |= Bitboard::from_square(field(code, shift, 6) as u8) & !Bitboard::from_square(0);
    }

    let [first, second, third] = toggles;
    Some(Move::from_parts(kind, first?, [second, third], info))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact = 0,
    Lower = 1,
    Upper = 2,
}

impl Bound {
    fn from_bits(bits: u8) -> Bound {
        match bits {
            1 => Bound::Lower,
            2 => Bound::Upper,
            _ => Bound::Exact,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableEntry {
    pub hash: u64,
    pub move_code: u64,
    /// Depth in bits 0-5, bound in bits 6-7.
    pub search_info: u8,
}

impl TableEntry {
    pub fn new(hash: u64, best_move: &Move, depth: u8, bound: Bound) -> Self {
        Self {
            hash,
            move_code: encode_move(best_move),
            search_info: depth.min(MAX_STORED_DEPTH) | (bound as u8) << 6,
        }
    }

    pub fn depth(&self) -> u8 {
        self.search_info & 0x3F
    }

    pub fn bound(&self) -> Bound {
        Bound::from_bits(self.search_info >> 6)
    }

    pub fn best_move(&self) -> Option<Move> {
        decode_move(self.move_code)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

type Bucket = SmallVec<[TableEntry; BUCKET_DEPTH]>;

pub struct TranspositionTable {
    buckets: Box<[Bucket]>,
    stats: TableStats,
}

impl TranspositionTable {
    /// Allocate all buckets up front.
    pub fn init() -> Result<Self, EngineError> {
        let mut buckets: Vec<Bucket> = Vec::new();
        buckets
            .try_reserve_exact(TABLE_BUCKETS)
            .map_err(|_| EngineError::Allocation {
                what: "transposition table",
            })?;
        buckets.resize_with(TABLE_BUCKETS, Bucket::new);
        trace!(buckets = TABLE_BUCKETS, depth = BUCKET_DEPTH, "transposition table ready");
        Ok(Self {
            buckets: buckets.into_boxed_slice(),
            stats: TableStats::default(),
        })
    }

    /// Release the table, returning its lifetime counters.
    pub fn teardown(self) -> TableStats {
        trace!(
            probes = self.stats.probes,
            hits = self.stats.hits,
            stores = self.stats.stores,
            "transposition table released"
        );
        self.stats
    }

    #[inline]
    fn index(hash: u64) -> usize {
        (hash & (TABLE_BUCKETS as u64 - 1)) as usize
    }

    /// Entry for exactly `hash`, if any.
    pub fn probe(&mut self, hash: u64) -> Option<&TableEntry> {
        self.stats.probes += 1;
        let entry = self.buckets[Self::index(hash)]
            .iter()
            .find(|entry| entry.hash == hash);
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    /// Insert at the front of the bucket. An existing entry for the same
    /// hash is replaced; otherwise a full bucket drops its oldest entry.
    pub fn store(&mut self, hash: u64, best_move: &Move, depth: u8, bound: Bound) {
        self.stats.stores += 1;
        let bucket = &mut self.buckets[Self::index(hash)];
        if let Some(existing) = bucket.iter().position(|entry| entry.hash == hash) {
            bucket.remove(existing);
        } else if bucket.len() == BUCKET_DEPTH {
            bucket.pop();
        }
        bucket.insert(0, TableEntry::new(hash, best_move, depth, bound));
    }

    /// Entries of the bucket `hash` maps to, newest first.
    pub fn bucket(&self, hash: u64) -> &[TableEntry] {
        &self.buckets[Self::index(hash)]
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }

    /// Drop every entry; counters keep running.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
