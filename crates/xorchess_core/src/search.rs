//! Alpha-beta search with iterative deepening.
//!
//! Scores are always from white's point of view: white nodes maximize and
//! raise alpha, black nodes minimize and lower beta. Both node kinds are one
//! generic routine over a `Side` type, recursing into `Side::Opponent`.
//!
//! The position is mutated in place. Every move applied during search is
//! scoped by a [`MoveGuard`], so the caller's position is bit-for-bit
//! unchanged when search returns, on error paths too.

use std::time::Duration;

use tracing::{debug, info};

use crate::EngineError;
use crate::board::Position;
use crate::eval::evaluate;
use crate::movegen::{generate_moves, in_check};
use crate::moves::Move;
use crate::time_control::SearchLimits;
use crate::tt::{Bound, TranspositionTable, encode_move};
use crate::types::{Color, Score};
use crate::uci::move_to_uci;

pub const MATE_SCORE: Score = 30_000;
pub const INFINITY: Score = Score::MAX;

/// Scores this close to [`MATE_SCORE`] announce a forced mate.
const MATE_THRESHOLD: Score = MATE_SCORE - 256;

pub fn is_mate_score(score: Score) -> bool {
    score.abs() >= MATE_THRESHOLD
}

/// Best move, score and the line that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// None at leaves and in positions without legal moves.
    pub best_move: Option<Move>,
    pub score: Score,
    pub continuation: Option<Box<SearchResult>>,
}

impl SearchResult {
    fn leaf(score: Score) -> Self {
        Self {
            best_move: None,
            score,
            continuation: None,
        }
    }

    /// Moves of the principal variation, from this node down.
    pub fn principal_variation(&self) -> Vec<Move> {
        let mut line = Vec::new();
        let mut node = Some(self);
        while let Some(current) = node {
            let Some(mv) = current.best_move else { break };
            line.push(mv);
            node = current.continuation.as_deref();
        }
        line
    }
}

/// Outcome of [`get_bot_move`].
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    pub score: Score,
    /// Last completed depth.
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    pub pv: Vec<Move>,
}

/// Applies a move on creation and reapplies it on drop.
pub struct MoveGuard<'a> {
    pos: &'a mut Position,
    mv: &'a Move,
    #[cfg(debug_assertions)]
    snapshot: Position,
}

impl<'a> MoveGuard<'a> {
    pub fn apply(pos: &'a mut Position, mv: &'a Move) -> Self {
        #[cfg(debug_assertions)]
        let snapshot = *pos;
        let mover = pos.side_to_move();
        pos.apply(mv);
        assert_ne!(
            pos.side_to_move(),
            mover,
            "applying {mv:?} did not flip the side to move"
        );
        Self {
            pos,
            mv,
            #[cfg(debug_assertions)]
            snapshot,
        }
    }

    pub fn position(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.pos.apply(self.mv);
        #[cfg(debug_assertions)]
        debug_assert_eq!(
            *self.pos, self.snapshot,
            "undoing {:?} did not restore the position",
            self.mv
        );
    }
}

/// The side a node is searched for.
trait Side {
    type Opponent: Side;
    const COLOR: Color;
    /// Starting value of a node's running best.
    const WORST: Score;

    fn improves(candidate: Score, best: Score) -> bool;
    fn tighten(alpha: &mut Score, beta: &mut Score, best: Score);
    fn cutoff(best: Score, alpha: Score, beta: Score) -> bool;
    /// Score when this side has been checkmated `ply` plies from the root.
    fn mated(ply: u8) -> Score;
}

struct White;
struct Black;

impl Side for White {
    type Opponent = Black;
    const COLOR: Color = Color::White;
    const WORST: Score = -INFINITY;

    fn improves(candidate: Score, best: Score) -> bool {
        candidate > best
    }
    fn tighten(alpha: &mut Score, _beta: &mut Score, best: Score) {
        *alpha = (*alpha).max(best);
    }
    fn cutoff(best: Score, _alpha: Score, beta: Score) -> bool {
        best >= beta
    }
    fn mated(ply: u8) -> Score {
        -(MATE_SCORE - ply as Score)
    }
}

impl Side for Black {
    type Opponent = White;
    const COLOR: Color = Color::Black;
    const WORST: Score = INFINITY;

    fn improves(candidate: Score, best: Score) -> bool {
        candidate < best
    }
    fn tighten(_alpha: &mut Score, beta: &mut Score, best: Score) {
        *beta = (*beta).min(best);
    }
    fn cutoff(best: Score, alpha: Score, _beta: Score) -> bool {
        best <= alpha
    }
    fn mated(ply: u8) -> Score {
        MATE_SCORE - ply as Score
    }
}

struct Searcher<'t> {
    table: &'t mut TranspositionTable,
    nodes: u64,
}

impl<'t> Searcher<'t> {
    fn new(table: &'t mut TranspositionTable) -> Self {
        Self { table, nodes: 0 }
    }

    fn root(
        &mut self,
        pos: &mut Position,
        depth: u8,
        alpha: Score,
        beta: Score,
    ) -> Result<SearchResult, EngineError> {
        match pos.side_to_move() {
            Color::White => self.node::<White>(pos, depth, 0, alpha, beta),
            Color::Black => self.node::<Black>(pos, depth, 0, alpha, beta),
        }
    }

    fn node<S: Side>(
        &mut self,
        pos: &mut Position,
        depth: u8,
        ply: u8,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<SearchResult, EngineError> {
        self.nodes += 1;
        if depth == 0 {
            return Ok(SearchResult::leaf(evaluate(pos)));
        }

        let hash = pos.zobrist_hash();
        let mut moves = generate_moves(pos)?;
        if let Some(code) = self.table.probe(hash).map(|entry| entry.move_code) {
            promote_hint(&mut moves, code);
        }

        let (alpha_in, beta_in) = (alpha, beta);
        let mut best = SearchResult::leaf(S::WORST);
        let mut any_legal = false;

        for mv in &moves {
            let mut guard = MoveGuard::apply(pos, mv);
            if in_check(guard.position(), S::COLOR) {
                continue;
            }
            let child =
                self.node::<S::Opponent>(guard.position(), depth - 1, ply + 1, alpha, beta)?;
            drop(guard);

            if !any_legal || S::improves(child.score, best.score) {
                best = SearchResult {
                    best_move: Some(*mv),
                    score: child.score,
                    continuation: Some(Box::new(child)),
                };
            }
            any_legal = true;

            S::tighten(&mut alpha, &mut beta, best.score);
            if S::cutoff(best.score, alpha, beta) {
                break;
            }
        }

        if !any_legal {
            let score = if in_check(pos, S::COLOR) {
                S::mated(ply)
            } else {
                0
            };
            return Ok(SearchResult::leaf(score));
        }

        if let Some(mv) = &best.best_move {
            let bound = if best.score <= alpha_in {
                Bound::Upper
            } else if best.score >= beta_in {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.table.store(hash, mv, depth, bound);
        }
        Ok(best)
    }
}

/// Move the table's suggested move to the front, keeping the rest in order.
fn promote_hint(moves: &mut [Move], code: u64) {
    if let Some(i) = moves.iter().position(|mv| encode_move(mv) == code) {
        moves[..=i].rotate_right(1);
    }
}

/// Search `pos` to `depth` plies inside the window `[alpha, beta]`.
///
/// Fails with [`EngineError::Malformed`] before searching if `pos` breaks a
/// board invariant.
pub fn search(
    pos: &mut Position,
    table: &mut TranspositionTable,
    depth: u8,
    alpha: Score,
    beta: Score,
) -> Result<SearchResult, EngineError> {
    pos.validate()?;
    Searcher::new(table).root(pos, depth, alpha, beta)
}

/// Iterative deepening from depth 1 up to the limit.
///
/// The clock is checked only after a depth completes; the result of the last
/// completed depth is returned. Stops early once a forced mate is found.
pub fn get_bot_move(
    pos: &mut Position,
    table: &mut TranspositionTable,
    limits: &SearchLimits,
) -> Result<SearchReport, EngineError> {
    pos.validate()?;
    let budget = limits.start();
    let mut searcher = Searcher::new(table);
    let max_depth = limits.depth.max(1);

    let mut depth = 1;
    let mut result = searcher.root(pos, depth, -INFINITY, INFINITY)?;
    loop {
        debug!(
            depth,
            score = result.score,
            nodes = searcher.nodes,
            pv = %format_line(pos, &result.principal_variation()),
            "iteration complete"
        );
        if depth >= max_depth
            || result.best_move.is_none()
            || is_mate_score(result.score)
            || budget.expired()
        {
            break;
        }
        depth += 1;
        result = searcher.root(pos, depth, -INFINITY, INFINITY)?;
    }

    let pv = result.principal_variation();
    let report = SearchReport {
        best_move: result.best_move,
        score: result.score,
        depth,
        nodes: searcher.nodes,
        elapsed: budget.elapsed(),
        pv,
    };
    let stats = searcher.table.stats();
    info!(
        depth = report.depth,
        score = report.score,
        nodes = report.nodes,
        elapsed_ms = report.elapsed.as_millis() as u64,
        tt_hits = stats.hits,
        tt_probes = stats.probes,
        "search finished"
    );
    Ok(report)
}

/// Space-separated UCI strings of `line`, played out from `pos`.
pub fn format_line(pos: &Position, line: &[Move]) -> String {
    let mut scratch = *pos;
    let mut parts = Vec::with_capacity(line.len());
    for mv in line {
        parts.push(move_to_uci(mv, &scratch));
        scratch.apply(mv);
    }
    parts.join(" ")
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
