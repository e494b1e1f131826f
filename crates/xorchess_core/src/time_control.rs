//! Search limits and the wall-clock budget.
//!
//! The budget is only consulted between iterative-deepening passes, so a
//! single deep iteration can overrun it.

use std::time::{Duration, Instant};

/// Deepest iteration the search will ever run.
pub const MAX_SEARCH_DEPTH: u8 = 63;

/// Search limits for a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum depth in plies.
    pub depth: u8,
    /// Wall-clock budget (None = depth only).
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    /// Create limits with only depth constraint.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth: depth.clamp(1, MAX_SEARCH_DEPTH),
            move_time: None,
        }
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth: depth.clamp(1, MAX_SEARCH_DEPTH),
            move_time: Some(move_time),
        }
    }

    /// Create limits with only time constraint.
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: MAX_SEARCH_DEPTH,
            move_time: Some(move_time),
        }
    }

    /// Start the clock for a search under these limits.
    pub fn start(&self) -> TimeBudget {
        TimeBudget::new(self.move_time)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    started: Instant,
    limit: Option<Duration>,
}

impl TimeBudget {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Remaining time (None if unlimited).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }

    pub fn expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
