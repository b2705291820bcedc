//! Iterative deepening driver
//!
//! Searches even depths 2, 4, ... up to an adaptive maximum. Each completed
//! iteration replaces the previous answer; the loop ends early once the
//! position looks decided. Only the deepest iteration is bounded by the
//! wall-clock budget and the external cancel flag, so a shallower answer is
//! always available when it is cut short.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::board::{Board, Stone};
use crate::config::SearchPolicy;
use crate::error::SearchError;

use super::threat::{has_complex_threats, has_immediate_threats};
use super::{Candidate, SearchControl, Searcher, INF};

/// Shallowest depth searched
const FIRST_DEPTH: u32 = 2;

/// Depth limit for the current position.
///
/// `base` is rounded down to even. Tactical positions get two more plies,
/// the opening two fewer, and crowded boards two more.
#[must_use]
pub fn adaptive_depth(board: &Board, me: Stone, base: u32) -> u32 {
    let base = (base & !1).max(FIRST_DEPTH);
    let stones = board.stone_count();
    if has_immediate_threats(board, me) {
        base + 2
    } else if stones < 8 {
        base.saturating_sub(2).max(FIRST_DEPTH)
    } else if stones < 20 {
        base
    } else {
        base + 2
    }
}

/// Deepest limit the tactical policy allows
const TACTICAL_MAX_DEPTH: u32 = 8;

/// Depth limit under the tactical policy.
///
/// Full `base` depth in the opening and the endgame; two more plies for
/// complex or immediate threats and through the midgame, never past eight.
#[must_use]
pub fn tactical_depth(board: &Board, me: Stone, base: u32) -> u32 {
    let base = (base & !1).max(FIRST_DEPTH);
    let midgame = (8..25).contains(&board.stone_count());
    if midgame || has_complex_threats(board, me) || has_immediate_threats(board, me) {
        (base + 2).min(TACTICAL_MAX_DEPTH)
    } else {
        base
    }
}

/// Outcome of a deepening run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeepeningResult {
    /// Best move of the deepest completed iteration
    pub best: Candidate,
    /// Depth of that iteration
    pub depth: u32,
    /// The adaptive limit for this position
    pub limit: u32,
    /// The final iteration was cut short
    pub cancelled: bool,
}

/// Iterative deepening settings.
#[derive(Debug, Clone, Default)]
pub struct IterativeDeepening {
    /// Base depth before adaptation
    pub max_depth: u32,
    /// Budget for the deepest iteration
    pub time_budget: Option<Duration>,
    /// Shared flag that aborts the deepest iteration
    pub cancel: Option<Arc<AtomicBool>>,
}

impl IterativeDeepening {
    #[must_use]
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    #[must_use]
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Control for the deepest iteration, started when that iteration starts
    fn bounded_control(&self) -> SearchControl {
        let mut ctl = match self.time_budget {
            Some(budget) => SearchControl::with_budget(budget),
            None => SearchControl::unbounded(),
        };
        if let Some(flag) = &self.cancel {
            ctl = ctl.cancel_flag(Arc::clone(flag));
        }
        ctl
    }

    /// Run the driver for the searcher's color.
    ///
    /// Clears the search cache first. Fails only if the first iteration
    /// cannot produce a move.
    pub fn run(
        &self,
        searcher: &mut Searcher,
        board: &mut Board,
    ) -> Result<DeepeningResult, SearchError> {
        searcher.clear_cache();
        let limit = match searcher.policy() {
            SearchPolicy::Standard => adaptive_depth(board, searcher.me(), self.max_depth),
            SearchPolicy::Tactical => tactical_depth(board, searcher.me(), self.max_depth),
        };
        let (stop, stop_deep) = {
            let w = searcher.weights();
            (w.deepening_stop, w.deepening_stop_deep)
        };
        debug!(
            "deepening to {limit} (base {}, {} stones)",
            self.max_depth,
            board.stone_count()
        );

        let mut completed: Option<(Candidate, u32)> = None;
        let mut cancelled = false;

        for depth in (FIRST_DEPTH..=limit).step_by(2) {
            let deepest = depth + 2 > limit;
            let ctl = if deepest && completed.is_some() {
                self.bounded_control()
            } else {
                SearchControl::unbounded()
            };

            let best = match searcher.max(board, depth, INF, &ctl) {
                Ok(best) => best,
                Err(SearchError::Cancelled) => {
                    if let Some((prev, prev_depth)) = completed {
                        warn!("depth {depth} cancelled, keeping depth {prev_depth} move {prev}");
                    }
                    cancelled = true;
                    break;
                }
                Err(e) => return Err(e),
            };
            debug!("depth {depth}: {best} ({} nodes)", searcher.nodes());
            completed = Some((best, depth));

            if best.value > stop || (depth >= 4 && best.value > stop_deep) {
                debug!("stopping at depth {depth}: value {}", best.value);
                break;
            }
        }

        let (best, depth) = completed.ok_or(SearchError::Cancelled)?;
        Ok(DeepeningResult {
            best,
            depth,
            limit,
            cancelled,
        })
    }
}
