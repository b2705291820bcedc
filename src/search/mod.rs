//! Search module for Gobang AI
//!
//! Contains:
//! - Candidate generation and move ordering
//! - Search cache keyed on (position hash, depth)
//! - Cooperative cancellation
//! - Two-role minimax with pass-through bounds
//! - Iterative deepening with an adaptive depth limit
//! - Standard and tactical depth/width policies
//! - Exact tactical solvers (five, block, forced win by fours)

pub mod alphabeta;
pub mod candidates;
pub mod control;
pub mod iterative;
pub mod threat;
pub mod tt;

pub use alphabeta::{Searcher, INF};
pub use candidates::{adaptive_count, candidates, ordered_candidates, tactical_count, Candidate};
pub use control::SearchControl;
pub use iterative::{adaptive_depth, tactical_depth, DeepeningResult, IterativeDeepening};
pub use threat::{
    count_live_threes, count_threats, exists4, find_form5, has_complex_threats,
    has_immediate_threats, stop4, TacticalSolver,
};
pub use tt::{CacheStats, SearchCache};
