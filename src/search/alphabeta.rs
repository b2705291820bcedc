//! Two-role minimax search with pass-through bounds
//!
//! The engine's own side maximises the net board value, the opponent
//! minimises it. Each node passes its running best down as the child's
//! bound, and a child that reaches the bound returns at once (fail-soft).
//!
//! # Features
//!
//! - Candidates ordered by point evaluation for the side to move
//! - Candidate count adapted to the game phase, or under the tactical
//!   policy also to threat density and remaining depth
//! - Immediate return when a placement already decides the game
//! - Ties broken toward the board center
//! - (hash, depth) cache shared by both roles
//! - Cooperative cancellation checked at every node
//!
//! # Example
//!
//! ```
//! use gobang::board::{Board, Pos, Stone};
//! use gobang::config::EngineConfig;
//! use gobang::search::{SearchControl, Searcher, INF};
//!
//! let mut board = Board::new();
//! for x in 7..11 {
//!     board.set(Pos::new(x, 7), Stone::Black);
//! }
//! board.set(Pos::new(7, 8), Stone::White);
//!
//! let mut searcher = Searcher::from_config(Stone::Black, &EngineConfig::default());
//! let best = searcher.max(&mut board, 2, INF, &SearchControl::unbounded()).unwrap();
//! assert!(best.pos == Pos::new(6, 7) || best.pos == Pos::new(11, 7));
//! ```

use crate::board::{Board, Stone};
use crate::config::{EngineConfig, MoveOrdering, SearchPolicy};
use crate::error::SearchError;
use crate::eval::{evaluate, EvalWeights};

use super::candidates::{adaptive_count, ordered_candidates, tactical_count};
use super::threat::has_complex_threats;
use super::{Candidate, CacheStats, SearchCache, SearchControl};

/// Bound larger than any board value
pub const INF: i32 = 100_000_000;

/// Which side of the minimax a node plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Max,
    Min,
}

impl Role {
    #[inline]
    fn flip(self) -> Self {
        match self {
            Role::Max => Role::Min,
            Role::Min => Role::Max,
        }
    }

    /// Starting value of the running best
    #[inline]
    fn worst(self) -> i32 {
        match self {
            Role::Max => -INF,
            Role::Min => INF,
        }
    }

    /// `a` strictly better than `b` for this role
    #[inline]
    fn better(self, a: i32, b: i32) -> bool {
        match self {
            Role::Max => a > b,
            Role::Min => a < b,
        }
    }

    /// The child's value makes the parent's bound useless
    #[inline]
    fn reaches(self, value: i32, bound: i32) -> bool {
        match self {
            Role::Max => value >= bound,
            Role::Min => value <= bound,
        }
    }

    /// A placement with this net value ends the game for this role
    #[inline]
    fn decided(self, net: i32, cutoff: i32) -> bool {
        match self {
            Role::Max => net > cutoff,
            Role::Min => net < -cutoff,
        }
    }
}

/// Minimax searcher for one engine color.
pub struct Searcher {
    me: Stone,
    weights: EvalWeights,
    max_candidates: usize,
    ordering: MoveOrdering,
    policy: SearchPolicy,
    cache: SearchCache,
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(
        me: Stone,
        weights: EvalWeights,
        max_candidates: usize,
        ordering: MoveOrdering,
        policy: SearchPolicy,
        cache_capacity: usize,
    ) -> Self {
        Self {
            me,
            weights,
            max_candidates: max_candidates.max(1),
            ordering,
            policy,
            cache: SearchCache::new(cache_capacity),
            nodes: 0,
        }
    }

    #[must_use]
    pub fn from_config(me: Stone, config: &EngineConfig) -> Self {
        Self::new(
            me,
            config.weights(),
            config.max_candidates,
            config.ordering,
            config.policy,
            config.cache_capacity,
        )
    }

    /// The maximising color
    #[must_use]
    pub fn me(&self) -> Stone {
        self.me
    }

    #[must_use]
    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    #[must_use]
    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Nodes entered since the last reset
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn reset_nodes(&mut self) {
        self.nodes = 0;
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forget all cached results.
    pub fn clear_cache(&mut self) {
        log::trace!("clearing search cache ({} stores)", self.cache.stats().stores);
        self.cache.clear();
    }

    /// Best move for the engine's color with `step` plies to go.
    ///
    /// Returns as soon as a child's value reaches `found_min`. The board is
    /// left unchanged on every path, including errors.
    pub fn max(
        &mut self,
        board: &mut Board,
        step: u32,
        found_min: i32,
        ctl: &SearchControl,
    ) -> Result<Candidate, SearchError> {
        self.node(board, Role::Max, step, found_min, ctl)
    }

    /// Best reply for the opponent with `step` plies to go.
    ///
    /// Returns as soon as a child's value falls to `found_max`.
    pub fn min(
        &mut self,
        board: &mut Board,
        step: u32,
        found_max: i32,
        ctl: &SearchControl,
    ) -> Result<Candidate, SearchError> {
        self.node(board, Role::Min, step, found_max, ctl)
    }

    /// Number of candidates a node with `step` plies to go expands
    fn width(&self, board: &Board, step: u32, available: usize) -> usize {
        let stones = board.stone_count();
        match self.policy {
            SearchPolicy::Standard => adaptive_count(self.max_candidates, stones, available),
            SearchPolicy::Tactical => {
                let complex = has_complex_threats(board, self.me);
                tactical_count(self.max_candidates, stones, step, complex, available)
            }
        }
    }

    /// Board value from the engine's point of view
    #[inline]
    fn net_value(&self, board: &Board) -> i32 {
        evaluate(board, self.me, &self.weights)
    }

    fn node(
        &mut self,
        board: &mut Board,
        role: Role,
        step: u32,
        bound: i32,
        ctl: &SearchControl,
    ) -> Result<Candidate, SearchError> {
        if ctl.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        self.nodes += 1;

        let hash = board.hash();
        if let Some(hit) = self.cache.probe(hash, step) {
            return Ok(hit);
        }

        let mover = match role {
            Role::Max => self.me,
            Role::Min => self.me.opponent(),
        };
        let moves = ordered_candidates(board, mover, &self.weights, self.ordering);

        // Leaf: only the best-ordered move is played out
        if step <= 1 {
            let first = moves.first().ok_or(SearchError::NoCandidates)?;
            let value = {
                let trial = board.trial(first.pos, mover);
                self.net_value(&trial)
            };
            let result = Candidate::new(first.pos, value);
            self.cache.store(hash, step, result);
            return Ok(result);
        }

        let width = self.width(board, step, moves.len());
        let mut best: Option<Candidate> = None;
        let mut best_value = role.worst();

        for mv in moves.iter().take(width) {
            let mut trial = board.trial(mv.pos, mover);

            let net = self.net_value(&trial);
            if role.decided(net, self.weights.win_cutoff) {
                drop(trial);
                let result = Candidate::new(mv.pos, net);
                self.cache.store(hash, step, result);
                return Ok(result);
            }

            let reply = self.node(&mut trial, role.flip(), step - 1, best_value, ctl)?;
            drop(trial);

            if role.reaches(reply.value, bound) {
                let result = Candidate::new(mv.pos, reply.value);
                self.cache.store(hash, step, result);
                return Ok(result);
            }

            let improves = match best {
                None => true,
                Some(b) => {
                    role.better(reply.value, b.value)
                        || (reply.value == b.value && mv.pos.nearer_center_than(b.pos))
                }
            };
            if improves {
                best = Some(Candidate::new(mv.pos, reply.value));
                best_value = reply.value;
            }
        }

        let result = best.ok_or(SearchError::NoCandidates)?;
        self.cache.store(hash, step, result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;
    use std::time::Duration;

    fn searcher(me: Stone) -> Searcher {
        let config = EngineConfig {
            max_candidates: 6,
            ..EngineConfig::default()
        };
        Searcher::from_config(me, &config)
    }

    fn board_with(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(x, y, s) in stones {
            board.set(Pos::new(x, y), s);
        }
        board
    }

    fn midgame() -> Board {
        board_with(&[
            (7, 7, Stone::Black),
            (8, 7, Stone::White),
            (8, 8, Stone::Black),
            (6, 6, Stone::White),
            (9, 9, Stone::Black),
            (7, 9, Stone::White),
        ])
    }

    /// Full board except `open`, colored so no line holds more than two
    /// alike. Filling the open cells never makes a five, so every finished
    /// board is worth zero.
    fn packed(open: &[Pos]) -> Board {
        let mut board = Board::new();
        for pos in Pos::all().filter(|p| !open.contains(p)) {
            let phase = (u32::from(pos.x) + 2 * u32::from(pos.y)) % 4;
            board.set(pos, if phase < 2 { Stone::Black } else { Stone::White });
        }
        board
    }

    /// (5,6) and (7,7) look along identical lines, so they tie everywhere;
    /// (5,6) comes first in row-major order
    fn two_holes() -> Board {
        packed(&[Pos::new(5, 6), Pos::new(7, 7)])
    }

    #[test]
    fn test_search_empty_board_has_no_candidates() {
        let mut board = Board::new();
        let result = searcher(Stone::Black).max(&mut board, 2, INF, &SearchControl::unbounded());
        assert_eq!(result, Err(SearchError::NoCandidates));
    }

    #[test]
    fn test_search_finds_winning_move() {
        let mut board = board_with(&[
            (3, 2, Stone::White),
            (3, 3, Stone::White),
            (3, 4, Stone::White),
            (3, 5, Stone::White),
            (2, 2, Stone::Black),
            (4, 9, Stone::Black),
        ]);
        board.set(Pos::new(3, 6), Stone::Black);

        // White's four is closed at the bottom, so only (3,1) completes it
        let mut s = searcher(Stone::White);
        let best = s.max(&mut board, 2, INF, &SearchControl::unbounded()).unwrap();
        assert_eq!(best.pos, Pos::new(3, 1));
        assert!(best.value > s.weights().win_cutoff);
    }

    #[test]
    fn test_min_finds_opponent_win() {
        let mut board = board_with(&[
            (5, 5, Stone::White),
            (6, 6, Stone::White),
            (7, 7, Stone::White),
            (8, 8, Stone::White),
            (4, 4, Stone::Black),
            (1, 12, Stone::Black),
        ]);
        let mut s = searcher(Stone::Black);
        let reply = s.min(&mut board, 2, -INF, &SearchControl::unbounded()).unwrap();
        assert_eq!(reply.pos, Pos::new(9, 9));
        assert!(reply.value < -s.weights().win_cutoff);
    }

    #[test]
    fn test_search_leaves_board_unchanged() {
        let mut board = midgame();
        let before = board.clone();
        let mut s = searcher(Stone::Black);
        s.max(&mut board, 4, INF, &SearchControl::unbounded()).unwrap();
        assert_eq!(board, before);
        assert!(s.nodes() > 1);
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut board = midgame();
        let first = searcher(Stone::Black)
            .max(&mut board, 4, INF, &SearchControl::unbounded())
            .unwrap();
        let second = searcher(Stone::Black)
            .max(&mut board, 4, INF, &SearchControl::unbounded())
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cached_result_is_reused() {
        let mut board = midgame();
        let mut s = searcher(Stone::White);
        let ctl = SearchControl::unbounded();
        let first = s.max(&mut board, 2, INF, &ctl).unwrap();
        let nodes = s.nodes();

        // The root entry answers the repeated call without expanding
        let second = s.max(&mut board, 2, INF, &ctl).unwrap();
        assert_eq!(first, second);
        assert_eq!(s.nodes(), nodes + 1);
        assert!(s.cache_stats().hits >= 1);

        s.clear_cache();
        assert_eq!(s.cache_stats().used, 0);
    }

    #[test]
    fn test_search_cancelled_restores_board() {
        let mut board = midgame();
        let before = board.clone();
        let ctl = SearchControl::with_budget(Duration::ZERO);
        let result = searcher(Stone::Black).max(&mut board, 4, INF, &ctl);
        assert_eq!(result, Err(SearchError::Cancelled));
        assert_eq!(board, before);
    }

    #[test]
    fn test_leaf_plays_first_candidate() {
        let mut board = midgame();
        let mut s = searcher(Stone::Black);
        let leaf = s.max(&mut board, 1, INF, &SearchControl::unbounded()).unwrap();

        let w = EvalWeights::standard();
        let top = ordered_candidates(&board, Stone::Black, &w, MoveOrdering::Pattern)[0];
        assert_eq!(leaf.pos, top.pos);
        board.set(top.pos, Stone::Black);
        assert_eq!(leaf.value, evaluate(&board, Stone::Black, &w));
    }

    #[test]
    fn test_equal_values_prefer_center() {
        let mut board = two_holes();
        let mut s = searcher(Stone::White);
        let moves = ordered_candidates(&board, Stone::White, s.weights(), MoveOrdering::Pattern);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].pos, Pos::new(5, 6));
        assert_eq!(moves[0].value, moves[1].value);

        let best = s.max(&mut board, 2, INF, &SearchControl::unbounded()).unwrap();
        assert_eq!(best, Candidate::new(Pos::new(7, 7), 0));
    }

    #[test]
    fn test_min_returns_once_bound_is_reached() {
        let ctl = SearchControl::unbounded();
        let mut board = two_holes();

        // The first reply already reaches the bound, the second is never tried
        let mut bounded = searcher(Stone::White);
        let reply = bounded.min(&mut board, 2, 0, &ctl).unwrap();
        assert_eq!(reply, Candidate::new(Pos::new(5, 6), 0));
        assert_eq!(bounded.nodes(), 2);

        let mut open = searcher(Stone::White);
        let reply = open.min(&mut board, 2, -INF, &ctl).unwrap();
        assert_eq!(reply, Candidate::new(Pos::new(7, 7), 0));
        assert_eq!(open.nodes(), 3);
        assert!(bounded.nodes() < open.nodes());
    }

    #[test]
    fn test_tactical_policy_expands_more() {
        let ctl = SearchControl::unbounded();
        let config = EngineConfig {
            max_candidates: 6,
            ..EngineConfig::default()
        };
        let mut standard = Searcher::from_config(Stone::White, &config);
        standard.max(&mut midgame(), 2, INF, &ctl).unwrap();
        // Root plus 6 + 4 opening-phase leaves
        assert_eq!(standard.nodes(), 11);

        let tactical_config = EngineConfig {
            policy: SearchPolicy::Tactical,
            ..config
        };
        let mut tactical = Searcher::from_config(Stone::White, &tactical_config);
        assert_eq!(tactical.policy(), SearchPolicy::Tactical);
        tactical.max(&mut midgame(), 2, INF, &ctl).unwrap();
        assert!(tactical.nodes() >= 13, "{} nodes", tactical.nodes());
    }
}
