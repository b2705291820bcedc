//! Move selector for the automated player
//!
//! The engine keeps its own copy of the game and answers with a move when
//! asked. Decisions follow a fixed priority:
//!
//! 1. **Opening**: the center on an empty board
//! 2. **Immediate win**: complete five
//! 3. **Block**: take the cell the opponent needs for five
//! 4. **Forced win**: continuous-four solver with budgets 2, 4, ...
//! 5. **Alpha-beta**: iterative deepening under the time budget
//!
//! # Example
//!
//! ```
//! use gobang::{EngineConfig, GobangEngine, Player, Pos, Stone};
//!
//! let config = EngineConfig {
//!     max_depth: 2,
//!     max_kill_depth: 2,
//!     ..EngineConfig::default()
//! };
//! let mut engine = GobangEngine::with_config(Stone::White, config);
//!
//! engine.observe_opponent_move(Pos::new(7, 7)).unwrap();
//! let reply = engine.play().unwrap();
//! assert_eq!(engine.board().get(reply), Stone::White);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::eval::{evaluate, EvalWeights};
use crate::search::{find_form5, stop4, IterativeDeepening, Searcher, TacticalSolver};

/// A participant in a game.
///
/// Both sides of a game implement this; the game loop asks the side to move
/// for a move and reports it to the other side.
pub trait Player {
    /// The color this player places
    fn color(&self) -> Stone;

    /// Choose a move and record it on the player's own board.
    fn play(&mut self) -> Result<Pos, EngineError>;

    /// Record the opponent's move.
    ///
    /// Fails without changing anything when `pos` is off the board or
    /// already occupied.
    fn observe_opponent_move(&mut self, pos: Pos) -> Result<(), EngineError>;
}

/// Decision path that produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Center of an empty board
    Opening,
    /// Completes five
    ImmediateWin,
    /// Stops the opponent's five
    Block,
    /// Found by the continuous-four solver
    ForcedWin,
    /// Iterative-deepening minimax
    AlphaBeta,
}

/// A move with statistics about how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub pos: Pos,
    /// Net board value for the engine after the move; the search value for
    /// alpha-beta moves
    pub score: i32,
    pub search_type: SearchType,
    /// Deepest completed search depth (0 when no search ran)
    pub depth: u32,
    /// Nodes visited by the solver and the search
    pub nodes: u64,
    pub time_ms: u64,
}

/// Internal decision before the move is recorded
struct Decision {
    pos: Pos,
    search_type: SearchType,
    value: Option<i32>,
    depth: u32,
    nodes: u64,
}

impl Decision {
    fn tactical(pos: Pos, search_type: SearchType, nodes: u64) -> Self {
        Self {
            pos,
            search_type,
            value: None,
            depth: 0,
            nodes,
        }
    }
}

/// Automated Gobang player.
///
/// Owns its board, searcher and cancel flag. The engine is `Send`, so it
/// can be moved to a worker thread while another thread holds the handle
/// from [`GobangEngine::cancel_handle`].
pub struct GobangEngine {
    color: Stone,
    config: EngineConfig,
    weights: EvalWeights,
    board: Board,
    searcher: Searcher,
    cancel: Arc<AtomicBool>,
}

impl GobangEngine {
    /// Engine with the standard preset.
    #[must_use]
    pub fn new(color: Stone) -> Self {
        Self::with_config(color, EngineConfig::default())
    }

    /// Engine with custom settings; out-of-range values are clamped.
    #[must_use]
    pub fn with_config(color: Stone, config: EngineConfig) -> Self {
        Self::from_position(color, config, Board::new())
    }

    /// Engine that resumes from an existing position.
    #[must_use]
    pub fn from_position(color: Stone, config: EngineConfig, board: Board) -> Self {
        debug_assert!(color != Stone::Empty, "engine needs a stone color");
        let config = config.clamped();
        Self {
            color,
            weights: config.weights(),
            searcher: Searcher::from_config(color, &config),
            config,
            board,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The engine's view of the game
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Flag that aborts the deepest search iteration of the current or next
    /// move. It is lowered again once that move is recorded.
    #[must_use]
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Start a new game.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.searcher.clear_cache();
        self.cancel.store(false, Ordering::Relaxed);
    }

    /// Choose a move, record it and report how it was found.
    pub fn play_with_stats(&mut self) -> Result<MoveResult, EngineError> {
        let start = Instant::now();
        let decision = self.decide()?;

        if !self.board.set_if_empty(decision.pos, self.color) {
            warn!("chosen move {} is occupied", decision.pos);
            return Err(EngineError::AlgorithmError);
        }
        self.cancel.store(false, Ordering::Relaxed);

        let score = decision
            .value
            .unwrap_or_else(|| evaluate(&self.board, self.color, &self.weights));
        let result = MoveResult {
            pos: decision.pos,
            score,
            search_type: decision.search_type,
            depth: decision.depth,
            nodes: decision.nodes,
            time_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "{:?} plays {} via {:?} (score {}, depth {}, {} nodes, {} ms)",
            self.color,
            result.pos,
            result.search_type,
            result.score,
            result.depth,
            result.nodes,
            result.time_ms
        );
        Ok(result)
    }

    fn decide(&mut self) -> Result<Decision, EngineError> {
        let me = self.color;
        if self.board.is_full() {
            return Err(EngineError::BoardFull);
        }
        if self.board.is_board_empty() {
            return Ok(Decision::tactical(Pos::CENTER, SearchType::Opening, 0));
        }
        if let Some(pos) = find_form5(&self.board, me) {
            return Ok(Decision::tactical(pos, SearchType::ImmediateWin, 0));
        }
        if let Some(pos) = stop4(&self.board, me) {
            return Ok(Decision::tactical(pos, SearchType::Block, 0));
        }

        let mut solver = TacticalSolver::new(self.config.max_kill_depth);
        if let Some(pos) = solver.find_kill(&mut self.board, me) {
            return Ok(Decision::tactical(pos, SearchType::ForcedWin, solver.nodes()));
        }

        let driver = IterativeDeepening::new(self.config.max_depth)
            .time_budget(self.config.time_budget())
            .cancel_flag(Arc::clone(&self.cancel));

        self.searcher.reset_nodes();
        let outcome = driver
            .run(&mut self.searcher, &mut self.board)
            .map_err(|e| {
                warn!("search produced no move: {e}");
                EngineError::from(e)
            })?;

        Ok(Decision {
            pos: outcome.best.pos,
            search_type: SearchType::AlphaBeta,
            value: Some(outcome.best.value),
            depth: outcome.depth,
            nodes: solver.nodes() + self.searcher.nodes(),
        })
    }
}

impl Player for GobangEngine {
    fn color(&self) -> Stone {
        self.color
    }

    fn play(&mut self) -> Result<Pos, EngineError> {
        self.play_with_stats().map(|result| result.pos)
    }

    fn observe_opponent_move(&mut self, pos: Pos) -> Result<(), EngineError> {
        if !pos.in_bounds() {
            return Err(EngineError::OutOfBounds(pos));
        }
        let occupant = self.board.get(pos);
        if !self.board.set_if_empty(pos, self.color.opponent()) {
            return Err(EngineError::IllegalMove { pos, occupant });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    fn fast_config() -> EngineConfig {
        EngineConfig {
            max_depth: 2,
            max_candidates: 6,
            max_kill_depth: 2,
            ..EngineConfig::default()
        }
    }

    fn engine_with(color: Stone, stones: &[(u8, u8, Stone)]) -> GobangEngine {
        let mut board = Board::new();
        for &(x, y, s) in stones {
            board.set(Pos::new(x, y), s);
        }
        GobangEngine::from_position(color, fast_config(), board)
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<GobangEngine>();
    }

    #[test]
    fn test_opening_takes_center() {
        let mut engine = GobangEngine::new(Stone::Black);
        let result = engine.play_with_stats().unwrap();
        assert_eq!(result.pos, Pos::CENTER);
        assert_eq!(result.search_type, SearchType::Opening);
        assert_eq!(engine.board().get(Pos::CENTER), Stone::Black);
        assert_eq!(engine.board().stone_count(), 1);
    }

    #[test]
    fn test_immediate_win() {
        let mut engine = engine_with(
            Stone::Black,
            &[
                (7, 7, Stone::Black),
                (8, 7, Stone::Black),
                (9, 7, Stone::Black),
                (10, 7, Stone::Black),
                (7, 8, Stone::White),
                (8, 8, Stone::White),
                (9, 8, Stone::White),
            ],
        );
        let result = engine.play_with_stats().unwrap();
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(result.pos, Pos::new(6, 7));
        assert!(result.score > engine.weights.win_cutoff);
    }

    #[test]
    fn test_win_preferred_over_block() {
        // Both sides have four; completing our own comes first
        let mut engine = engine_with(
            Stone::White,
            &[
                (2, 2, Stone::Black),
                (3, 2, Stone::Black),
                (4, 2, Stone::Black),
                (5, 2, Stone::Black),
                (2, 10, Stone::White),
                (3, 10, Stone::White),
                (4, 10, Stone::White),
                (5, 10, Stone::White),
            ],
        );
        let result = engine.play_with_stats().unwrap();
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(result.pos.y, 10);
    }

    #[test]
    fn test_blocks_opponent_four() {
        let mut engine = engine_with(
            Stone::White,
            &[
                (4, 4, Stone::Black),
                (5, 5, Stone::Black),
                (6, 6, Stone::Black),
                (7, 7, Stone::Black),
                (3, 3, Stone::White),
                (10, 4, Stone::White),
            ],
        );
        let result = engine.play_with_stats().unwrap();
        assert_eq!(result.search_type, SearchType::Block);
        assert_eq!(result.pos, Pos::new(8, 8));
    }

    #[test]
    fn test_forced_win_is_recorded() {
        let mut engine = engine_with(
            Stone::Black,
            &[
                (6, 7, Stone::Black),
                (7, 7, Stone::Black),
                (8, 7, Stone::Black),
                (7, 3, Stone::White),
                (0, 14, Stone::White),
            ],
        );
        let result = engine.play_with_stats().unwrap();
        assert_eq!(result.search_type, SearchType::ForcedWin);
        assert_eq!(result.pos, Pos::new(5, 7));
        assert_eq!(engine.board().get(result.pos), Stone::Black);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_alpha_beta_move() {
        let mut engine = engine_with(
            Stone::White,
            &[(7, 7, Stone::Black), (8, 8, Stone::White), (4, 7, Stone::Black)],
        );
        let before = engine.board().stone_count();
        let result = engine.play_with_stats().unwrap();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert_eq!(result.depth, 2);
        assert!(result.nodes > 0);
        assert_eq!(engine.board().stone_count(), before + 1);
        assert_eq!(engine.board().get(result.pos), Stone::White);
    }

    #[test]
    fn test_observe_illegal_move() {
        let mut engine = GobangEngine::with_config(Stone::White, fast_config());
        engine.observe_opponent_move(Pos::new(7, 7)).unwrap();
        let before = engine.board().clone();

        let err = engine.observe_opponent_move(Pos::new(7, 7)).unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalMove {
                pos: Pos::new(7, 7),
                occupant: Stone::Black
            }
        );
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn test_observe_out_of_bounds() {
        let mut engine = GobangEngine::new(Stone::Black);
        let pos = Pos { x: 3, y: 15 };
        assert_eq!(
            engine.observe_opponent_move(pos),
            Err(EngineError::OutOfBounds(pos))
        );
        assert!(engine.board().is_board_empty());
    }

    #[test]
    fn test_board_full() {
        let mut board = Board::new();
        for (i, pos) in Pos::all().enumerate() {
            board.set(pos, if (i / 2) % 2 == 0 { Stone::Black } else { Stone::White });
        }
        let mut engine = GobangEngine::from_position(Stone::Black, fast_config(), board);
        assert_eq!(engine.play(), Err(EngineError::BoardFull));
    }

    #[test]
    fn test_reset() {
        let mut engine = GobangEngine::new(Stone::Black);
        engine.play().unwrap();
        engine.observe_opponent_move(Pos::new(8, 8)).unwrap();
        engine.reset();
        assert!(engine.board().is_board_empty());
        assert_eq!(engine.play().unwrap(), Pos::CENTER);
    }

    #[test]
    fn test_cancel_flag_lowered_after_move() {
        let mut engine = engine_with(
            Stone::White,
            &[(7, 7, Stone::Black), (8, 8, Stone::White), (4, 7, Stone::Black)],
        );
        let handle = engine.cancel_handle();
        handle.store(true, Ordering::Relaxed);
        engine.play().unwrap();
        assert!(!handle.load(Ordering::Relaxed));
    }

    #[test]
    fn test_cancelled_search_still_moves() {
        let config = EngineConfig {
            max_depth: 6,
            max_kill_depth: 2,
            time_budget_ms: 0,
            ..EngineConfig::default()
        };
        let mut board = Board::new();
        board.set(Pos::new(7, 7), Stone::Black);
        board.set(Pos::new(8, 8), Stone::White);
        board.set(Pos::new(4, 7), Stone::Black);
        let mut engine = GobangEngine::from_position(Stone::White, config, board);

        // The deepest iteration (depth 4) is abandoned, depth 2 stands
        engine.cancel_handle().store(true, Ordering::Relaxed);
        let result = engine.play_with_stats().unwrap();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert_eq!(result.depth, 2);
        assert_eq!(engine.board().get(result.pos), Stone::White);
    }

    #[test]
    fn test_optimized_preset_plays() {
        let config = EngineConfig {
            max_depth: 2,
            ..EngineConfig::preset(Preset::Optimized)
        };
        let mut engine = GobangEngine::with_config(Stone::White, config);
        engine.observe_opponent_move(Pos::new(7, 7)).unwrap();
        let reply = engine.play().unwrap();
        assert!(reply.center_distance() <= 2);
        assert_eq!(engine.board().stone_count(), 2);
    }
}
