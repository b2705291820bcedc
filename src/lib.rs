//! Gobang (five in a row) decision engine
//!
//! An automated player for gobang on a 15x15 board:
//! - Five or more in a row wins
//! - No forbidden moves, no captures
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and Zobrist hashing
//! - [`eval`]: Point and board evaluation, weight presets
//! - [`search`]: Minimax search, iterative deepening, tactical solvers
//! - [`engine`]: Move selector implementing [`Player`]
//! - [`config`]: Engine settings
//! - [`error`]: Error types
//!
//! # Quick Start
//!
//! ```
//! use gobang::{EngineConfig, GobangEngine, Player, Pos, Stone};
//!
//! // Shallow settings keep the example fast
//! let config = EngineConfig {
//!     max_depth: 2,
//!     max_kill_depth: 2,
//!     ..EngineConfig::default()
//! };
//! let mut engine = GobangEngine::with_config(Stone::Black, config);
//!
//! // Black opens in the center
//! assert_eq!(engine.play().unwrap(), Pos::CENTER);
//!
//! engine.observe_opponent_move(Pos::new(8, 8)).unwrap();
//! let reply = engine.play().unwrap();
//! println!("engine plays {reply}");
//! ```
//!
//! # Move Priority
//!
//! 1. Center on an empty board
//! 2. Immediate five
//! 3. Block the opponent's five
//! 4. Forced win by continuous fours
//! 5. Iterative-deepening minimax under the time budget

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::{EngineConfig, MoveOrdering, Preset, SearchPolicy};
pub use engine::{GobangEngine, MoveResult, Player, SearchType};
pub use error::{EngineError, SearchError};
pub use eval::EvalWeights;
