//! Error types

use thiserror::Error;

use crate::board::{Pos, Stone};

/// Errors surfaced to the caller of the engine.
///
/// None of these leave the engine's board in a partial state: a rejected
/// move is never recorded, and search failures happen before the chosen
/// move is placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The target cell already holds a stone
    #[error("illegal move at {pos}: occupied by {occupant:?}")]
    IllegalMove { pos: Pos, occupant: Stone },

    /// The coordinates are off the 15x15 grid
    #[error("position {0} is outside the board")]
    OutOfBounds(Pos),

    /// Search ran out of candidates on a non-empty, non-full board
    #[error("algorithm error: search produced no move")]
    AlgorithmError,

    /// No empty cell is left to play
    #[error("board is full")]
    BoardFull,
}

/// Failures internal to the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The deadline passed or the cancel flag was raised
    #[error("search cancelled")]
    Cancelled,

    /// A node had no empty cell near any stone
    #[error("no candidate moves")]
    NoCandidates,
}

impl From<SearchError> for EngineError {
    fn from(_: SearchError) -> Self {
        EngineError::AlgorithmError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::IllegalMove {
            pos: Pos::new(3, 4),
            occupant: Stone::White,
        };
        assert_eq!(err.to_string(), "illegal move at (3,4): occupied by White");
        assert_eq!(
            EngineError::OutOfBounds(Pos { x: 15, y: 2 }).to_string(),
            "position (15,2) is outside the board"
        );
    }

    #[test]
    fn test_search_error_maps_to_algorithm_error() {
        let err: EngineError = SearchError::NoCandidates.into();
        assert_eq!(err, EngineError::AlgorithmError);
    }
}
