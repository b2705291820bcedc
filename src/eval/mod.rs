//! Evaluation module for Gobang AI
//!
//! Contains:
//! - Point evaluation used to order candidate moves
//! - Board evaluation used to score positions at search leaves
//! - Tactical bonuses for the tactical move ordering
//! - Weight presets

pub mod heuristic;
pub mod point;
pub mod weights;

pub use heuristic::{evaluate, evaluate_board};
pub use point::{completes_five, evaluate_point, tactical_bonus};
pub use weights::{EvalWeights, Preset};

use crate::board::{Board, Pos, Stone};

/// A cell as seen by one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cell {
    Empty,
    Own,
    Foe,
    /// Off the board
    Edge,
}

impl Cell {
    /// Opponent stones and the board edge both block a line
    #[inline]
    pub(crate) fn is_blocked(self) -> bool {
        matches!(self, Cell::Foe | Cell::Edge)
    }
}

/// A ray through `origin`, read relative to `side`.
pub(crate) struct Line<'a> {
    board: &'a Board,
    origin: Pos,
    dir: (i8, i8),
    side: Stone,
}

impl<'a> Line<'a> {
    #[inline]
    pub(crate) fn new(board: &'a Board, origin: Pos, dir: (i8, i8), side: Stone) -> Self {
        Self {
            board,
            origin,
            dir,
            side,
        }
    }

    /// Cell `k` steps from the origin (negative `k` looks backwards)
    #[inline]
    pub(crate) fn at(&self, k: i32) -> Cell {
        match self.origin.offset(self.dir, k) {
            None => Cell::Edge,
            Some(p) => match self.board.get(p) {
                Stone::Empty => Cell::Empty,
                s if s == self.side => Cell::Own,
                _ => Cell::Foe,
            },
        }
    }

    #[inline]
    pub(crate) fn own(&self, k: i32) -> bool {
        self.at(k) == Cell::Own
    }

    #[inline]
    pub(crate) fn empty(&self, k: i32) -> bool {
        self.at(k) == Cell::Empty
    }

    #[inline]
    pub(crate) fn blocked(&self, k: i32) -> bool {
        self.at(k).is_blocked()
    }

    /// True if all of `ks` hold own stones
    #[inline]
    pub(crate) fn own_all(&self, ks: &[i32]) -> bool {
        ks.iter().all(|&k| self.own(k))
    }
}
