//! Candidate move generation and ordering

use std::fmt;

use crate::board::{Board, Pos, Stone};
use crate::config::MoveOrdering;
use crate::eval::{evaluate_point, tactical_bonus, EvalWeights};

/// A move and the value attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub pos: Pos,
    pub value: i32,
}

impl Candidate {
    #[inline]
    #[must_use]
    pub fn new(pos: Pos, value: i32) -> Self {
        Self { pos, value }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.pos, self.value)
    }
}

/// Every empty cell within Chebyshev distance 2 of a stone, row-major.
///
/// Empty on an empty or full board.
#[must_use]
pub fn candidates(board: &Board) -> Vec<Pos> {
    Pos::all()
        .filter(|&p| board.is_empty(p) && board.has_neighbor(p))
        .collect()
}

/// Candidates for `side`, best first.
///
/// The sort is stable, so equal values keep row-major order.
#[must_use]
pub fn ordered_candidates(
    board: &Board,
    side: Stone,
    w: &EvalWeights,
    ordering: MoveOrdering,
) -> Vec<Candidate> {
    let mut moves: Vec<Candidate> = candidates(board)
        .into_iter()
        .map(|p| {
            let mut value = evaluate_point(board, p, side, side, w);
            if ordering == MoveOrdering::Tactical {
                value += tactical_bonus(board, p, side);
            }
            Candidate::new(p, value)
        })
        .collect();
    moves.sort_by(|a, b| b.value.cmp(&a.value));
    moves
}

/// How many candidates a node expands, by stone count.
///
/// Wider early, narrower late, never below one and never more than
/// `available`.
#[must_use]
pub fn adaptive_count(base: usize, stones: u32, available: usize) -> usize {
    let wanted = if stones < 10 {
        base + 4
    } else if stones < 20 {
        base
    } else {
        base.saturating_sub(2).max(1)
    };
    wanted.min(available)
}

/// Width floor of the tactical policy
const TACTICAL_MIN_WIDTH: usize = 12;

/// Width under the tactical policy.
///
/// Starts from `base` and widens for complex threats, for the middle plies
/// of a deep search and through the opening and midgame. Never below
/// twelve unless fewer moves are `available`.
#[must_use]
pub fn tactical_count(
    base: usize,
    stones: u32,
    step: u32,
    complex: bool,
    available: usize,
) -> usize {
    let mut wanted = base;
    if complex {
        wanted += 6;
    }
    if (3..=5).contains(&step) {
        wanted += 2;
    }
    if stones < 10 {
        wanted += 3;
    } else if stones < 25 {
        wanted += 2;
    }
    wanted.max(TACTICAL_MIN_WIDTH).min(available)
}
