//! Exact tactical solvers
//!
//! These work on raw stone runs rather than evaluation scores:
//! - `find_form5`: a move that makes five right now
//! - `stop4`: the cell that keeps the opponent from making five
//! - `exists4`: whether a side threatens five anywhere
//! - `count_live_threes` / `has_complex_threats`: threat density for the
//!   tactical search policy
//! - `TacticalSolver::calculate_kill`: forced win by continuous fours
//!
//! All scans run in row-major order, so the first qualifying cell wins.

use log::trace;

use crate::board::{Board, Pos, Stone, FOUR_DIRECTIONS};

/// Length of the `side` run that a stone on `pos` would join, along one axis.
#[inline]
fn joined_run(board: &Board, pos: Pos, dir: (i8, i8), side: Stone) -> i32 {
    board.run_length(pos, dir, side, 4) + board.run_length(pos, (-dir.0, -dir.1), side, 4)
}

/// First empty cell where a `side` stone completes five or more.
#[must_use]
pub fn find_form5(board: &Board, side: Stone) -> Option<Pos> {
    Pos::all().find(|&p| {
        board.is_empty(p)
            && FOUR_DIRECTIONS
                .iter()
                .any(|&dir| joined_run(board, p, dir, side) >= 4)
    })
}

/// First empty cell where the opponent of `side` would complete five.
///
/// Playing there is the only way for `side` to survive the next move.
#[must_use]
pub fn stop4(board: &Board, side: Stone) -> Option<Pos> {
    find_form5(board, side.opponent())
}

/// True if some five-cell window holds four `side` stones and one empty cell.
#[must_use]
pub fn exists4(board: &Board, side: Stone) -> bool {
    Pos::all().any(|start| {
        let s = board.get(start);
        (s == side || s == Stone::Empty)
            && FOUR_DIRECTIONS.iter().any(|&dir| {
                let (mut empty, mut own) = (0, 0);
                for k in 0..5 {
                    match start.offset(dir, k).map(|p| board.get(p)) {
                        Some(Stone::Empty) => empty += 1,
                        Some(s) if s == side => own += 1,
                        _ => {}
                    }
                }
                empty == 1 && own == 4
            })
    })
}

/// Number of empty cells where a `side` stone would join a run of three or
/// more on some axis. Each cell counts once.
#[must_use]
pub fn count_threats(board: &Board, side: Stone) -> usize {
    Pos::all()
        .filter(|&p| {
            board.is_empty(p)
                && FOUR_DIRECTIONS
                    .iter()
                    .any(|&dir| 1 + joined_run(board, p, dir, side) >= 3)
        })
        .count()
}

/// True if either side threatens five, or both sides together have at least
/// two three-threat cells.
#[must_use]
pub fn has_immediate_threats(board: &Board, me: Stone) -> bool {
    let foe = me.opponent();
    exists4(board, foe)
        || exists4(board, me)
        || count_threats(board, me) + count_threats(board, foe) >= 2
}

/// Number of empty cells where a `side` stone would make a live three: a run
/// of exactly three on some axis with no opponent stone touching either end.
///
/// Only opponent stones close a run here; the board edge does not.
#[must_use]
pub fn count_live_threes(board: &Board, side: Stone) -> usize {
    let foe = side.opponent();
    let closed = |p: Pos, dir: (i8, i8), run: i32| {
        run < 3 && p.offset(dir, run + 1).map(|q| board.get(q)) == Some(foe)
    };
    Pos::all()
        .filter(|&p| {
            board.is_empty(p)
                && FOUR_DIRECTIONS.iter().any(|&dir| {
                    let back = (-dir.0, -dir.1);
                    let ahead = board.run_length(p, dir, side, 3);
                    let behind = board.run_length(p, back, side, 3);
                    1 + ahead + behind == 3 && !closed(p, dir, ahead) && !closed(p, back, behind)
                })
        })
        .count()
}

/// True if either side has two live-three cells, or one together with a
/// four.
#[must_use]
pub fn has_complex_threats(board: &Board, me: Stone) -> bool {
    [me, me.opponent()].into_iter().any(|side| {
        let threes = count_live_threes(board, side);
        threes >= 2 || (threes >= 1 && exists4(board, side))
    })
}

/// Forced-win search by continuous fours.
///
/// The attacker must keep making fours that the defender cannot answer with
/// a four of their own; the defender may play anywhere that removes the
/// threat. A move is returned when no defence exists within the budget.
#[derive(Debug, Clone)]
pub struct TacticalSolver {
    max_kill_depth: u32,
    nodes: u64,
}

impl TacticalSolver {
    #[must_use]
    pub fn new(max_kill_depth: u32) -> Self {
        Self {
            max_kill_depth,
            nodes: 0,
        }
    }

    /// Positions visited since construction
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Try budgets 2, 4, ... up to the configured maximum.
    ///
    /// Returns the first move that forces a win for `side`, or `None`.
    pub fn find_kill(&mut self, board: &mut Board, side: Stone) -> Option<Pos> {
        for step in (2..=self.max_kill_depth).step_by(2) {
            if let Some(pos) = self.calculate_kill(board, side, true, step) {
                trace!("forced win at {pos} within {step} plies");
                return Some(pos);
            }
        }
        None
    }

    /// One forcing search with a fixed budget of `step` plies.
    ///
    /// `side` is to move. When `aggressive`, `side` is the attacker and
    /// every move must make a four; otherwise `side` defends. A returned
    /// move has no refutation within the budget. The board is left as it
    /// was found.
    pub fn calculate_kill(
        &mut self,
        board: &mut Board,
        side: Stone,
        aggressive: bool,
        step: u32,
    ) -> Option<Pos> {
        if step == 0 {
            return None;
        }
        let foe = side.opponent();
        for pos in Pos::all() {
            if !board.is_empty(pos) {
                continue;
            }
            self.nodes += 1;
            let mut trial = board.trial(pos, side);
            if exists4(&trial, foe) || (aggressive && !exists4(&trial, side)) {
                continue;
            }
            if self
                .calculate_kill(&mut trial, foe, !aggressive, step - 1)
                .is_none()
            {
                return Some(pos);
            }
        }
        None
    }
}
