//! Heuristic evaluation function for Gobang board positions
//!
//! Every stone of a side looks along all eight directions at a nine-cell
//! window centred on itself and classifies the window into at most one
//! shape. Shapes seen from both ends (open fours and threes, split fours)
//! are weighted at half so the pair adds up to the full reward.

use crate::board::{Board, Stone, EIGHT_DIRECTIONS};

use super::{Cell, EvalWeights, Line};

/// `AAA?A`
const BROKEN_FOUR: i32 = 30_000;
/// `A??AA`
const WIDE_THREE: i32 = 600;
/// `A?A?A`
const SPLIT_THREE: i32 = 275;
/// `??A?A??` with one side blocked
const SPLIT_TWO: i32 = 125;
/// `?A??A?`
const WIDE_TWO: i32 = 100;
/// `A??A?` followed by an empty cell
const WIDE_TWO_OPEN: i32 = 200;

/// Evaluate the board from the perspective of `side`.
///
/// Positive values favour `side`. This is the value the search engine
/// maximises for itself and minimises for the opponent.
#[must_use]
pub fn evaluate(board: &Board, side: Stone, w: &EvalWeights) -> i32 {
    evaluate_board(board, side, w) - evaluate_board(board, side.opponent(), w)
}

/// Sum of shape rewards over all stones of `side`.
#[must_use]
pub fn evaluate_board(board: &Board, side: Stone, w: &EvalWeights) -> i32 {
    let Some(stones) = board.stones(side) else {
        return 0;
    };

    let mut value = 0;
    for pos in stones.iter_ones() {
        for dir in EIGHT_DIRECTIONS {
            let line = Line::new(board, pos, dir, side);
            let mut c = [Cell::Empty; 9];
            for (i, cell) in c.iter_mut().enumerate() {
                *cell = line.at(i as i32 - 4);
            }
            value += window_value(&c, &line, w);
        }
    }
    value
}

/// Reward for one nine-cell window; `c[4]` is the stone itself.
fn window_value(c: &[Cell; 9], line: &Line<'_>, w: &EvalWeights) -> i32 {
    let own = |i: usize| c[i] == Cell::Own;
    let empty = |i: usize| c[i] == Cell::Empty;
    let blocked = |i: usize| c[i].is_blocked();

    if own(5) && own(6) && own(7) && own(8) {
        return w.five_in_row;
    }
    if own(5) && own(6) && own(7) && empty(3) {
        if empty(8) {
            return w.four_open / 2;
        }
        if !own(8) {
            return w.four_closed;
        }
        return 0;
    }
    if own(5) && own(6) {
        if empty(7) && own(8) {
            return BROKEN_FOUR;
        }
        if empty(3) && empty(7) {
            if (empty(2) && !own(8)) || (empty(8) && !own(2)) {
                return w.three_open / 2;
            }
            if blocked(2) && blocked(8) {
                return w.three_semi / 2;
            }
            return 0;
        }
        if blocked(3) && empty(7) && empty(8) {
            return w.three_semi;
        }
    }
    if own(5) && empty(6) && own(7) && own(8) {
        return w.three_closed / 2;
    }
    if empty(5) && own(6) && own(7) {
        if empty(3) && empty(8) {
            return w.three_open;
        }
        if (blocked(3) && empty(8)) || (blocked(8) && empty(3)) {
            return w.three_gap;
        }
        return 0;
    }
    if empty(5) && own(8) {
        if empty(6) && own(7) {
            return WIDE_THREE;
        }
        if own(6) && empty(7) {
            return SPLIT_THREE;
        }
        return 0;
    }
    if own(5) {
        if empty(3) && empty(6) {
            if (empty(1) && empty(2) && blocked(7)) || (empty(8) && empty(7) && blocked(2)) {
                return w.two_basic / 2;
            }
            if blocked(2) && empty(7) && blocked(8) {
                return w.two_corner;
            }
        } else if blocked(3) && empty(6) && empty(7) && empty(8) {
            return w.two_corner;
        }
        return 0;
    }
    if empty(5) && own(6) {
        if empty(3) && empty(7) {
            let mut value = 0;
            if (blocked(2) && empty(8)) || (empty(2) && blocked(8)) {
                value += SPLIT_TWO;
            }
            if blocked(2) && blocked(8) {
                value += w.two_corner / 2;
            }
            return value;
        }
        if blocked(3) && empty(7) && empty(8) {
            return w.two_corner;
        }
        return 0;
    }
    if empty(5) && empty(6) && own(7) {
        if empty(3) && empty(8) {
            return WIDE_TWO;
        }
        if blocked(3) && empty(8) {
            // One cell past the window; off-board counts for nothing here
            return match line.at(5) {
                Cell::Empty => WIDE_TWO_OPEN,
                Cell::Foe => w.two_corner,
                Cell::Own | Cell::Edge => 0,
            };
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn place_row(board: &mut Board, xs: &[u8], y: u8, stone: Stone) {
        for &x in xs {
            board.set(Pos::new(x, y), stone);
        }
    }

    #[test]
    fn test_evaluate_empty_board() {
        let board = Board::new();
        let w = EvalWeights::standard();
        assert_eq!(evaluate(&board, Stone::Black, &w), 0);
        assert_eq!(evaluate_board(&board, Stone::White, &w), 0);
    }

    #[test]
    fn test_lone_stone_scores_nothing() {
        let mut board = Board::new();
        board.set(Pos::CENTER, Stone::Black);
        let w = EvalWeights::standard();
        assert_eq!(evaluate_board(&board, Stone::Black, &w), 0);
    }

    #[test]
    fn test_evaluate_five() {
        let mut board = Board::new();
        place_row(&mut board, &[5, 6, 7, 8, 9], 7, Stone::Black);
        let w = EvalWeights::standard();
        let score = evaluate(&board, Stone::Black, &w);
        assert!(score >= w.five_in_row, "five should be decisive, got {score}");
        assert!(score > w.win_cutoff);
    }

    #[test]
    fn test_evaluate_open_four() {
        let mut board = Board::new();
        place_row(&mut board, &[5, 6, 7, 8], 7, Stone::Black);
        let w = EvalWeights::standard();
        // Seen from both ends, half each
        assert_eq!(evaluate_board(&board, Stone::Black, &w), w.four_open);
    }

    #[test]
    fn test_evaluate_closed_four() {
        let mut board = Board::new();
        place_row(&mut board, &[5, 6, 7, 8], 7, Stone::Black);
        board.set(Pos::new(9, 7), Stone::White);
        let w = EvalWeights::standard();
        let closed = evaluate_board(&board, Stone::Black, &w);
        assert!(closed < w.four_open);
        assert!(closed >= w.four_closed);
    }

    #[test]
    fn test_open_three_to_open_four_increases() {
        let w = EvalWeights::standard();
        let mut board = Board::new();
        place_row(&mut board, &[6, 7, 8], 7, Stone::Black);
        let three = evaluate_board(&board, Stone::Black, &w);
        assert!(three > 0);

        board.set(Pos::new(9, 7), Stone::Black);
        let four = evaluate_board(&board, Stone::Black, &w);
        assert!(four > three, "open four {four} should beat open three {three}");
    }

    #[test]
    fn test_evaluate_perspective() {
        let mut board = Board::new();
        place_row(&mut board, &[6, 7, 8], 7, Stone::White);
        let w = EvalWeights::standard();
        let for_white = evaluate(&board, Stone::White, &w);
        let for_black = evaluate(&board, Stone::Black, &w);
        assert!(for_white > 0);
        assert_eq!(for_white, -for_black);
    }

    #[test]
    fn test_evaluate_symmetry() {
        let w = EvalWeights::standard();
        let mut horizontal = Board::new();
        place_row(&mut horizontal, &[4, 5, 6], 7, Stone::Black);

        let mut vertical = Board::new();
        for y in 4..7 {
            vertical.set(Pos::new(7, y), Stone::Black);
        }

        assert_eq!(
            evaluate_board(&horizontal, Stone::Black, &w),
            evaluate_board(&vertical, Stone::Black, &w)
        );
    }

    #[test]
    fn test_blocked_three_worth_less() {
        let w = EvalWeights::standard();
        let mut open = Board::new();
        place_row(&mut open, &[6, 7, 8], 7, Stone::Black);

        let mut blocked = open.clone();
        blocked.set(Pos::new(5, 7), Stone::White);

        assert!(
            evaluate_board(&open, Stone::Black, &w) > evaluate_board(&blocked, Stone::Black, &w)
        );
    }
}
