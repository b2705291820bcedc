//! Point evaluation for move ordering
//!
//! `evaluate_point` scores an empty cell by the shapes it would join for
//! `player`, looking up to five cells away in each of the eight directions.
//! Each direction contributes at most one of the four/three shapes; twos are
//! counted across directions and rewarded once at the end.

use crate::board::{Board, Pos, Stone, EIGHT_DIRECTIONS, FOUR_DIRECTIONS};

use super::{EvalWeights, Line};

/// `111*1` or `11*1` with one open side and one blocked side
const DEAD_THREE_HALF_OPEN: i32 = 800;
/// `11*` two that cannot grow to a live three
const CLOSED_TWO: i32 = 250;
/// `1*1` two with no room beyond
const SPLIT_TWO: i32 = 125;
/// Discounts applied to the two-count reward on the opponent's behalf
const TWO_DOUBLE_DISCOUNT: i32 = 100;
const TWO_SINGLE_DISCOUNT: i32 = 10;

/// Tactical ordering bonuses
const FIVE_BONUS: i32 = 2_000_000;
const OPEN_FOUR_BONUS: i32 = 500_000;
const PREEMPT_FOUR_BONUS: i32 = 450_000;
const MULTI_THREAT_BONUS: i32 = 300_000;
const LIVE_THREE_BONUS: i32 = 50_000;
const PREEMPT_THREE_BONUS: i32 = 30_000;
const CENTER_BONUS: i32 = 100;
/// Stones on the board below which centrality is rewarded
const EARLY_GAME_STONES: u32 = 10;

/// Value of the empty cell `pos` for `player`.
///
/// `me` is the side whose move ordering this serves; when it differs from
/// `player` the opponent penalties apply. Off-board cells block like
/// opponent stones.
#[must_use]
pub fn evaluate_point(board: &Board, pos: Pos, me: Stone, player: Stone, w: &EvalWeights) -> i32 {
    let foreign = me != player;
    let mut value = 0;
    let mut twos = 0;

    for dir in EIGHT_DIRECTIONS {
        let line = Line::new(board, pos, dir, player);

        // 01111*
        if line.own_all(&[-1, -2, -3, -4]) && line.empty(-5) {
            value += w.live_four;
            if foreign {
                value -= w.opponent_penalty;
            }
            continue;
        }
        // 21111*
        if line.own_all(&[-1, -2, -3, -4]) && line.blocked(-5) {
            value += w.dead_four_a;
            if foreign {
                value -= w.opponent_penalty;
            }
            continue;
        }
        // 111*1
        if line.own_all(&[-1, -2, -3, 1]) {
            value += w.dead_four_b;
            if foreign {
                value -= w.opponent_penalty;
            }
            continue;
        }
        // 11*11
        if line.own_all(&[-1, -2, 1, 2]) {
            value += w.dead_four_c;
            if foreign {
                value -= w.opponent_penalty;
            }
            continue;
        }
        // 111*
        if line.own_all(&[-1, -2, -3]) {
            if line.empty(1) {
                value += w.live_three_near;
                if line.empty(-4) {
                    value += w.live_three_bonus;
                    if foreign {
                        value -= w.opponent_minor_penalty;
                    }
                }
            }
            if line.blocked(1) && line.empty(-4) {
                value += w.opponent_penalty;
            }
            if line.blocked(-4) && line.empty(1) {
                value += w.opponent_penalty;
            }
            continue;
        }
        // 1110*
        if line.empty(-1) && line.own_all(&[-2, -3, -4]) {
            value += w.live_three_far;
            continue;
        }
        // 11*1
        if line.own_all(&[-1, -2, 1]) {
            value += w.dead_three;
            if line.empty(-3) && line.empty(2) {
                value += w.dead_three_bonus;
            } else if line.blocked(-3) && line.blocked(2) {
                value -= w.dead_three;
            } else {
                value += DEAD_THREE_HALF_OPEN;
            }
            continue;
        }

        // Live twos; every two is seen from both of its directions
        if line.own_all(&[-1, -2]) && line.empty(-3) && line.empty(1) {
            if line.empty(2) || line.empty(-4) {
                twos += 2;
            } else {
                value += CLOSED_TWO;
            }
        }
        if line.own(-1) && line.empty(-2) && line.own(2) && line.empty(1) && line.empty(3) {
            twos += 2;
        }
        if line.empty(-1)
            && line.empty(4)
            && line.own(3)
            && ((line.own(2) && line.empty(1)) || (line.own(1) && line.empty(2)))
        {
            twos += 2;
        }
        if line.own(-1) && line.own(1) && line.empty(-2) && line.empty(2) {
            if line.empty(3) || line.empty(-3) {
                twos += 1;
            } else {
                value += SPLIT_TWO;
            }
        }

        // Scattered stones in the five windows that contain the point
        let mut scatter = 0;
        for start in -4..=0 {
            let mut window = 0;
            for k in start..start + 5 {
                if line.own(k) {
                    window += 5 - k.abs();
                } else if line.blocked(k) {
                    window = 0;
                    break;
                }
            }
            scatter += window;
        }
        value += scatter * w.scatter_multiplier;
    }

    twos /= 2;
    if twos >= 2 {
        value += w.two_count_double;
        if foreign {
            value -= TWO_DOUBLE_DISCOUNT;
        }
    } else if twos == 1 {
        value += w.two_count_single;
        if foreign {
            value -= TWO_SINGLE_DISCOUNT;
        }
    }
    value
}

/// Extra ordering value of playing `pos` for `side`.
///
/// Rewards completing five, making an open four, taking the cell the
/// opponent needs for an open four, threats on several axes and live threes
/// for either side. Early in the game cells near the center score higher.
#[must_use]
pub fn tactical_bonus(board: &Board, pos: Pos, side: Stone) -> i32 {
    let foe = side.opponent();
    let mut bonus = 0;

    if completes_five(board, pos, side) {
        bonus += FIVE_BONUS;
    }
    if makes_open_four(board, pos, side) {
        bonus += OPEN_FOUR_BONUS;
    }
    if makes_open_four(board, pos, foe) {
        bonus += PREEMPT_FOUR_BONUS;
    }

    let threat_axes = FOUR_DIRECTIONS
        .iter()
        .filter(|&&dir| axis_run(board, pos, dir, side, 3) >= 3)
        .count();
    if threat_axes >= 2 {
        bonus += MULTI_THREAT_BONUS;
    }

    bonus += live_threes_at(board, pos, side) * LIVE_THREE_BONUS;
    bonus += live_threes_at(board, pos, foe) * PREEMPT_THREE_BONUS;

    if board.stone_count() < EARLY_GAME_STONES {
        let c = Pos::CENTER;
        let distance = i32::from(pos.x.abs_diff(c.x)) + i32::from(pos.y.abs_diff(c.y));
        bonus += (10 - distance) * CENTER_BONUS;
    }
    bonus
}

/// True if a `side` stone on the empty cell `pos` makes five or more in a row.
///
/// ```
/// use gobang::board::{Board, Pos, Stone};
/// use gobang::eval::completes_five;
///
/// let mut board = Board::new();
/// for x in 7..11 {
///     board.set(Pos::new(x, 7), Stone::Black);
/// }
/// assert!(completes_five(&board, Pos::new(11, 7), Stone::Black));
/// assert!(!completes_five(&board, Pos::new(11, 7), Stone::White));
/// ```
#[must_use]
pub fn completes_five(board: &Board, pos: Pos, side: Stone) -> bool {
    board.is_empty(pos)
        && FOUR_DIRECTIONS
            .iter()
            .any(|&dir| axis_run(board, pos, dir, side, 4) >= 5)
}

/// Length of the `side` run through `pos` along one axis, counting `pos`
/// itself and at most `reach` stones on each side.
fn axis_run(board: &Board, pos: Pos, dir: (i8, i8), side: Stone, reach: i32) -> i32 {
    1 + board.run_length(pos, dir, side, reach) + board.run_length(pos, (-dir.0, -dir.1), side, reach)
}

/// Length of the run through `pos`, if the cells past both ends are empty
fn open_run(board: &Board, pos: Pos, dir: (i8, i8), side: Stone, reach: i32) -> Option<i32> {
    let back = (-dir.0, -dir.1);
    let fwd = board.run_length(pos, dir, side, reach);
    let bwd = board.run_length(pos, back, side, reach);
    let open = |d: (i8, i8), run: i32| pos.offset(d, run + 1).is_some_and(|end| board.is_empty(end));
    (open(dir, fwd) && open(back, bwd)).then_some(1 + fwd + bwd)
}

fn makes_open_four(board: &Board, pos: Pos, side: Stone) -> bool {
    FOUR_DIRECTIONS
        .iter()
        .any(|&dir| open_run(board, pos, dir, side, 4).is_some_and(|len| len >= 4))
}

fn live_threes_at(board: &Board, pos: Pos, side: Stone) -> i32 {
    let count = FOUR_DIRECTIONS
        .iter()
        .filter(|&&dir| open_run(board, pos, dir, side, 2) == Some(3))
        .count();
    count as i32
}
