//! Board representation for Gobang

pub mod bitboard;
pub mod board;
pub mod zobrist;


// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, Trial};
pub use zobrist::{zobrist, ZobristTable};

use std::fmt;

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// The four axes, one direction each
pub const FOUR_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (-1, -1), (0, -1), (1, -1)];

/// All eight directions; the second half mirrors the first
pub const EIGHT_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    #[default]
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Stone::Empty
    }
}

/// Position on the board. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    /// Board center, the first move on an empty board
    pub const CENTER: Pos = Pos {
        x: (BOARD_SIZE / 2) as u8,
        y: (BOARD_SIZE / 2) as u8,
    };

    #[inline]
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < BOARD_SIZE as u8 && y < BOARD_SIZE as u8);
        Self { x, y }
    }

    /// Range-checked constructor
    #[inline]
    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        if Self::is_valid(x, y) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(Self { x: x as u8, y: y as u8 })
        } else {
            None
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            x: (idx % BOARD_SIZE) as u8,
            y: (idx / BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_SIZE as i32 && y >= 0 && y < BOARD_SIZE as i32
    }

    /// Whether the fields of this position lie on the board
    #[inline]
    pub fn in_bounds(self) -> bool {
        (self.x as usize) < BOARD_SIZE && (self.y as usize) < BOARD_SIZE
    }

    /// Step `len` cells along `dir`; `None` when the result leaves the board
    #[inline]
    pub fn offset(self, dir: (i8, i8), len: i32) -> Option<Pos> {
        Pos::try_new(
            i32::from(self.x) + i32::from(dir.0) * len,
            i32::from(self.y) + i32::from(dir.1) * len,
        )
    }

    /// Chebyshev distance to the board center
    #[inline]
    pub fn center_distance(self) -> u8 {
        let c = Pos::CENTER;
        self.x.abs_diff(c.x).max(self.y.abs_diff(c.y))
    }

    /// True if strictly closer to the center than `other`
    #[inline]
    pub fn nearer_center_than(self, other: Pos) -> bool {
        self.center_distance() < other.center_distance()
    }

    /// Iterate over all cells in row-major order
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..TOTAL_CELLS).map(Pos::from_index)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
