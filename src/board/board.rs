//! Board structure with incremental hashing

use std::ops::{Deref, DerefMut};

use super::bitboard::Bitboard;
use super::zobrist::zobrist;
use super::{Pos, Stone, TOTAL_CELLS};

/// Game board: per-color occupancy, Zobrist hash and stone count.
///
/// Invariant: `hash` is the XOR of the Zobrist keys of exactly the occupied
/// cells, and `count` is the number of occupied cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
    hash: u64,
    count: u32,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
            hash: 0,
            count: 0,
        }
    }

    /// Get stone at position; `Empty` off the board
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if !pos.in_bounds() {
            Stone::Empty
        } else if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Stone at `(x, y)`, or `None` off the board
    #[inline]
    pub fn get_checked(&self, x: i32, y: i32) -> Option<Stone> {
        Pos::try_new(x, y).map(|p| self.get(p))
    }

    /// Check if position is empty. Off-board cells are never empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        pos.in_bounds() && !self.black.get(pos) && !self.white.get(pos)
    }

    /// Overwrite a cell, whatever it held before.
    ///
    /// Search uses this for hypothetical moves and restores the cell
    /// afterwards; `Stone::Empty` clears the cell. Off-board positions
    /// are ignored.
    #[inline]
    pub fn set(&mut self, pos: Pos, stone: Stone) {
        if !pos.in_bounds() {
            return;
        }
        let previous = self.get(pos);
        if previous == stone {
            return;
        }
        let keys = zobrist();
        match previous {
            Stone::Black => self.black.clear(pos),
            Stone::White => self.white.clear(pos),
            Stone::Empty => {}
        }
        if previous != Stone::Empty {
            self.hash ^= keys.key(pos, previous);
            self.count -= 1;
        }
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
        if stone != Stone::Empty {
            self.hash ^= keys.key(pos, stone);
            self.count += 1;
        }
    }

    /// Place a stone only if the cell is empty.
    ///
    /// Returns `false` and leaves the board untouched when the cell is
    /// occupied or off the board. Used for authoritative game moves.
    #[inline]
    pub fn set_if_empty(&mut self, pos: Pos, stone: Stone) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        self.set(pos, stone);
        true
    }

    /// Remove a stone
    #[inline]
    pub fn remove(&mut self, pos: Pos) {
        self.set(pos, Stone::Empty);
    }

    /// Place a stone for the lifetime of the returned guard.
    ///
    /// The guard dereferences to the board, so search can recurse through
    /// it; dropping it restores the previous occupant and hash.
    #[inline]
    pub fn trial(&mut self, pos: Pos, stone: Stone) -> Trial<'_> {
        let previous = self.get(pos);
        self.set(pos, stone);
        Trial {
            board: self,
            pos,
            previous,
        }
    }

    /// True if any stone lies within Chebyshev distance 2
    pub fn has_neighbor(&self, pos: Pos) -> bool {
        if !pos.in_bounds() {
            return false;
        }
        let (x, y) = (i32::from(pos.x), i32::from(pos.y));
        for dy in -2..=2 {
            for dx in -2..=2 {
                if let Some(stone) = self.get_checked(x + dx, y + dy) {
                    if stone != Stone::Empty {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Number of consecutive `stone`s starting one step from `pos` along
    /// `dir`, counting at most `limit`. The cell at `pos` is not inspected.
    pub fn run_length(&self, pos: Pos, dir: (i8, i8), stone: Stone, limit: i32) -> i32 {
        let mut run = 0;
        for k in 1..=limit {
            match pos.offset(dir, k) {
                Some(p) if self.get(p) == stone => run += 1,
                _ => break,
            }
        }
        run
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Zobrist hash of the current position
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.count
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count as usize == TOTAL_CELLS
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Temporary stone placement, reverted on drop.
pub struct Trial<'a> {
    board: &'a mut Board,
    pos: Pos,
    previous: Stone,
}

impl Deref for Trial<'_> {
    type Target = Board;

    #[inline]
    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Trial<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    #[inline]
    fn drop(&mut self) {
        self.board.set(self.pos, self.previous);
    }
}
