//! Zobrist hashing for position identification
//!
//! Every (cell, color) combination owns one random 64-bit key. A position's
//! hash is the XOR of the keys of all occupied cells, so placing or removing
//! a stone is a single XOR. The keys come from a seeded PRNG and are built
//! once per process, which keeps hashes identical across runs.
//!
//! # Example
//!
//! ```
//! use gobang::board::{zobrist, Board, Pos, Stone};
//!
//! let mut board = Board::new();
//! board.set(Pos::new(7, 7), Stone::Black);
//!
//! // The incrementally maintained hash matches a full recomputation
//! assert_eq!(board.hash(), zobrist().hash(&board));
//! ```

use std::sync::OnceLock;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{Board, Pos, Stone, TOTAL_CELLS};

/// Fixed seed so that hashes are reproducible
const ZOBRIST_SEED: u64 = 1_551_980_916_123;

static TABLE: OnceLock<ZobristTable> = OnceLock::new();

/// Shared, lazily built Zobrist table
#[inline]
pub fn zobrist() -> &'static ZobristTable {
    TABLE.get_or_init(ZobristTable::new)
}

/// Zobrist key table.
pub struct ZobristTable {
    /// Keys for black stones at each position
    black: [u64; TOTAL_CELLS],
    /// Keys for white stones at each position
    white: [u64; TOTAL_CELLS],
}

impl ZobristTable {
    /// Build a table from the fixed seed.
    #[must_use]
    pub fn new() -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(ZOBRIST_SEED);

        let mut black = [0u64; TOTAL_CELLS];
        let mut white = [0u64; TOTAL_CELLS];
        for i in 0..TOTAL_CELLS {
            black[i] = rng.random();
            white[i] = rng.random();
        }

        Self { black, white }
    }

    /// Key for a stone at a position; `Stone::Empty` has key 0.
    #[inline]
    #[must_use]
    pub fn key(&self, pos: Pos, stone: Stone) -> u64 {
        let idx = pos.to_index();
        match stone {
            Stone::Black => self.black[idx],
            Stone::White => self.white[idx],
            Stone::Empty => 0,
        }
    }

    /// Full hash of a board, recomputed from scratch.
    ///
    /// The board keeps its own hash incrementally; this is the reference
    /// it must always agree with.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        let mut h = 0u64;
        for pos in board.black.iter_ones() {
            h ^= self.black[pos.to_index()];
        }
        for pos in board.white.iter_ones() {
            h ^= self.white[pos.to_index()];
        }
        h
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
