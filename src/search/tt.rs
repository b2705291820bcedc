//! Search cache
//!
//! Stores the result of a search node under its (position hash, remaining
//! depth) key so transpositions reached through a different move order are
//! not searched twice. The cache is direct-mapped: every key owns exactly one
//! slot and a new entry always replaces the old one.
//!
//! Results are only comparable within one top-level search, because the
//! bounds passed down differ between calls. The driver clears the cache at
//! the start of every call.
//!
//! # Example
//!
//! ```
//! use gobang::board::Pos;
//! use gobang::search::{Candidate, SearchCache};
//!
//! let mut cache = SearchCache::new(1024);
//! let hash = 0x1234_5678_9ABC_DEF0;
//! cache.store(hash, 4, Candidate::new(Pos::new(7, 8), 120));
//!
//! assert_eq!(cache.probe(hash, 4), Some(Candidate::new(Pos::new(7, 8), 120)));
//! // Same position at another depth is a different key
//! assert_eq!(cache.probe(hash, 2), None);
//! ```

use super::Candidate;

/// Cache slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheEntry {
    hash: u64,
    depth: u32,
    result: Candidate,
}

/// Fixed-capacity, direct-mapped cache of search results.
pub struct SearchCache {
    entries: Vec<Option<CacheEntry>>,
    hits: u64,
    stores: u64,
}

impl SearchCache {
    /// Create a cache with `capacity` slots (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity.max(1)],
            hits: 0,
            stores: 0,
        }
    }

    #[inline]
    fn slot(&self, hash: u64, depth: u32) -> usize {
        // Spread depths of the same position over different slots
        let key = hash ^ u64::from(depth).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        (key % self.entries.len() as u64) as usize
    }

    /// Look up the result stored for exactly this position and depth.
    #[must_use]
    pub fn probe(&mut self, hash: u64, depth: u32) -> Option<Candidate> {
        let entry = self.entries[self.slot(hash, depth)]?;
        if entry.hash != hash || entry.depth != depth {
            return None;
        }
        self.hits += 1;
        Some(entry.result)
    }

    /// Store a result, replacing whatever held the slot.
    pub fn store(&mut self, hash: u64, depth: u32, result: Candidate) {
        let idx = self.slot(hash, depth);
        self.entries[idx] = Some(CacheEntry {
            hash,
            depth,
            result,
        });
        self.stores += 1;
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.hits = 0;
        self.stores = 0;
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Get statistics about cache usage.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        CacheStats {
            size: self.entries.len(),
            used,
            hits: self.hits,
            stores: self.stores,
        }
    }
}

/// Statistics about cache usage since the last clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of slots
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Successful probes
    pub hits: u64,
    pub stores: u64,
}
