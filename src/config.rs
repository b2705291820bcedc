//! Engine configuration
//!
//! `EngineConfig` is plain data with serde derives so the surrounding
//! application can keep it in a TOML or JSON file. Missing fields fall back
//! to the standard preset.
//!
//! ```
//! use gobang::config::{EngineConfig, MoveOrdering, Preset, SearchPolicy};
//!
//! let config = EngineConfig::preset(Preset::Optimized);
//! assert_eq!(config.ordering, MoveOrdering::Tactical);
//! assert_eq!(config.policy, SearchPolicy::Tactical);
//! assert_eq!(config.max_kill_depth, 4);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use crate::eval::weights::Preset;
use crate::eval::EvalWeights;

/// Smallest search depth the driver accepts
pub const MIN_DEPTH: u32 = 2;

/// How candidate moves are ranked before search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveOrdering {
    /// Point evaluation only
    #[default]
    Pattern,
    /// Point evaluation plus tactical bonuses
    Tactical,
}

/// How the search sizes its depth limit and per-node width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPolicy {
    /// Phase-based depth and width
    #[default]
    Standard,
    /// Deeper and wider search wherever threats pile up
    Tactical,
}

/// Search and evaluation settings for one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base depth for iterative deepening (rounded down to even)
    pub max_depth: u32,
    /// Base number of candidates expanded per node
    pub max_candidates: usize,
    /// Largest budget tried by the forced-win solver
    pub max_kill_depth: u32,
    /// Weight table
    pub preset: Preset,
    pub ordering: MoveOrdering,
    /// Depth and width adaptation
    pub policy: SearchPolicy,
    /// Wall-clock budget for the deepest iteration; 0 disables it
    pub time_budget_ms: u64,
    /// Number of search cache slots
    pub cache_capacity: usize,
}

impl EngineConfig {
    /// Settings that go with a weight preset
    #[must_use]
    pub fn preset(preset: Preset) -> Self {
        let base = Self {
            max_depth: 6,
            max_candidates: 16,
            max_kill_depth: 12,
            preset,
            ordering: MoveOrdering::Pattern,
            policy: SearchPolicy::Standard,
            time_budget_ms: 60_000,
            cache_capacity: 1 << 18,
        };
        match preset {
            Preset::Standard => base,
            Preset::Balanced => Self {
                max_depth: 4,
                ..base
            },
            Preset::Optimized => Self {
                max_kill_depth: 4,
                ordering: MoveOrdering::Tactical,
                policy: SearchPolicy::Tactical,
                ..base
            },
        }
    }

    /// Weight table for the configured preset
    #[must_use]
    pub fn weights(&self) -> EvalWeights {
        EvalWeights::for_preset(self.preset)
    }

    #[must_use]
    pub fn time_budget(&self) -> Option<Duration> {
        (self.time_budget_ms > 0).then(|| Duration::from_millis(self.time_budget_ms))
    }

    /// Copy with out-of-range values pulled back into range.
    ///
    /// Depths become even and at least [`MIN_DEPTH`]; the candidate count and
    /// cache size are at least one.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            max_depth: (self.max_depth.max(MIN_DEPTH)) & !1,
            max_candidates: self.max_candidates.max(1),
            max_kill_depth: self.max_kill_depth & !1,
            cache_capacity: self.cache_capacity.max(1),
            ..self.clone()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::preset(Preset::Standard)
    }
}
