//! Evaluation weights for Gobang patterns
//!
//! One `EvalWeights` value drives both the point evaluator (move ordering)
//! and the board evaluator (position score). Presets trade aggressiveness
//! against search speed; all share the same algorithm.

use serde::{Deserialize, Serialize};

/// Named weight presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Baseline table, depth 6
    #[default]
    Standard,
    /// Stronger threat weights with a shallower search
    Balanced,
    /// Highest tactical weights, tactical move ordering
    Optimized,
}

/// Integer rewards for every recognized pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    // Point evaluation
    /// `01111*`: four ending next to the point, open beyond
    pub live_four: i32,
    /// `21111*`: four ending next to the point, blocked beyond
    pub dead_four_a: i32,
    /// `111*1`
    pub dead_four_b: i32,
    /// `11*11`
    pub dead_four_c: i32,
    /// `111*0`
    pub live_three_near: i32,
    /// Extra reward when `111*0` is also open on the far side
    pub live_three_bonus: i32,
    /// `1110*`
    pub live_three_far: i32,
    /// `11*1`
    pub dead_three: i32,
    /// Extra reward when `11*1` is open on both sides
    pub dead_three_bonus: i32,
    /// Two or more live twos through the point
    pub two_count_double: i32,
    /// Exactly one live two through the point
    pub two_count_single: i32,
    pub scatter_multiplier: i32,
    pub opponent_penalty: i32,
    pub opponent_minor_penalty: i32,

    // Board evaluation
    pub five_in_row: i32,
    pub four_open: i32,
    pub four_closed: i32,
    pub three_open: i32,
    pub three_semi: i32,
    pub three_closed: i32,
    pub three_gap: i32,
    pub two_basic: i32,
    pub two_corner: i32,

    // Search thresholds
    /// Net board value treated as a decided game during search
    pub win_cutoff: i32,
    /// Iterative deepening stops once the best value exceeds this
    pub deepening_stop: i32,
    /// Same, applied from depth 4 on
    pub deepening_stop_deep: i32,
}

impl EvalWeights {
    #[must_use]
    pub fn for_preset(preset: Preset) -> Self {
        match preset {
            Preset::Standard => Self::standard(),
            Preset::Balanced => Self::balanced(),
            Preset::Optimized => Self::optimized(),
        }
    }

    #[must_use]
    pub fn standard() -> Self {
        Self {
            live_four: 300_000,
            dead_four_a: 250_000,
            dead_four_b: 240_000,
            dead_four_c: 230_000,
            live_three_near: 1_450,
            live_three_bonus: 6_000,
            live_three_far: 350,
            dead_three: 700,
            dead_three_bonus: 6_700,
            two_count_double: 3_000,
            two_count_single: 2_725,
            scatter_multiplier: 5,
            opponent_penalty: 500,
            opponent_minor_penalty: 300,
            five_in_row: 1_000_000,
            four_open: 300_000,
            four_closed: 25_000,
            three_open: 22_000,
            three_semi: 500,
            three_closed: 26_000,
            three_gap: 800,
            two_basic: 650,
            two_corner: 150,
            win_cutoff: 800_000,
            deepening_stop: 800_000,
            deepening_stop_deep: 200_000,
        }
    }

    #[must_use]
    pub fn balanced() -> Self {
        Self {
            live_four: 350_000,
            dead_four_a: 280_000,
            dead_four_b: 265_000,
            dead_four_c: 250_000,
            live_three_near: 2_000,
            live_three_bonus: 8_000,
            live_three_far: 500,
            dead_three: 900,
            dead_three_bonus: 7_500,
            two_count_double: 3_500,
            two_count_single: 3_000,
            scatter_multiplier: 7,
            opponent_penalty: 600,
            opponent_minor_penalty: 350,
            five_in_row: 1_200_000,
            four_open: 350_000,
            four_closed: 30_000,
            three_open: 28_000,
            three_semi: 650,
            three_closed: 32_000,
            three_gap: 1_000,
            two_basic: 800,
            two_corner: 200,
            win_cutoff: 800_000,
            deepening_stop: 800_000,
            deepening_stop_deep: 200_000,
        }
    }

    #[must_use]
    pub fn optimized() -> Self {
        Self {
            live_four: 450_000,
            dead_four_a: 380_000,
            dead_four_b: 360_000,
            dead_four_c: 340_000,
            live_three_near: 3_000,
            live_three_bonus: 10_000,
            live_three_far: 750,
            dead_three: 1_200,
            dead_three_bonus: 9_000,
            two_count_double: 5_000,
            two_count_single: 4_200,
            scatter_multiplier: 9,
            opponent_penalty: 750,
            opponent_minor_penalty: 450,
            five_in_row: 1_500_000,
            four_open: 450_000,
            four_closed: 45_000,
            three_open: 45_000,
            three_semi: 1_000,
            three_closed: 50_000,
            three_gap: 1_500,
            two_basic: 1_200,
            two_corner: 300,
            win_cutoff: 800_000,
            deepening_stop: 1_200_000,
            deepening_stop_deep: 900_000,
        }
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self::standard()
    }
}
