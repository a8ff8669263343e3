//! What-if comparison of commitment levels.
//!
//! Each preset rewrites the commitment of the caller's input and runs it
//! through the normal calculation, so scenarios obey every invariant a
//! direct quote does.

use edustake_core::constants::{BPS_PRECISION, MAX_DIFFICULTY};
use edustake_core::error::PayoutError;
use edustake_core::traits::PayoutCalculator;
use edustake_core::types::{PayoutMode, Scenario, StakeInput};
use tracing::debug;

use crate::engine::PayoutEngine;

/// Time-based presets: name and time reduction against the baseline.
const TIME_PRESETS: [(&str, u64); 4] = [
    ("baseline", 0),
    ("moderate", 1_500),
    ("ambitious", 3_000),
    ("aggressive", 5_000),
];

/// Difficulty-based presets: name and content levels above the user's skill.
const DIFFICULTY_PRESETS: [(&str, u8); 4] = [
    ("baseline", 0),
    ("moderate", 2),
    ("ambitious", 3),
    ("aggressive", 5),
];

impl PayoutEngine {
    /// Evaluate the four named presets for `input`, least to most aggressive.
    ///
    /// Stake and quality score are carried over. The caller's own input is
    /// validated first, so an invalid request never yields scenarios.
    pub fn simulate_scenarios(
        &self,
        input: &StakeInput,
        mode: PayoutMode,
    ) -> Result<Vec<Scenario>, PayoutError> {
        self.calculate_payout(input, mode)?;

        let inputs: Vec<(&str, StakeInput)> = match mode {
            PayoutMode::TimeBased => {
                // validated above
                let baseline = input.baseline_estimate.unwrap_or(input.timeline);
                TIME_PRESETS
                    .iter()
                    .map(|&(name, reduction_bps)| {
                        let timeline = (baseline as u128 * (BPS_PRECISION - reduction_bps) as u128
                            / BPS_PRECISION as u128) as u64;
                        let scenario = StakeInput { timeline: timeline.max(1), ..input.clone() };
                        (name, scenario)
                    })
                    .collect()
            }
            PayoutMode::DifficultyBased => {
                let skill = input.user_skill_level.unwrap_or(MAX_DIFFICULTY);
                DIFFICULTY_PRESETS
                    .iter()
                    .map(|&(name, levels_above)| {
                        let content = skill.saturating_add(levels_above).min(MAX_DIFFICULTY);
                        let scenario = StakeInput {
                            content_difficulty: Some(content),
                            ..input.clone()
                        };
                        (name, scenario)
                    })
                    .collect()
            }
        };

        let scenarios = inputs
            .into_iter()
            .map(|(name, input)| {
                let result = self.calculate_payout(&input, mode)?;
                Ok(Scenario { name: name.to_string(), input, result })
            })
            .collect::<Result<Vec<_>, PayoutError>>()?;

        debug!(%mode, count = scenarios.len(), "scenarios simulated");
        Ok(scenarios)
    }
}
