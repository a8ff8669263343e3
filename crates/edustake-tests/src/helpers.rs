//! Shared helpers for integration tests.

use edustake_core::constants::EDU;
use edustake_core::traits::PayoutCalculator;
use edustake_core::types::{PayoutMode, PayoutResult, StakeInput};
use edustake_payout::PayoutEngine;

/// Time-based commitment with stake given in whole EDU.
pub fn time_stake(stake_edu: u64, timeline: u64, baseline: u64, quality: u8) -> StakeInput {
    StakeInput::time_based(stake_edu * EDU, timeline, baseline).with_quality(quality)
}

/// Difficulty-based commitment with stake given in whole EDU.
pub fn difficulty_stake(stake_edu: u64, timeline: u64, content: u8, skill: u8) -> StakeInput {
    StakeInput::difficulty_based(stake_edu * EDU, timeline, content, skill)
}

/// Quote through the trait object, the way a service would hold the engine.
pub fn quote(input: &StakeInput, mode: PayoutMode) -> PayoutResult {
    let calculator: &dyn PayoutCalculator = &PayoutEngine::new();
    calculator
        .calculate_payout(input, mode)
        .expect("valid test input")
}
