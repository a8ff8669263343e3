//! Engine configuration.
//!
//! [`PayoutConfig`] carries every tunable game-design constant. It is plain
//! serde data so binaries can load it from a file; missing keys fall back to
//! the defaults in [`edustake_core::constants`]. Always pass a loaded config
//! through [`PayoutConfig::validate`] (or [`crate::PayoutEngine::with_config`])
//! before use.

use edustake_core::constants::{
    BPS_PRECISION, DIFFICULTY_STEP_BPS, MAX_MULTIPLIER_PPM, MAX_QUALITY_SCORE,
    MIN_COMPLETION_QUALITY, MIN_MULTIPLIER_PPM, MULTIPLIER_PRECISION, PLATFORM_FEE_BPS,
    QUALITY_BONUS_PPM, QUALITY_BONUS_THRESHOLD,
};
use edustake_core::error::ConfigError;
use serde::{Deserialize, Serialize};

use crate::risk::RiskTable;
use crate::tiers::TierTable;

/// Upper bound on any configured multiplier, keeping products inside u64.
const MAX_CONFIGURABLE_PPM: u64 = 100 * MULTIPLIER_PRECISION;
const MAX_DIFFICULTY_STEP_BPS: i64 = 100 * BPS_PRECISION as i64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct PayoutConfig {
    pub tiers: TierTable,
    pub min_multiplier_ppm: u64,
    pub max_multiplier_ppm: u64,
    /// Signal per level of `content_difficulty - user_skill_level`.
    pub difficulty_step_bps: i64,
    pub risk: RiskTable,
    pub quality_bonus_threshold: u8,
    pub quality_bonus_ppm: u64,
    pub platform_fee_bps: u64,
    pub min_completion_quality: u8,
    /// Honour break-even requests at settlement. Debug/demo path only.
    pub dev_break_even: bool,
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            tiers: TierTable::default(),
            min_multiplier_ppm: MIN_MULTIPLIER_PPM,
            max_multiplier_ppm: MAX_MULTIPLIER_PPM,
            difficulty_step_bps: DIFFICULTY_STEP_BPS,
            risk: RiskTable::default(),
            quality_bonus_threshold: QUALITY_BONUS_THRESHOLD,
            quality_bonus_ppm: QUALITY_BONUS_PPM,
            platform_fee_bps: PLATFORM_FEE_BPS,
            min_completion_quality: MIN_COMPLETION_QUALITY,
            dev_break_even: false,
        }
    }
}

impl PayoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tiers.validate()?;
        self.risk.validate()?;

        if self.min_multiplier_ppm < MULTIPLIER_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "multiplier floor {} ppm is below 1.0x",
                self.min_multiplier_ppm
            )));
        }
        if self.min_multiplier_ppm > self.max_multiplier_ppm {
            return Err(ConfigError::Invalid(format!(
                "multiplier floor {} ppm exceeds cap {} ppm",
                self.min_multiplier_ppm, self.max_multiplier_ppm
            )));
        }
        if self.max_multiplier_ppm > MAX_CONFIGURABLE_PPM {
            return Err(ConfigError::Invalid(format!(
                "multiplier cap {} ppm exceeds {MAX_CONFIGURABLE_PPM} ppm",
                self.max_multiplier_ppm
            )));
        }
        if !(MULTIPLIER_PRECISION..=MAX_CONFIGURABLE_PPM).contains(&self.quality_bonus_ppm) {
            return Err(ConfigError::Invalid(format!(
                "quality bonus {} ppm outside 1.0x..=100x",
                self.quality_bonus_ppm
            )));
        }
        if !(0..=MAX_DIFFICULTY_STEP_BPS).contains(&self.difficulty_step_bps) {
            return Err(ConfigError::Invalid(format!(
                "difficulty step {} bps outside 0..={MAX_DIFFICULTY_STEP_BPS}",
                self.difficulty_step_bps
            )));
        }
        if self.platform_fee_bps > BPS_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "platform fee {} bps exceeds 100%",
                self.platform_fee_bps
            )));
        }
        if self.quality_bonus_threshold > MAX_QUALITY_SCORE
            || self.min_completion_quality > MAX_QUALITY_SCORE
        {
            return Err(ConfigError::Invalid(
                "quality thresholds must be within 0..=100".into(),
            ));
        }
        Ok(())
    }
}
