//! Payout engine implementing the [`PayoutCalculator`] trait.
//!
//! Pipeline: validate -> signal -> multiplier (tier table) -> risk (risk
//! table) -> quality bonus and platform fee -> outcome band.
//! All arithmetic is integer-only with u128/i128 intermediates; stakes are
//! bounded by [`MAX_STAKE`] so no intermediate can overflow.

use edustake_core::constants::{
    BPS_PRECISION, MAX_DIFFICULTY, MAX_QUALITY_SCORE, MAX_STAKE, MIN_DIFFICULTY,
    MULTIPLIER_PRECISION,
};
use edustake_core::error::{ConfigError, PayoutError};
use edustake_core::traits::PayoutCalculator;
use edustake_core::types::{PayoutMode, PayoutResult, RiskAssessment, StakeInput};
use tracing::debug;

use crate::config::PayoutConfig;
use crate::distribution::outcome_band;

/// The production payout calculator.
///
/// Stateless apart from its immutable configuration; share one instance
/// across threads freely.
#[derive(Debug, Clone, Default)]
pub struct PayoutEngine {
    config: PayoutConfig,
}

impl PayoutEngine {
    /// Engine with the default tier and risk tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom configuration, validated up front.
    pub fn with_config(config: PayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PayoutConfig {
        &self.config
    }

    /// Quality bonus in ppm: a flat step at the threshold, never interpolated.
    pub fn quality_bonus_ppm(&self, quality_score: u8) -> u64 {
        if quality_score >= self.config.quality_bonus_threshold {
            self.config.quality_bonus_ppm
        } else {
            MULTIPLIER_PRECISION
        }
    }

    /// Checks shared by both modes: stake, timeline and quality score.
    pub(crate) fn validate_common(&self, input: &StakeInput) -> Result<(), PayoutError> {
        if input.stake == 0 || input.stake > MAX_STAKE {
            return Err(PayoutError::InvalidStake(input.stake));
        }
        if input.timeline == 0 {
            return Err(PayoutError::InvalidTimeline("timeline must be > 0".into()));
        }
        if input.quality_score > MAX_QUALITY_SCORE {
            return Err(PayoutError::InvalidQualityScore(input.quality_score));
        }
        Ok(())
    }
}

/// `(baseline - timeline) / baseline` in bps, truncated toward zero.
///
/// A zero baseline has no defined reduction and is rejected. Saturates at
/// `i64::MIN` for timelines absurdly longer than the baseline.
pub fn time_reduction_bps(baseline: u64, timeline: u64) -> Result<i64, PayoutError> {
    if baseline == 0 {
        return Err(PayoutError::InvalidTimeline("baseline estimate must be > 0".into()));
    }
    let diff = baseline as i128 - timeline as i128;
    let bps = diff * BPS_PRECISION as i128 / baseline as i128;
    Ok(bps.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
}

fn difficulty_field(field: &'static str, value: Option<u8>) -> Result<u8, PayoutError> {
    match value {
        Some(v) if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&v) => Ok(v),
        _ => Err(PayoutError::InvalidDifficultyRange { field, value }),
    }
}

fn mul_ppm(amount: u64, ppm: u64) -> u64 {
    (amount as u128 * ppm as u128 / MULTIPLIER_PRECISION as u128) as u64
}

fn mul_bps(amount: u64, bps: u64) -> u64 {
    (amount as u128 * bps as u128 / BPS_PRECISION as u128) as u64
}

impl PayoutCalculator for PayoutEngine {
    fn signal_bps(&self, input: &StakeInput, mode: PayoutMode) -> Result<i64, PayoutError> {
        match mode {
            PayoutMode::TimeBased => {
                let Some(baseline) = input.baseline_estimate else {
                    return Err(PayoutError::InvalidTimeline(
                        "baseline estimate is required in time-based mode".into(),
                    ));
                };
                if input.timeline == 0 {
                    return Err(PayoutError::InvalidTimeline("timeline must be > 0".into()));
                }
                time_reduction_bps(baseline, input.timeline)
            }
            PayoutMode::DifficultyBased => {
                let content = difficulty_field("content_difficulty", input.content_difficulty)?;
                let skill = difficulty_field("user_skill_level", input.user_skill_level)?;
                let gap = content as i64 - skill as i64;
                Ok(gap * self.config.difficulty_step_bps)
            }
        }
    }

    fn multiplier_ppm(&self, signal_bps: i64) -> u64 {
        self.config.tiers.evaluate(
            signal_bps,
            self.config.min_multiplier_ppm,
            self.config.max_multiplier_ppm,
        )
    }

    fn classify_risk(&self, signal_bps: i64) -> RiskAssessment {
        self.config.risk.assess(signal_bps)
    }

    fn calculate_payout(
        &self,
        input: &StakeInput,
        mode: PayoutMode,
    ) -> Result<PayoutResult, PayoutError> {
        self.validate_common(input)?;
        let signal_bps = self.signal_bps(input, mode)?;

        let multiplier_ppm = self.multiplier_ppm(signal_bps);
        let risk = self.classify_risk(signal_bps);

        let base_payout = mul_ppm(input.stake, multiplier_ppm);
        let quality_bonus_ppm = self.quality_bonus_ppm(input.quality_score);
        let gross_payout = mul_ppm(base_payout, quality_bonus_ppm);
        let platform_fee = mul_bps(gross_payout, self.config.platform_fee_bps);
        let final_payout = gross_payout - platform_fee;

        let roi_bps = ((final_payout as i128 - input.stake as i128) * BPS_PRECISION as i128
            / input.stake as i128) as i64;

        let potential_winnings = outcome_band(final_payout, risk.spread_bps);

        debug!(
            %mode,
            signal_bps,
            multiplier_ppm,
            risk = %risk.level,
            final_payout,
            "payout calculated"
        );

        Ok(PayoutResult {
            mode,
            stake: input.stake,
            signal_bps,
            multiplier_ppm,
            risk,
            base_payout,
            quality_bonus_ppm,
            gross_payout,
            platform_fee,
            final_payout,
            roi_bps,
            potential_winnings,
        })
    }
}
