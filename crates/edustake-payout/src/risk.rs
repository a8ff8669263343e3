//! Risk classification over the performance signal.
//!
//! Thresholds are inclusive lower bounds, matching the multiplier tiers:
//!
//! | signal (%) | level   | success | spread |
//! |------------|---------|---------|--------|
//! | >= 50      | EXTREME | 20 %    | 50 %   |
//! | 30..50     | HIGH    | 40 %    | 35 %   |
//! | 15..30     | MEDIUM  | 65 %    | 20 %   |
//! | < 15       | LOW     | 85 %    | 10 %   |
//!
//! Probabilities and spreads are tunable game-design constants, not fitted
//! to any completion data.

use edustake_core::constants::{
    BPS_PRECISION, EXTREME_SPREAD_BPS, EXTREME_SUCCESS_BPS, HIGH_SPREAD_BPS, HIGH_SUCCESS_BPS,
    LOW_SPREAD_BPS, LOW_SUCCESS_BPS, MEDIUM_SPREAD_BPS, MEDIUM_SUCCESS_BPS,
    RISK_EXTREME_FROM_BPS, RISK_HIGH_FROM_BPS, RISK_MEDIUM_FROM_BPS,
};
use edustake_core::error::ConfigError;
use edustake_core::types::{RiskAssessment, RiskLevel};
use serde::{Deserialize, Serialize};

/// Per-level constants attached to a risk bucket.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RiskProfile {
    pub success_probability_bps: u64,
    pub spread_bps: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct RiskTable {
    pub medium_from_bps: i64,
    pub high_from_bps: i64,
    pub extreme_from_bps: i64,
    pub low: RiskProfile,
    pub medium: RiskProfile,
    pub high: RiskProfile,
    pub extreme: RiskProfile,
}

impl Default for RiskTable {
    fn default() -> Self {
        Self {
            medium_from_bps: RISK_MEDIUM_FROM_BPS,
            high_from_bps: RISK_HIGH_FROM_BPS,
            extreme_from_bps: RISK_EXTREME_FROM_BPS,
            low: RiskProfile { success_probability_bps: LOW_SUCCESS_BPS, spread_bps: LOW_SPREAD_BPS },
            medium: RiskProfile {
                success_probability_bps: MEDIUM_SUCCESS_BPS,
                spread_bps: MEDIUM_SPREAD_BPS,
            },
            high: RiskProfile { success_probability_bps: HIGH_SUCCESS_BPS, spread_bps: HIGH_SPREAD_BPS },
            extreme: RiskProfile {
                success_probability_bps: EXTREME_SUCCESS_BPS,
                spread_bps: EXTREME_SPREAD_BPS,
            },
        }
    }
}

impl RiskTable {
    pub fn level_for(&self, signal_bps: i64) -> RiskLevel {
        if signal_bps >= self.extreme_from_bps {
            RiskLevel::Extreme
        } else if signal_bps >= self.high_from_bps {
            RiskLevel::High
        } else if signal_bps >= self.medium_from_bps {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn profile(&self, level: RiskLevel) -> RiskProfile {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Extreme => self.extreme,
        }
    }

    pub fn assess(&self, signal_bps: i64) -> RiskAssessment {
        let level = self.level_for(signal_bps);
        let profile = self.profile(level);
        RiskAssessment {
            level,
            success_probability_bps: profile.success_probability_bps,
            spread_bps: profile.spread_bps,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.medium_from_bps < self.high_from_bps && self.high_from_bps < self.extreme_from_bps) {
            return Err(ConfigError::Invalid(format!(
                "risk thresholds must ascend: medium {} < high {} < extreme {}",
                self.medium_from_bps, self.high_from_bps, self.extreme_from_bps
            )));
        }
        for level in RiskLevel::ALL {
            let p = self.profile(level);
            if p.success_probability_bps > BPS_PRECISION {
                return Err(ConfigError::Invalid(format!(
                    "{level} success probability {} bps exceeds 100%",
                    p.success_probability_bps
                )));
            }
            // conservative = final * (1 - spread) must stay non-negative
            if p.spread_bps > BPS_PRECISION {
                return Err(ConfigError::Invalid(format!(
                    "{level} spread {} bps exceeds 100%",
                    p.spread_bps
                )));
            }
        }
        Ok(())
    }
}
