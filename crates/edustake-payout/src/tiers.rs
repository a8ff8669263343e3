//! Piecewise-linear multiplier tiers.
//!
//! A [`TierTable`] maps a performance signal (bps) to a payout multiplier
//! (ppm). Tiers are ordered from the highest lower bound down to a single
//! unbounded bottom tier. Lower bounds are inclusive: a signal of exactly
//! 3_000 bps (30 %) is evaluated by the tier starting at 3_000.
//!
//! Within a tier the multiplier is `base_ppm + (signal - anchor_bps) * slope`.
//! The engine clamps the raw value to its configured floor and cap.
//!
//! Default table (signal in %, multiplier in x):
//! - `x >= 50`: 3.0
//! - `30 <= x < 50`: `2.0 + (x - 30) * 0.05`
//! - `15 <= x < 30`: `1.5 + (x - 15) * 0.033`
//! - `x < 15`: `1.05 + x * 0.03`

use edustake_core::constants::{
    TIER_CAP_FROM_BPS, TIER_CAP_PPM, TIER_HIGH_BASE_PPM, TIER_HIGH_FROM_BPS,
    TIER_HIGH_SLOPE_PPM_PER_BPS, TIER_LOW_BASE_PPM, TIER_LOW_SLOPE_PPM_PER_BPS,
    TIER_MID_BASE_PPM, TIER_MID_FROM_BPS, TIER_MID_SLOPE_PPM_PER_BPS,
};
use edustake_core::error::ConfigError;
use serde::{Deserialize, Serialize};

/// One linear segment of the multiplier curve.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier {
    /// Inclusive lower bound in bps. `None` marks the unbounded bottom tier.
    #[serde(default)]
    pub from_bps: Option<i64>,
    /// Multiplier at `anchor_bps`, in ppm.
    pub base_ppm: u64,
    #[serde(default)]
    pub anchor_bps: i64,
    /// Multiplier change per bps of signal, in ppm.
    #[serde(default)]
    pub slope_ppm_per_bps: i64,
}

impl Tier {
    /// A tier paying a fixed multiplier from `from_bps` upwards.
    pub const fn flat(from_bps: i64, ppm: u64) -> Self {
        Self {
            from_bps: Some(from_bps),
            base_ppm: ppm,
            anchor_bps: from_bps,
            slope_ppm_per_bps: 0,
        }
    }

    /// A tier interpolating linearly from its own lower bound.
    pub const fn linear(from_bps: i64, base_ppm: u64, slope_ppm_per_bps: i64) -> Self {
        Self {
            from_bps: Some(from_bps),
            base_ppm,
            anchor_bps: from_bps,
            slope_ppm_per_bps,
        }
    }

    /// The unbounded bottom tier.
    pub const fn bottom(base_ppm: u64, anchor_bps: i64, slope_ppm_per_bps: i64) -> Self {
        Self {
            from_bps: None,
            base_ppm,
            anchor_bps,
            slope_ppm_per_bps,
        }
    }

    pub fn contains(&self, signal_bps: i64) -> bool {
        self.from_bps.is_none_or(|from| signal_bps >= from)
    }

    /// Unclamped multiplier; may be below zero for very negative signals.
    pub fn raw_ppm(&self, signal_bps: i64) -> i128 {
        self.base_ppm as i128
            + (signal_bps as i128 - self.anchor_bps as i128) * self.slope_ppm_per_bps as i128
    }
}

/// Ordered multiplier tiers, highest lower bound first.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct TierTable(Vec<Tier>);

impl Default for TierTable {
    fn default() -> Self {
        Self(vec![
            Tier::flat(TIER_CAP_FROM_BPS, TIER_CAP_PPM),
            Tier::linear(TIER_HIGH_FROM_BPS, TIER_HIGH_BASE_PPM, TIER_HIGH_SLOPE_PPM_PER_BPS),
            Tier::linear(TIER_MID_FROM_BPS, TIER_MID_BASE_PPM, TIER_MID_SLOPE_PPM_PER_BPS),
            Tier::bottom(TIER_LOW_BASE_PPM, 0, TIER_LOW_SLOPE_PPM_PER_BPS),
        ])
    }
}

impl TierTable {
    /// Build a table, rejecting shapes that would break monotonicity.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, ConfigError> {
        let table = Self(tiers);
        table.validate()?;
        Ok(table)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.0
    }

    /// The tier that evaluates `signal_bps`. Always `Some` for a validated
    /// table, since it ends in an unbounded tier.
    pub fn tier_for(&self, signal_bps: i64) -> Option<&Tier> {
        self.0.iter().find(|t| t.contains(signal_bps))
    }

    /// Multiplier for `signal_bps`, clamped to `[floor_ppm, cap_ppm]`.
    pub fn evaluate(&self, signal_bps: i64, floor_ppm: u64, cap_ppm: u64) -> u64 {
        let raw = self
            .tier_for(signal_bps)
            .map_or(floor_ppm as i128, |t| t.raw_ppm(signal_bps));
        raw.clamp(floor_ppm as i128, cap_ppm as i128) as u64
    }

    /// Check ordering, coverage and monotonicity.
    ///
    /// - at least one tier, exactly one unbounded tier, and it comes last
    /// - bounded tiers strictly descending
    /// - no negative slopes
    /// - at every boundary, the lower tier's last value does not exceed the
    ///   upper tier's first value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(last) = self.0.last() else {
            return Err(ConfigError::Invalid("empty tier table".into()));
        };
        if last.from_bps.is_some() {
            return Err(ConfigError::Invalid(
                "last tier must be unbounded (omit from_bps)".into(),
            ));
        }

        for (i, tier) in self.0.iter().enumerate() {
            if tier.slope_ppm_per_bps < 0 {
                return Err(ConfigError::Invalid(format!(
                    "tier {i} has negative slope {}",
                    tier.slope_ppm_per_bps
                )));
            }
            if i + 1 < self.0.len() && tier.from_bps.is_none() {
                return Err(ConfigError::Invalid(format!(
                    "tier {i} is unbounded but not last"
                )));
            }
        }

        for (i, pair) in self.0.windows(2).enumerate() {
            let (upper, lower) = (&pair[0], &pair[1]);
            // upper is always bounded here
            let Some(boundary) = upper.from_bps else {
                continue;
            };
            if let Some(lower_from) = lower.from_bps {
                if lower_from >= boundary {
                    return Err(ConfigError::Invalid(format!(
                        "tier bounds not strictly descending at tier {}",
                        i + 1
                    )));
                }
            }
            if lower.raw_ppm(boundary.saturating_sub(1)) > upper.raw_ppm(boundary) {
                return Err(ConfigError::Invalid(format!(
                    "multiplier steps down at {boundary} bps between tiers {i} and {}",
                    i + 1
                )));
            }
        }
        Ok(())
    }
}
