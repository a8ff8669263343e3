//! Payout constants. All amounts in base units (1 EDU = 10^8 units).
//!
//! Percent-like quantities are basis points of [`BPS_PRECISION`], multipliers
//! are parts-per-million of [`MULTIPLIER_PRECISION`]. These are the default
//! game-design values; the engine reads them through its configuration so
//! they can be tuned without touching the tier shape.

pub const EDU: u64 = 100_000_000;

/// Number of fractional digits an EDU amount can carry.
pub const EDU_DECIMALS: u32 = 8;

/// Largest accepted stake. Bounds every fixed-point intermediate.
///
/// # Examples
///
/// ```
/// use edustake_core::constants::{EDU, MAX_STAKE};
/// assert_eq!(MAX_STAKE / EDU, 1_000_000);
/// ```
pub const MAX_STAKE: u64 = 1_000_000 * EDU;

pub const BPS_PRECISION: u64 = 10_000;
pub const MULTIPLIER_PRECISION: u64 = 1_000_000;

// Multiplier tiers over the time-reduction signal.
pub const TIER_CAP_FROM_BPS: i64 = 5_000;
pub const TIER_HIGH_FROM_BPS: i64 = 3_000;
pub const TIER_MID_FROM_BPS: i64 = 1_500;

pub const TIER_CAP_PPM: u64 = 3_000_000;
pub const TIER_HIGH_BASE_PPM: u64 = 2_000_000;
pub const TIER_MID_BASE_PPM: u64 = 1_500_000;
pub const TIER_LOW_BASE_PPM: u64 = 1_050_000;

/// 0.05x per percent of reduction.
pub const TIER_HIGH_SLOPE_PPM_PER_BPS: i64 = 500;
/// 0.033x per percent of reduction.
pub const TIER_MID_SLOPE_PPM_PER_BPS: i64 = 330;
/// 0.03x per percent of reduction.
pub const TIER_LOW_SLOPE_PPM_PER_BPS: i64 = 300;

pub const MIN_MULTIPLIER_PPM: u64 = MULTIPLIER_PRECISION;
pub const MAX_MULTIPLIER_PPM: u64 = TIER_CAP_PPM;

/// Signal contributed by one level of difficulty gap (10 %).
pub const DIFFICULTY_STEP_BPS: i64 = 1_000;
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;

// Risk thresholds share the tier boundaries.
pub const RISK_MEDIUM_FROM_BPS: i64 = TIER_MID_FROM_BPS;
pub const RISK_HIGH_FROM_BPS: i64 = TIER_HIGH_FROM_BPS;
pub const RISK_EXTREME_FROM_BPS: i64 = TIER_CAP_FROM_BPS;

pub const LOW_SUCCESS_BPS: u64 = 8_500;
pub const MEDIUM_SUCCESS_BPS: u64 = 6_500;
pub const HIGH_SUCCESS_BPS: u64 = 4_000;
pub const EXTREME_SUCCESS_BPS: u64 = 2_000;

pub const LOW_SPREAD_BPS: u64 = 1_000;
pub const MEDIUM_SPREAD_BPS: u64 = 2_000;
pub const HIGH_SPREAD_BPS: u64 = 3_500;
pub const EXTREME_SPREAD_BPS: u64 = 5_000;

pub const MAX_QUALITY_SCORE: u8 = 100;
pub const QUALITY_BONUS_THRESHOLD: u8 = 80;
/// Flat 1.1x when the quality threshold is reached. Never interpolated.
pub const QUALITY_BONUS_PPM: u64 = 1_100_000;

/// Platform fee taken from the gross payout (5 %).
pub const PLATFORM_FEE_BPS: u64 = 500;

/// Minimum completion quality for a plan to settle as won.
pub const MIN_COMPLETION_QUALITY: u8 = 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_continuous_or_step_up() {
        // Low tier reaches the mid tier base exactly at its lower bound.
        let low_end = TIER_LOW_BASE_PPM as i64 + TIER_MID_FROM_BPS * TIER_LOW_SLOPE_PPM_PER_BPS;
        assert_eq!(low_end, TIER_MID_BASE_PPM as i64);

        // Mid tier ends just below the high tier base.
        let mid_end = TIER_MID_BASE_PPM as i64
            + (TIER_HIGH_FROM_BPS - TIER_MID_FROM_BPS) * TIER_MID_SLOPE_PPM_PER_BPS;
        assert!(mid_end <= TIER_HIGH_BASE_PPM as i64);

        // High tier reaches the cap exactly.
        let high_end = TIER_HIGH_BASE_PPM as i64
            + (TIER_CAP_FROM_BPS - TIER_HIGH_FROM_BPS) * TIER_HIGH_SLOPE_PPM_PER_BPS;
        assert_eq!(high_end, TIER_CAP_PPM as i64);
    }

    #[test]
    fn success_probability_falls_with_risk() {
        assert!(LOW_SUCCESS_BPS > MEDIUM_SUCCESS_BPS);
        assert!(MEDIUM_SUCCESS_BPS > HIGH_SUCCESS_BPS);
        assert!(HIGH_SUCCESS_BPS > EXTREME_SUCCESS_BPS);
    }

    #[test]
    fn spread_grows_with_risk_and_stays_below_whole() {
        assert!(LOW_SPREAD_BPS < MEDIUM_SPREAD_BPS);
        assert!(MEDIUM_SPREAD_BPS < HIGH_SPREAD_BPS);
        assert!(HIGH_SPREAD_BPS < EXTREME_SPREAD_BPS);
        assert!(EXTREME_SPREAD_BPS <= BPS_PRECISION);
    }

    #[test]
    fn max_stake_fits_fixed_point_products() {
        let worst = MAX_STAKE as u128 * MAX_MULTIPLIER_PPM as u128 * QUALITY_BONUS_PPM as u128;
        assert!(worst < u128::MAX / BPS_PRECISION as u128);
        let gross = MAX_STAKE as u128 * MAX_MULTIPLIER_PPM as u128 / MULTIPLIER_PRECISION as u128
            * QUALITY_BONUS_PPM as u128
            / MULTIPLIER_PRECISION as u128;
        assert!(gross < u64::MAX as u128);
    }
}
