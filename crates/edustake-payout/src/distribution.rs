//! Outcome band around a final payout.
//!
//! `conservative = final * (1 - spread)`, `expected = final`,
//! `optimistic = final * (1 + spread)`. Presentation data only; no
//! distribution is fitted.

use edustake_core::constants::BPS_PRECISION;
use edustake_core::types::PotentialWinnings;

/// Spread `final_payout` by `spread_bps` either side.
///
/// `spread_bps` above 100 % is clamped so the conservative end stays at zero
/// rather than wrapping.
pub fn outcome_band(final_payout: u64, spread_bps: u64) -> PotentialWinnings {
    let spread = spread_bps.min(BPS_PRECISION) as u128;
    let p = BPS_PRECISION as u128;
    let f = final_payout as u128;
    PotentialWinnings {
        conservative: (f * (p - spread) / p) as u64,
        expected: final_payout,
        optimistic: (f * (p + spread) / p).min(u64::MAX as u128) as u64,
    }
}
