//! EDU amount parsing and display helpers.
//!
//! Amounts travel through the engine as integer base units. Parsing is exact:
//! `"0.1"` becomes `10_000_000` units, never a float approximation.

use crate::constants::{BPS_PRECISION, EDU, EDU_DECIMALS, MULTIPLIER_PRECISION};
use crate::error::AmountError;

/// Parse a decimal EDU string (e.g. `"12.5"`) into base units.
///
/// # Examples
///
/// ```
/// use edustake_core::amount::parse_edu;
/// use edustake_core::constants::EDU;
/// assert_eq!(parse_edu("100").unwrap(), 100 * EDU);
/// assert_eq!(parse_edu("0.001").unwrap(), 100_000);
/// ```
pub fn parse_edu(s: &str) -> Result<u64, AmountError> {
    let s = s.trim();
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(AmountError::Empty);
    }
    if let Some(c) = whole.chars().chain(frac.chars()).find(|c| !c.is_ascii_digit()) {
        return Err(AmountError::InvalidCharacter(c));
    }
    if frac.len() > EDU_DECIMALS as usize {
        return Err(AmountError::TooPrecise(frac.len()));
    }

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .map_err(|_| AmountError::Overflow)?
            .checked_mul(EDU)
            .ok_or(AmountError::Overflow)?
    };

    let frac_units = if frac.is_empty() {
        0
    } else {
        let digits: u64 = frac.parse().map_err(|_| AmountError::Overflow)?;
        digits * 10u64.pow(EDU_DECIMALS - frac.len() as u32)
    };

    whole_units.checked_add(frac_units).ok_or(AmountError::Overflow)
}

/// Render base units as an EDU string with all 8 decimals.
pub fn format_edu(units: u64) -> String {
    format!("{}.{:08}", units / EDU, units % EDU)
}

/// Signed variant of [`format_edu`], used for profit and loss.
pub fn format_edu_signed(units: i64) -> String {
    let sign = if units < 0 { "-" } else { "" };
    format!("{sign}{}", format_edu(units.unsigned_abs()))
}

/// Render basis points as a percentage, e.g. `-25` as `"-0.25%"`.
pub fn format_bps(bps: i64) -> String {
    let sign = if bps < 0 { "-" } else { "" };
    let abs = bps.unsigned_abs();
    let per_pct = BPS_PRECISION / 100;
    format!("{sign}{}.{:02}%", abs / per_pct, abs % per_pct)
}

/// Render a ppm multiplier, e.g. `1_050_000` as `"1.050x"`.
pub fn format_ppm(ppm: u64) -> String {
    let milli = MULTIPLIER_PRECISION / 1_000;
    format!("{}.{:03}x", ppm / MULTIPLIER_PRECISION, (ppm % MULTIPLIER_PRECISION) / milli)
}
