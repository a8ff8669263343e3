//! Trait interface between the core types and the payout engine.
//!
//! [`PayoutCalculator`] is implemented by `edustake-payout::PayoutEngine`.
//! Implementations must be pure: the same input always yields the same
//! result, with no shared mutable state, so one calculator can serve any
//! number of concurrent callers.

use crate::error::PayoutError;
use crate::types::{PayoutMode, PayoutResult, RiskAssessment, StakeInput};

/// Stake-to-payout calculation.
///
/// The pipeline is signal -> multiplier -> risk -> outcome band. Each stage is
/// exposed so callers can preview a single stage (e.g. a slider that only
/// moves the multiplier).
pub trait PayoutCalculator: Send + Sync {
    /// Performance signal in bps for `input` under `mode`.
    ///
    /// Fails fast on inputs the signal cannot be derived from (zero or
    /// missing baseline, difficulty outside 1..=10).
    fn signal_bps(&self, input: &StakeInput, mode: PayoutMode) -> Result<i64, PayoutError>;

    /// Tier multiplier in ppm, clamped to the configured floor and cap.
    fn multiplier_ppm(&self, signal_bps: i64) -> u64;

    /// Risk bucket, success probability and outcome spread for a signal.
    fn classify_risk(&self, signal_bps: i64) -> RiskAssessment;

    /// Full, validated payout breakdown. All-or-nothing.
    fn calculate_payout(
        &self,
        input: &StakeInput,
        mode: PayoutMode,
    ) -> Result<PayoutResult, PayoutError>;

    /// Net profit (may be negative) the commitment would earn if completed.
    ///
    /// Default implementation delegates to
    /// [`calculate_payout`](Self::calculate_payout).
    fn expected_profit(&self, input: &StakeInput, mode: PayoutMode) -> Result<i64, PayoutError> {
        Ok(self.calculate_payout(input, mode)?.profit())
    }
}
