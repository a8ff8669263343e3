//! Settlement of a finished learning plan against its commitment.
//!
//! A plan is won when it finished within the committed timeline and reached
//! the minimum completion quality. The quality bonus is earned at completion,
//! so a won plan is re-quoted with the completion's quality score. A lost
//! plan forfeits the stake.
//!
//! The break-even path returns exactly the stake with the fee waived. It
//! exists for demos and manual testing and is off unless the engine config
//! sets `dev_break_even`.

use edustake_core::constants::{MAX_QUALITY_SCORE, MULTIPLIER_PRECISION};
use edustake_core::error::PayoutError;
use edustake_core::traits::PayoutCalculator;
use edustake_core::types::{Completion, PayoutMode, Settlement, SettlementOutcome, StakeInput};
use tracing::{debug, warn};

use crate::engine::PayoutEngine;

impl PayoutEngine {
    pub fn settle(
        &self,
        input: &StakeInput,
        mode: PayoutMode,
        completion: &Completion,
    ) -> Result<Settlement, PayoutError> {
        // Validates the commitment itself.
        self.calculate_payout(input, mode)?;

        if completion.actual_time == 0 {
            return Err(PayoutError::InvalidCompletion("actual time must be > 0".into()));
        }
        if completion.quality_score > MAX_QUALITY_SCORE {
            return Err(PayoutError::InvalidQualityScore(completion.quality_score));
        }

        let met_time = completion.actual_time <= input.timeline;
        let met_quality = completion.quality_score >= self.config().min_completion_quality;

        if completion.break_even_requested {
            if self.config().dev_break_even {
                warn!(stake = input.stake, "break-even override: returning stake, fee waived");
                return Ok(Settlement {
                    outcome: SettlementOutcome::BreakEven,
                    met_time,
                    met_quality,
                    multiplier_ppm: MULTIPLIER_PRECISION,
                    platform_fee: 0,
                    payout: input.stake,
                    profit: 0,
                });
            }
            warn!("break-even requested but dev_break_even is off; settling normally");
        }

        let settlement = if met_time && met_quality {
            let earned = self.calculate_payout(
                &input.clone().with_quality(completion.quality_score),
                mode,
            )?;
            Settlement {
                outcome: SettlementOutcome::Won,
                met_time,
                met_quality,
                multiplier_ppm: earned.multiplier_ppm,
                platform_fee: earned.platform_fee,
                payout: earned.final_payout,
                profit: earned.profit(),
            }
        } else {
            Settlement {
                outcome: SettlementOutcome::Lost,
                met_time,
                met_quality,
                multiplier_ppm: 0,
                platform_fee: 0,
                payout: 0,
                profit: -(input.stake as i64),
            }
        };

        debug!(
            outcome = %settlement.outcome,
            met_time,
            met_quality,
            payout = settlement.payout,
            "plan settled"
        );
        Ok(settlement)
    }
}
