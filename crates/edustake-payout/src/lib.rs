//! # edustake-payout: Stake multiplier engine for gamified learning plans.
//!
//! All calculations use integer fixed-point arithmetic for determinism.
//!
//! - **Tiered multiplier**: a piecewise-linear [`TierTable`] maps the
//!   performance signal (time reduction or difficulty gap, in bps) to a payout
//!   multiplier, floored at 1.0x and capped at 3.0x by default.
//! - **Risk classification**: the same signal selects a [`RiskTable`] bucket
//!   carrying a success probability and an outcome spread.
//! - **Outcome band**: conservative / expected / optimistic payouts around the
//!   fee-adjusted final payout.
//! - **Scenarios and settlement**: preset what-if comparisons and the
//!   won/lost decision once a plan completes.

pub mod config;
pub mod distribution;
pub mod engine;
pub mod risk;
pub mod scenario;
pub mod settlement;
pub mod tiers;

pub use config::PayoutConfig;
pub use distribution::outcome_band;
pub use engine::{time_reduction_bps, PayoutEngine};
pub use risk::{RiskProfile, RiskTable};
pub use tiers::{Tier, TierTable};
