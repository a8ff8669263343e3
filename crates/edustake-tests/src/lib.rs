//! Cross-crate test suite for EduStake.
//!
//! Integration tests drive the payout engine only through the public
//! `PayoutCalculator` trait and the engine's scenario and settlement API.

pub mod helpers;
