//! # edustake-core
//! Foundation types and traits for EduStake learning-plan payouts.

pub mod amount;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
