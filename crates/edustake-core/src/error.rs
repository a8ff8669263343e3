//! Error types for EduStake payouts.
use thiserror::Error;

/// Input rejected before any arithmetic. No partial result is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayoutError {
    #[error("invalid stake: {0} units (must be > 0 and <= MAX_STAKE)")] InvalidStake(u64),
    #[error("invalid timeline: {0}")] InvalidTimeline(String),
    #[error("{field} out of range: {value:?} (expected 1..=10)")] InvalidDifficultyRange { field: &'static str, value: Option<u8> },
    #[error("invalid quality score: {0} (expected 0..=100)")] InvalidQualityScore(u8),
    #[error("invalid completion: {0}")] InvalidCompletion(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid payout config: {0}")] Invalid(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")] Empty,
    #[error("invalid character in amount: {0}")] InvalidCharacter(char),
    #[error("too many decimal places: {0} > 8")] TooPrecise(usize),
    #[error("amount overflow")] Overflow,
}

#[derive(Error, Debug)]
pub enum EduStakeError {
    #[error(transparent)] Payout(#[from] PayoutError),
    #[error(transparent)] Config(#[from] ConfigError),
    #[error(transparent)] Amount(#[from] AmountError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        assert_eq!(
            PayoutError::InvalidStake(0).to_string(),
            "invalid stake: 0 units (must be > 0 and <= MAX_STAKE)"
        );
        let err = PayoutError::InvalidDifficultyRange { field: "content_difficulty", value: Some(11) };
        assert_eq!(err.to_string(), "content_difficulty out of range: Some(11) (expected 1..=10)");
    }

    #[test]
    fn umbrella_converts_from_parts() {
        let err: EduStakeError = PayoutError::InvalidQualityScore(101).into();
        assert!(matches!(err, EduStakeError::Payout(PayoutError::InvalidQualityScore(101))));
        let err: EduStakeError = ConfigError::Invalid("empty tier table".into()).into();
        assert_eq!(err.to_string(), "invalid payout config: empty tier table");
    }
}
