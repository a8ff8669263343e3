//! Value types for payout calculation and settlement.
//!
//! All amounts are in base units (1 EDU = 10^8 units). Signals, ROI and
//! probabilities are basis points; multipliers are parts-per-million.
//! Every value here is built and discarded per call; nothing is stored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Which performance signal drives the multiplier.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PayoutMode {
    /// Signal is the committed time reduction against the baseline estimate.
    #[default]
    TimeBased,
    /// Signal is the gap between content difficulty and user skill.
    DifficultyBased,
}

impl PayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TimeBased => "time-based",
            Self::DifficultyBased => "difficulty-based",
        }
    }
}

impl fmt::Display for PayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "time-based" | "time" => Ok(Self::TimeBased),
            "difficulty-based" | "difficulty" => Ok(Self::DifficultyBased),
            other => Err(format!("unknown payout mode: {other}")),
        }
    }
}

/// A stake commitment on a learning plan.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakeInput {
    /// Staked amount in base units.
    pub stake: u64,
    /// Committed timeline, in the caller's time unit (minutes, weeks, ...).
    pub timeline: u64,
    /// Reference effort estimate in the same unit as `timeline`.
    /// Required in time-based mode.
    pub baseline_estimate: Option<u64>,
    /// Content difficulty, 1..=10. Required in difficulty-based mode.
    pub content_difficulty: Option<u8>,
    /// User skill level, 1..=10. Required in difficulty-based mode.
    pub user_skill_level: Option<u8>,
    /// Learning-quality score, 0..=100.
    #[serde(default)]
    pub quality_score: u8,
}

impl StakeInput {
    pub fn time_based(stake: u64, timeline: u64, baseline_estimate: u64) -> Self {
        Self {
            stake,
            timeline,
            baseline_estimate: Some(baseline_estimate),
            content_difficulty: None,
            user_skill_level: None,
            quality_score: 0,
        }
    }

    pub fn difficulty_based(
        stake: u64,
        timeline: u64,
        content_difficulty: u8,
        user_skill_level: u8,
    ) -> Self {
        Self {
            stake,
            timeline,
            baseline_estimate: None,
            content_difficulty: Some(content_difficulty),
            user_skill_level: Some(user_skill_level),
            quality_score: 0,
        }
    }

    pub fn with_quality(mut self, quality_score: u8) -> Self {
        self.quality_score = quality_score;
        self
    }

    /// `content_difficulty - user_skill_level`, when both are present and
    /// inside `MIN_DIFFICULTY..=MAX_DIFFICULTY`.
    pub fn difficulty_gap(&self) -> Option<i8> {
        let range = MIN_DIFFICULTY..=MAX_DIFFICULTY;
        match (self.content_difficulty, self.user_skill_level) {
            (Some(c), Some(s)) if range.contains(&c) && range.contains(&s) => {
                Some(c as i8 - s as i8)
            }
            _ => None,
        }
    }
}

/// Discrete bucket summarizing how aggressive a commitment is.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Extreme];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Extreme => "EXTREME",
        }
    }

    /// Static human-readable description shown next to the level.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Comfortable commitment close to the reference estimate.",
            Self::Medium => "Noticeably faster than the estimate; steady daily effort needed.",
            Self::High => "Aggressive commitment; little room for missed sessions.",
            Self::Extreme => "At most half the estimated effort; only for well-prepared learners.",
        }
    }

    /// Things that tend to sink a commitment at this level, most likely first.
    pub fn risk_factors(&self) -> &'static [&'static str] {
        match self {
            Self::Low => &[],
            Self::Medium => &["Little slack for sick days or schedule changes"],
            Self::High => &[
                "Missing a few sessions puts the timeline out of reach",
                "Rushing can push the quality score below the completion minimum",
            ],
            Self::Extreme => &[
                "Requires sustained effort well above the reference estimate",
                "Rushing can push the quality score below the completion minimum",
                "A single setback usually forfeits the stake",
            ],
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Output of the risk classifier.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Qualitative chance of completing the commitment, in bps.
    pub success_probability_bps: u64,
    /// Half-width of the outcome band around the final payout, in bps.
    pub spread_bps: u64,
}

impl RiskAssessment {
    pub fn description(&self) -> &'static str {
        self.level.description()
    }

    pub fn risk_factors(&self) -> &'static [&'static str] {
        self.level.risk_factors()
    }
}

/// Three-point outcome band around the final payout.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PotentialWinnings {
    pub conservative: u64,
    pub expected: u64,
    pub optimistic: u64,
}

/// Full breakdown of one payout calculation.
///
/// Invariants: `final_payout = gross_payout - platform_fee`,
/// `gross_payout = base_payout * quality_bonus`, and
/// `conservative <= expected <= optimistic`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PayoutResult {
    pub mode: PayoutMode,
    pub stake: u64,
    /// Performance signal in bps. In time-based mode this is the time
    /// reduction; in difficulty-based mode the scaled difficulty gap.
    pub signal_bps: i64,
    pub multiplier_ppm: u64,
    pub risk: RiskAssessment,
    pub base_payout: u64,
    pub quality_bonus_ppm: u64,
    pub gross_payout: u64,
    pub platform_fee: u64,
    pub final_payout: u64,
    pub roi_bps: i64,
    pub potential_winnings: PotentialWinnings,
}

impl PayoutResult {
    /// Time reduction in bps, only meaningful in time-based mode.
    pub fn time_reduction_bps(&self) -> Option<i64> {
        (self.mode == PayoutMode::TimeBased).then_some(self.signal_bps)
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk.level
    }

    /// `final_payout - stake`, signed.
    pub fn profit(&self) -> i64 {
        self.final_payout as i64 - self.stake as i64
    }
}

/// A named what-if evaluation of a commitment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub input: StakeInput,
    pub result: PayoutResult,
}

/// What actually happened when the learning plan finished.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Time taken, in the same unit as the committed timeline.
    pub actual_time: u64,
    /// Quality score measured at completion, 0..=100.
    pub quality_score: u8,
    /// Debug request to settle at exactly the stake. Only honoured when the
    /// engine runs with the break-even override enabled.
    #[serde(default)]
    pub break_even_requested: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SettlementOutcome {
    Won,
    Lost,
    BreakEven,
}

impl fmt::Display for SettlementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won => f.write_str("won"),
            Self::Lost => f.write_str("lost"),
            Self::BreakEven => f.write_str("break-even"),
        }
    }
}

/// Result of comparing a completion against its commitment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: SettlementOutcome,
    pub met_time: bool,
    pub met_quality: bool,
    pub multiplier_ppm: u64,
    pub platform_fee: u64,
    /// Amount returned to the user (0 when lost).
    pub payout: u64,
    /// `payout - stake`, signed.
    pub profit: i64,
}
