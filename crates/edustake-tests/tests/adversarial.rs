//! Adversarial property-based suite for the payout engine.
//!
//! Attack vectors tested:
//! - Arbitrary, out-of-range inputs must error, never panic
//! - Multiplier floor and cap under extreme signals
//! - Risk level monotonicity across the signal range
//! - Settlement cannot pay out on a missed commitment
//! - Scenario ordering across random baselines

use proptest::prelude::*;
use edustake_core::constants::*;
use edustake_core::error::PayoutError;
use edustake_core::traits::PayoutCalculator;
use edustake_core::types::*;
use edustake_payout::PayoutEngine;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_mode() -> impl Strategy<Value = PayoutMode> {
    prop_oneof![Just(PayoutMode::TimeBased), Just(PayoutMode::DifficultyBased)]
}

/// Any input at all, including zero and out-of-range fields.
fn arb_raw_input() -> impl Strategy<Value = StakeInput> {
    (
        any::<u64>(),
        any::<u64>(),
        proptest::option::of(any::<u64>()),
        proptest::option::of(any::<u8>()),
        proptest::option::of(any::<u8>()),
        any::<u8>(),
    )
        .prop_map(|(stake, timeline, baseline, content, skill, quality)| StakeInput {
            stake,
            timeline,
            baseline_estimate: baseline,
            content_difficulty: content,
            user_skill_level: skill,
            quality_score: quality,
        })
}

fn arb_difficulty_input() -> impl Strategy<Value = StakeInput> {
    (1u64..=MAX_STAKE, 1u64..1_000, 1u8..=10, 1u8..=10, 0u8..=100).prop_map(
        |(stake, timeline, content, skill, q)| {
            StakeInput::difficulty_based(stake, timeline, content, skill).with_quality(q)
        },
    )
}

// ---------------------------------------------------------------------------
// Arbitrary input never panics
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn fuzz_raw_inputs(input in arb_raw_input(), mode in arb_mode()) {
        let engine = PayoutEngine::new();
        match engine.calculate_payout(&input, mode) {
            Ok(r) => {
                prop_assert!(input.stake > 0 && input.stake <= MAX_STAKE);
                prop_assert!(input.quality_score <= MAX_QUALITY_SCORE);
                prop_assert!(r.multiplier_ppm >= MIN_MULTIPLIER_PPM);
                prop_assert!(r.multiplier_ppm <= MAX_MULTIPLIER_PPM);
                prop_assert_eq!(r.final_payout, r.gross_payout - r.platform_fee);
            }
            Err(PayoutError::InvalidStake(s)) => {
                prop_assert!(s == 0 || s > MAX_STAKE);
            }
            Err(_) => {}
        }
    }

    #[test]
    fn fuzz_raw_scenarios(input in arb_raw_input(), mode in arb_mode()) {
        let engine = PayoutEngine::new();
        let quoted = engine.calculate_payout(&input, mode);
        let scenarios = engine.simulate_scenarios(&input, mode);
        prop_assert_eq!(quoted.is_ok(), scenarios.is_ok());
        if let Ok(s) = scenarios {
            prop_assert_eq!(s.len(), 4);
        }
    }
}

// ---------------------------------------------------------------------------
// Multiplier and risk over the signal range
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn multiplier_clamped_for_any_signal(signal in any::<i64>()) {
        let m = PayoutEngine::new().multiplier_ppm(signal);
        prop_assert!((MIN_MULTIPLIER_PPM..=MAX_MULTIPLIER_PPM).contains(&m));
    }

    #[test]
    fn risk_never_decreases_with_signal(a in -20_000i64..20_000, b in -20_000i64..20_000) {
        let engine = PayoutEngine::new();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let r_lo = engine.classify_risk(lo);
        let r_hi = engine.classify_risk(hi);
        prop_assert!(r_lo.level <= r_hi.level);
        prop_assert!(r_lo.success_probability_bps >= r_hi.success_probability_bps);
        prop_assert!(r_lo.spread_bps <= r_hi.spread_bps);
    }

    #[test]
    fn difficulty_mode_bounded_and_ordered(input in arb_difficulty_input()) {
        let r = PayoutEngine::new()
            .calculate_payout(&input, PayoutMode::DifficultyBased)
            .unwrap();
        let gap = input.difficulty_gap().unwrap() as i64;
        prop_assert_eq!(r.signal_bps, gap * DIFFICULTY_STEP_BPS);
        prop_assert!(r.multiplier_ppm >= MIN_MULTIPLIER_PPM);
        prop_assert!(r.multiplier_ppm <= MAX_MULTIPLIER_PPM);
        let w = r.potential_winnings;
        prop_assert!(w.conservative <= w.expected && w.expected <= w.optimistic);
    }

    #[test]
    fn roi_sign_matches_profit(
        stake in 1u64..=MAX_STAKE,
        timeline in 1u64..5_000,
        baseline in 1u64..5_000,
        quality in 0u8..=100,
    ) {
        let input = StakeInput::time_based(stake, timeline, baseline).with_quality(quality);
        let r = PayoutEngine::new().calculate_payout(&input, PayoutMode::TimeBased).unwrap();
        if r.roi_bps > 0 {
            prop_assert!(r.profit() > 0);
        }
        if r.profit() < 0 {
            prop_assert!(r.roi_bps <= 0);
        }
    }
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn missed_commitment_pays_nothing(
        stake in 1u64..=MAX_STAKE,
        timeline in 1u64..1_000,
        baseline in 1u64..1_000,
        overrun in 1u64..1_000,
        quality in 0u8..=100,
    ) {
        let engine = PayoutEngine::new();
        let input = StakeInput::time_based(stake, timeline, baseline);
        let completion = Completion {
            actual_time: timeline + overrun,
            quality_score: quality,
            break_even_requested: true,
        };
        let s = engine.settle(&input, PayoutMode::TimeBased, &completion).unwrap();
        prop_assert_eq!(s.outcome, SettlementOutcome::Lost);
        prop_assert_eq!(s.payout, 0);
        prop_assert_eq!(s.profit, -(stake as i64));
    }

    #[test]
    fn won_commitment_pays_at_least_the_quote(
        stake in 1u64..=MAX_STAKE,
        timeline in 1u64..1_000,
        baseline in 1u64..1_000,
        early in 0u64..1_000,
        quality in 60u8..=100,
    ) {
        let engine = PayoutEngine::new();
        let input = StakeInput::time_based(stake, timeline, baseline);
        let quoted = engine.calculate_payout(&input, PayoutMode::TimeBased).unwrap();
        let completion = Completion {
            actual_time: timeline.saturating_sub(early).max(1),
            quality_score: quality,
            break_even_requested: false,
        };
        let s = engine.settle(&input, PayoutMode::TimeBased, &completion).unwrap();
        prop_assert_eq!(s.outcome, SettlementOutcome::Won);
        prop_assert!(s.payout >= quoted.final_payout);
        prop_assert_eq!(s.multiplier_ppm, quoted.multiplier_ppm);
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn time_scenarios_never_pay_less_when_more_aggressive(
        stake in 1u64..=MAX_STAKE,
        timeline in 1u64..10_000,
        baseline in 1u64..10_000,
    ) {
        let input = StakeInput::time_based(stake, timeline, baseline);
        let scenarios = PayoutEngine::new()
            .simulate_scenarios(&input, PayoutMode::TimeBased)
            .unwrap();
        for pair in scenarios.windows(2) {
            prop_assert!(pair[0].input.timeline >= pair[1].input.timeline);
            prop_assert!(pair[0].result.multiplier_ppm <= pair[1].result.multiplier_ppm);
            prop_assert!(pair[0].result.risk.level <= pair[1].result.risk.level);
        }
    }
}
