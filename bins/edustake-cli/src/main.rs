//! edustake: command-line front end for the EduStake payout engine.
//!
//! Quotes a stake commitment, compares preset scenarios, settles a finished
//! plan and prints the active tier table. Amounts are given in EDU with up
//! to 8 decimals; `--json` switches every command to pretty JSON output.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use edustake_core::amount::{format_bps, format_edu, format_edu_signed, format_ppm, parse_edu};
use edustake_core::constants::MULTIPLIER_PRECISION;
use edustake_core::traits::PayoutCalculator;
use edustake_core::types::{Completion, PayoutMode, PayoutResult, RiskLevel, StakeInput};
use edustake_payout::{PayoutEngine, RiskTable, TierTable};
use serde::Serialize;
use tracing::debug;

/// EduStake payout calculator.
#[derive(Parser, Debug)]
#[command(name = "edustake")]
#[command(version, about = "Stake on your learning plan and see what it pays.")]
struct Cli {
    /// Payout config file (TOML). Defaults to <config dir>/edustake/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as pretty JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Quote the payout for a stake commitment.
    Quote(StakeArgs),
    /// Compare the baseline, moderate, ambitious and aggressive presets.
    Scenarios(StakeArgs),
    /// Settle a finished plan against its commitment.
    Settle(SettleArgs),
    /// Print the active multiplier tiers and risk buckets.
    Tiers,
}

#[derive(Args, Debug)]
struct StakeArgs {
    /// Stake in EDU, e.g. 100 or 12.5.
    #[arg(long)]
    stake: String,

    /// Committed timeline, in the same unit as the baseline.
    #[arg(long)]
    timeline: u64,

    /// Payout mode: "time" or "difficulty".
    #[arg(long, default_value = "time")]
    mode: PayoutMode,

    /// Baseline effort estimate (time mode).
    #[arg(long)]
    baseline: Option<u64>,

    /// Content difficulty, 1-10 (difficulty mode).
    #[arg(long)]
    content_difficulty: Option<u8>,

    /// Your skill level, 1-10 (difficulty mode).
    #[arg(long)]
    skill_level: Option<u8>,

    /// Expected learning-quality score, 0-100.
    #[arg(long, default_value_t = 0)]
    quality: u8,
}

impl StakeArgs {
    fn to_input(&self) -> Result<StakeInput> {
        let stake = parse_edu(&self.stake)
            .with_context(|| format!("invalid stake amount: {}", self.stake))?;
        Ok(StakeInput {
            stake,
            timeline: self.timeline,
            baseline_estimate: self.baseline,
            content_difficulty: self.content_difficulty,
            user_skill_level: self.skill_level,
            quality_score: self.quality,
        })
    }
}

#[derive(Args, Debug)]
struct SettleArgs {
    #[command(flatten)]
    stake: StakeArgs,

    /// Time actually taken to finish the plan.
    #[arg(long)]
    actual_time: u64,

    /// Learning-quality score achieved at completion, 0-100.
    #[arg(long)]
    completion_quality: u8,

    /// Request a break-even settlement. Ignored unless the config enables
    /// `dev_break_even`.
    #[arg(long)]
    break_even: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format)?;

    let engine = config::load_engine(cli.config.as_deref())?;
    debug!(config = ?engine.config(), "engine ready");

    match &cli.command {
        Commands::Quote(args) => cmd_quote(&engine, args, cli.json),
        Commands::Scenarios(args) => cmd_scenarios(&engine, args, cli.json),
        Commands::Settle(args) => cmd_settle(&engine, args, cli.json),
        Commands::Tiers => cmd_tiers(&engine, cli.json),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn cmd_quote(engine: &PayoutEngine, args: &StakeArgs, json: bool) -> Result<()> {
    let input = args.to_input()?;
    let result = engine
        .calculate_payout(&input, args.mode)
        .context("cannot quote this commitment")?;

    if json {
        return print_json(&result);
    }
    print_result(&result);
    Ok(())
}

fn print_result(r: &PayoutResult) {
    println!("Mode:            {}", r.mode);
    match r.time_reduction_bps() {
        Some(bps) => println!("Time reduction:  {}", format_bps(bps)),
        None => println!("Difficulty gap:  {}", format_bps(r.signal_bps)),
    }
    println!("Multiplier:      {}", format_ppm(r.multiplier_ppm));
    println!(
        "Risk:            {} ({}), success {}",
        r.risk.level,
        r.risk.description(),
        format_bps(r.risk.success_probability_bps as i64)
    );
    println!("Stake:           {} EDU", format_edu(r.stake));
    println!("Base payout:     {} EDU", format_edu(r.base_payout));
    for factor in r.risk.risk_factors() {
        println!("                 - {factor}");
    }
    if r.quality_bonus_ppm > MULTIPLIER_PRECISION {
        println!("Quality bonus:   {}", format_ppm(r.quality_bonus_ppm));
    }
    println!("Platform fee:    {} EDU", format_edu(r.platform_fee));
    println!("Final payout:    {} EDU", format_edu(r.final_payout));
    println!("Profit:          {} EDU", format_edu_signed(r.profit()));
    println!("ROI:             {}", format_bps(r.roi_bps));
    let w = &r.potential_winnings;
    println!(
        "Range:           {} / {} / {} EDU",
        format_edu(w.conservative),
        format_edu(w.expected),
        format_edu(w.optimistic)
    );
}

fn cmd_scenarios(engine: &PayoutEngine, args: &StakeArgs, json: bool) -> Result<()> {
    let input = args.to_input()?;
    let scenarios = engine
        .simulate_scenarios(&input, args.mode)
        .context("cannot simulate scenarios")?;

    if json {
        return print_json(&scenarios);
    }

    println!(
        "{:<11} {:>9} {:>10} {:<8} {:>18} {:>9}",
        "scenario", "commit", "multiplier", "risk", "payout (EDU)", "roi"
    );
    for s in &scenarios {
        let commit = match args.mode {
            PayoutMode::TimeBased => s.input.timeline.to_string(),
            PayoutMode::DifficultyBased => format!(
                "{}/{}",
                s.input.content_difficulty.unwrap_or_default(),
                s.input.user_skill_level.unwrap_or_default()
            ),
        };
        println!(
            "{:<11} {:>9} {:>10} {:<8} {:>18} {:>9}",
            s.name,
            commit,
            format_ppm(s.result.multiplier_ppm),
            s.result.risk.level,
            format_edu(s.result.final_payout),
            format_bps(s.result.roi_bps)
        );
    }
    Ok(())
}

fn cmd_settle(engine: &PayoutEngine, args: &SettleArgs, json: bool) -> Result<()> {
    let input = args.stake.to_input()?;
    let completion = Completion {
        actual_time: args.actual_time,
        quality_score: args.completion_quality,
        break_even_requested: args.break_even,
    };
    let settlement = engine
        .settle(&input, args.stake.mode, &completion)
        .context("cannot settle this plan")?;

    if json {
        return print_json(&settlement);
    }
    println!("Outcome:         {}", settlement.outcome);
    println!("Met timeline:    {}", settlement.met_time);
    println!("Met quality:     {}", settlement.met_quality);
    println!("Multiplier:      {}", format_ppm(settlement.multiplier_ppm));
    println!("Platform fee:    {} EDU", format_edu(settlement.platform_fee));
    println!("Payout:          {} EDU", format_edu(settlement.payout));
    println!("Profit:          {} EDU", format_edu_signed(settlement.profit));
    Ok(())
}

#[derive(Serialize)]
struct TierReport<'a> {
    tiers: &'a TierTable,
    min_multiplier_ppm: u64,
    max_multiplier_ppm: u64,
    difficulty_step_bps: i64,
    risk: &'a RiskTable,
}

fn cmd_tiers(engine: &PayoutEngine, json: bool) -> Result<()> {
    let cfg = engine.config();
    if json {
        return print_json(&TierReport {
            tiers: &cfg.tiers,
            min_multiplier_ppm: cfg.min_multiplier_ppm,
            max_multiplier_ppm: cfg.max_multiplier_ppm,
            difficulty_step_bps: cfg.difficulty_step_bps,
            risk: &cfg.risk,
        });
    }

    println!(
        "Multiplier range: {} to {}",
        format_ppm(cfg.min_multiplier_ppm),
        format_ppm(cfg.max_multiplier_ppm)
    );
    println!("Difficulty step:  {} per level", format_bps(cfg.difficulty_step_bps));
    println!();
    for row in tier_rows(engine) {
        println!("  {row}");
    }
    println!();
    for level in RiskLevel::ALL {
        let p = cfg.risk.profile(level);
        println!(
            "  {:<8} success {:>7}, spread {:>7}  {}",
            level,
            format_bps(p.success_probability_bps as i64),
            format_bps(p.spread_bps as i64),
            level.description()
        );
    }
    Ok(())
}

/// One line per tier, highest bound first. The unbounded bottom tier is
/// described by the bound of the tier above it and evaluated at its anchor.
fn tier_rows(engine: &PayoutEngine) -> Vec<String> {
    let tiers = engine.config().tiers.tiers();
    tiers
        .iter()
        .enumerate()
        .map(|(i, tier)| {
            let (range, at_bps) = match tier.from_bps {
                Some(bps) => (format!(">= {}", format_bps(bps)), bps),
                None => {
                    let above = i
                        .checked_sub(1)
                        .and_then(|j| tiers[j].from_bps)
                        .map(|bps| format!("< {}", format_bps(bps)))
                        .unwrap_or_else(|| "all".to_string());
                    (above, tier.anchor_bps)
                }
            };
            format!(
                "{:<10} {} at {}, {:+} ppm/bps",
                range,
                format_ppm(engine.multiplier_ppm(at_bps)),
                format_bps(at_bps),
                tier.slope_ppm_per_bps
            )
        })
        .collect()
}

/// Logs go to stderr; stdout carries only command output.
fn init_logging(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid --log-level: {level}"))?,
    };
    let json = format == "json";
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| fmt::layer().compact().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .context("failed to install log subscriber")
}
