//! Engine configuration loading for the CLI.
//!
//! Layers, lowest precedence first: built-in defaults, a TOML file, then
//! `EDUSTAKE__*` environment variables (`EDUSTAKE__PLATFORM_FEE_BPS=250`,
//! `EDUSTAKE__RISK__HIGH_FROM_BPS=2500`). The file is the `--config` path
//! when given, otherwise `<config dir>/edustake/config.toml` if it exists.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use edustake_payout::{PayoutConfig, PayoutEngine};
use tracing::{debug, info};

const ENV_PREFIX: &str = "EDUSTAKE";

/// Default config file location, e.g. `~/.config/edustake/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("edustake").join("config.toml"))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

/// Resolve the config file, load every layer and build a validated engine.
pub fn load_engine(explicit: Option<&Path>) -> Result<PayoutEngine> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path().filter(|p| p.is_file()),
    };
    match &path {
        Some(p) => info!(path = %p.display(), "loading payout config"),
        None => debug!("no config file; using built-in payout config"),
    }

    let config = load_config(path.as_deref(), environment())?;
    PayoutEngine::with_config(config).context("invalid payout configuration")
}

/// Merge an optional TOML file and an environment source over the defaults.
pub fn load_config(path: Option<&Path>, env: Environment) -> Result<PayoutConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }
    let layered = builder
        .add_source(env)
        .build()
        .with_context(|| match path {
            Some(p) => format!("failed to read config file: {}", p.display()),
            None => "failed to read config from environment".to_string(),
        })?;

    layered
        .try_deserialize::<PayoutConfig>()
        .context("failed to parse payout config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    /// Environment source backed by a fixed map instead of the process env.
    fn env_from(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn no_sources_gives_defaults() {
        let cfg = load_config(None, env_from(&[])).unwrap();
        assert_eq!(cfg, PayoutConfig::default());
    }

    #[test]
    fn file_overrides_scalars() {
        let file = write_toml(
            r#"
platform_fee_bps = 300
quality_bonus_threshold = 90
dev_break_even = true
"#,
        );
        let cfg = load_config(Some(file.path()), env_from(&[])).unwrap();
        assert_eq!(cfg.platform_fee_bps, 300);
        assert_eq!(cfg.quality_bonus_threshold, 90);
        assert!(cfg.dev_break_even);
        assert_eq!(cfg.tiers, PayoutConfig::default().tiers);
    }

    #[test]
    fn file_replaces_tier_table() {
        let file = write_toml(
            r#"
[[tiers]]
from_bps = 2000
base_ppm = 2500000

[[tiers]]
base_ppm = 1000000
anchor_bps = 0
slope_ppm_per_bps = 500
"#,
        );
        let cfg = load_config(Some(file.path()), env_from(&[])).unwrap();
        assert_eq!(cfg.tiers.tiers().len(), 2);
        assert_eq!(cfg.tiers.tiers()[0].from_bps, Some(2_000));
        assert_eq!(cfg.tiers.tiers()[1].from_bps, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn environment_wins_over_file() {
        let file = write_toml("platform_fee_bps = 300\n");
        let env = env_from(&[
            ("EDUSTAKE__PLATFORM_FEE_BPS", "250"),
            ("EDUSTAKE__RISK__HIGH_FROM_BPS", "2500"),
        ]);
        let cfg = load_config(Some(file.path()), env).unwrap();
        assert_eq!(cfg.platform_fee_bps, 250);
        assert_eq!(cfg.risk.high_from_bps, 2_500);
        assert_eq!(cfg.risk.extreme_from_bps, 5_000);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), env_from(&[])).is_err());
    }

    #[test]
    fn invalid_values_rejected_by_engine() {
        let file = write_toml("min_multiplier_ppm = 500000\n");
        let cfg = load_config(Some(file.path()), env_from(&[])).unwrap();
        assert!(PayoutEngine::with_config(cfg).is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let file = write_toml("platform_fee_bps = [\n");
        assert!(load_config(Some(file.path()), env_from(&[])).is_err());
    }
}
