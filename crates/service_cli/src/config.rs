//! `mcprice` configuration management
//!
//! Values are layered: built-in defaults, then the TOML file, then
//! `MCPRICE_*` environment variables, then command-line flags. The result is
//! checked once by [`McPriceConfig::validate`], which reports every problem
//! found rather than the first.

use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use pricer_core::types::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file read when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG_FILE: &str = "mcprice.toml";

/// Draws used when neither a sample count nor a tolerance is configured.
pub const DEFAULT_SAMPLES: usize = 100_000;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Log levels accepted by `log_level` and `MCPRICE_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Random number policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    #[default]
    PseudoRandom,
    LowDiscrepancy,
}

/// Flat market inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Spot price
    pub spot: f64,
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Continuous dividend yield
    pub dividend: f64,
    /// Black volatility
    pub vol: f64,
    /// Valuation date (YYYY-MM-DD), today when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation_date: Option<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.05,
            dividend: 0.0,
            vol: 0.2,
            valuation_date: None,
        }
    }
}

impl MarketConfig {
    /// Parsed valuation date.
    pub fn valuation_date(&self) -> Result<Date, ConfigError> {
        match &self.valuation_date {
            Some(s) => Date::parse(s)
                .map_err(|e| ConfigError::Invalid(vec![format!("valuation_date: {e}")])),
            None => Ok(Date::today()),
        }
    }
}

/// Monte Carlo settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    /// Fixed number of draws
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,
    /// Target standard error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    /// Draw cap in tolerance mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_samples: Option<usize>,
    /// Generator seed, 0 for an entropy seed
    pub seed: u64,
    /// Antithetic pairing
    pub antithetic: bool,
    /// Brownian bridge, engine default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brownian_bridge: Option<bool>,
    /// Read market data along the path instead of freezing it
    pub time_varying: bool,
    /// Time steps for European options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    /// Rayon workers for fixed-sample runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// Random number policy
    pub policy: Policy,
}

impl SimulationSettings {
    /// Sample count handed to the engine, defaulting when no stopping rule
    /// is configured.
    pub fn effective_samples(&self) -> Option<usize> {
        match (self.samples, self.tolerance) {
            (None, None) => Some(DEFAULT_SAMPLES),
            (samples, _) => samples,
        }
    }

    /// European time steps, one by default.
    pub fn effective_steps(&self) -> usize {
        self.steps.unwrap_or(1)
    }

    /// Switch to a fixed sample count.
    pub fn set_samples(&mut self, samples: usize) {
        self.samples = Some(samples);
        self.tolerance = None;
    }

    /// Switch to a tolerance target.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = Some(tolerance);
        self.samples = None;
    }
}

/// Complete `mcprice` configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct McPriceConfig {
    /// Log level, overridden by `--verbose` and `RUST_LOG`
    pub log_level: LogLevel,
    /// Market inputs
    pub market: MarketConfig,
    /// Monte Carlo settings
    pub simulation: SimulationSettings,
}

impl McPriceConfig {
    /// Load defaults, the config file and environment overrides.
    ///
    /// An explicit `path` must exist; without one, [`DEFAULT_CONFIG_FILE`]
    /// is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `MCPRICE_SEED`, `MCPRICE_SAMPLES` and `MCPRICE_LOG_LEVEL`
    /// looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("MCPRICE_SEED") {
            self.simulation.seed = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("MCPRICE_SEED={seed}")))?;
        }

        if let Some(samples) = lookup("MCPRICE_SAMPLES") {
            let samples = samples
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("MCPRICE_SAMPLES={samples}")))?;
            self.simulation.set_samples(samples);
        }

        if let Some(level) = lookup("MCPRICE_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }

        Ok(())
    }

    /// Validate the configuration, reporting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        let market = &self.market;
        let simulation = &self.simulation;

        if !(market.spot.is_finite() && market.spot > 0.0) {
            problems.push(format!("spot must be positive, got {}", market.spot));
        }
        if !(market.vol.is_finite() && market.vol > 0.0) {
            problems.push(format!("vol must be positive, got {}", market.vol));
        }
        if !market.rate.is_finite() {
            problems.push(format!("rate must be finite, got {}", market.rate));
        }
        if !market.dividend.is_finite() {
            problems.push(format!("dividend must be finite, got {}", market.dividend));
        }
        if let Err(ConfigError::Invalid(mut date_problems)) = market.valuation_date() {
            problems.append(&mut date_problems);
        }

        if simulation.samples.is_some() && simulation.tolerance.is_some() {
            problems.push("set either samples or tolerance, not both".to_string());
        }
        if simulation.samples == Some(0) {
            problems.push("samples must be positive".to_string());
        }
        if let Some(tolerance) = simulation.tolerance {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                problems.push(format!("tolerance must be positive, got {tolerance}"));
            }
            if simulation.policy == Policy::LowDiscrepancy {
                problems.push("tolerance needs the pseudo-random policy".to_string());
            }
            if simulation.workers.is_some() {
                problems.push("workers apply to fixed-sample runs only".to_string());
            }
        }
        if simulation.steps == Some(0) {
            problems.push("steps must be positive".to_string());
        }
        if simulation.workers == Some(0) {
            problems.push("workers must be positive".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = McPriceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.simulation.effective_samples(), Some(DEFAULT_SAMPLES));
        assert_eq!(config.simulation.effective_steps(), 1);
    }

    #[test]
    fn test_parse_toml() {
        let config = McPriceConfig::from_toml_str(
            r#"
            log_level = "debug"

            [market]
            spot = 95.0
            valuation_date = "2026-01-02"

            [simulation]
            tolerance = 0.02
            max_samples = 500000
            seed = 42
            policy = "pseudo-random"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.market.spot, 95.0);
        assert_eq!(config.market.rate, 0.05);
        assert_eq!(
            config.market.valuation_date().unwrap(),
            Date::from_ymd(2026, 1, 2).unwrap()
        );
        assert_eq!(config.simulation.tolerance, Some(0.02));
        assert_eq!(config.simulation.effective_samples(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = McPriceConfig::from_toml_str("[market]\nspto = 1.0\n");
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("MCPRICE_SEED", "7"),
            ("MCPRICE_SAMPLES", "2500"),
            ("MCPRICE_LOG_LEVEL", "INFO"),
        ]
        .into_iter()
        .collect();

        let mut config = McPriceConfig::default();
        config.simulation.set_tolerance(0.1);
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.samples, Some(2500));
        assert_eq!(config.simulation.tolerance, None);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_bad_env_value() {
        let mut config = McPriceConfig::default();
        let result = config.apply_env(|key| (key == "MCPRICE_SEED").then(|| "abc".to_string()));
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let mut config = McPriceConfig::default();
        config.market.spot = -1.0;
        config.market.vol = 0.0;
        config.market.valuation_date = Some("2026-13-01".to_string());
        config.simulation.samples = Some(10);
        config.simulation.tolerance = Some(0.1);
        config.simulation.policy = Policy::LowDiscrepancy;

        match config.validate() {
            Err(ConfigError::Invalid(problems)) => assert_eq!(problems.len(), 5),
            other => panic!("expected invalid configuration, got {other:?}"),
        }
    }
}
