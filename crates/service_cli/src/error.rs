//! CLI error types.

use pricer_core::types::DateError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_pricing::PricingEngineError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `mcprice`.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Engine construction or pricing failed
    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingEngineError),

    /// Product definition rejected
    #[error("Invalid product: {0}")]
    Instrument(#[from] InstrumentError),

    /// Closed-form cross-check rejected its inputs
    #[error("Analytic price unavailable: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Bad date
    #[error(transparent)]
    Date(#[from] DateError),

    /// JSON output failed
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML output failed
    #[error("Output error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
