//! Process construction errors.

use pricer_core::market_data::MarketDataError;
use thiserror::Error;

/// Errors raised while building a process from market data.
///
/// # Examples
/// ```
/// use pricer_core::market_data::MarketDataError;
/// use pricer_models::processes::ProcessError;
///
/// let err = ProcessError::Evaluation {
///     input: "spot",
///     source: MarketDataError::MissingQuote,
/// };
/// assert_eq!(err.to_string(), "Evaluation error: cannot evaluate spot: Missing quote value");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    /// A market input could not be evaluated at the valuation date.
    #[error("Evaluation error: cannot evaluate {input}: {source}")]
    Evaluation {
        /// Which input failed (spot, risk-free rate, ...)
        input: &'static str,
        /// Underlying market data failure
        #[source]
        source: MarketDataError,
    },

    /// A market input evaluated to a value the dynamics cannot use.
    #[error("Evaluation error: {input} is {value}")]
    NonFinite {
        /// Which input was rejected
        input: &'static str,
        /// The offending value
        value: f64,
    },
}

impl ProcessError {
    pub(crate) fn evaluation(input: &'static str) -> impl FnOnce(MarketDataError) -> Self {
        move |source| ProcessError::Evaluation { input, source }
    }
}
