//! Error types for the Monte Carlo engines.
//!
//! [`ConfigurationError`] is raised only by the engine builders' `build()`.
//! [`PricingEngineError`] covers everything that can fail once an engine
//! exists: market data that cannot be evaluated, products the engine does not
//! price, and time grids that leave nothing to simulate.
//!
//! Reaching the sample cap in tolerance mode is not an error; it is reported
//! through [`ConvergenceStatus`](super::ConvergenceStatus).

use pricer_core::market_data::MarketDataError;
use pricer_core::types::Date;
use pricer_models::processes::ProcessError;
use thiserror::Error;

/// Invalid combination of engine builder options.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Both a fixed sample count and a tolerance were given.
    #[error("Sample count and absolute tolerance are mutually exclusive")]
    SamplesAndTolerance,

    /// Neither a sample count nor a tolerance was given.
    #[error("Either a sample count or an absolute tolerance is required")]
    NoStoppingCriterion,

    /// Tolerance requested from a policy without error estimates.
    #[error("Absolute tolerance is not supported by the {policy} random policy")]
    ToleranceWithoutErrorEstimate {
        /// Policy name
        policy: &'static str,
    },

    /// Tolerance not strictly positive.
    #[error("Absolute tolerance must be positive and finite, got {tolerance}")]
    InvalidTolerance {
        /// Offending tolerance
        tolerance: f64,
    },

    /// Zero required samples.
    #[error("Sample count must be positive")]
    ZeroSamples,

    /// Zero sample cap.
    #[error("Maximum sample count must be positive")]
    ZeroMaxSamples,

    /// Both time steps and steps per year were given.
    #[error("Time steps and time steps per year are mutually exclusive")]
    StepsAndStepsPerYear,

    /// Neither time steps nor steps per year were given.
    #[error("Either time steps or time steps per year is required")]
    NoSteps,

    /// Zero time steps.
    #[error("Time steps must be positive")]
    ZeroSteps,

    /// Parallel workers combined with tolerance mode.
    #[error("Parallel workers require a fixed sample count")]
    ParallelWithTolerance,

    /// Zero parallel workers.
    #[error("Parallel worker count must be positive")]
    ZeroWorkers,

    /// Time-varying parameters with an evaluation date off the curve
    /// reference date.
    #[error("Evaluation date {evaluation_date} differs from the curve reference date {reference_date}; time-varying parameters are measured from the reference date")]
    EvaluationDateWithTimeVarying {
        /// Requested evaluation date
        evaluation_date: Date,
        /// Risk-free curve reference date
        reference_date: Date,
    },
}

/// Failure while pricing with a Monte Carlo engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingEngineError {
    /// A process input could not be evaluated.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// A discount factor or time could not be evaluated.
    #[error("Evaluation error: {0}")]
    MarketData(#[from] MarketDataError),

    /// The process has no usable initial value.
    #[error("Evaluation error: initial value {value} is not finite")]
    NonFiniteInitialValue {
        /// Value returned by the process
        value: f64,
    },

    /// Payoff other than plain vanilla.
    #[error("Invalid payoff: expected plain vanilla, got {payoff}")]
    InvalidPayoff {
        /// Payoff variant name
        payoff: &'static str,
    },

    /// Exercise other than European.
    #[error("Invalid exercise: expected European, got {exercise}")]
    InvalidExercise {
        /// Exercise variant name
        exercise: &'static str,
    },

    /// Empty path or unusable time grid.
    #[error("Invalid path: {reason}")]
    InvalidPath {
        /// What was wrong
        reason: String,
    },

    /// Builder options rejected.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl PricingEngineError {
    pub(crate) fn invalid_path(reason: impl Into<String>) -> Self {
        PricingEngineError::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Whether this error came from market data evaluation.
    pub fn is_evaluation(&self) -> bool {
        matches!(
            self,
            PricingEngineError::Process(_)
                | PricingEngineError::MarketData(_)
                | PricingEngineError::NonFiniteInitialValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::ToleranceWithoutErrorEstimate {
            policy: "low-discrepancy",
        };
        assert!(err.to_string().contains("low-discrepancy"));
    }

    #[test]
    fn test_conversion_and_classification() {
        let err: PricingEngineError = ConfigurationError::ZeroSamples.into();
        assert!(matches!(err, PricingEngineError::Configuration(_)));
        assert!(!err.is_evaluation());

        let err: PricingEngineError = MarketDataError::MissingQuote.into();
        assert!(err.is_evaluation());
        assert!(err.to_string().starts_with("Evaluation error"));
    }
}
