//! Monte Carlo simulation configuration.
//!
//! [`McOptions`] is the immutable option record shared by the engine
//! builders: every `with_*` call returns a new record and nothing is checked
//! until [`McOptions::validate`], which the builders call from `build()`.
//! A validated record becomes a [`SimulationConfig`].

use pricer_core::types::Date;

use super::error::ConfigurationError;
use crate::rng::RandomPolicy;

/// Forwarding `with_*` setters for builders holding an `options: McOptions`
/// field and a private `with_options(self, McOptions) -> Self`.
macro_rules! impl_option_setters {
    () => {
        /// Brownian-bridge path construction.
        pub fn with_brownian_bridge(self, brownian_bridge: bool) -> Self {
            let options = self.options.clone().with_brownian_bridge(brownian_bridge);
            self.with_options(options)
        }

        /// Fixed number of draws.
        pub fn with_samples(self, samples: usize) -> Self {
            let options = self.options.clone().with_samples(samples);
            self.with_options(options)
        }

        /// Target standard error.
        pub fn with_absolute_tolerance(self, tolerance: f64) -> Self {
            let options = self.options.clone().with_absolute_tolerance(tolerance);
            self.with_options(options)
        }

        /// Draw cap for tolerance mode.
        pub fn with_max_samples(self, max_samples: usize) -> Self {
            let options = self.options.clone().with_max_samples(max_samples);
            self.with_options(options)
        }

        /// Generator seed; 0 asks for an entropy seed.
        pub fn with_seed(self, seed: u64) -> Self {
            let options = self.options.clone().with_seed(seed);
            self.with_options(options)
        }

        /// Antithetic pairing.
        pub fn with_antithetic_variate(self, antithetic: bool) -> Self {
            let options = self.options.clone().with_antithetic_variate(antithetic);
            self.with_options(options)
        }

        /// Freeze the process parameters at the evaluation date.
        pub fn with_constant_parameters(self, constant: bool) -> Self {
            let options = self.options.clone().with_constant_parameters(constant);
            self.with_options(options)
        }

        /// Date at which constant parameters are read.
        pub fn with_evaluation_date(self, date: pricer_core::types::Date) -> Self {
            let options = self.options.clone().with_evaluation_date(date);
            self.with_options(options)
        }

        /// Split fixed-sample runs across `workers` rayon tasks.
        pub fn with_parallel_workers(self, workers: usize) -> Self {
            let options = self.options.clone().with_parallel_workers(workers);
            self.with_options(options)
        }

        /// Current option record.
        pub fn options(&self) -> &McOptions {
            &self.options
        }
    };
}

/// When the sampling loop stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoppingRule {
    /// Exactly this many draws.
    Samples(usize),
    /// Until the standard error is at most `tolerance`, or `max_samples`
    /// draws have been taken.
    Tolerance {
        /// Target standard error
        tolerance: f64,
        /// Draw cap
        max_samples: usize,
    },
}

/// Validated settings consumed by [`McSimulation`](super::McSimulation).
///
/// A draw is one path, or one mirrored pair of paths with antithetic
/// variates; sample counts and caps are counted in draws.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Reorder Gaussian draws through a Brownian bridge
    pub brownian_bridge: bool,
    /// Pair every path with its mirrored twin
    pub antithetic_variate: bool,
    /// Generator seed; 0 picks an entropy seed per run
    pub seed: u64,
    /// Stopping rule
    pub stopping: StoppingRule,
    /// Worker count for parallel fixed-sample runs
    pub parallel_workers: Option<usize>,
}

impl SimulationConfig {
    /// Fixed-sample configuration with defaults for everything else.
    pub fn with_samples(samples: usize, seed: u64) -> Self {
        Self {
            brownian_bridge: false,
            antithetic_variate: false,
            seed,
            stopping: StoppingRule::Samples(samples),
            parallel_workers: None,
        }
    }
}

/// Builder options common to all Monte Carlo engines.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{McOptions, StoppingRule};
/// use pricer_pricing::rng::PseudoRandom;
///
/// let options = McOptions::default()
///     .with_absolute_tolerance(0.01)
///     .with_max_samples(100_000)
///     .with_seed(42);
///
/// let config = options.validate::<PseudoRandom>().unwrap();
/// assert_eq!(
///     config.stopping,
///     StoppingRule::Tolerance { tolerance: 0.01, max_samples: 100_000 }
/// );
///
/// // Both stopping rules at once is rejected.
/// assert!(options.with_samples(1_000).validate::<PseudoRandom>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct McOptions {
    brownian_bridge: bool,
    samples: Option<usize>,
    tolerance: Option<f64>,
    max_samples: Option<usize>,
    seed: u64,
    antithetic_variate: bool,
    constant_parameters: bool,
    evaluation_date: Option<Date>,
    parallel_workers: Option<usize>,
}

impl Default for McOptions {
    fn default() -> Self {
        Self {
            brownian_bridge: false,
            samples: None,
            tolerance: None,
            max_samples: None,
            seed: 0,
            antithetic_variate: false,
            constant_parameters: true,
            evaluation_date: None,
            parallel_workers: None,
        }
    }
}

impl McOptions {
    /// Brownian-bridge path construction.
    pub fn with_brownian_bridge(self, brownian_bridge: bool) -> Self {
        Self {
            brownian_bridge,
            ..self
        }
    }

    /// Fixed number of draws.
    pub fn with_samples(self, samples: usize) -> Self {
        Self {
            samples: Some(samples),
            ..self
        }
    }

    /// Target standard error.
    pub fn with_absolute_tolerance(self, tolerance: f64) -> Self {
        Self {
            tolerance: Some(tolerance),
            ..self
        }
    }

    /// Draw cap for tolerance mode.
    pub fn with_max_samples(self, max_samples: usize) -> Self {
        Self {
            max_samples: Some(max_samples),
            ..self
        }
    }

    /// Generator seed; 0 asks for an entropy seed.
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Antithetic pairing.
    pub fn with_antithetic_variate(self, antithetic_variate: bool) -> Self {
        Self {
            antithetic_variate,
            ..self
        }
    }

    /// Freeze process parameters at the evaluation date.
    pub fn with_constant_parameters(self, constant_parameters: bool) -> Self {
        Self {
            constant_parameters,
            ..self
        }
    }

    /// Date at which constant parameters are read.
    pub fn with_evaluation_date(self, evaluation_date: Date) -> Self {
        Self {
            evaluation_date: Some(evaluation_date),
            ..self
        }
    }

    /// Split a fixed-sample run across `workers` rayon tasks.
    pub fn with_parallel_workers(self, workers: usize) -> Self {
        Self {
            parallel_workers: Some(workers),
            ..self
        }
    }

    /// Whether the Brownian bridge is enabled.
    pub fn brownian_bridge(&self) -> bool {
        self.brownian_bridge
    }

    /// Whether constant parameters are requested.
    pub fn constant_parameters(&self) -> bool {
        self.constant_parameters
    }

    /// Explicit evaluation date, if any.
    pub fn evaluation_date(&self) -> Option<Date> {
        self.evaluation_date
    }

    /// Check the option combination for random policy `R`.
    ///
    /// # Errors
    /// A [`ConfigurationError`] naming the first conflict found.
    pub fn validate<R: RandomPolicy>(&self) -> Result<SimulationConfig, ConfigurationError> {
        let stopping = match (self.samples, self.tolerance) {
            (Some(_), Some(_)) => return Err(ConfigurationError::SamplesAndTolerance),
            (None, None) => return Err(ConfigurationError::NoStoppingCriterion),
            (Some(0), None) => return Err(ConfigurationError::ZeroSamples),
            (Some(n), None) => StoppingRule::Samples(n),
            (None, Some(tolerance)) => {
                if !R::ALLOWS_ERROR_ESTIMATE {
                    return Err(ConfigurationError::ToleranceWithoutErrorEstimate {
                        policy: R::NAME,
                    });
                }
                if !(tolerance.is_finite() && tolerance > 0.0) {
                    return Err(ConfigurationError::InvalidTolerance { tolerance });
                }
                let max_samples = self.max_samples.unwrap_or(usize::MAX);
                StoppingRule::Tolerance {
                    tolerance,
                    max_samples,
                }
            }
        };
        if self.max_samples == Some(0) {
            return Err(ConfigurationError::ZeroMaxSamples);
        }

        match (self.parallel_workers, stopping) {
            (Some(0), _) => return Err(ConfigurationError::ZeroWorkers),
            (Some(_), StoppingRule::Tolerance { .. }) => {
                return Err(ConfigurationError::ParallelWithTolerance)
            }
            _ => {}
        }

        Ok(SimulationConfig {
            brownian_bridge: self.brownian_bridge,
            antithetic_variate: self.antithetic_variate,
            seed: self.seed,
            stopping,
            parallel_workers: self.parallel_workers,
        })
    }
}
