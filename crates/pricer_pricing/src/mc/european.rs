//! Monte Carlo engine for European vanilla options.

use std::marker::PhantomData;

use pricer_core::types::Date;
use pricer_models::instruments::{Exercise, VanillaOption};
use pricer_models::processes::{BlackScholesProcess, EngineProcess, GeneralizedBlackScholesProcess};
use tracing::debug;

use super::config::{McOptions, SimulationConfig};
use super::error::{ConfigurationError, PricingEngineError};
use super::path_pricer::EuropeanPathPricer;
use super::simulation::{McResult, McSimulation, SimulationState};
use super::statistics::{Accumulator, RunningStatistics};
use super::time_grid::TimeGrid;
use crate::rng::{PseudoRandom, RandomPolicy};

/// Exercise date of a European exercise.
pub(crate) fn european_date(exercise: &Exercise) -> Result<Date, PricingEngineError> {
    match exercise {
        Exercise::European { date } => Ok(*date),
        other => Err(PricingEngineError::InvalidExercise {
            exercise: other.name(),
        }),
    }
}

/// Build the engine process for `process` under `options`, together with the
/// evaluation date all engine times are measured from.
pub(crate) fn engine_process(
    process: &GeneralizedBlackScholesProcess,
    options: &McOptions,
) -> Result<(EngineProcess, Date), PricingEngineError> {
    let reference_date = process.risk_free_rate().reference_date();
    let evaluation_date = options.evaluation_date().unwrap_or(reference_date);
    if !options.constant_parameters() && evaluation_date != reference_date {
        return Err(ConfigurationError::EvaluationDateWithTimeVarying {
            evaluation_date,
            reference_date,
        }
        .into());
    }
    let engine_process =
        EngineProcess::from_process(process, options.constant_parameters(), evaluation_date)?;
    debug!(
        process = engine_process.name(),
        %evaluation_date,
        "selected engine process"
    );
    Ok((engine_process, evaluation_date))
}

/// Year fraction from `evaluation_date` to `date` on the process clock.
pub(crate) fn time_from(process: &EngineProcess, evaluation_date: Date, date: Date) -> f64 {
    process.time(date) - process.time(evaluation_date)
}

/// Risk-free discount factor over `t` years starting at `evaluation_date`.
pub(crate) fn discount_from(
    process: &EngineProcess,
    evaluation_date: Date,
    t: f64,
) -> Result<f64, PricingEngineError> {
    let t0 = process.time(evaluation_date);
    let curve = process.risk_free_rate();
    Ok(curve.discount(t0 + t, true)? / curve.discount(t0, true)?)
}

/// How the European grid is discretised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeSteps {
    /// Fixed number of steps to maturity
    Total(usize),
    /// Steps per year of maturity, at least one in total
    PerYear(usize),
}

impl TimeSteps {
    /// Number of steps for a maturity of `t` years.
    pub fn steps_for(&self, t: f64) -> usize {
        match *self {
            TimeSteps::Total(n) => n,
            TimeSteps::PerYear(n) => ((n as f64 * t) as usize).max(1),
        }
    }
}

/// Monte Carlo engine for [`VanillaOption`]s with European exercise.
///
/// Each [`calculate`](Self::calculate) builds a uniform grid from the
/// evaluation date to the exercise date, discounts with the risk-free curve
/// over that interval and runs a fresh [`McSimulation`].
#[derive(Debug)]
pub struct McEuropeanEngine<R = PseudoRandom, S = RunningStatistics> {
    process: EngineProcess,
    evaluation_date: Date,
    config: SimulationConfig,
    steps: TimeSteps,
    state: SimulationState,
    _policy: PhantomData<fn() -> (R, S)>,
}

impl<R, S> McEuropeanEngine<R, S>
where
    R: RandomPolicy,
    S: Accumulator,
{
    /// Engine from already validated parts.
    pub fn new(
        process: EngineProcess,
        evaluation_date: Date,
        config: SimulationConfig,
        steps: TimeSteps,
    ) -> Self {
        Self {
            process,
            evaluation_date,
            config,
            steps,
            state: SimulationState::Configured,
            _policy: PhantomData,
        }
    }

    /// Process the paths are drawn from.
    pub fn process(&self) -> &EngineProcess {
        &self.process
    }

    /// Date the paths start from.
    pub fn evaluation_date(&self) -> Date {
        self.evaluation_date
    }

    /// Simulation settings.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// State after the last calculation.
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Grid used for an option expiring on `exercise_date`.
    pub fn time_grid(&self, exercise_date: Date) -> Result<TimeGrid, PricingEngineError> {
        let maturity = time_from(&self.process, self.evaluation_date, exercise_date);
        TimeGrid::uniform(maturity, self.steps.steps_for(maturity))
    }

    /// Price `option`.
    ///
    /// # Errors
    /// `InvalidPayoff` / `InvalidExercise` for unsupported products, checked
    /// before any market data is read; `InvalidPath` for an exercise date not
    /// after the evaluation date; evaluation errors from the market
    /// data.
    pub fn calculate(&mut self, option: &VanillaOption) -> Result<McResult, PricingEngineError> {
        let exercise_date = european_date(option.exercise())?;
        EuropeanPathPricer::from_payoff(option.payoff(), 1.0)?;

        let grid = self.time_grid(exercise_date)?;
        let maturity = grid.last();
        let discount = discount_from(&self.process, self.evaluation_date, maturity)?;
        let pricer = EuropeanPathPricer::from_payoff(option.payoff(), discount)?;
        debug!(%exercise_date, maturity, steps = grid.steps(), discount, "pricing European option");

        let mut simulation =
            McSimulation::<_, R, S>::new(self.process.clone(), grid, pricer, self.config.clone());
        let result = simulation.run();
        self.state = simulation.state();
        result
    }
}

/// Immutable builder for [`McEuropeanEngine`].
///
/// Defaults: incremental path construction (no Brownian bridge), no
/// antithetic variates, constant parameters at the risk-free curve's
/// reference date, entropy seed.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::instruments::{Exercise, OptionType, Payoff, VanillaOption};
/// use pricer_models::processes::GeneralizedBlackScholesProcess;
/// use pricer_pricing::mc::McEuropeanEngineBuilder;
///
/// let today = Date::from_ymd(2026, 1, 2).unwrap();
/// let dc = DayCountConvention::ActualActual365;
/// let process = GeneralizedBlackScholesProcess::new(
///     Arc::new(SimpleQuote::new(100.0)),
///     Arc::new(FlatForward::new(today, 0.0, dc)),
///     Arc::new(FlatForward::new(today, 0.05, dc)),
///     Arc::new(BlackConstantVol::new(today, 0.2, dc)),
/// );
///
/// let mut engine = McEuropeanEngineBuilder::new(process)
///     .with_steps(1)
///     .with_samples(10_000)
///     .with_seed(42)
///     .build()
///     .unwrap();
///
/// let option = VanillaOption::new(
///     Payoff::plain_vanilla(OptionType::Call, 100.0).unwrap(),
///     Exercise::european(today.add_days(365)),
/// );
/// let result = engine.calculate(&option).unwrap();
/// assert!((result.value - 10.45).abs() < 4.0 * result.error_estimate.unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct McEuropeanEngineBuilder<R = PseudoRandom, S = RunningStatistics> {
    process: GeneralizedBlackScholesProcess,
    options: McOptions,
    steps: Option<usize>,
    steps_per_year: Option<usize>,
    _policy: PhantomData<fn() -> (R, S)>,
}

impl McEuropeanEngineBuilder<PseudoRandom, RunningStatistics> {
    /// Builder over `process` with the pseudo-random policy.
    pub fn new(process: GeneralizedBlackScholesProcess) -> Self {
        Self {
            process,
            options: McOptions::default(),
            steps: None,
            steps_per_year: None,
            _policy: PhantomData,
        }
    }
}

impl<R, S> McEuropeanEngineBuilder<R, S>
where
    R: RandomPolicy,
    S: Accumulator,
{
    fn with_options(self, options: McOptions) -> Self {
        Self { options, ..self }
    }

    /// Switch random policy.
    pub fn with_random_policy<R2: RandomPolicy>(self) -> McEuropeanEngineBuilder<R2, S> {
        McEuropeanEngineBuilder {
            process: self.process,
            options: self.options,
            steps: self.steps,
            steps_per_year: self.steps_per_year,
            _policy: PhantomData,
        }
    }

    /// Switch accumulator.
    pub fn with_accumulator<S2: Accumulator>(self) -> McEuropeanEngineBuilder<R, S2> {
        McEuropeanEngineBuilder {
            process: self.process,
            options: self.options,
            steps: self.steps,
            steps_per_year: self.steps_per_year,
            _policy: PhantomData,
        }
    }

    /// Total number of time steps.
    pub fn with_steps(self, steps: usize) -> Self {
        Self {
            steps: Some(steps),
            ..self
        }
    }

    /// Time steps per year of maturity.
    pub fn with_steps_per_year(self, steps: usize) -> Self {
        Self {
            steps_per_year: Some(steps),
            ..self
        }
    }

    impl_option_setters!();

    /// Validate the options and build the engine.
    ///
    /// # Errors
    /// `Configuration` for conflicting options, including an evaluation date
    /// off the curve reference date without constant parameters; evaluation
    /// errors when constant parameters cannot be read.
    pub fn build(self) -> Result<McEuropeanEngine<R, S>, PricingEngineError> {
        let config = self.options.validate::<R>()?;
        let steps = match (self.steps, self.steps_per_year) {
            (Some(_), Some(_)) => return Err(ConfigurationError::StepsAndStepsPerYear.into()),
            (None, None) => return Err(ConfigurationError::NoSteps.into()),
            (Some(0), None) | (None, Some(0)) => return Err(ConfigurationError::ZeroSteps.into()),
            (Some(n), None) => TimeSteps::Total(n),
            (None, Some(n)) => TimeSteps::PerYear(n),
        };
        let (process, evaluation_date) = engine_process(&self.process, &self.options)?;
        Ok(McEuropeanEngine::new(process, evaluation_date, config, steps))
    }
}
