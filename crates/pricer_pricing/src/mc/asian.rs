//! Monte Carlo engine for discrete arithmetic average-strike Asian options.
//!
//! The grid runs through the fixing dates at or after the engine's
//! evaluation date. Fixings already taken are carried by the option's
//! running accumulator and past fixing count.

use std::marker::PhantomData;

use pricer_core::types::Date;
use pricer_models::instruments::DiscreteAveragingAsianOption;
use pricer_models::processes::{EngineProcess, GeneralizedBlackScholesProcess};
use tracing::debug;

use super::config::{McOptions, SimulationConfig};
use super::error::PricingEngineError;
use super::european::{discount_from, engine_process, european_date, time_from};
use super::path_pricer::ArithmeticAsoPathPricer;
use super::simulation::{McResult, McSimulation, SimulationState};
use super::statistics::{Accumulator, RunningStatistics};
use super::time_grid::TimeGrid;
use crate::rng::{PseudoRandom, RandomPolicy};

/// Monte Carlo engine for [`DiscreteAveragingAsianOption`]s with an
/// arithmetic average strike.
#[derive(Debug)]
pub struct McDiscreteArithmeticAsEngine<R = PseudoRandom, S = RunningStatistics> {
    process: EngineProcess,
    evaluation_date: Date,
    config: SimulationConfig,
    state: SimulationState,
    _policy: PhantomData<fn() -> (R, S)>,
}

impl<R, S> McDiscreteArithmeticAsEngine<R, S>
where
    R: RandomPolicy,
    S: Accumulator,
{
    /// Engine from already validated parts.
    pub fn new(process: EngineProcess, evaluation_date: Date, config: SimulationConfig) -> Self {
        Self {
            process,
            evaluation_date,
            config,
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

    /// Grid through the fixings of `option` at or after the evaluation date.
    ///
    /// # Errors
    /// `InvalidPath` when every fixing is in the past.
    pub fn time_grid(
        &self,
        option: &DiscreteAveragingAsianOption,
    ) -> Result<TimeGrid, PricingEngineError> {
        let fixing_times: Vec<f64> = option
            .fixing_dates()
            .iter()
            .map(|d| time_from(&self.process, self.evaluation_date, *d))
            .filter(|t| *t >= 0.0)
            .collect();
        if fixing_times.is_empty() {
            return Err(PricingEngineError::invalid_path("all fixings are in the past"));
        }
        TimeGrid::from_mandatory_times(&fixing_times)
    }

    /// Price `option`.
    ///
    /// # Errors
    /// `InvalidPayoff` / `InvalidExercise` for unsupported products;
    /// `InvalidPath` when no fixing is left; evaluation errors from the
    /// market data.
    pub fn calculate(
        &mut self,
        option: &DiscreteAveragingAsianOption,
    ) -> Result<McResult, PricingEngineError> {
        let exercise_date = european_date(option.exercise())?;
        ArithmeticAsoPathPricer::from_payoff(option.payoff(), 1.0, 0.0, 0)?;

        let grid = self.time_grid(option)?;
        let maturity = time_from(&self.process, self.evaluation_date, exercise_date);
        let discount = discount_from(&self.process, self.evaluation_date, maturity)?;
        let pricer = ArithmeticAsoPathPricer::from_payoff(
            option.payoff(),
            discount,
            option.running_accumulator(),
            option.past_fixings(),
        )?;
        debug!(
            %exercise_date,
            fixings = grid.mandatory_times().len(),
            past_fixings = option.past_fixings(),
            discount,
            "pricing arithmetic average-strike option"
        );

        let mut simulation =
            McSimulation::<_, R, S>::new(self.process.clone(), grid, pricer, self.config.clone());
        let result = simulation.run();
        self.state = simulation.state();
        result
    }
}

/// Immutable builder for [`McDiscreteArithmeticAsEngine`].
///
/// Defaults: Brownian-bridge path construction, no antithetic variates,
/// constant parameters at the risk-free curve's reference date, entropy
/// seed.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::instruments::{
///     DiscreteAveragingAsianOption, Exercise, OptionType, Payoff,
/// };
/// use pricer_models::processes::GeneralizedBlackScholesProcess;
/// use pricer_pricing::mc::McDiscreteArithmeticAsEngineBuilder;
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
/// let fixings: Vec<Date> = (1..=4).map(|q| today.add_days(91 * q)).collect();
/// let option = DiscreteAveragingAsianOption::new(
///     Payoff::plain_vanilla(OptionType::Call, 0.0).unwrap(),
///     Exercise::european(fixings[3]),
///     0.0,
///     0,
///     fixings,
/// )
/// .unwrap();
///
/// let mut engine = McDiscreteArithmeticAsEngineBuilder::new(process)
///     .with_samples(5_000)
///     .with_seed(1)
///     .build()
///     .unwrap();
/// let result = engine.calculate(&option).unwrap();
/// assert!(result.value > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct McDiscreteArithmeticAsEngineBuilder<R = PseudoRandom, S = RunningStatistics> {
    process: GeneralizedBlackScholesProcess,
    options: McOptions,
    _policy: PhantomData<fn() -> (R, S)>,
}

impl McDiscreteArithmeticAsEngineBuilder<PseudoRandom, RunningStatistics> {
    /// Builder over `process` with the pseudo-random policy.
    pub fn new(process: GeneralizedBlackScholesProcess) -> Self {
        Self {
            process,
            options: McOptions::default().with_brownian_bridge(true),
            _policy: PhantomData,
        }
    }
}

impl<R, S> McDiscreteArithmeticAsEngineBuilder<R, S>
where
    R: RandomPolicy,
    S: Accumulator,
{
    fn with_options(self, options: McOptions) -> Self {
        Self { options, ..self }
    }

    /// Switch random policy.
    pub fn with_random_policy<R2: RandomPolicy>(self) -> McDiscreteArithmeticAsEngineBuilder<R2, S> {
        McDiscreteArithmeticAsEngineBuilder {
            process: self.process,
            options: self.options,
            _policy: PhantomData,
        }
    }

    /// Switch accumulator.
    pub fn with_accumulator<S2: Accumulator>(self) -> McDiscreteArithmeticAsEngineBuilder<R, S2> {
        McDiscreteArithmeticAsEngineBuilder {
            process: self.process,
            options: self.options,
            _policy: PhantomData,
        }
    }

    impl_option_setters!();

    /// Validate the options and build the engine.
    ///
    /// # Errors
    /// `Configuration` for conflicting options, including an evaluation date
    /// off the curve reference date without constant parameters; evaluation
    /// errors when constant parameters cannot be read.
    pub fn build(self) -> Result<McDiscreteArithmeticAsEngine<R, S>, PricingEngineError> {
        let config = self.options.validate::<R>()?;
        let (process, evaluation_date) = engine_process(&self.process, &self.options)?;
        Ok(McDiscreteArithmeticAsEngine::new(process, evaluation_date, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::ConfigurationError;
    use approx::assert_relative_eq;
    use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
    use pricer_core::types::{Date, DayCountConvention};
    use pricer_models::instruments::{Exercise, OptionType, Payoff};
    use std::sync::Arc;

    fn today() -> Date {
        Date::from_ymd(2026, 1, 2).unwrap()
    }

    fn process_at(reference: Date) -> GeneralizedBlackScholesProcess {
        let dc = DayCountConvention::ActualActual365;
        GeneralizedBlackScholesProcess::new(
            Arc::new(SimpleQuote::new(100.0)),
            Arc::new(FlatForward::new(reference, 0.0, dc)),
            Arc::new(FlatForward::new(reference, 0.05, dc)),
            Arc::new(BlackConstantVol::new(reference, 0.2, dc)),
        )
    }

    fn process() -> GeneralizedBlackScholesProcess {
        process_at(today())
    }

    fn option(fixing_offsets: &[i64], running: f64, past: usize) -> DiscreteAveragingAsianOption {
        let fixings: Vec<Date> = fixing_offsets.iter().map(|d| today().add_days(*d)).collect();
        let last = *fixings.iter().max().unwrap();
        DiscreteAveragingAsianOption::new(
            Payoff::plain_vanilla(OptionType::Call, 0.0).unwrap(),
            Exercise::european(last),
            running,
            past,
            fixings,
        )
        .unwrap()
    }

    fn engine() -> McDiscreteArithmeticAsEngine {
        McDiscreteArithmeticAsEngineBuilder::new(process())
            .with_samples(2_000)
            .with_seed(42)
            .build()
            .unwrap()
    }

    #[test]
    fn test_bridge_on_by_default() {
        let builder = McDiscreteArithmeticAsEngineBuilder::new(process());
        assert!(builder.options().brownian_bridge());
        let engine = builder.with_samples(1).build().unwrap();
        assert!(engine.config().brownian_bridge);
        assert!(!engine.config().antithetic_variate);
    }

    #[test]
    fn test_past_fixings_dropped_from_grid() {
        let engine = engine();
        let grid = engine.time_grid(&option(&[-30, 0, 90, 180], 95.0, 1)).unwrap();
        assert!(grid.starts_with_mandatory_zero());
        assert_eq!(grid.mandatory_times().len(), 3);
    }

    #[test]
    fn test_all_fixings_past_is_invalid_path() {
        let mut engine = engine();
        let expired = option(&[-60, -30], 200.0, 2);
        assert!(matches!(
            engine.calculate(&expired),
            Err(PricingEngineError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_non_european_exercise_rejected() {
        let mut engine = engine();
        let fixings = vec![today().add_days(90), today().add_days(180)];
        let bermudan = DiscreteAveragingAsianOption::new(
            Payoff::plain_vanilla(OptionType::Put, 0.0).unwrap(),
            Exercise::bermudan(fixings.clone()).unwrap(),
            0.0,
            0,
            fixings,
        )
        .unwrap();
        assert!(matches!(
            engine.calculate(&bermudan),
            Err(PricingEngineError::InvalidExercise { .. })
        ));
    }

    #[test]
    fn test_antithetic_run_has_even_samples() {
        let mut engine = McDiscreteArithmeticAsEngineBuilder::new(process())
            .with_samples(501)
            .with_antithetic_variate(true)
            .with_seed(3)
            .build()
            .unwrap();
        let result = engine.calculate(&option(&[90, 180, 270, 365], 0.0, 0)).unwrap();
        assert_eq!(result.samples, 1_002);
        assert_eq!(engine.state(), SimulationState::Converged);
    }

    #[test]
    fn test_tolerance_with_parallel_rejected() {
        let result = McDiscreteArithmeticAsEngineBuilder::new(process())
            .with_absolute_tolerance(0.05)
            .with_parallel_workers(2)
            .build();
        assert!(matches!(
            result,
            Err(PricingEngineError::Configuration(
                ConfigurationError::ParallelWithTolerance
            ))
        ));
    }

    #[test]
    fn test_later_evaluation_date_starts_at_that_date() {
        let later = today().add_days(90);
        let asian = option(&[-30, 90, 180, 270], 95.0, 1);
        let mut shifted = McDiscreteArithmeticAsEngineBuilder::new(process())
            .with_samples(4_000)
            .with_seed(8)
            .with_evaluation_date(later)
            .build()
            .unwrap();

        let grid = shifted.time_grid(&asian).unwrap();
        assert!(grid.starts_with_mandatory_zero());
        assert_eq!(grid.mandatory_times().len(), 3);
        assert_relative_eq!(grid.last(), 180.0 / 365.0, epsilon = 1e-12);

        // Same flat market rolled forward to the later date
        let mut rolled = McDiscreteArithmeticAsEngineBuilder::new(process_at(later))
            .with_samples(4_000)
            .with_seed(8)
            .build()
            .unwrap();
        let a = shifted.calculate(&asian).unwrap();
        let b = rolled.calculate(&asian).unwrap();
        assert_relative_eq!(a.value, b.value, epsilon = 1e-8);
    }
}
