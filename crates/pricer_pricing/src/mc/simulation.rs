//! Monte Carlo simulation loop.
//!
//! [`McSimulation`] drives a [`PathGenerator`] over a fixed grid, prices each
//! path and feeds the samples to an [`Accumulator`] until its
//! [`StoppingRule`] is met.
//!
//! # State machine
//!
//! ```text
//! Configured ──run()──▶ Sampling ──▶ Converged
//!                                └──▶ Exhausted   (tolerance cap reached)
//! ```
//!
//! A failed run returns to `Configured`. Every run starts from a fresh
//! accumulator and a generator rebuilt from the seed.
//!
//! # Tolerance mode
//!
//! After a minimum batch of [`MIN_BATCH`] draws (capped at the draw limit),
//! the loop estimates how many draws the tolerance needs from the current
//! standard error, `n·(err/tol)²`, and adds 80% of the shortfall, never less
//! than [`MIN_BATCH`] and never past the cap.

use std::marker::PhantomData;

use pricer_models::processes::{EngineProcess, StochasticProcess1D};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::{SimulationConfig, StoppingRule};
use super::error::PricingEngineError;
use super::path_generator::PathGenerator;
use super::path_pricer::PathPricer;
use super::statistics::{Accumulator, RunningStatistics};
use super::time_grid::TimeGrid;
use crate::rng::{resolve_seed, GaussianSequenceGenerator, RandomPolicy};

/// Smallest batch of draws in tolerance mode.
pub const MIN_BATCH: usize = 1023;

/// Fraction of the estimated shortfall added per tolerance batch.
const BATCH_SAFETY: f64 = 0.8;

/// Lifecycle of a simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    /// Ready to run
    Configured,
    /// Drawing paths
    Sampling,
    /// Stopping rule met
    Converged,
    /// Draw cap reached before the tolerance
    Exhausted,
}

/// Whether a run met its stopping rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConvergenceStatus {
    /// Sample count reached or tolerance met
    Converged,
    /// Tolerance mode hit the draw cap first
    NotConverged,
}

/// Outcome of one pricing run.
///
/// `samples` counts accumulator samples, two per draw with antithetic
/// variates. `error_estimate` is `None` for policies without a meaningful
/// standard error.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McResult {
    /// Sample mean of the discounted payoff
    pub value: f64,
    /// Standard error of the mean
    pub error_estimate: Option<f64>,
    /// Number of samples accumulated
    pub samples: usize,
    /// Whether the stopping rule was met
    pub status: ConvergenceStatus,
}

impl McResult {
    /// Whether the stopping rule was met.
    pub fn is_converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }
}

/// Draw `draws` paths (or pairs) and add their prices to `statistics`.
fn add_draws<Pr, G, P, S>(
    paths: &mut PathGenerator<'_, Pr, G>,
    pricer: &P,
    antithetic: bool,
    statistics: &mut S,
    draws: usize,
) -> Result<(), PricingEngineError>
where
    Pr: StochasticProcess1D,
    G: GaussianSequenceGenerator,
    P: PathPricer,
    S: Accumulator,
{
    for _ in 0..draws {
        let value = pricer.price(paths.next())?;
        statistics.add(value);
        if antithetic {
            let mirrored = pricer.price(paths.antithetic())?;
            statistics.add(mirrored);
        }
    }
    Ok(())
}

/// Draw range `[start, start + count)` of worker `worker` out of `workers`.
fn worker_share(draws: usize, workers: usize, worker: usize) -> (usize, usize) {
    let base = draws / workers;
    let extra = draws % workers;
    let start = worker * base + worker.min(extra);
    let count = base + usize::from(worker < extra);
    (start, count)
}

/// Monte Carlo simulation over path pricer `P`, random policy `R` and
/// accumulator `S`.
#[derive(Debug)]
pub struct McSimulation<P, R, S = RunningStatistics> {
    process: EngineProcess,
    grid: TimeGrid,
    pricer: P,
    config: SimulationConfig,
    state: SimulationState,
    statistics: S,
    _policy: PhantomData<fn() -> R>,
}

impl<P, R, S> McSimulation<P, R, S>
where
    P: PathPricer,
    R: RandomPolicy,
    S: Accumulator,
{
    /// Simulation in the `Configured` state.
    pub fn new(process: EngineProcess, grid: TimeGrid, pricer: P, config: SimulationConfig) -> Self {
        Self {
            process,
            grid,
            pricer,
            config,
            state: SimulationState::Configured,
            statistics: S::default(),
            _policy: PhantomData,
        }
    }

    /// Current state.
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Samples of the last run.
    pub fn statistics(&self) -> &S {
        &self.statistics
    }

    /// Grid the paths are drawn on.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Settings in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the simulation to its stopping rule.
    ///
    /// # Errors
    /// `NonFiniteInitialValue` when the process has no usable spot, or any
    /// error from the path pricer.
    pub fn run(&mut self) -> Result<McResult, PricingEngineError> {
        self.state = SimulationState::Sampling;
        self.statistics = S::default();

        match self.sample() {
            Ok(status) => {
                self.state = match status {
                    ConvergenceStatus::Converged => SimulationState::Converged,
                    ConvergenceStatus::NotConverged => SimulationState::Exhausted,
                };
                let value = self.statistics.mean().ok_or_else(|| {
                    PricingEngineError::invalid_path("simulation produced no samples")
                })?;
                let error_estimate = if R::ALLOWS_ERROR_ESTIMATE {
                    self.statistics.error_estimate()
                } else {
                    None
                };
                Ok(McResult {
                    value,
                    error_estimate,
                    samples: self.statistics.samples(),
                    status,
                })
            }
            Err(err) => {
                self.state = SimulationState::Configured;
                Err(err)
            }
        }
    }

    fn sample(&mut self) -> Result<ConvergenceStatus, PricingEngineError> {
        let x0 = self.process.x0();
        if !x0.is_finite() {
            return Err(PricingEngineError::NonFiniteInitialValue { value: x0 });
        }

        let seed = resolve_seed(self.config.seed);
        debug!(
            process = self.process.name(),
            policy = R::NAME,
            seed,
            steps = self.grid.steps(),
            antithetic = self.config.antithetic_variate,
            brownian_bridge = self.config.brownian_bridge,
            "starting Monte Carlo run"
        );

        match (self.config.stopping, self.config.parallel_workers) {
            (StoppingRule::Samples(draws), Some(workers)) => {
                self.statistics = self.sample_parallel(draws, workers, seed)?;
                Ok(ConvergenceStatus::Converged)
            }
            (StoppingRule::Samples(draws), None) => {
                let mut paths = PathGenerator::new(
                    &self.process,
                    self.grid.clone(),
                    R::generator(self.grid.steps(), seed),
                    self.config.brownian_bridge,
                );
                add_draws(
                    &mut paths,
                    &self.pricer,
                    self.config.antithetic_variate,
                    &mut self.statistics,
                    draws,
                )?;
                Ok(ConvergenceStatus::Converged)
            }
            (
                StoppingRule::Tolerance {
                    tolerance,
                    max_samples,
                },
                _,
            ) => self.sample_to_tolerance(tolerance, max_samples, seed),
        }
    }

    fn sample_to_tolerance(
        &mut self,
        tolerance: f64,
        max_samples: usize,
        seed: u64,
    ) -> Result<ConvergenceStatus, PricingEngineError> {
        let antithetic = self.config.antithetic_variate;
        let mut paths = PathGenerator::new(
            &self.process,
            self.grid.clone(),
            R::generator(self.grid.steps(), seed),
            self.config.brownian_bridge,
        );
        let statistics = &mut self.statistics;

        let mut draws = MIN_BATCH.min(max_samples);
        add_draws(&mut paths, &self.pricer, antithetic, statistics, draws)?;

        loop {
            let error = statistics.error_estimate().unwrap_or(f64::INFINITY);
            if error <= tolerance {
                info!(draws, error, tolerance, "Monte Carlo run converged");
                return Ok(ConvergenceStatus::Converged);
            }
            if draws >= max_samples {
                warn!(
                    draws,
                    error,
                    tolerance,
                    "Monte Carlo run reached the sample cap before the tolerance"
                );
                return Ok(ConvergenceStatus::NotConverged);
            }

            let n = draws as f64;
            let order = (error * error) / (tolerance * tolerance);
            let wanted = (n * order * BATCH_SAFETY - n).max(MIN_BATCH as f64);
            let batch = (wanted as usize).min(max_samples - draws);
            debug!(draws, error, batch, "adding Monte Carlo batch");

            add_draws(&mut paths, &self.pricer, antithetic, statistics, batch)?;
            draws += batch;
        }
    }

    fn sample_parallel(
        &self,
        draws: usize,
        workers: usize,
        seed: u64,
    ) -> Result<S, PricingEngineError> {
        let steps = self.grid.steps();
        let partials = (0..workers)
            .into_par_iter()
            .map(|worker| {
                let (start, count) = worker_share(draws, workers, worker);
                let mut paths = PathGenerator::new(
                    &self.process,
                    self.grid.clone(),
                    R::worker_generator(steps, seed, worker, start as u64),
                    self.config.brownian_bridge,
                );
                let mut statistics = S::default();
                add_draws(
                    &mut paths,
                    &self.pricer,
                    self.config.antithetic_variate,
                    &mut statistics,
                    count,
                )?;
                Ok(statistics)
            })
            .collect::<Result<Vec<S>, PricingEngineError>>()?;

        // Merge in worker order.
        let mut total = S::default();
        for partial in &partials {
            total.merge(partial);
        }
        debug!(workers, samples = total.samples(), "merged parallel statistics");
        Ok(total)
    }
}
