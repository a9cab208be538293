//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. The flag groups shared
//! by `price` and `check` live here together with the engine wiring.

use std::sync::Arc;

use clap::Args;
use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
use pricer_core::types::{Date, DayCountConvention};
use pricer_models::processes::GeneralizedBlackScholesProcess;
use pricer_pricing::mc::{McDiscreteArithmeticAsEngineBuilder, McEuropeanEngineBuilder};

use crate::config::{MarketConfig, McPriceConfig, Policy, SimulationSettings};

/// Apply the shared simulation settings to an engine builder.
macro_rules! configure_builder {
    ($builder:expr, $settings:expr) => {{
        let settings: &SimulationSettings = $settings;
        let mut builder = $builder
            .with_seed(settings.seed)
            .with_antithetic_variate(settings.antithetic)
            .with_constant_parameters(!settings.time_varying);
        if let Some(bridge) = settings.brownian_bridge {
            builder = builder.with_brownian_bridge(bridge);
        }
        if let Some(samples) = settings.effective_samples() {
            builder = builder.with_samples(samples);
        }
        if let Some(tolerance) = settings.tolerance {
            builder = builder.with_absolute_tolerance(tolerance);
        }
        if let Some(max_samples) = settings.max_samples {
            builder = builder.with_max_samples(max_samples);
        }
        if let Some(workers) = settings.workers {
            builder = builder.with_parallel_workers(workers);
        }
        builder
    }};
}

pub mod check;
pub mod price;

/// Day count of the flat CLI market.
pub const DAY_COUNT: DayCountConvention = DayCountConvention::ActualActual365;

/// Market overrides
#[derive(Debug, Clone, Default, Args)]
pub struct MarketArgs {
    /// Spot price
    #[arg(long)]
    pub spot: Option<f64>,

    /// Risk-free rate (continuous)
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Dividend yield (continuous)
    #[arg(long, allow_negative_numbers = true)]
    pub dividend: Option<f64>,

    /// Black volatility
    #[arg(long)]
    pub vol: Option<f64>,

    /// Valuation date (YYYY-MM-DD)
    #[arg(long)]
    pub valuation_date: Option<String>,
}

impl MarketArgs {
    /// Override `market` with the flags given.
    pub fn apply(&self, market: &mut MarketConfig) {
        if let Some(spot) = self.spot {
            market.spot = spot;
        }
        if let Some(rate) = self.rate {
            market.rate = rate;
        }
        if let Some(dividend) = self.dividend {
            market.dividend = dividend;
        }
        if let Some(vol) = self.vol {
            market.vol = vol;
        }
        if let Some(date) = &self.valuation_date {
            market.valuation_date = Some(date.clone());
        }
    }
}

/// Simulation overrides
#[derive(Debug, Clone, Default, Args)]
pub struct SimulationArgs {
    /// Fixed number of draws
    #[arg(long, conflicts_with = "tolerance")]
    pub samples: Option<usize>,

    /// Target standard error
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Draw cap in tolerance mode
    #[arg(long)]
    pub max_samples: Option<usize>,

    /// Generator seed (0 for an entropy seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pair each path with its mirrored twin
    #[arg(long)]
    pub antithetic: bool,

    /// Brownian-bridge path construction (true|false)
    #[arg(long)]
    pub brownian_bridge: Option<bool>,

    /// Read market data along the path
    #[arg(long)]
    pub time_varying: bool,

    /// Time steps (European)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Parallel workers for fixed-sample runs
    #[arg(long)]
    pub workers: Option<usize>,

    /// Random number policy
    #[arg(long, value_enum)]
    pub policy: Option<Policy>,
}

impl SimulationArgs {
    /// Override `settings` with the flags given.
    pub fn apply(&self, settings: &mut SimulationSettings) {
        if let Some(samples) = self.samples {
            settings.set_samples(samples);
        }
        if let Some(tolerance) = self.tolerance {
            settings.set_tolerance(tolerance);
        }
        if let Some(max_samples) = self.max_samples {
            settings.max_samples = Some(max_samples);
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if self.antithetic {
            settings.antithetic = true;
        }
        if let Some(bridge) = self.brownian_bridge {
            settings.brownian_bridge = Some(bridge);
        }
        if self.time_varying {
            settings.time_varying = true;
        }
        if let Some(steps) = self.steps {
            settings.steps = Some(steps);
        }
        if let Some(workers) = self.workers {
            settings.workers = Some(workers);
        }
        if let Some(policy) = self.policy {
            settings.policy = policy;
        }
    }
}

/// Apply both flag groups to `config`.
pub fn apply_overrides(config: &mut McPriceConfig, market: &MarketArgs, simulation: &SimulationArgs) {
    market.apply(&mut config.market);
    simulation.apply(&mut config.simulation);
}

/// Flat Black-Scholes-Merton process over `market` as of `today`.
pub fn market_process(market: &MarketConfig, today: Date) -> GeneralizedBlackScholesProcess {
    GeneralizedBlackScholesProcess::new(
        Arc::new(SimpleQuote::new(market.spot)),
        Arc::new(FlatForward::new(today, market.dividend, DAY_COUNT)),
        Arc::new(FlatForward::new(today, market.rate, DAY_COUNT)),
        Arc::new(BlackConstantVol::new(today, market.vol, DAY_COUNT)),
    )
}

/// European builder configured from `config`, pseudo-random policy.
pub fn european_builder(config: &McPriceConfig, today: Date) -> McEuropeanEngineBuilder {
    let builder = McEuropeanEngineBuilder::new(market_process(&config.market, today))
        .with_steps(config.simulation.effective_steps());
    configure_builder!(builder, &config.simulation)
}

/// Asian builder configured from `config`, pseudo-random policy.
pub fn asian_builder(config: &McPriceConfig, today: Date) -> McDiscreteArithmeticAsEngineBuilder {
    let builder = McDiscreteArithmeticAsEngineBuilder::new(market_process(&config.market, today));
    configure_builder!(builder, &config.simulation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_flags_replace_stopping_rule() {
        let mut settings = SimulationSettings {
            samples: Some(1_000),
            ..Default::default()
        };
        let args = SimulationArgs {
            tolerance: Some(0.01),
            seed: Some(3),
            policy: Some(Policy::PseudoRandom),
            ..Default::default()
        };
        args.apply(&mut settings);

        assert_eq!(settings.samples, None);
        assert_eq!(settings.tolerance, Some(0.01));
        assert_eq!(settings.seed, 3);
        assert_eq!(settings.effective_samples(), None);
    }

    #[test]
    fn test_market_flags_override_only_given_values() {
        let mut market = MarketConfig::default();
        let args = MarketArgs {
            spot: Some(120.0),
            rate: Some(-0.01),
            ..Default::default()
        };
        args.apply(&mut market);

        assert_eq!(market.spot, 120.0);
        assert_eq!(market.rate, -0.01);
        assert_eq!(market.vol, MarketConfig::default().vol);
    }

    #[test]
    fn test_builders_follow_settings() {
        let mut config = McPriceConfig::default();
        config.simulation.brownian_bridge = Some(false);
        config.simulation.antithetic = true;
        config.simulation.time_varying = true;
        let today = Date::from_ymd(2026, 1, 2).unwrap();

        let asian = asian_builder(&config, today);
        assert!(!asian.options().brownian_bridge());
        assert!(!asian.options().constant_parameters());
        assert!(asian.build().is_ok());

        let european = european_builder(&config, today);
        assert!(european.build().is_ok());
    }
}
