//! Check command implementation
//!
//! Validates the effective configuration, builds both engines from it
//! without pricing anything and prints the configuration as TOML.

use pricer_pricing::rng::LowDiscrepancy;
use tracing::info;

use super::{apply_overrides, asian_builder, european_builder, MarketArgs, SimulationArgs};
use crate::config::{McPriceConfig, Policy};
use crate::Result;

/// Run the check command
pub fn run(mut config: McPriceConfig, market: &MarketArgs, simulation: &SimulationArgs) -> Result<()> {
    apply_overrides(&mut config, market, simulation);
    check(&config)?;

    println!("{}", toml::to_string_pretty(&config)?);
    println!("Configuration OK");
    Ok(())
}

/// Validate `config` and build both engines from it.
pub fn check(config: &McPriceConfig) -> Result<()> {
    config.validate()?;
    let today = config.market.valuation_date()?;

    let european = european_builder(config, today);
    let asian = asian_builder(config, today);
    match config.simulation.policy {
        Policy::PseudoRandom => {
            european.build()?;
            asian.build()?;
        }
        Policy::LowDiscrepancy => {
            european.with_random_policy::<LowDiscrepancy>().build()?;
            asian.with_random_policy::<LowDiscrepancy>().build()?;
        }
    }

    info!(valuation_date = %today, "configuration checked");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_default_configuration_passes() {
        assert!(check(&McPriceConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_configuration_reported() {
        let mut config = McPriceConfig::default();
        config.simulation.workers = Some(0);
        assert!(matches!(check(&config), Err(CliError::Config(_))));
    }

    #[test]
    fn test_engine_rejection_surfaces() {
        // Caught by the engine builder rather than the config pass.
        let mut config = McPriceConfig::default();
        config.simulation.set_tolerance(0.01);
        config.simulation.max_samples = Some(0);
        assert!(matches!(check(&config), Err(CliError::Pricing(_))));
    }
}
