//! mcprice - Monte Carlo option pricer
//!
//! Command-line front end for the pricer_pricing engines on a flat
//! Black-Scholes-Merton market.
//!
//! # Commands
//!
//! - `mcprice price european --strike 100 --maturity-days 365` - Price a European option
//! - `mcprice price asian --fixings 91,182,273,365` - Price an average-strike Asian option
//! - `mcprice check` - Validate and print the effective configuration
//!
//! # Configuration
//!
//! Settings are read from `mcprice.toml` (or `--config <file>`), then
//! `MCPRICE_SEED`, `MCPRICE_SAMPLES` and `MCPRICE_LOG_LEVEL`, then flags.
//! `RUST_LOG` takes precedence over the configured log level.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::price::{OutputFormat, Product};
use commands::{MarketArgs, SimulationArgs};
use config::McPriceConfig;

/// Monte Carlo option pricer
#[derive(Parser)]
#[command(name = "mcprice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an option by Monte Carlo simulation
    Price {
        /// Output format
        #[arg(short, long, value_enum, global = true, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        #[command(subcommand)]
        product: Product,
    },

    /// Validate and print the effective configuration
    Check {
        #[command(flatten)]
        market: MarketArgs,

        #[command(flatten)]
        simulation: SimulationArgs,
    },
}

fn init_tracing(config: &McPriceConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = McPriceConfig::load(cli.config.as_deref())?;
    init_tracing(&config, cli.verbose);
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Price { format, product } => commands::price::run(config, &product, format),
        Commands::Check { market, simulation } => {
            commands::check::run(config, &market, &simulation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pricer_models::instruments::OptionType;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_european() {
        let cli = Cli::try_parse_from([
            "mcprice", "price", "--format", "json", "european", "--strike", "95",
            "--option-type", "put", "--samples", "5000", "--rate", "-0.01",
        ])
        .unwrap();
        match cli.command {
            Commands::Price {
                format,
                product: Product::European(args),
            } => {
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(args.strike, 95.0);
                assert_eq!(args.option_type, OptionType::Put);
                assert_eq!(args.maturity_days, 365);
                assert_eq!(args.simulation.samples, Some(5000));
                assert_eq!(args.market.rate, Some(-0.01));
            }
            _ => panic!("expected European price command"),
        }
    }

    #[test]
    fn test_parse_asian_fixings() {
        let cli = Cli::try_parse_from([
            "mcprice", "price", "asian", "--fixings", "-30,60,150", "--past-fixings", "1",
            "--running-sum", "98.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Price {
                product: Product::Asian(args),
                ..
            } => {
                assert_eq!(args.fixings, vec![-30, 60, 150]);
                assert_eq!(args.past_fixings, 1);
                assert_eq!(args.running_sum, 98.5);
            }
            _ => panic!("expected Asian price command"),
        }
    }

    #[test]
    fn test_parse_asian_fixings_all_past() {
        let cli = Cli::try_parse_from([
            "mcprice", "price", "asian", "--fixings", "-60,-30", "--option-type", "put",
        ])
        .unwrap();
        match cli.command {
            Commands::Price {
                product: Product::Asian(args),
                ..
            } => {
                assert_eq!(args.fixings, vec![-60, -30]);
                assert_eq!(args.option_type, OptionType::Put);
            }
            _ => panic!("expected Asian price command"),
        }
    }

    #[test]
    fn test_samples_and_tolerance_conflict() {
        let result = Cli::try_parse_from([
            "mcprice", "check", "--samples", "10", "--tolerance", "0.1",
        ]);
        assert!(result.is_err());
    }
}
