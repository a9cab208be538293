//! Price command implementation
//!
//! Prices a European or average-strike Asian option on a flat market with
//! the pricer_pricing Monte Carlo engines. European results carry the
//! Black-Scholes-Merton value for comparison.

use clap::{Args, Subcommand, ValueEnum};
use pricer_core::types::Date;
use pricer_models::analytical::european_price;
use pricer_models::instruments::{
    DiscreteAveragingAsianOption, Exercise, OptionType, Payoff, VanillaOption,
};
use pricer_pricing::mc::McResult;
use pricer_pricing::rng::LowDiscrepancy;
use serde::Serialize;
use tracing::info;

use super::{apply_overrides, asian_builder, european_builder, MarketArgs, SimulationArgs, DAY_COUNT};
use crate::config::{McPriceConfig, Policy};
use crate::{CliError, Result};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Product to price
#[derive(Debug, Clone, Subcommand)]
pub enum Product {
    /// European vanilla option
    European(EuropeanArgs),
    /// Discrete arithmetic average-strike option
    Asian(AsianArgs),
}

/// European option flags
#[derive(Debug, Clone, Args)]
pub struct EuropeanArgs {
    /// Strike
    #[arg(long, default_value_t = 100.0)]
    pub strike: f64,

    /// call or put
    #[arg(long, default_value = "call")]
    pub option_type: OptionType,

    /// Days from the valuation date to expiry
    #[arg(long, default_value_t = 365)]
    pub maturity_days: i64,

    #[command(flatten)]
    pub market: MarketArgs,

    #[command(flatten)]
    pub simulation: SimulationArgs,
}

/// Asian option flags
#[derive(Debug, Clone, Args)]
pub struct AsianArgs {
    /// call or put
    #[arg(long, default_value = "call")]
    pub option_type: OptionType,

    /// Fixing dates as day offsets from the valuation date; the last one is
    /// the expiry
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub fixings: Vec<i64>,

    /// Fixings already observed
    #[arg(long, default_value_t = 0)]
    pub past_fixings: usize,

    /// Sum of the observed fixings
    #[arg(long, default_value_t = 0.0)]
    pub running_sum: f64,

    #[command(flatten)]
    pub market: MarketArgs,

    #[command(flatten)]
    pub simulation: SimulationArgs,
}

impl Product {
    /// Flag groups shared with `check`.
    pub fn overrides(&self) -> (&MarketArgs, &SimulationArgs) {
        match self {
            Product::European(args) => (&args.market, &args.simulation),
            Product::Asian(args) => (&args.market, &args.simulation),
        }
    }
}

/// Pricing outcome as printed
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub product: &'static str,
    pub option_type: String,
    pub valuation_date: Date,
    pub expiry: Date,
    pub policy: Policy,
    #[serde(flatten)]
    pub result: McResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytic: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_in_std_errors: Option<f64>,
}

/// Run the price command
pub fn run(mut config: McPriceConfig, product: &Product, format: OutputFormat) -> Result<()> {
    let (market, simulation) = product.overrides();
    apply_overrides(&mut config, market, simulation);
    config.validate()?;

    let report = price(&config, product)?;
    info!(
        product = report.product,
        value = report.result.value,
        samples = report.result.samples,
        "pricing complete"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_table(&report),
    }
    Ok(())
}

/// Price `product` under an already validated `config`.
pub fn price(config: &McPriceConfig, product: &Product) -> Result<PriceReport> {
    let today = config.market.valuation_date()?;
    match product {
        Product::European(args) => price_european(config, args, today),
        Product::Asian(args) => price_asian(config, args, today),
    }
}

fn price_european(config: &McPriceConfig, args: &EuropeanArgs, today: Date) -> Result<PriceReport> {
    let expiry = today.add_days(args.maturity_days);
    let option = VanillaOption::new(
        Payoff::plain_vanilla(args.option_type, args.strike)?,
        Exercise::european(expiry),
    );

    let builder = european_builder(config, today);
    let result = match config.simulation.policy {
        Policy::PseudoRandom => builder.build()?.calculate(&option)?,
        Policy::LowDiscrepancy => builder
            .with_random_policy::<LowDiscrepancy>()
            .build()?
            .calculate(&option)?,
    };

    let market = &config.market;
    let analytic = european_price(
        args.option_type,
        market.spot,
        args.strike,
        market.rate,
        market.dividend,
        market.vol,
        DAY_COUNT.year_fraction(today, expiry),
    )?;
    let gap_in_std_errors = result
        .error_estimate
        .filter(|e| *e > 0.0)
        .map(|e| (result.value - analytic) / e);

    Ok(PriceReport {
        product: "european",
        option_type: args.option_type.to_string(),
        valuation_date: today,
        expiry,
        policy: config.simulation.policy,
        result,
        analytic: Some(analytic),
        gap_in_std_errors,
    })
}

fn price_asian(config: &McPriceConfig, args: &AsianArgs, today: Date) -> Result<PriceReport> {
    let expiry_offset = args
        .fixings
        .iter()
        .copied()
        .max()
        .ok_or_else(|| CliError::InvalidArgument("at least one fixing is required".into()))?;
    let expiry = today.add_days(expiry_offset);
    let fixing_dates = args.fixings.iter().map(|d| today.add_days(*d)).collect();
    let option = DiscreteAveragingAsianOption::new(
        Payoff::plain_vanilla(args.option_type, 0.0)?,
        Exercise::european(expiry),
        args.running_sum,
        args.past_fixings,
        fixing_dates,
    )?;

    let builder = asian_builder(config, today);
    let result = match config.simulation.policy {
        Policy::PseudoRandom => builder.build()?.calculate(&option)?,
        Policy::LowDiscrepancy => builder
            .with_random_policy::<LowDiscrepancy>()
            .build()?
            .calculate(&option)?,
    };

    Ok(PriceReport {
        product: "asian",
        option_type: args.option_type.to_string(),
        valuation_date: today,
        expiry,
        policy: config.simulation.policy,
        result,
        analytic: None,
        gap_in_std_errors: None,
    })
}

fn print_table(report: &PriceReport) {
    let fmt_opt = |v: Option<f64>, precision: usize| match v {
        Some(v) => format!("{v:.precision$}"),
        None => "n/a".to_string(),
    };
    let policy = match report.policy {
        Policy::PseudoRandom => "pseudo-random",
        Policy::LowDiscrepancy => "low-discrepancy",
    };

    let mut rows = vec![
        ("Product", format!("{} {}", report.product, report.option_type)),
        ("Valuation date", report.valuation_date.to_string()),
        ("Expiry", report.expiry.to_string()),
        ("Policy", policy.to_string()),
        ("MC value", format!("{:.6}", report.result.value)),
        ("Std error", fmt_opt(report.result.error_estimate, 6)),
        ("Samples", report.result.samples.to_string()),
        (
            "Status",
            if report.result.is_converged() {
                "converged".to_string()
            } else {
                "NOT CONVERGED".to_string()
            },
        ),
    ];
    if report.analytic.is_some() {
        rows.push(("Analytic", fmt_opt(report.analytic, 6)));
        rows.push(("Gap (std err)", fmt_opt(report.gap_in_std_errors, 2)));
    }

    println!("\n┌────────────────┬──────────────────────────┐");
    for (label, value) in rows {
        println!("│ {label:<14} │ {value:<24} │");
    }
    println!("└────────────────┴──────────────────────────┘");
}
