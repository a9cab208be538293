//! Monte Carlo prices against closed-form values.
//!
//! # Test Categories
//!
//! 1. **European options**: MC vs Black-Scholes-Merton
//! 2. **Low-discrepancy sampling**: Halton vs Black-Scholes-Merton
//! 3. **Asian options**: model-free bounds on the average-strike option

mod common;

use approx::assert_relative_eq;
use common::{asian, european, process, today, DIVIDEND, RATE, SPOT, VOL};
use pricer_models::analytical::european_price;
use pricer_models::instruments::OptionType;
use pricer_pricing::mc::{McDiscreteArithmeticAsEngineBuilder, McEuropeanEngineBuilder};
use pricer_pricing::rng::LowDiscrepancy;

fn black_scholes(option_type: OptionType, strike: f64, expiry: f64) -> f64 {
    european_price(option_type, SPOT, strike, RATE, DIVIDEND, VOL, expiry).unwrap()
}

// ============================================================================
// European Options
// ============================================================================

#[test]
fn test_european_call_mc_vs_black_scholes() {
    let analytical = black_scholes(OptionType::Call, 100.0, 1.0);
    assert_relative_eq!(analytical, 10.4506, epsilon = 1e-3);

    let mut engine = McEuropeanEngineBuilder::new(process())
        .with_steps(1)
        .with_samples(100_000)
        .with_seed(42)
        .build()
        .unwrap();
    let result = engine.calculate(&european(OptionType::Call, 100.0, 365)).unwrap();

    let error = result.error_estimate.unwrap();
    assert!(error < 0.06, "standard error {error} too large for 100k draws");
    assert!(
        (result.value - analytical).abs() < 3.0 * error,
        "MC {} vs BS {analytical} (stderr {error})",
        result.value
    );
    assert!(result.is_converged());
    assert_eq!(result.samples, 100_000);
}

#[test]
fn test_european_put_mc_vs_black_scholes() {
    let expiry = 182.0 / 365.0;
    let analytical = black_scholes(OptionType::Put, 110.0, expiry);

    let mut engine = McEuropeanEngineBuilder::new(process())
        .with_steps_per_year(12)
        .with_samples(50_000)
        .with_seed(7)
        .build()
        .unwrap();
    let result = engine.calculate(&european(OptionType::Put, 110.0, 182)).unwrap();

    assert!((result.value - analytical).abs() < 4.0 * result.error_estimate.unwrap());
}

#[test]
fn test_time_steps_do_not_bias_european_price() {
    let analytical = black_scholes(OptionType::Call, 95.0, 1.0);
    for steps in [1, 4, 52] {
        let mut engine = McEuropeanEngineBuilder::new(process())
            .with_steps(steps)
            .with_samples(40_000)
            .with_seed(11)
            .build()
            .unwrap();
        let result = engine.calculate(&european(OptionType::Call, 95.0, 365)).unwrap();
        assert!(
            (result.value - analytical).abs() < 4.0 * result.error_estimate.unwrap(),
            "{steps} steps: MC {} vs BS {analytical}",
            result.value
        );
    }
}

#[test]
fn test_antithetic_european_close_to_black_scholes() {
    let option = european(OptionType::Call, 100.0, 365);
    let plain = McEuropeanEngineBuilder::new(process())
        .with_steps(1)
        .with_samples(20_000)
        .with_seed(5)
        .build()
        .unwrap()
        .calculate(&option)
        .unwrap();
    let paired = McEuropeanEngineBuilder::new(process())
        .with_steps(1)
        .with_samples(10_000)
        .with_antithetic_variate(true)
        .with_seed(5)
        .build()
        .unwrap()
        .calculate(&option)
        .unwrap();

    assert_eq!(plain.samples, paired.samples);
    let analytical = black_scholes(OptionType::Call, 100.0, 1.0);
    assert!((paired.value - analytical).abs() < 4.0 * paired.error_estimate.unwrap());
}

#[test]
fn test_later_evaluation_date_prices_remaining_life() {
    // Curves referenced today, option expiring in two years, valued a year on
    let mut engine = McEuropeanEngineBuilder::new(process())
        .with_steps(1)
        .with_samples(100_000)
        .with_seed(17)
        .with_evaluation_date(today().add_days(365))
        .build()
        .unwrap();
    let result = engine
        .calculate(&european(OptionType::Call, 100.0, 730))
        .unwrap();

    let one_year = black_scholes(OptionType::Call, 100.0, 1.0);
    let two_years = black_scholes(OptionType::Call, 100.0, 2.0);
    let se = result.error_estimate.unwrap();
    assert!(
        (result.value - one_year).abs() < 4.0 * se,
        "MC {} vs BS(T=1) {} (se {})",
        result.value,
        one_year,
        se
    );
    assert!((result.value - two_years).abs() > 10.0 * se);
}

// ============================================================================
// Low-Discrepancy Sampling
// ============================================================================

#[test]
fn test_halton_european_close_to_black_scholes() {
    let analytical = black_scholes(OptionType::Call, 100.0, 1.0);

    let mut engine = McEuropeanEngineBuilder::new(process())
        .with_random_policy::<LowDiscrepancy>()
        .with_steps(1)
        .with_samples(65_535)
        .with_seed(1)
        .build()
        .unwrap();
    let result = engine.calculate(&european(OptionType::Call, 100.0, 365)).unwrap();

    assert_eq!(result.error_estimate, None);
    assert_relative_eq!(result.value, analytical, max_relative = 0.01);
}

// ============================================================================
// Asian Options
// ============================================================================

#[test]
fn test_average_strike_call_bounds() {
    // The average-strike call is worth less than the European call at the
    // same expiry and more than zero.
    let european_call = black_scholes(OptionType::Call, SPOT, 1.0);

    let mut engine = McDiscreteArithmeticAsEngineBuilder::new(process())
        .with_samples(30_000)
        .with_seed(42)
        .build()
        .unwrap();
    let result = engine.calculate(&asian(OptionType::Call, 91, 4)).unwrap();

    assert!(result.value > 0.0);
    assert!(result.value < european_call);
    assert!(result.error_estimate.unwrap() < 0.1);
}

#[test]
fn test_average_strike_single_fixing_at_expiry_is_worthless() {
    // With the only fixing on the expiry date the strike equals the final
    // spot and every path pays zero.
    let mut engine = McDiscreteArithmeticAsEngineBuilder::new(process())
        .with_samples(500)
        .with_seed(3)
        .build()
        .unwrap();
    let result = engine.calculate(&asian(OptionType::Call, 365, 1)).unwrap();

    assert_eq!(result.value, 0.0);
    assert_eq!(result.error_estimate, Some(0.0));
}

#[test]
fn test_bridge_and_incremental_agree_for_asian() {
    let option = asian(OptionType::Put, 30, 12);
    let price = |bridge: bool| {
        McDiscreteArithmeticAsEngineBuilder::new(process())
            .with_brownian_bridge(bridge)
            .with_samples(40_000)
            .with_seed(9)
            .build()
            .unwrap()
            .calculate(&option)
            .unwrap()
    };
    let bridged = price(true);
    let incremental = price(false);

    let combined = bridged
        .error_estimate
        .unwrap()
        .hypot(incremental.error_estimate.unwrap());
    assert!((bridged.value - incremental.value).abs() < 4.0 * combined);
}
