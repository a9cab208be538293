//! Shared market fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
use pricer_core::types::{Date, DayCountConvention};
use pricer_models::instruments::{
    DiscreteAveragingAsianOption, Exercise, OptionType, Payoff, VanillaOption,
};
use pricer_models::processes::GeneralizedBlackScholesProcess;

pub const SPOT: f64 = 100.0;
pub const RATE: f64 = 0.05;
pub const DIVIDEND: f64 = 0.0;
pub const VOL: f64 = 0.2;

pub fn today() -> Date {
    Date::from_ymd(2026, 1, 2).unwrap()
}

pub fn day_count() -> DayCountConvention {
    DayCountConvention::ActualActual365
}

/// Flat market whose quotes can be bumped after construction.
pub struct Market {
    pub spot: Arc<SimpleQuote>,
    pub rate: Arc<SimpleQuote>,
    pub vol: Arc<SimpleQuote>,
    pub process: GeneralizedBlackScholesProcess,
}

pub fn market() -> Market {
    let spot = Arc::new(SimpleQuote::new(SPOT));
    let rate = Arc::new(SimpleQuote::new(RATE));
    let vol = Arc::new(SimpleQuote::new(VOL));
    let process = GeneralizedBlackScholesProcess::new(
        spot.clone(),
        Arc::new(FlatForward::new(today(), DIVIDEND, day_count())),
        Arc::new(FlatForward::with_quote(today(), rate.clone(), day_count())),
        Arc::new(BlackConstantVol::with_quote(today(), vol.clone(), day_count())),
    );
    Market {
        spot,
        rate,
        vol,
        process,
    }
}

pub fn process() -> GeneralizedBlackScholesProcess {
    market().process
}

pub fn european(option_type: OptionType, strike: f64, days: i64) -> VanillaOption {
    VanillaOption::new(
        Payoff::plain_vanilla(option_type, strike).unwrap(),
        Exercise::european(today().add_days(days)),
    )
}

/// Average-strike option fixing every `spacing` days, `count` times.
pub fn asian(option_type: OptionType, spacing: i64, count: i64) -> DiscreteAveragingAsianOption {
    let fixings: Vec<Date> = (1..=count).map(|i| today().add_days(spacing * i)).collect();
    let expiry = today().add_days(spacing * count);
    DiscreteAveragingAsianOption::new(
        Payoff::plain_vanilla(option_type, 0.0).unwrap(),
        Exercise::european(expiry),
        0.0,
        0,
        fixings,
    )
    .unwrap()
}
