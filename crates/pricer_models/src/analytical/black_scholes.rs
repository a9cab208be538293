//! Black-Scholes-Merton prices for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::OptionType;

/// Black-Scholes-Merton model with a continuous dividend yield.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// assert!((call - 10.4506).abs() < 1e-4);
///
/// // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
/// let put = bs.price_put(100.0, 1.0);
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    dividend: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot is not positive and finite
    /// - `AnalyticalError::InvalidVolatility` if volatility is not positive and finite
    pub fn new(spot: T, rate: T, dividend: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();
        if !(spot > zero && spot.is_finite()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility > zero && volatility.is_finite()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend(&self) -> T {
        self.dividend
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap_or_else(T::zero);
        let carry = self.rate - self.dividend + half * self.volatility * self.volatility;
        ((self.spot / strike).ln() + carry * expiry) / (self.volatility * expiry.sqrt())
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European option price.
    ///
    /// At zero expiry or zero strike the discounted forward payoff is returned.
    pub fn price(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        let zero = T::zero();
        let df = (-self.rate * expiry).exp();
        let forward = self.spot * ((self.rate - self.dividend) * expiry).exp();
        let sign = if option_type == OptionType::Call {
            T::one()
        } else {
            -T::one()
        };

        if expiry <= zero || strike <= zero {
            return df * (sign * (forward - strike)).max(zero);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        sign * df * (forward * norm_cdf(sign * d1) - strike * norm_cdf(sign * d2))
    }

    /// European call price.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        self.price(OptionType::Call, strike, expiry)
    }

    /// European put price.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        self.price(OptionType::Put, strike, expiry)
    }
}

/// Validated f64 price for a plain-vanilla European option.
///
/// # Errors
/// Spot, volatility, strike or expiry out of range.
pub fn european_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    expiry: f64,
) -> Result<f64, AnalyticalError> {
    if !(strike.is_finite() && strike >= 0.0) {
        return Err(AnalyticalError::InvalidStrike { strike });
    }
    if !(expiry.is_finite() && expiry >= 0.0) {
        return Err(AnalyticalError::InvalidExpiry { expiry });
    }
    Ok(BlackScholes::new(spot, rate, dividend, volatility)?.price(option_type, strike, expiry))
}
