//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! Generic over `T: Float`.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function with fractional error below 1.2e-7.
///
/// Chebyshev-fitted rational form, accurate relative to the value itself so
/// deep tails keep their precision.
#[inline]
fn erfc<T: Float>(x: T) -> T {
    let c = |v: f64| T::from(v).unwrap_or_else(T::zero);
    let z = x.abs();
    let t = T::one() / (T::one() + c(0.5) * z);

    let poly = c(-1.265_512_23)
        + t * (c(1.000_023_68)
            + t * (c(0.374_091_96)
                + t * (c(0.096_784_18)
                    + t * (c(-0.186_288_06)
                        + t * (c(0.278_868_07)
                            + t * (c(-1.135_203_98)
                                + t * (c(1.488_515_87)
                                    + t * (c(-0.822_152_23) + t * c(0.170_872_77)))))))));

    let ans = t * (-z * z + poly).exp();
    if x >= T::zero() {
        ans
    } else {
        c(2.0) - ans
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½·erfc(−x/√2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!((norm_cdf(1.96_f64) - 0.975002).abs() < 1e-6);
/// assert!(norm_cdf(-8.0_f64) > 0.0);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap_or_else(T::zero);
    half * erfc(-x / T::from(std::f64::consts::SQRT_2).unwrap_or_else(T::one))
}

/// Standard normal probability density function.
///
/// φ(x) = exp(−x²/2)/√(2π)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398942280401).abs() < 1e-12);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let k = T::from(FRAC_1_SQRT_2PI).unwrap_or_else(T::zero);
    let half = T::from(0.5).unwrap_or_else(T::zero);
    k * (-half * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_known_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.841_344_746, epsilon = 2e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022_750_132, epsilon = 2e-8);
        assert_relative_eq!(norm_cdf(3.0_f64), 0.998_650_102, epsilon = 2e-7);
    }

    #[test]
    fn test_tail_relative_accuracy() {
        // Φ(-6) = 9.8659e-10
        assert_relative_eq!(norm_cdf(-6.0_f64), 9.865_876_45e-10, max_relative = 1e-6);
    }

    #[test]
    fn test_f32_support() {
        assert!((norm_cdf(0.5_f32) - 0.691_462_5).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_symmetry(x in -8.0f64..8.0) {
            prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-7);
            prop_assert!((norm_pdf(x) - norm_pdf(-x)).abs() < 1e-15);
        }
    }
}
