//! Closed-form prices used to cross-check the Monte Carlo engines.
//!
//! - Black-Scholes-Merton for European options with a continuous dividend yield
//! - Standard normal CDF/PDF
//!
//! Formulas are generic over `T: Float`.

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::{european_price, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
