//! Market quotes.
//!
//! A [`Quote`] is a shared, possibly changing, scalar observable such as a
//! spot price or a flat rate. Term structures and processes hold quotes
//! through [`QuoteHandle`] so that a single update is seen by every holder.

use std::fmt;
use std::sync::{Arc, RwLock};

use super::error::MarketDataError;

/// Scalar market observable.
pub trait Quote: Send + Sync + fmt::Debug {
    /// Current value.
    ///
    /// # Errors
    /// `MissingQuote` if the quote has no value.
    fn value(&self) -> Result<f64, MarketDataError>;

    /// Whether the quote currently holds a usable value.
    fn is_valid(&self) -> bool {
        self.value().is_ok()
    }
}

/// Shared handle to a quote.
pub type QuoteHandle = Arc<dyn Quote>;

/// Quote whose value can be set and reset after construction.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{Quote, SimpleQuote};
///
/// let spot = SimpleQuote::new(100.0);
/// assert_eq!(spot.value().unwrap(), 100.0);
///
/// spot.set_value(105.0).unwrap();
/// assert_eq!(spot.value().unwrap(), 105.0);
///
/// spot.reset();
/// assert!(spot.value().is_err());
/// ```
#[derive(Debug, Default)]
pub struct SimpleQuote {
    value: RwLock<Option<f64>>,
}

impl SimpleQuote {
    /// Quote holding `value`.
    pub fn new(value: f64) -> Self {
        Self {
            value: RwLock::new(Some(value)),
        }
    }

    /// Quote with no value yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the value, returning the previous one.
    ///
    /// # Errors
    /// `InvalidQuote` for NaN or infinite values; the quote is left unchanged.
    pub fn set_value(&self, value: f64) -> Result<Option<f64>, MarketDataError> {
        if !value.is_finite() {
            return Err(MarketDataError::InvalidQuote { value });
        }
        let mut guard = self.value.write().unwrap_or_else(|e| e.into_inner());
        Ok(guard.replace(value))
    }

    /// Clear the value.
    pub fn reset(&self) {
        let mut guard = self.value.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    /// Wrap in a shared handle.
    pub fn into_handle(self) -> QuoteHandle {
        Arc::new(self)
    }
}

impl Quote for SimpleQuote {
    fn value(&self) -> Result<f64, MarketDataError> {
        let guard = self.value.read().unwrap_or_else(|e| e.into_inner());
        guard.ok_or(MarketDataError::MissingQuote)
    }
}
