//! Option exercise definitions.

use pricer_core::types::Date;

use super::error::InstrumentError;

/// When an option can be exercised.
///
/// The Monte Carlo engines here accept only [`Exercise::European`].
///
/// # Examples
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::Exercise;
///
/// let d1 = Date::from_ymd(2026, 6, 30).unwrap();
/// let d2 = Date::from_ymd(2026, 12, 31).unwrap();
///
/// let bermudan = Exercise::bermudan(vec![d2, d1]).unwrap();
/// assert_eq!(bermudan.dates(), vec![d1, d2]);
/// assert_eq!(bermudan.last_date(), d2);
/// assert!(!bermudan.is_european());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exercise {
    /// Exercise on a single date.
    European {
        /// Expiry date
        date: Date,
    },
    /// Exercise on any date in a window.
    American {
        /// First exercise date
        earliest: Date,
        /// Last exercise date
        latest: Date,
    },
    /// Exercise on a set of dates.
    Bermudan {
        /// Sorted exercise dates
        dates: Vec<Date>,
    },
}

impl Exercise {
    /// European exercise at `date`.
    #[inline]
    pub fn european(date: Date) -> Self {
        Exercise::European { date }
    }

    /// American exercise between `earliest` and `latest` inclusive.
    pub fn american(earliest: Date, latest: Date) -> Result<Self, InstrumentError> {
        if earliest > latest {
            return Err(InstrumentError::InvalidExerciseWindow { earliest, latest });
        }
        Ok(Exercise::American { earliest, latest })
    }

    /// Bermudan exercise on `dates`, sorted and deduplicated.
    pub fn bermudan(mut dates: Vec<Date>) -> Result<Self, InstrumentError> {
        if dates.is_empty() {
            return Err(InstrumentError::NoExerciseDates);
        }
        dates.sort();
        dates.dedup();
        Ok(Exercise::Bermudan { dates })
    }

    /// Exercise dates; the window bounds for American exercise.
    pub fn dates(&self) -> Vec<Date> {
        match self {
            Exercise::European { date } => vec![*date],
            Exercise::American { earliest, latest } => vec![*earliest, *latest],
            Exercise::Bermudan { dates } => dates.clone(),
        }
    }

    /// Last date on which the option can be exercised.
    pub fn last_date(&self) -> Date {
        match self {
            Exercise::European { date } => *date,
            Exercise::American { latest, .. } => *latest,
            Exercise::Bermudan { dates } => dates[dates.len() - 1],
        }
    }

    /// Whether this is [`Exercise::European`].
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, Exercise::European { .. })
    }

    /// Exercise style name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Exercise::European { .. } => "European",
            Exercise::American { .. } => "American",
            Exercise::Bermudan { .. } => "Bermudan",
        }
    }
}
