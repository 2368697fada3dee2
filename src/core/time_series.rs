//! TimeSeries data structure for gap-free daily observations.

use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};

/// A daily time series: one finite value per calendar day, no gaps.
///
/// Day index 0 is the first date. Because the cadence is gap-free, the day
/// index of an observation is its position in the series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from explicit dates and values.
    ///
    /// Dates must be strictly increasing with exactly one day between
    /// neighbours, and every value must be finite.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }

        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ForecastError::TimestampError(format!(
                    "dates must be strictly increasing ({} followed by {})",
                    pair[0], pair[1]
                )));
            }
            if pair[0].succ_opt() != Some(pair[1]) {
                return Err(ForecastError::TimestampError(format!(
                    "missing calendar days between {} and {}",
                    pair[0], pair[1]
                )));
            }
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::MissingValues);
        }

        Ok(Self { dates, values })
    }

    /// Create a series of consecutive days starting at `start`.
    pub fn daily(start: NaiveDate, values: Vec<f64>) -> Result<Self> {
        let dates = (0..values.len() as u64)
            .map(|i| {
                start.checked_add_days(Days::new(i)).ok_or_else(|| {
                    ForecastError::TimestampError(format!(
                        "date overflow {} days after {}",
                        i, start
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(dates, values)
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First date of the series.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Last date of the series.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Elapsed days between the first date and `date`, if `date` is covered.
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        let start = self.start_date()?;
        let offset = usize::try_from((date - start).num_days()).ok()?;
        (offset < self.len()).then_some(offset)
    }

    /// Value observed on `date`.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.day_index(date).map(|i| self.values[i])
    }

    /// Iterate over `(date, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Extract the observations in `start..end` as a new series.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(ForecastError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.len(),
                got: end,
            });
        }

        Ok(TimeSeries {
            dates: self.dates[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }

    /// The first `n` observations (or fewer if the series is shorter).
    pub fn head(&self, n: usize) -> TimeSeries {
        let end = n.min(self.len());
        TimeSeries {
            dates: self.dates[..end].to_vec(),
            values: self.values[..end].to_vec(),
        }
    }
}
