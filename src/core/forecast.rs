//! Forecast rows and the forecast table handed to callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One forecast date with its point estimate and interval bounds.
///
/// Field names are the column names of the exported table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    /// Point estimate.
    pub yhat: f64,
    /// Lower interval bound.
    pub yhat_lower: f64,
    /// Upper interval bound.
    pub yhat_upper: f64,
}

impl ForecastRow {
    /// Build a row from a point estimate and a symmetric half-width.
    pub fn symmetric(date: NaiveDate, yhat: f64, half_width: f64) -> Self {
        let half_width = half_width.abs();
        Self {
            date,
            yhat,
            yhat_lower: yhat - half_width,
            yhat_upper: yhat + half_width,
        }
    }

    /// Width of the interval band.
    pub fn interval_width(&self) -> f64 {
        self.yhat_upper - self.yhat_lower
    }

    /// Check whether `value` falls inside the band (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.yhat_lower && value <= self.yhat_upper
    }
}

/// An ordered table of forecast rows, one per day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    rows: Vec<ForecastRow>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<ForecastRow>) -> Self {
        Self { rows }
    }

    /// Number of rows in the table.
    pub fn horizon(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ForecastRow> {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastRow> {
        self.rows.iter()
    }

    pub fn first(&self) -> Option<&ForecastRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&ForecastRow> {
        self.rows.last()
    }

    /// The last `n` rows (or all of them if there are fewer).
    pub fn tail(&self, n: usize) -> &[ForecastRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Point predictions in date order.
    pub fn point(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.yhat).collect()
    }

    pub fn lower(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.yhat_lower).collect()
    }

    pub fn upper(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.yhat_upper).collect()
    }

    /// Append the rows of `other` after this table's rows.
    pub fn extend_from(&mut self, other: Forecast) {
        self.rows.extend(other.rows);
    }
}

impl FromIterator<ForecastRow> for Forecast {
    fn from_iter<I: IntoIterator<Item = ForecastRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Forecast {
    type Item = ForecastRow;
    type IntoIter = std::vec::IntoIter<ForecastRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Forecast {
    type Item = &'a ForecastRow;
    type IntoIter = std::slice::Iter<'a, ForecastRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
