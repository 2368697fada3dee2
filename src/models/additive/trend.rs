//! Linear trend over elapsed days.

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use tracing::debug;

/// A fitted straight line `slope * day + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    /// Change in value per day.
    pub slope: f64,
    /// Value at day 0 (the first observed date).
    pub intercept: f64,
}

impl LinearTrend {
    /// Trend value at the given day index.
    pub fn at(&self, day_index: usize) -> f64 {
        self.slope * day_index as f64 + self.intercept
    }
}

/// Ordinary least squares fit of value against day index.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendEstimator;

impl TrendEstimator {
    /// Fit a linear trend to the series.
    pub fn fit(series: &TimeSeries) -> Result<LinearTrend> {
        Self::fit_values(series.values())
    }

    /// Fit a linear trend to consecutive daily values (day 0 = first value).
    ///
    /// Single pass using running means and co-moments, so large level
    /// offsets do not cancel catastrophically.
    pub fn fit_values(values: &[f64]) -> Result<LinearTrend> {
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }

        let mut mean_x = 0.0;
        let mut mean_y = 0.0;
        let mut co_moment = 0.0;
        let mut m2_x = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let n = (i + 1) as f64;
            let x = i as f64;
            let dx = x - mean_x;
            mean_x += dx / n;
            mean_y += (y - mean_y) / n;
            co_moment += dx * (y - mean_y);
            m2_x += dx * (x - mean_x);
        }

        // m2_x > 0 whenever there are two distinct day indices
        let slope = co_moment / m2_x;
        let intercept = mean_y - slope * mean_x;

        debug!(
            observations = values.len(),
            slope = slope,
            intercept = intercept,
            "trend fitted"
        );

        Ok(LinearTrend { slope, intercept })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn trend_recovers_perfect_line() {
        let values: Vec<f64> = (0..30).map(|d| 5.0 + 2.0 * d as f64).collect();
        let trend = TrendEstimator::fit_values(&values).unwrap();

        assert_relative_eq!(trend.slope, 2.0, epsilon = 1e-10);
        assert_relative_eq!(trend.intercept, 5.0, epsilon = 1e-10);
        assert_relative_eq!(trend.at(40), 85.0, epsilon = 1e-9);
    }

    #[test]
    fn trend_of_constant_series_is_flat() {
        let trend = TrendEstimator::fit_values(&[42.0; 12]).unwrap();
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.intercept, 42.0);
    }

    #[test]
    fn trend_negative_slope() {
        let values: Vec<f64> = (0..10).map(|d| 100.0 - 3.5 * d as f64).collect();
        let trend = TrendEstimator::fit_values(&values).unwrap();
        assert_relative_eq!(trend.slope, -3.5, epsilon = 1e-10);
        assert_relative_eq!(trend.intercept, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn trend_two_points_passes_through_both() {
        let trend = TrendEstimator::fit_values(&[3.0, 7.0]).unwrap();
        assert_relative_eq!(trend.slope, 4.0, epsilon = 1e-12);
        assert_relative_eq!(trend.intercept, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn trend_matches_textbook_least_squares() {
        let values = [2.0, 4.0, 5.0, 4.0, 5.0];
        // x = 0..4, x̄ = 2, ȳ = 4, Sxy = 6, Sxx = 10
        let trend = TrendEstimator::fit_values(&values).unwrap();
        assert_relative_eq!(trend.slope, 0.6, epsilon = 1e-12);
        assert_relative_eq!(trend.intercept, 2.8, epsilon = 1e-12);
    }

    #[test]
    fn trend_stable_with_large_offset_and_long_series() {
        let values: Vec<f64> = (0..20_000).map(|d| 1.0e9 + 0.25 * d as f64).collect();
        let trend = TrendEstimator::fit_values(&values).unwrap();
        assert_relative_eq!(trend.slope, 0.25, epsilon = 1e-6);
        assert_relative_eq!(trend.intercept, 1.0e9, max_relative = 1e-12);
    }

    #[test]
    fn trend_requires_two_points() {
        assert_eq!(
            TrendEstimator::fit_values(&[1.0]),
            Err(ForecastError::InsufficientData { needed: 2, got: 1 })
        );
        assert_eq!(
            TrendEstimator::fit_values(&[]),
            Err(ForecastError::InsufficientData { needed: 2, got: 0 })
        );
    }
}
