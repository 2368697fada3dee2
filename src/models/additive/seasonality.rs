//! Fixed-period additive seasonality estimated from detrended values.
//!
//! Every observation is assigned a phase `day_index % period`. The offset of a
//! phase is the mean detrended value of its observations; offsets are then
//! shifted so they sum to zero, leaving the level entirely to the trend.

use super::trend::LinearTrend;
use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use tracing::debug;

/// Seasonal offsets indexed by phase.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalProfile {
    offsets: Vec<f64>,
}

impl SeasonalProfile {
    /// Seasonal period in days.
    pub fn period(&self) -> usize {
        self.offsets.len()
    }

    /// Offsets for phases `0..period`.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Offset applied on the given day index.
    pub fn offset(&self, day_index: usize) -> f64 {
        self.offsets[day_index % self.offsets.len()]
    }

    /// Sum of all offsets; zero up to rounding.
    pub fn total(&self) -> f64 {
        self.offsets.iter().sum()
    }
}

/// Per-phase averaging of detrended values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalityEstimator;

impl SeasonalityEstimator {
    /// Estimate the seasonal profile of `series` around `trend`.
    ///
    /// `period` must be at least 2 and strictly shorter than the series.
    pub fn fit(series: &TimeSeries, trend: &LinearTrend, period: usize) -> Result<SeasonalProfile> {
        Self::fit_values(series.values(), trend, period)
    }

    pub fn fit_values(
        values: &[f64],
        trend: &LinearTrend,
        period: usize,
    ) -> Result<SeasonalProfile> {
        if period < 2 || period >= values.len() {
            return Err(ForecastError::InvalidPeriod {
                period,
                len: values.len(),
            });
        }

        let mut sums = vec![0.0; period];
        let mut counts = vec![0usize; period];
        for (day, &value) in values.iter().enumerate() {
            let phase = day % period;
            sums[phase] += value - trend.at(day);
            counts[phase] += 1;
        }

        // A phase with no observations keeps offset 0
        let mut offsets: Vec<f64> = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| if count == 0 { 0.0 } else { sum / count as f64 })
            .collect();

        let centre = offsets.iter().sum::<f64>() / period as f64;
        for offset in &mut offsets {
            *offset -= centre;
        }

        debug!(
            period = period,
            centre = centre,
            offsets = ?offsets,
            "seasonality fitted"
        );

        Ok(SeasonalProfile { offsets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::additive::trend::TrendEstimator;
    use approx::assert_abs_diff_eq;

    const FLAT: LinearTrend = LinearTrend {
        slope: 0.0,
        intercept: 0.0,
    };

    #[test]
    fn seasonality_recovers_weekly_pattern() {
        let pattern = [3.0, -1.0, -1.0, -1.0, -1.0, 0.5, 0.5];
        let values: Vec<f64> = (0..28).map(|d| 100.0 + pattern[d % 7]).collect();
        let level = LinearTrend {
            slope: 0.0,
            intercept: 100.0,
        };

        let profile = SeasonalityEstimator::fit_values(&values, &level, 7).unwrap();

        assert_eq!(profile.period(), 7);
        for (phase, expected) in pattern.iter().enumerate() {
            assert_abs_diff_eq!(profile.offsets()[phase], *expected, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(profile.total(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn seasonality_offsets_are_recentred() {
        // Detrended values all shifted by +10: recentring removes the shift
        let values = vec![11.0, 9.0, 11.0, 9.0, 11.0, 9.0];
        let profile = SeasonalityEstimator::fit_values(&values, &FLAT, 2).unwrap();

        assert_abs_diff_eq!(profile.offsets()[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(profile.offsets()[1], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(profile.total(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn seasonality_offset_wraps_by_phase() {
        let values = vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0];
        let profile = SeasonalityEstimator::fit_values(&values, &FLAT, 3).unwrap();

        assert_eq!(profile.offset(0), profile.offset(3));
        assert_eq!(profile.offset(4), profile.offset(301));
    }

    #[test]
    fn seasonality_of_linear_series_is_zero() {
        let values: Vec<f64> = (0..30).map(|d| 5.0 + 2.0 * d as f64).collect();
        let trend = TrendEstimator::fit_values(&values).unwrap();
        let profile = SeasonalityEstimator::fit_values(&values, &trend, 7).unwrap();

        for offset in profile.offsets() {
            assert_abs_diff_eq!(*offset, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn seasonality_rejects_invalid_periods() {
        let values = vec![1.0; 7];
        assert_eq!(
            SeasonalityEstimator::fit_values(&values, &FLAT, 7),
            Err(ForecastError::InvalidPeriod { period: 7, len: 7 })
        );
        assert_eq!(
            SeasonalityEstimator::fit_values(&values, &FLAT, 1),
            Err(ForecastError::InvalidPeriod { period: 1, len: 7 })
        );
        assert_eq!(
            SeasonalityEstimator::fit_values(&values, &FLAT, 0),
            Err(ForecastError::InvalidPeriod { period: 0, len: 7 })
        );
        assert!(SeasonalityEstimator::fit_values(&values, &FLAT, 6).is_ok());
    }
}
