//! Dispersion of the residuals left after trend and seasonality.

use super::seasonality::SeasonalProfile;
use super::trend::LinearTrend;
use crate::core::TimeSeries;
use crate::utils::stats::std_dev;
use tracing::debug;

/// In-sample fit and residual spread of a trend + seasonal decomposition.
///
/// The band built from `sigma` assumes residuals are roughly independent,
/// identically distributed and symmetric. Nothing checks that assumption.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualModel {
    fitted: Vec<f64>,
    residuals: Vec<f64>,
    sigma: f64,
}

impl ResidualModel {
    /// Compute residuals of `series` against `trend + seasonality`.
    pub fn fit(series: &TimeSeries, trend: &LinearTrend, seasonality: &SeasonalProfile) -> Self {
        Self::fit_values(series.values(), trend, seasonality)
    }

    pub fn fit_values(values: &[f64], trend: &LinearTrend, seasonality: &SeasonalProfile) -> Self {
        let fitted: Vec<f64> = (0..values.len())
            .map(|day| trend.at(day) + seasonality.offset(day))
            .collect();
        let residuals: Vec<f64> = values.iter().zip(&fitted).map(|(y, f)| y - f).collect();

        // Sample standard deviation; a single residual has no spread
        let sigma = if residuals.len() < 2 {
            0.0
        } else {
            std_dev(&residuals)
        };

        debug!(
            observations = residuals.len(),
            sigma = sigma,
            "residual dispersion estimated"
        );

        Self {
            fitted,
            residuals,
            sigma,
        }
    }

    /// Sample standard deviation of the residuals.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// In-sample trend + seasonal values.
    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    /// Observed minus fitted, per day.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    pub(crate) fn into_parts(self) -> (Vec<f64>, Vec<f64>, f64) {
        (self.fitted, self.residuals, self.sigma)
    }
}
