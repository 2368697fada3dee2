//! Forecaster trait defining the fit/predict lifecycle.

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;

/// Common interface for daily forecasting models.
///
/// A model starts unfitted. `fit` moves it to the fitted state exactly once;
/// `predict` is only valid afterwards and fails with
/// [`ForecastError::FitRequired`](crate::error::ForecastError::FitRequired)
/// before that.
pub trait Forecaster {
    /// Fit the model to the time series data.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Forecast `horizon` days past the end of the fitted series.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Get the fitted values (in-sample predictions).
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Get the residuals (actual - fitted).
    fn residuals(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}
