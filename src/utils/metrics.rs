//! Accuracy metrics for judging how well a fit tracks the observed demand.

use crate::core::ForecastRow;
use crate::error::{ForecastError, Result};

/// Accuracy summary of predictions against observations.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error (None if any actual is zero)
    pub mape: Option<f64>,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
    /// Mean Absolute Scaled Error against a seasonal naive forecast
    /// (None without enough history or when the naive error is zero)
    pub mase: Option<f64>,
    /// R-squared (coefficient of determination)
    pub r_squared: f64,
}

/// Calculate accuracy metrics between actual and predicted values.
///
/// `seasonal_period` selects the naive benchmark used for MASE; `None`
/// compares against the previous day.
pub fn calculate_metrics(
    actual: &[f64],
    predicted: &[f64],
    seasonal_period: Option<usize>,
) -> Result<AccuracyMetrics> {
    check_lengths(actual, predicted)?;

    let n = actual.len() as f64;
    let errors: Vec<f64> = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| a - p)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let sse: f64 = errors.iter().map(|e| e * e).sum();
    let mse = sse / n;

    let mape = if actual.contains(&0.0) {
        None
    } else {
        let sum: f64 = actual
            .iter()
            .zip(&errors)
            .map(|(a, e)| (e / a).abs())
            .sum();
        Some(100.0 * sum / n)
    };

    let smape = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let denom = a.abs() + p.abs();
            if denom == 0.0 {
                0.0
            } else {
                2.0 * (a - p).abs() / denom
            }
        })
        .sum::<f64>()
        * 100.0
        / n;

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let r_squared = if ss_tot == 0.0 {
        if sse == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - sse / ss_tot
    };

    Ok(AccuracyMetrics {
        mae,
        mse,
        rmse: mse.sqrt(),
        mape,
        smape,
        mase: seasonal_naive_scaled(actual, mae, seasonal_period.unwrap_or(1)),
        r_squared,
    })
}

/// MAE divided by the in-sample MAE of the seasonal naive forecast.
fn seasonal_naive_scaled(actual: &[f64], mae: f64, period: usize) -> Option<f64> {
    let n = actual.len();
    if period == 0 || n <= period {
        return None;
    }

    let naive_mae = actual
        .iter()
        .skip(period)
        .zip(actual)
        .map(|(curr, prev)| (curr - prev).abs())
        .sum::<f64>()
        / (n - period) as f64;

    (naive_mae > 0.0).then(|| mae / naive_mae)
}

/// Share of observations that fall inside their row's interval band.
///
/// Rows and actuals are paired positionally.
pub fn interval_coverage(actual: &[f64], rows: &[ForecastRow]) -> Result<f64> {
    if actual.is_empty() || rows.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if actual.len() != rows.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: rows.len(),
        });
    }

    let inside = actual
        .iter()
        .zip(rows)
        .filter(|(a, row)| row.contains(**a))
        .count();
    Ok(inside as f64 / actual.len() as f64)
}

fn check_lengths(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }
    Ok(())
}
