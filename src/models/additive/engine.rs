//! Additive trend + seasonality forecast engine.
//!
//! Fitting runs three stages in order, each consuming the previous output:
//!
//! 1. [`TrendEstimator`]: least-squares line over day indices.
//! 2. [`SeasonalityEstimator`]: per-phase mean of detrended values.
//! 3. [`ResidualModel`]: spread of what trend and seasonality leave behind.
//!
//! Forecasts extrapolate the line, add the phase offset and attach a
//! symmetric band of `z * sigma`, where `z` is the normal quantile for the
//! configured interval width.

use super::residual::ResidualModel;
use super::seasonality::{SeasonalProfile, SeasonalityEstimator};
use super::trend::{LinearTrend, TrendEstimator};
use crate::config::ForecastConfig;
use crate::core::{Forecast, ForecastRow, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::stats::interval_multiplier;
use chrono::{Days, NaiveDate};
use tracing::info;

/// Parameters produced by one successful fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    trend: LinearTrend,
    seasonality: SeasonalProfile,
    sigma: f64,
    z: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    last_day_index: usize,
}

impl FittedModel {
    /// Run trend, seasonality and residual estimation against `series`.
    ///
    /// Estimator errors are returned unchanged.
    pub fn fit(series: &TimeSeries, config: &ForecastConfig) -> Result<Self> {
        fit_stages(series, config).map(|(model, _)| model)
    }

    pub fn slope(&self) -> f64 {
        self.trend.slope
    }

    pub fn intercept(&self) -> f64 {
        self.trend.intercept
    }

    pub fn trend(&self) -> &LinearTrend {
        &self.trend
    }

    pub fn period(&self) -> usize {
        self.seasonality.period()
    }

    /// Seasonal offsets for phases `0..period`.
    pub fn seasonal_offsets(&self) -> &[f64] {
        self.seasonality.offsets()
    }

    pub fn seasonality(&self) -> &SeasonalProfile {
        &self.seasonality
    }

    /// Residual standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Normal quantile multiplying `sigma` to give the band half-width.
    pub fn interval_multiplier(&self) -> f64 {
        self.z
    }

    /// Half-width of every interval band.
    pub fn half_width(&self) -> f64 {
        self.z * self.sigma
    }

    /// First date of the fitted series (day index 0).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last date of the fitted series.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn last_day_index(&self) -> usize {
        self.last_day_index
    }

    /// Trend plus seasonal offset at `day_index`.
    pub fn point(&self, day_index: usize) -> f64 {
        self.trend.at(day_index) + self.seasonality.offset(day_index)
    }

    /// Row for `date` at `day_index`.
    pub fn row(&self, date: NaiveDate, day_index: usize) -> ForecastRow {
        ForecastRow::symmetric(date, self.point(day_index), self.half_width())
    }

    /// Lazily forecast `horizon` days after `series_end_date`.
    ///
    /// `series_end_date` is the date of the last fitted observation; the
    /// first row falls on the following day.
    pub fn rows(&self, series_end_date: NaiveDate, horizon: usize) -> Result<ForecastRows<'_>> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon(horizon));
        }
        if series_end_date
            .checked_add_days(Days::new(horizon as u64))
            .is_none()
        {
            return Err(ForecastError::TimestampError(format!(
                "{} days after {} is out of the calendar range",
                horizon, series_end_date
            )));
        }

        Ok(ForecastRows {
            model: self,
            end_date: series_end_date,
            next_offset: 1,
            horizon,
        })
    }
}

fn fit_stages(
    series: &TimeSeries,
    config: &ForecastConfig,
) -> Result<(FittedModel, ResidualModel)> {
    let trend = TrendEstimator::fit(series)?;
    let seasonality = SeasonalityEstimator::fit(series, &trend, config.period_days)?;
    let z = interval_multiplier(config.interval_width)?;
    let residual = ResidualModel::fit(series, &trend, &seasonality);

    // Finite input can still overflow the co-moments
    let finite = trend.slope.is_finite()
        && trend.intercept.is_finite()
        && residual.sigma().is_finite()
        && seasonality.offsets().iter().all(|o| o.is_finite());
    if !finite {
        return Err(ForecastError::InvalidParameter(
            "fitted parameters are not finite".to_string(),
        ));
    }

    let (start_date, end_date) = match (series.start_date(), series.end_date()) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(ForecastError::EmptyData),
    };

    let model = FittedModel {
        trend,
        seasonality,
        sigma: residual.sigma(),
        z,
        start_date,
        end_date,
        last_day_index: series.len() - 1,
    };
    Ok((model, residual))
}

/// Iterator over future forecast rows.
///
/// Finite and cheap to clone; cloning restarts from the same position.
#[derive(Debug, Clone)]
pub struct ForecastRows<'a> {
    model: &'a FittedModel,
    end_date: NaiveDate,
    next_offset: usize,
    horizon: usize,
}

impl Iterator for ForecastRows<'_> {
    type Item = ForecastRow;

    fn next(&mut self) -> Option<ForecastRow> {
        if self.next_offset > self.horizon {
            return None;
        }
        let offset = self.next_offset;
        self.next_offset += 1;

        // Range checked when the iterator was created
        let date = self.end_date.checked_add_days(Days::new(offset as u64))?;
        Some(self.model.row(date, self.model.last_day_index + offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.horizon + 1).saturating_sub(self.next_offset);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ForecastRows<'_> {}

impl std::iter::FusedIterator for ForecastRows<'_> {}

/// Additive trend + seasonality forecaster.
///
/// # Example
///
/// ```
/// use demand_forecast::prelude::*;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let values: Vec<f64> = (0..28).map(|d| 100.0 + (d % 7) as f64).collect();
/// let series = TimeSeries::daily(start, values).unwrap();
///
/// let mut engine = ForecastEngine::new(ForecastConfig::default());
/// engine.fit(&series).unwrap();
///
/// let forecast = engine.predict(30).unwrap();
/// assert_eq!(forecast.horizon(), 30);
/// assert_eq!(forecast.rows()[0].date, NaiveDate::from_ymd_opt(2025, 1, 29).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    config: ForecastConfig,
    model: Option<FittedModel>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl ForecastEngine {
    /// Create an unfitted engine.
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            config,
            model: None,
            fitted: None,
            residuals: None,
        }
    }

    /// Create an engine with the given seasonal period and default options.
    pub fn with_period(period_days: usize) -> Self {
        Self::new(ForecastConfig::default().with_period_days(period_days))
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Parameters of the fitted model.
    pub fn model(&self) -> Result<&FittedModel> {
        self.model.as_ref().ok_or(ForecastError::FitRequired)
    }

    /// Lazily forecast `horizon` days past the fitted series.
    pub fn rows(&self, horizon: usize) -> Result<ForecastRows<'_>> {
        let model = self.model()?;
        model.rows(model.end_date, horizon)
    }

    /// Forecast the configured number of days.
    pub fn forecast(&self) -> Result<Forecast> {
        self.predict(self.config.horizon_days)
    }

    /// One row per historical date, using the fitted trend and seasonality.
    pub fn predict_in_sample(&self) -> Result<Forecast> {
        let model = self.model()?;
        (0..=model.last_day_index)
            .map(|day| {
                let date = model
                    .start_date
                    .checked_add_days(Days::new(day as u64))
                    .ok_or_else(|| {
                        ForecastError::TimestampError(format!(
                            "day {} after {} is out of range",
                            day, model.start_date
                        ))
                    })?;
                Ok(model.row(date, day))
            })
            .collect::<Result<Vec<_>>>()
            .map(Forecast::from_rows)
    }

    /// In-sample rows followed by `horizon` future rows.
    pub fn predict_with_history(&self, horizon: usize) -> Result<Forecast> {
        let future = self.predict(horizon)?;
        let mut table = self.predict_in_sample()?;
        table.extend_from(future);
        Ok(table)
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl Forecaster for ForecastEngine {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        if self.model.is_some() {
            return Err(ForecastError::AlreadyFitted);
        }

        let (model, residual) = fit_stages(series, &self.config)?;
        let (fitted, residuals, _) = residual.into_parts();

        info!(
            observations = series.len(),
            period = model.period(),
            slope = model.slope(),
            intercept = model.intercept(),
            sigma = model.sigma(),
            "forecast engine fitted"
        );

        self.model = Some(model);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let rows = self.rows(horizon)?;
        let forecast: Forecast = rows.collect();

        info!(
            horizon = horizon,
            first = ?forecast.first().map(|r| r.date),
            last = ?forecast.last().map(|r| r.date),
            "forecast produced"
        );
        Ok(forecast)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "AdditiveTrendSeasonal"
    }
}
