//! # demand-forecast
//!
//! Daily demand forecasting with an additive linear trend, one seasonal
//! period and a normal-approximation confidence band.
//!
//! The pipeline is deterministic: the same series and configuration always
//! give the same forecast. Synthetic demand generation and CSV export live in
//! separate modules and never feed back into fitting.

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod models;
pub mod synthetic;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::config::ForecastConfig;
    pub use crate::core::{Forecast, ForecastRow, TimeSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{FittedModel, ForecastEngine, Forecaster};
    pub use crate::utils::{calculate_metrics, AccuracyMetrics};
}
