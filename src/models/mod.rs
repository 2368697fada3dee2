//! Forecasting models.

mod traits;

pub mod additive;

pub use additive::{FittedModel, ForecastEngine, ForecastRows};
pub use traits::Forecaster;
