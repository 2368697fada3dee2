//! Additive decomposition forecaster: linear trend + one seasonal period.
//!
//! Each stage is usable on its own; [`ForecastEngine`] chains them.

mod engine;
mod residual;
mod seasonality;
mod trend;

pub use engine::{FittedModel, ForecastEngine, ForecastRows};
pub use residual::ResidualModel;
pub use seasonality::{SeasonalProfile, SeasonalityEstimator};
pub use trend::{LinearTrend, TrendEstimator};
