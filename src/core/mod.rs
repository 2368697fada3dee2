//! Core data structures for daily demand forecasting.

mod forecast;
mod time_series;

pub use forecast::{Forecast, ForecastRow};
pub use time_series::TimeSeries;
