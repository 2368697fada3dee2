//! Forecast configuration.
//!
//! Every option has a default so a partial JSON document (or none at all)
//! yields a usable configuration.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options recognised by the forecast engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Seasonal cycle length in days.
    #[serde(default = "default_period_days")]
    pub period_days: usize,

    /// Number of days to forecast past the last observation.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: usize,

    /// Nominal coverage of the interval band, in (0, 1).
    #[serde(default = "default_interval_width")]
    pub interval_width: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            period_days: default_period_days(),
            horizon_days: default_horizon_days(),
            interval_width: default_interval_width(),
        }
    }
}

fn default_period_days() -> usize {
    7
}

fn default_horizon_days() -> usize {
    30
}

fn default_interval_width() -> f64 {
    0.95
}

impl ForecastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_period_days(mut self, period_days: usize) -> Self {
        self.period_days = period_days;
        self
    }

    pub fn with_horizon_days(mut self, horizon_days: usize) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn with_interval_width(mut self, interval_width: f64) -> Self {
        self.interval_width = interval_width;
        self
    }

    /// Check the options that do not depend on the series.
    ///
    /// Whether the period is shorter than the series can only be decided at
    /// fit time.
    pub fn validate(&self) -> Result<()> {
        if self.period_days < 2 {
            return Err(ForecastError::InvalidPeriod {
                period: self.period_days,
                len: 0,
            });
        }
        if self.horizon_days == 0 {
            return Err(ForecastError::InvalidHorizon(self.horizon_days));
        }
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "interval_width must be in (0, 1), got {}",
                self.interval_width
            )));
        }
        Ok(())
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ForecastError::InvalidParameter(format!("config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::InvalidParameter(format!("config {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}
