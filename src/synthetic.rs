//! Seedable synthetic daily demand.
//!
//! Produces a gap-free daily series of whole-unit sales drawn from a normal
//! distribution around an average demand. With a seed the output is fully
//! reproducible; without one it draws from OS entropy.

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;
use tracing::debug;

/// Generator of noisy daily demand around a constant average.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandSimulator {
    /// Mean daily demand.
    pub avg_demand: f64,
    /// Standard deviation of the daily noise.
    pub noise_sd: f64,
    /// Random seed for reproducibility (None for entropy).
    pub seed: Option<u64>,
}

impl Default for DemandSimulator {
    fn default() -> Self {
        Self {
            avg_demand: 150.0,
            noise_sd: 20.0,
            seed: None,
        }
    }
}

impl DemandSimulator {
    pub fn new(avg_demand: f64) -> Self {
        Self {
            avg_demand,
            ..Default::default()
        }
    }

    pub fn with_noise_sd(mut self, noise_sd: f64) -> Self {
        self.noise_sd = noise_sd;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Calendar year 2025, the default demo window.
    pub fn default_range() -> Result<(NaiveDate, NaiveDate)> {
        match (
            NaiveDate::from_ymd_opt(2025, 1, 1),
            NaiveDate::from_ymd_opt(2025, 12, 31),
        ) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(ForecastError::TimestampError(
                "default range is not a valid calendar year".to_string(),
            )),
        }
    }

    /// Generate one value per day in `start..=end`.
    ///
    /// Draws are truncated toward zero to whole units.
    pub fn generate(&self, start: NaiveDate, end: NaiveDate) -> Result<TimeSeries> {
        if start > end {
            return Err(ForecastError::TimestampError(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        if !self.avg_demand.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "avg_demand must be finite, got {}",
                self.avg_demand
            )));
        }
        if !(self.noise_sd.is_finite() && self.noise_sd > 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "noise_sd must be positive, got {}",
                self.noise_sd
            )));
        }

        let normal = Normal::new(self.avg_demand, self.noise_sd)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
        let mut rng: StdRng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let days = (end - start).num_days() as usize + 1;
        let values: Vec<f64> = (0..days)
            .map(|_| normal.sample(&mut rng).trunc())
            .collect();

        debug!(
            days = days,
            avg_demand = self.avg_demand,
            noise_sd = self.noise_sd,
            seeded = self.seed.is_some(),
            "synthetic demand generated"
        );

        TimeSeries::daily(start, values)
    }

    /// Generate over the default calendar year.
    pub fn generate_default(&self) -> Result<TimeSeries> {
        let (start, end) = Self::default_range()?;
        self.generate(start, end)
    }
}
