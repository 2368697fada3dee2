//! Utility functions shared by the estimators.

pub mod metrics;
pub mod stats;

pub use metrics::{calculate_metrics, interval_coverage, AccuracyMetrics};
pub use stats::{interval_multiplier, quantile_normal};
