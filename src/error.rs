//! Error types for the demand-forecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building series, fitting or predicting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Seasonal period must be at least 2 and shorter than the series.
    #[error("invalid seasonal period {period} for series of length {len}")]
    InvalidPeriod { period: usize, len: usize },

    /// Forecast horizon must be positive.
    #[error("invalid horizon: {0} (must be at least 1 day)")]
    InvalidHorizon(usize),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Date-related error (ordering, gaps, overflow).
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Missing values detected when not allowed.
    #[error("missing values detected in data")]
    MissingValues,

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Model was already fitted; a fresh engine is needed to refit.
    #[error("model is already fitted; create a new engine to refit")]
    AlreadyFitted,

    /// Writing a forecast table failed.
    #[error("export error: {0}")]
    Export(String),
}
