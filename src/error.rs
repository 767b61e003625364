//! Error types for Kolosal diagnostics

use thiserror::Error;

/// Result type alias for diagnostics operations
pub type Result<T> = std::result::Result<T, KolosalError>;

/// Main error type for curve computation and rendering
#[derive(Error, Debug)]
pub enum KolosalError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Plot error: {0}")]
    PlotError(String),
}

impl From<polars::error::PolarsError> for KolosalError {
    fn from(err: polars::error::PolarsError) -> Self {
        KolosalError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for KolosalError {
    fn from(err: serde_json::Error) -> Self {
        KolosalError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for KolosalError {
    fn from(err: ndarray::ShapeError) -> Self {
        KolosalError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for KolosalError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        KolosalError::PlotError(err.to_string())
    }
}
