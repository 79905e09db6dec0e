//! Error types for the pend-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for front-ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config parse failed: {0}")]
    ConfigParse(String),

    #[error("Control error: {0}")]
    Control(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pend-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<pend_control::ControlError> for AppError {
    fn from(err: pend_control::ControlError) -> Self {
        AppError::Control(err.to_string())
    }
}

impl From<pend_sim::SimError> for AppError {
    fn from(err: pend_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<pend_stream::StreamError> for AppError {
    fn from(err: pend_stream::StreamError) -> Self {
        AppError::Stream(err.to_string())
    }
}
