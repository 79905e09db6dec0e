//! Shared application service layer for pendulab.
//!
//! This crate provides a unified interface for front-ends (CLI today, a
//! plotting GUI tomorrow), centralizing the tuning session, input
//! validation, configuration loading, and history export.

pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod session;

// Re-export key types for convenience
pub use config::{AppConfig, FeedConfig, GainConfig};
pub use error::{AppError, AppResult};
pub use export::history_to_csv;
pub use input::parse_gain;
pub use session::{GainAxis, SessionState, TuningSession};
