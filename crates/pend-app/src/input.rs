//! Input-boundary validation.
//!
//! Gain text arrives from untrusted surfaces (text fields, config files,
//! CLI flags). It is validated here, once, so the rest of the system only
//! ever sees finite numbers. On rejection the caller keeps its prior
//! value.

use crate::error::{AppError, AppResult};
use pend_core::ensure_finite;

/// Parse a gain value from user text.
///
/// Rejects non-numeric text and non-finite values.
pub fn parse_gain(text: &str) -> AppResult<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("not a number: {trimmed:?}")))?;
    ensure_finite(value, "gain").map_err(|e| AppError::InvalidInput(e.to_string()))
}
