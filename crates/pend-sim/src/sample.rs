//! The per-step sample record.

use serde::{Deserialize, Serialize};

/// One row of the tuning history: what the loop wanted, what it got, and
/// the difference, at a point in simulation time.
///
/// Samples are appended to an ordered history for the session's duration;
/// nothing ever rewrites an emitted sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Simulation time in seconds (or receive-counter time for remote feeds).
    pub time: f64,
    /// Target value the controller tracks.
    pub setpoint: f64,
    /// Measured plant output.
    pub measured: f64,
    /// `setpoint - measured` at this step.
    pub error: f64,
}

impl Sample {
    /// Build a sample, deriving the error from setpoint and measurement.
    pub fn at(time: f64, setpoint: f64, measured: f64) -> Self {
        Self {
            time,
            setpoint,
            measured,
            error: setpoint - measured,
        }
    }
}
