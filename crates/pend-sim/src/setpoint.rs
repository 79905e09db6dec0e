//! Setpoint programs.

use serde::{Deserialize, Serialize};

/// Setpoint as a function of simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SetpointProgram {
    /// Hold one target for the whole run.
    Constant { value: f64 },

    /// Step change: `before` until `at_time`, `after` from then on.
    Step {
        before: f64,
        after: f64,
        at_time: f64,
    },
}

impl SetpointProgram {
    /// Constant program.
    pub fn constant(value: f64) -> Self {
        Self::Constant { value }
    }

    /// Step program.
    pub fn step(before: f64, after: f64, at_time: f64) -> Self {
        Self::Step {
            before,
            after,
            at_time,
        }
    }

    /// Setpoint value at time `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        match *self {
            Self::Constant { value } => value,
            Self::Step {
                before,
                after,
                at_time,
            } => {
                if t < at_time {
                    before
                } else {
                    after
                }
            }
        }
    }
}

impl Default for SetpointProgram {
    fn default() -> Self {
        Self::Constant { value: 0.0 }
    }
}
