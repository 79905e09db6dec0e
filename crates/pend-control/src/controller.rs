//! PID controller implementation.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

/// PID gain set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
}

impl PidGains {
    /// Create a validated gain set.
    ///
    /// Gains may be negative (direct-acting vs reverse-acting loops) but
    /// must be finite.
    pub fn new(kp: f64, ki: f64, kd: f64) -> ControlResult<Self> {
        if !kp.is_finite() {
            return Err(ControlError::NonFiniteGain {
                which: "kp",
                value: kp,
            });
        }
        if !ki.is_finite() {
            return Err(ControlError::NonFiniteGain {
                which: "ki",
                value: ki,
            });
        }
        if !kd.is_finite() {
            return Err(ControlError::NonFiniteGain {
                which: "kd",
                value: kd,
            });
        }
        Ok(Self { kp, ki, kd })
    }

    /// Proportional-only gain set.
    pub fn proportional(kp: f64) -> ControlResult<Self> {
        Self::new(kp, 0.0, 0.0)
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
        }
    }
}

/// PID controller owning its gains and accumulated state.
///
/// `output = kp*e + ki*I + kd*(e - e_prev)/dt` with `I += e*dt`.
///
/// The accumulated state (integral, previous error) survives gain changes;
/// it is cleared only by [`reset`](Self::reset). The law is unguarded: no
/// clamping, no anti-windup.
#[derive(Debug, Clone, PartialEq)]
pub struct PidController {
    gains: PidGains,
    integral: f64,
    prev_error: f64,
}

impl PidController {
    /// Create a controller with the given gains and zeroed state.
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            integral: 0.0,
            prev_error: 0.0,
        }
    }

    /// Current gain set.
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// Replace the gains in place. Accumulated state is untouched, so a
    /// retune mid-run does not kick the loop.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    /// Integral accumulator value (exposed for plotting the I term).
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Clear the integral accumulator and previous error.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
    }

    /// Compute the control output for the current error over one sample
    /// interval `dt` (seconds).
    ///
    /// A non-positive `dt` contributes no integral and no derivative term.
    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        let derivative = if dt > 0.0 {
            self.integral += error * dt;
            (error - self.prev_error) / dt
        } else {
            0.0
        };

        self.prev_error = error;

        self.gains.kp * error + self.gains.ki * self.integral + self.gains.kd * derivative
    }
}

impl Default for PidController {
    fn default() -> Self {
        Self::new(PidGains::default())
    }
}
