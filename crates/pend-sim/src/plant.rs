//! Plant models.
//!
//! A plant turns the controller output into the next measured value, one
//! fixed time step at a time. Models are deterministic: identical state and
//! inputs give identical output.

use crate::error::{SimError, SimResult};
use pend_core::ensure_finite;

/// Trait for discrete-time plant models.
pub trait ResponseModel {
    /// Current measured value without advancing.
    fn measured(&self) -> f64;

    /// Advance the plant by one step of `dt` seconds under the given
    /// control output, returning the new measured value.
    fn advance(&mut self, control: f64, dt: f64) -> f64;

    /// Return the plant to its initial condition.
    fn reset(&mut self);
}

/// Direct-response plant: the measured value moves by `control * dt`.
///
/// The controller output is treated as a rate of change of the
/// measurement itself, which keeps the effect of each gain easy to see on
/// a plot. Default plant for demos.
#[derive(Clone, Debug)]
pub struct DirectResponse {
    initial: f64,
    value: f64,
}

impl DirectResponse {
    /// Create a plant starting at `initial`.
    pub fn new(initial: f64) -> Self {
        Self {
            initial,
            value: initial,
        }
    }
}

impl ResponseModel for DirectResponse {
    fn measured(&self) -> f64 {
        self.value
    }

    fn advance(&mut self, control: f64, dt: f64) -> f64 {
        self.value += control * dt;
        self.value
    }

    fn reset(&mut self) {
        self.value = self.initial;
    }
}

/// Damped pendulum driven by a control torque.
///
/// Dynamics: `theta'' = -(g/l) sin(theta) - c*theta' + u`, forward-Euler
/// integrated. The measured value is the angle in degrees so it plots on
/// the same scale as typical setpoints.
#[derive(Clone, Debug)]
pub struct TorquePendulum {
    /// Arm length (meters), must be positive.
    length: f64,
    /// Viscous damping coefficient (1/s), must be non-negative.
    damping: f64,
    /// Initial angle (radians).
    theta0: f64,
    theta: f64,
    omega: f64,
}

/// Standard gravity, m/s^2.
const G: f64 = 9.81;

impl TorquePendulum {
    /// Create a pendulum released from `theta0_deg` degrees at rest.
    pub fn new(length: f64, damping: f64, theta0_deg: f64) -> SimResult<Self> {
        if length <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "length must be positive",
            });
        }
        if damping < 0.0 {
            return Err(SimError::InvalidArg {
                what: "damping must be non-negative",
            });
        }
        let theta0 = ensure_finite(theta0_deg, "release angle")?.to_radians();
        Ok(Self {
            length,
            damping,
            theta0,
            theta: theta0,
            omega: 0.0,
        })
    }

    /// Angular velocity (rad/s).
    pub fn omega(&self) -> f64 {
        self.omega
    }
}

impl ResponseModel for TorquePendulum {
    fn measured(&self) -> f64 {
        self.theta.to_degrees()
    }

    fn advance(&mut self, control: f64, dt: f64) -> f64 {
        let alpha = -(G / self.length) * self.theta.sin() - self.damping * self.omega + control;
        self.omega += alpha * dt;
        self.theta += self.omega * dt;
        self.theta.to_degrees()
    }

    fn reset(&mut self) {
        self.theta = self.theta0;
        self.omega = 0.0;
    }
}
