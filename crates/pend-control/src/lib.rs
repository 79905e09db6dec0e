//! PID control primitives for pendulab.
//!
//! Provides the controller used by the tuning loop:
//! - **PID (Proportional-Integral-Derivative)**: classic textbook form
//!
//! The controller is deliberately bare: no output clamping, no anti-windup,
//! no deadband. It is a teaching controller; keeping the law to the three
//! arithmetic terms makes the effect of each gain visible on the plots.
//! Numeric overflow and instability are the caller's concern.
//!
//! Gains live on the controller and may be retuned between steps without
//! disturbing the accumulated state; only an explicit [`PidController::reset`]
//! clears the integral and the previous error.

pub mod controller;
pub mod error;
pub mod sampled;

pub use controller::{PidController, PidGains};
pub use error::{ControlError, ControlResult};
pub use sampled::{SampleClock, SampleConfig};
