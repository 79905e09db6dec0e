//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or running a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<pend_core::PendError> for SimError {
    fn from(e: pend_core::PendError) -> Self {
        match e {
            pend_core::PendError::NonFinite { what, .. } => SimError::NonPhysical { what },
            pend_core::PendError::InvalidArg { what } => SimError::InvalidArg { what },
            pend_core::PendError::Invariant { what } => SimError::InvalidArg { what },
        }
    }
}
