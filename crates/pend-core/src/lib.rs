//! pend-core: stable foundation for pendulab.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PendError, PendResult};
pub use numeric::*;
