//! Error types for sample sources.

use thiserror::Error;

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while producing samples.
#[derive(Debug, Error)]
pub enum StreamError {
    /// No connection is established; connect (or reconnect) first.
    #[error("Not connected to a feed")]
    NotConnected,

    /// The transport dropped mid-stream. The source is now disconnected.
    #[error("Connection lost: {reason}")]
    ConnectionLost { reason: String },

    /// Underlying transport error (connect/bind/read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
