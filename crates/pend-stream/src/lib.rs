//! Sample sources for pendulab.
//!
//! A tuning session pulls its samples from one capability: *produce the
//! next sample*. Two implementations exist:
//! - [`LocalSource`]: samples generated by the in-process simulation loop
//! - [`RemoteFeed`]: samples pushed by a companion feed process over TCP,
//!   one line per sample
//!
//! The remote side is deliberately simple: a single blocking read with a
//! timeout, no retry or backoff, reconnection on user request only. The
//! [`FeedServer`] half of the protocol lives here too so the CLI can play
//! either role.

pub mod error;
pub mod remote;
pub mod server;
pub mod source;
pub mod wire;

pub use error::{StreamError, StreamResult};
pub use remote::{ConnectionState, FeedEndpoint, RemoteFeed};
pub use server::{FeedOptions, FeedServer};
pub use source::{LocalSource, SampleSource};
