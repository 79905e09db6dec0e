//! TCP feed client.

use std::io::{BufRead, BufReader, ErrorKind};
use std::net::TcpStream;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{StreamError, StreamResult};
use crate::source::SampleSource;
use crate::wire;
use pend_sim::Sample;

/// Lifecycle of the remote connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No transport. Reads fail until `connect` succeeds.
    Disconnected,
    /// Transport established, no sample seen yet.
    Connected,
    /// At least one sample has arrived on this connection.
    Streaming,
}

/// Where to find the feed, and how patient to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEndpoint {
    /// Feed host.
    pub host: String,
    /// Feed port.
    pub port: u16,
    /// Read timeout in milliseconds; a poll returning no line within this
    /// window yields `Ok(None)` rather than blocking forever.
    pub read_timeout_ms: u64,
    /// Setpoint assumed for lines that carry only a measured value.
    pub default_setpoint: f64,
}

impl Default for FeedEndpoint {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            read_timeout_ms: 500,
            default_setpoint: 0.0,
        }
    }
}

/// Sample source fed by a remote process over TCP, one line per sample.
///
/// Connection management is entirely user-driven: `connect` / `disconnect`
/// here, no automatic retry. Losing the transport mid-read moves the state
/// to [`ConnectionState::Disconnected`] and every subsequent read fails
/// with [`StreamError::NotConnected`] until `connect` is called again.
pub struct RemoteFeed {
    endpoint: FeedEndpoint,
    state: ConnectionState,
    reader: Option<BufReader<TcpStream>>,
    received: u64,
    discarded: u64,
}

impl RemoteFeed {
    /// Create a disconnected feed client for the given endpoint.
    pub fn new(endpoint: FeedEndpoint) -> Self {
        Self {
            endpoint,
            state: ConnectionState::Disconnected,
            reader: None,
            received: 0,
            discarded: 0,
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Samples accepted on the current connection.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Malformed lines discarded on the current connection.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Establish the transport. All per-connection state (reader buffer,
    /// counters) starts fresh, so a reconnect carries nothing over.
    pub fn connect(&mut self) -> StreamResult<()> {
        let addr = (self.endpoint.host.as_str(), self.endpoint.port);
        let stream = TcpStream::connect(addr)?;
        stream.set_read_timeout(Some(Duration::from_millis(self.endpoint.read_timeout_ms)))?;

        self.reader = Some(BufReader::new(stream));
        self.state = ConnectionState::Connected;
        self.received = 0;
        self.discarded = 0;

        info!(
            host = %self.endpoint.host,
            port = self.endpoint.port,
            "connected to feed"
        );
        Ok(())
    }

    /// Drop the transport. No-op when already disconnected.
    pub fn disconnect(&mut self) {
        if self.reader.take().is_some() {
            info!("disconnected from feed");
        }
        self.state = ConnectionState::Disconnected;
    }

    fn lose_connection(&mut self, reason: String) -> StreamError {
        warn!(%reason, "feed connection lost");
        self.reader = None;
        self.state = ConnectionState::Disconnected;
        StreamError::ConnectionLost { reason }
    }
}

impl SampleSource for RemoteFeed {
    /// Read lines until a valid sample arrives, the read times out, or the
    /// connection drops. Malformed lines are discarded with a warning.
    fn next_sample(&mut self) -> StreamResult<Option<Sample>> {
        loop {
            let reader = self.reader.as_mut().ok_or(StreamError::NotConnected)?;

            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => {
                    return Err(self.lose_connection("feed closed the connection".to_string()));
                }
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match wire::parse_line(trimmed) {
                        Some(parsed) => {
                            let time = parsed.time.unwrap_or(self.received as f64);
                            let setpoint =
                                parsed.setpoint.unwrap_or(self.endpoint.default_setpoint);
                            self.received += 1;
                            self.state = ConnectionState::Streaming;
                            return Ok(Some(Sample::at(time, setpoint, parsed.measured)));
                        }
                        None => {
                            self.discarded += 1;
                            warn!(line = trimmed, "discarding malformed feed line");
                        }
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                    // Idle feed: nothing arrived within the timeout window.
                    return Ok(None);
                }
                Err(e) => {
                    return Err(self.lose_connection(e.to_string()));
                }
            }
        }
    }

    /// Clear per-connection counters. The transport, if any, stays up;
    /// dropping it is a separate, user-initiated `disconnect`.
    fn reset(&mut self) {
        self.received = 0;
        self.discarded = 0;
    }
}
