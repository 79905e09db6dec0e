//! Companion feed server.
//!
//! Serves the line protocol consumed by [`RemoteFeed`](crate::RemoteFeed):
//! one JSON sample per line, pushed at a fixed cadence. The synthetic
//! signal is a constant setpoint with a linearly drifting measured value,
//! which gives a visibly growing error for the client to chew on.

use std::io::Write;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::StreamResult;
use pend_control::{SampleClock, SampleConfig};
use pend_sim::Sample;

/// Shape of the synthetic feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedOptions {
    /// Interval between samples.
    pub period: Duration,
    /// Constant setpoint carried on every sample.
    pub setpoint: f64,
    /// Measured value at t = 0.
    pub initial: f64,
    /// Drift of the measured value, units per second.
    pub slope: f64,
    /// Stop after this many samples; `None` streams until the client goes
    /// away.
    pub max_samples: Option<u64>,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(100),
            setpoint: 50.0,
            initial: 50.0,
            slope: -0.5,
            max_samples: None,
        }
    }
}

/// One-client-at-a-time synthetic sample feed.
pub struct FeedServer {
    listener: TcpListener,
}

impl FeedServer {
    /// Bind the feed to `addr` (e.g. `127.0.0.1:5000`; port 0 picks a free
    /// port).
    pub fn bind(addr: &str) -> StreamResult<Self> {
        let listener = TcpListener::bind(addr)?;
        info!(addr = %listener.local_addr()?, "feed listening");
        Ok(Self { listener })
    }

    /// The bound address (useful with port 0).
    pub fn local_addr(&self) -> StreamResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept one client and push samples to it until the options say stop
    /// or the client disconnects.
    pub fn serve_next(&self, opts: &FeedOptions) -> StreamResult<()> {
        let (stream, peer) = self.listener.accept()?;
        info!(%peer, "feed client connected");

        match push_samples(stream, opts) {
            Ok(sent) => info!(%peer, sent, "feed client done"),
            // A client hanging up mid-push is normal operation
            Err(e) => warn!(%peer, error = %e, "feed client dropped"),
        }
        Ok(())
    }

    /// Serve clients forever, one after another.
    pub fn serve_forever(&self, opts: &FeedOptions) -> StreamResult<()> {
        loop {
            self.serve_next(opts)?;
        }
    }
}

fn push_samples(mut stream: TcpStream, opts: &FeedOptions) -> std::io::Result<u64> {
    let dt = opts.period.as_secs_f64();
    let start = Instant::now();
    // Clock in wall seconds since start; pacing against it avoids the
    // cumulative drift of a bare sleep-per-sample loop.
    let mut clock = SampleClock::new(SampleConfig::new(dt), 0.0);
    let mut sent: u64 = 0;

    loop {
        if let Some(max) = opts.max_samples {
            if sent >= max {
                return Ok(sent);
            }
        }

        let t = sent as f64 * dt;
        let sample = Sample::at(t, opts.setpoint, opts.initial + opts.slope * t);
        let line = serde_json::to_string(&sample)?;
        stream.write_all(line.as_bytes())?;
        stream.write_all(b"\n")?;
        sent += 1;

        let wait = clock.time_until_sample(start.elapsed().as_secs_f64());
        if wait > 0.0 {
            thread::sleep(Duration::from_secs_f64(wait));
        }
        clock.advance();
    }
}
