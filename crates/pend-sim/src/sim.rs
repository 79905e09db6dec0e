//! Batch simulation runner and result recording.

use crate::error::{SimError, SimResult};
use crate::plant::ResponseModel;
use crate::sample::Sample;
use crate::simulator::Simulator;
use tracing::debug;

/// Options for batch simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 0.1,
            t_end: 10.0,
            max_steps: 100_000,
            record_every: 1,
        }
    }
}

/// Record of a batch run: the ordered sample history.
#[derive(Clone, Debug, Default)]
pub struct SimRecord {
    /// Samples in step order.
    pub samples: Vec<Sample>,
}

impl SimRecord {
    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Run the closed loop to `t_end` with a fixed step.
pub fn run_sim<M: ResponseModel>(
    sim: &mut Simulator<M>,
    opts: &SimOptions,
) -> SimResult<SimRecord> {
    if opts.dt <= 0.0 {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if opts.t_end < 0.0 {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let mut samples = Vec::new();
    let mut step = 0;
    let mut last: Option<Sample> = None;

    while sim.time() < opts.t_end && step < opts.max_steps {
        let sample = sim.step(opts.dt);
        step += 1;

        if step % opts.record_every == 0 {
            samples.push(sample);
            last = None;
        } else {
            last = Some(sample);
        }
    }

    // Always record the final observation, decimated or not
    if let Some(sample) = last {
        samples.push(sample);
    }

    debug!(steps = step, recorded = samples.len(), "batch run complete");

    Ok(SimRecord { samples })
}
