//! The sample source capability and its local implementation.

use crate::error::StreamResult;
use pend_sim::{ResponseModel, Sample, Simulator};

/// Anything that can produce the next sample of a tuning session.
pub trait SampleSource {
    /// Produce the next sample.
    ///
    /// - `Ok(Some(sample))`: a sample is available.
    /// - `Ok(None)`: nothing available right now (local source exhausted,
    ///   or no line arrived within the remote read timeout).
    /// - `Err(_)`: the source failed; remote sources transition to
    ///   disconnected and stay failed until reconnected.
    fn next_sample(&mut self) -> StreamResult<Option<Sample>>;

    /// Restart the source from a clean slate: local simulation state is
    /// rewound, remote per-connection counters are cleared. Does not touch
    /// an established connection.
    fn reset(&mut self);
}

/// Sample source backed by the in-process simulation loop.
pub struct LocalSource<M> {
    sim: Simulator<M>,
    dt: f64,
    max_steps: Option<usize>,
    steps: usize,
}

impl<M: ResponseModel> LocalSource<M> {
    /// Wrap a simulator, stepping it by `dt` per sample.
    ///
    /// `max_steps` bounds the run; `None` streams forever.
    pub fn new(sim: Simulator<M>, dt: f64, max_steps: Option<usize>) -> Self {
        Self {
            sim,
            dt,
            max_steps,
            steps: 0,
        }
    }

    /// Access the simulator (gain retuning between steps).
    pub fn simulator_mut(&mut self) -> &mut Simulator<M> {
        &mut self.sim
    }

    /// Access the simulator read-only.
    pub fn simulator(&self) -> &Simulator<M> {
        &self.sim
    }
}

impl<M: ResponseModel> SampleSource for LocalSource<M> {
    fn next_sample(&mut self) -> StreamResult<Option<Sample>> {
        if let Some(max) = self.max_steps {
            if self.steps >= max {
                return Ok(None);
            }
        }
        self.steps += 1;
        Ok(Some(self.sim.step(self.dt)))
    }

    fn reset(&mut self) {
        self.sim.reset();
        self.steps = 0;
    }
}
