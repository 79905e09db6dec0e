//! The tuning session.
//!
//! Owns the append-only sample history and the run state machine behind
//! the front-end's Start/Pause/Reset actions. The session is generic over
//! where samples come from: the local simulation loop or a remote feed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppResult;
use crate::input::parse_gain;
use pend_control::PidGains;
use pend_sim::{ResponseModel, Sample};
use pend_stream::{LocalSource, SampleSource};

/// Run state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Created or reset; not yet producing samples.
    Idle,
    /// Ticks produce and record samples.
    Running,
    /// Ticks are ignored until restarted.
    Paused,
}

/// Which gain a text edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainAxis {
    Kp,
    Ki,
    Kd,
}

/// A tuning session: sample source + recorded history + run state.
///
/// History is append-only for the session's duration; only [`reset`]
/// clears it (together with the source's accumulated state).
///
/// [`reset`]: Self::reset
pub struct TuningSession<S> {
    source: S,
    history: Vec<Sample>,
    state: SessionState,
}

impl<S: SampleSource> TuningSession<S> {
    /// Create an idle session around a source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            history: Vec::new(),
            state: SessionState::Idle,
        }
    }

    /// Current run state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Recorded samples, in order.
    pub fn history(&self) -> &[Sample] {
        &self.history
    }

    /// Borrow the source (connection state, counters).
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Borrow the source mutably (connect/disconnect on remote feeds).
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Start or resume producing samples.
    pub fn start(&mut self) {
        self.state = SessionState::Running;
    }

    /// Stop producing samples; history is kept.
    pub fn pause(&mut self) {
        if self.state == SessionState::Running {
            self.state = SessionState::Paused;
        }
    }

    /// Clear history and accumulated source state, back to idle.
    pub fn reset(&mut self) {
        debug!(discarded = self.history.len(), "session reset");
        self.history.clear();
        self.source.reset();
        self.state = SessionState::Idle;
    }

    /// One step of the session loop: pull a sample and record it.
    ///
    /// Returns the recorded sample, or `None` when the session is not
    /// running or the source had nothing yet. Source failures propagate
    /// (and leave the history untouched).
    pub fn tick(&mut self) -> AppResult<Option<Sample>> {
        if self.state != SessionState::Running {
            return Ok(None);
        }
        match self.source.next_sample()? {
            Some(sample) => {
                self.history.push(sample);
                Ok(Some(sample))
            }
            None => Ok(None),
        }
    }
}

impl<M: ResponseModel> TuningSession<LocalSource<M>> {
    /// Current controller gains.
    pub fn gains(&self) -> PidGains {
        self.source.simulator().gains()
    }

    /// Retune the controller; accumulated state is preserved.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.source.simulator_mut().set_gains(gains);
    }

    /// Apply a gain edit from user text.
    ///
    /// Invalid text is rejected and the prior gains stay in effect.
    pub fn set_gain_text(&mut self, axis: GainAxis, text: &str) -> AppResult<()> {
        let value = parse_gain(text)?;
        let mut gains = self.gains();
        match axis {
            GainAxis::Kp => gains.kp = value,
            GainAxis::Ki => gains.ki = value,
            GainAxis::Kd => gains.kd = value,
        }
        self.set_gains(gains);
        Ok(())
    }
}
