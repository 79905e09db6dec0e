//! The closed tuning loop: setpoint program, PID controller, plant.

use crate::plant::ResponseModel;
use crate::sample::Sample;
use crate::setpoint::SetpointProgram;
use pend_control::{PidController, PidGains};

/// Couples a setpoint program, a PID controller, and a plant model, and
/// advances them together one fixed step at a time.
///
/// Each [`step`](Self::step) observes the plant, computes the error, runs
/// the controller, applies the output to the plant, and emits the sample
/// that was observed. Gains can be retuned between steps without touching
/// accumulated controller state.
#[derive(Debug, Clone)]
pub struct Simulator<M> {
    controller: PidController,
    plant: M,
    program: SetpointProgram,
    t: f64,
}

impl<M: ResponseModel> Simulator<M> {
    /// Create a simulator at `t = 0`.
    pub fn new(gains: PidGains, plant: M, program: SetpointProgram) -> Self {
        Self {
            controller: PidController::new(gains),
            plant,
            program,
            t: 0.0,
        }
    }

    /// Current simulation time in seconds.
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Current gain set.
    pub fn gains(&self) -> PidGains {
        self.controller.gains()
    }

    /// Retune the controller in place; accumulated state is preserved.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.controller.set_gains(gains);
    }

    /// Advance the loop by one step of `dt` seconds.
    ///
    /// The returned sample reflects the state *observed* at the start of
    /// the step; the control action takes effect on the next observation.
    pub fn step(&mut self, dt: f64) -> Sample {
        let setpoint = self.program.value_at(self.t);
        let sample = Sample::at(self.t, setpoint, self.plant.measured());

        let control = self.controller.update(sample.error, dt);
        self.plant.advance(control, dt);
        self.t += dt;

        sample
    }

    /// Restart the loop: clears controller state, returns the plant to its
    /// initial condition, and rewinds time to zero.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.plant.reset();
        self.t = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::DirectResponse;

    fn simple_sim(kp: f64, ki: f64, kd: f64) -> Simulator<DirectResponse> {
        Simulator::new(
            PidGains::new(kp, ki, kd).unwrap(),
            DirectResponse::new(0.0),
            SetpointProgram::constant(10.0),
        )
    }

    #[test]
    fn first_sample_is_initial_observation() {
        let mut sim = simple_sim(1.0, 0.0, 0.0);
        let s = sim.step(0.1);
        assert_eq!(s.time, 0.0);
        assert_eq!(s.setpoint, 10.0);
        assert_eq!(s.measured, 0.0);
        assert_eq!(s.error, 10.0);
    }

    #[test]
    fn proportional_loop_closes_on_setpoint() {
        let mut sim = simple_sim(1.0, 0.0, 0.0);
        let mut last = sim.step(0.1);
        for _ in 0..500 {
            last = sim.step(0.1);
        }
        assert!(last.error.abs() < 1e-3, "residual error {}", last.error);
    }

    #[test]
    fn reset_rewinds_everything() {
        let mut sim = simple_sim(1.0, 0.5, 0.0);
        for _ in 0..20 {
            sim.step(0.1);
        }
        sim.reset();
        assert_eq!(sim.time(), 0.0);

        let s = sim.step(0.1);
        assert_eq!(s.measured, 0.0);
        assert_eq!(s.error, 10.0);
    }

    #[test]
    fn repeat_runs_are_identical() {
        let mut a = simple_sim(0.8, 0.3, 0.05);
        let mut b = simple_sim(0.8, 0.3, 0.05);
        for _ in 0..100 {
            assert_eq!(a.step(0.05), b.step(0.05));
        }
    }
}
