//! Session lifecycle against the local simulation source.

use pend_app::{history_to_csv, GainAxis, SessionState, TuningSession};
use pend_control::PidGains;
use pend_sim::{DirectResponse, SetpointProgram, Simulator};
use pend_stream::LocalSource;

fn local_session() -> TuningSession<LocalSource<DirectResponse>> {
    let sim = Simulator::new(
        PidGains::proportional(1.0).unwrap(),
        DirectResponse::new(0.0),
        SetpointProgram::constant(10.0),
    );
    TuningSession::new(LocalSource::new(sim, 0.1, None))
}

#[test]
fn ticks_only_record_while_running() {
    let mut session = local_session();
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.tick().unwrap().is_none());
    assert!(session.history().is_empty());

    session.start();
    for _ in 0..5 {
        assert!(session.tick().unwrap().is_some());
    }
    assert_eq!(session.history().len(), 5);

    session.pause();
    assert_eq!(session.state(), SessionState::Paused);
    assert!(session.tick().unwrap().is_none());
    assert_eq!(session.history().len(), 5);

    // Resume appends to the same history
    session.start();
    session.tick().unwrap();
    assert_eq!(session.history().len(), 6);
}

#[test]
fn history_is_ordered_and_append_only() {
    let mut session = local_session();
    session.start();
    for _ in 0..20 {
        session.tick().unwrap();
    }
    let times: Vec<f64> = session.history().iter().map(|s| s.time).collect();
    let mut sorted = times.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(times, sorted);
}

#[test]
fn reset_clears_history_and_controller_state() {
    let mut session = local_session();
    session.start();
    let first = session.tick().unwrap().unwrap();
    for _ in 0..10 {
        session.tick().unwrap();
    }

    session.reset();
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.history().is_empty());

    // A fresh start replays the identical trajectory
    session.start();
    let again = session.tick().unwrap().unwrap();
    assert_eq!(first, again);
}

#[test]
fn bad_gain_text_keeps_prior_value() {
    let mut session = local_session();
    let before = session.gains();

    assert!(session.set_gain_text(GainAxis::Kp, "not-a-number").is_err());
    assert_eq!(session.gains(), before);

    session.set_gain_text(GainAxis::Kp, "2.5").unwrap();
    assert_eq!(session.gains().kp, 2.5);
    // The other axes are untouched
    assert_eq!(session.gains().ki, before.ki);
    assert_eq!(session.gains().kd, before.kd);
}

#[test]
fn retune_mid_session_keeps_history_and_state() {
    let mut session = local_session();
    session.start();
    for _ in 0..3 {
        session.tick().unwrap();
    }

    session.set_gain_text(GainAxis::Ki, "0.2").unwrap();
    session.tick().unwrap();
    assert_eq!(session.history().len(), 4);
}

#[test]
fn export_matches_history() {
    let mut session = local_session();
    session.start();
    for _ in 0..3 {
        session.tick().unwrap();
    }

    let csv = history_to_csv(session.history());
    // Header plus one row per recorded sample
    assert_eq!(csv.lines().count(), 1 + session.history().len());
    assert!(csv.starts_with("time_s,setpoint,measured,error\n"));
}
