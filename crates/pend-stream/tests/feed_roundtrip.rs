//! End-to-end tests of the feed protocol over real sockets.

use std::io::Write;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use pend_sim::Sample;
use pend_stream::{
    ConnectionState, FeedEndpoint, FeedOptions, FeedServer, RemoteFeed, SampleSource, StreamError,
};

fn endpoint(port: u16) -> FeedEndpoint {
    FeedEndpoint {
        host: "127.0.0.1".to_string(),
        port,
        read_timeout_ms: 2_000,
        default_setpoint: 0.0,
    }
}

/// Pull the next sample, tolerating idle polls.
fn pump(feed: &mut RemoteFeed) -> Result<Sample, StreamError> {
    for _ in 0..50 {
        match feed.next_sample() {
            Ok(Some(sample)) => return Ok(sample),
            Ok(None) => continue,
            Err(e) => return Err(e),
        }
    }
    panic!("feed produced nothing within the polling budget");
}

#[test]
fn feed_server_streams_json_samples() {
    let server = FeedServer::bind("127.0.0.1:0").expect("bind feed");
    let addr = server.local_addr().expect("local addr");
    let opts = FeedOptions {
        period: Duration::from_millis(1),
        max_samples: Some(5),
        ..FeedOptions::default()
    };
    let handle = thread::spawn(move || server.serve_next(&opts).expect("serve"));

    let mut feed = RemoteFeed::new(endpoint(addr.port()));
    feed.connect().expect("connect");
    assert_eq!(feed.state(), ConnectionState::Connected);

    let mut samples = Vec::new();
    for _ in 0..5 {
        samples.push(pump(&mut feed).expect("sample"));
    }
    assert_eq!(feed.state(), ConnectionState::Streaming);
    assert_eq!(feed.received(), 5);
    assert_eq!(feed.discarded(), 0);

    // The synthetic ramp: constant setpoint, drifting measurement.
    assert_eq!(samples[0].setpoint, 50.0);
    assert_eq!(samples[0].measured, 50.0);
    assert!(samples[4].measured < samples[0].measured);
    assert!(samples[4].time > samples[0].time);

    // The feed stops after max_samples; the drop surfaces as a lost
    // connection, after which reads fail until reconnect.
    let err = loop {
        match feed.next_sample() {
            Ok(Some(_)) => panic!("feed should be exhausted"),
            Ok(None) => continue,
            Err(e) => break e,
        }
    };
    assert!(matches!(err, StreamError::ConnectionLost { .. }));
    assert_eq!(feed.state(), ConnectionState::Disconnected);
    assert!(matches!(feed.next_sample(), Err(StreamError::NotConnected)));

    handle.join().expect("server thread");
}

#[test]
fn malformed_lines_are_skipped() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        let (mut conn, _) = listener.accept().expect("accept");
        conn.write_all(b"1.5\nabc\n2.0\n").expect("write");
    });

    let mut feed = RemoteFeed::new(endpoint(addr.port()));
    feed.connect().expect("connect");

    let a = pump(&mut feed).expect("first sample");
    let b = pump(&mut feed).expect("second sample");
    assert_eq!(a.measured, 1.5);
    assert_eq!(b.measured, 2.0);
    assert_eq!(feed.received(), 2);
    assert_eq!(feed.discarded(), 1);

    handle.join().expect("writer thread");
}

#[test]
fn reconnect_starts_clean() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        // First client gets garbage then a hangup; second gets one sample.
        let (mut conn, _) = listener.accept().expect("accept #1");
        conn.write_all(b"not a sample\n").expect("write #1");
        drop(conn);

        let (mut conn, _) = listener.accept().expect("accept #2");
        conn.write_all(b"42.0\n").expect("write #2");
    });

    let mut feed = RemoteFeed::new(endpoint(addr.port()));
    feed.connect().expect("connect #1");

    let err = pump(&mut feed).expect_err("garbage then hangup");
    assert!(matches!(err, StreamError::ConnectionLost { .. }));
    assert_eq!(feed.state(), ConnectionState::Disconnected);
    assert_eq!(feed.discarded(), 1);

    // Reconnecting retains nothing from the dead connection.
    feed.connect().expect("connect #2");
    assert_eq!(feed.discarded(), 0);
    assert_eq!(feed.received(), 0);

    let sample = pump(&mut feed).expect("sample after reconnect");
    assert_eq!(sample.measured, 42.0);
    assert_eq!(feed.state(), ConnectionState::Streaming);

    handle.join().expect("writer thread");
}
