// Copyright (C) 2025 the logwire authors
//
// This file is part of logwire.
//
// logwire is free software: you can redistribute it and/or modify it under the terms of the
// GNU General Public License as published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// logwire is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even
// the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details.
//
// You should have received a copy of the GNU General Public License along with logwire.  If not,
// see <http://www.gnu.org/licenses/>.

//! End-to-end tests against a live collector on a Unix domain socket.

#![cfg(unix)]

use logwire::{formatter::TIMESTAMP_FORMAT, Error, LoggingClient, Severity, StreamConfig};

use chrono::NaiveDateTime;

use std::{
    io::Read,
    os::unix::net::UnixListener,
    path::Path,
    sync::mpsc,
    time::Duration,
};

/// Bind a listener at `path` and accept `connections` connections on a background thread,
/// forwarding each connection's entire contents (read to EOF) over the returned channel.
fn spawn_collector(path: &Path, connections: usize) -> mpsc::Receiver<String> {
    let listener = UnixListener::bind(path).unwrap();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for _ in 0..connections {
            let (mut conn, _) = listener.accept().unwrap();
            let mut buf = String::new();
            conn.read_to_string(&mut buf).unwrap();
            if tx.send(buf).is_err() {
                break;
            }
        }
    });
    rx
}

/// Pick the wire line apart into (timestamp, severity, pid, message).
fn split_line(line: &str) -> (&str, &str, &str, &str) {
    let mut fields = line.splitn(4, "] ");
    let ts = fields.next().unwrap().strip_prefix('[').unwrap();
    let severity = fields.next().unwrap().strip_prefix('[').unwrap();
    let pid = fields
        .next()
        .unwrap()
        .strip_prefix("[PID:")
        .unwrap();
    let message = fields.next().unwrap();
    (ts, severity, pid, message)
}

#[test]
fn test_end_to_end_delivery() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collector.sock");
    let rx = spawn_collector(&path, 1);

    let config = StreamConfig::new().stream(Severity::Error, "err", true);
    let client = LoggingClient::new(&path, config).unwrap();
    client.log("disk full", Severity::Error).unwrap();

    let line = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let (ts, severity, pid, message) = split_line(&line);
    assert!(NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).is_ok());
    assert_eq!(severity, "ERROR");
    assert_eq!(pid, std::process::id().to_string());
    assert_eq!(message, "disk full\n");
}

#[test]
fn test_disabled_stream_makes_no_connection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collector.sock");
    let listener = UnixListener::bind(&path).unwrap();
    listener.set_nonblocking(true).unwrap();

    let config = StreamConfig::new().stream(Severity::Error, "err", false);
    let client = LoggingClient::new(&path, config).unwrap();
    client.log("x", Severity::Error).unwrap();

    // Bounded wait: nothing should arrive.
    std::thread::sleep(Duration::from_millis(200));
    match listener.accept() {
        Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => (),
        other => panic!("expected no connection at all, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_each_call_uses_its_own_connection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collector.sock");
    let rx = spawn_collector(&path, 2);

    let config = StreamConfig::new().stream(Severity::Error, "err", true);
    let client = LoggingClient::new(&path, config).unwrap();
    client
        .log("one", Severity::Error)
        .unwrap()
        .log("two", Severity::Error)
        .unwrap();

    // One complete payload per connection; EOF delimits each message.
    let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let second = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(first.ends_with("one\n"));
    assert!(second.ends_with("two\n"));
    assert_eq!(first.matches('\n').count(), 1);
    assert_eq!(second.matches('\n').count(), 1);
}

#[test]
fn test_failed_call_does_not_poison_the_next() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collector.sock");

    let config = StreamConfig::new().stream(Severity::Error, "err", true);
    let client = {
        // The collector is up just long enough for construction's existence check.
        let _listener = UnixListener::bind(&path).unwrap();
        LoggingClient::new(&path, config).unwrap()
    };
    std::fs::remove_file(&path).unwrap();

    match client.log("into the void", Severity::Error) {
        Err(Error::Connection { .. }) => (),
        _ => panic!("expected Connection"),
    }

    // The collector comes back; the very next call connects afresh and succeeds.
    let rx = spawn_collector(&path, 1);
    client.log("back online", Severity::Error).unwrap();
    let line = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(line.ends_with("back online\n"));
}

#[test]
fn test_construction_validates_destination() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nobody-bound-this.sock");

    let config = StreamConfig::new().stream(Severity::Error, "err", true);
    match LoggingClient::new(&missing, config.clone()) {
        Err(Error::DestinationUnavailable { path, .. }) => assert_eq!(path, missing),
        _ => panic!("expected DestinationUnavailable"),
    }

    let bound = dir.path().join("collector.sock");
    let _listener = UnixListener::bind(&bound).unwrap();
    assert!(LoggingClient::new(&bound, config).is_ok());
}

#[test]
fn test_moved_client_logs_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collector.sock");
    let rx = spawn_collector(&path, 2);

    let config = StreamConfig::new().stream(Severity::Error, "err", true);
    let client = LoggingClient::new(&path, config).unwrap();
    client.log("before", Severity::Error).unwrap();

    let relocated = client;
    relocated.log("after", Severity::Error).unwrap();
    assert!(!relocated.streams().enabled(Severity::Warning));

    assert!(rx
        .recv_timeout(Duration::from_secs(5))
        .unwrap()
        .ends_with("before\n"));
    assert!(rx
        .recv_timeout(Duration::from_secs(5))
        .unwrap()
        .ends_with("after\n"));
}
