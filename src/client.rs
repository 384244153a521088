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

//! The logging client.
//!
//! [`LoggingClient`] is the one component of this crate: it owns a destination (via its
//! [`Transport`]) and a per-severity [`StreamConfig`], and on each [`log`] call gates on the
//! configuration, formats one line, and delivers it over a fresh connection.
//!
//! [`log`]: LoggingClient::log
//!
//! Everything is synchronous and blocking: [`log`] returns once the line has been handed to
//! the collector, or fails with the reason it could not be. There is no buffering, batching,
//! retrying, or fallback to another output; callers wanting resilience wrap the call
//! themselves. There are also no connect/write timeouts; a hung collector blocks the caller.
//!
//! Nothing in the client is mutated after construction, so sharing one instance across
//! threads is sound without locking, for exactly as long as that stays true.
//!
//! # Examples
//!
//! ```rust
//! use logwire::{LoggingClient, Severity, StreamConfig};
//!
//! let config = StreamConfig::new().stream(Severity::Error, "err", true);
//! let client = LoggingClient::new("/i/am/not/there.sock", config);
//! assert!(client.is_err()); // no such socket, after all
//! ```
//!
//! With a live collector, calls chain through `?`:
//!
//! ```rust,no_run
//! # use logwire::{LoggingClient, Severity, StreamConfig};
//! # fn main() -> logwire::Result<()> {
//! let config = StreamConfig::new().stream(Severity::Error, "err", true);
//! let client = LoggingClient::new("/run/collector.sock", config)?;
//! client
//!     .log("disk full", Severity::Error)?
//!     .log("really, disk full", Severity::Error)?;
//! # Ok(())
//! # }
//! ```

use crate::{
    config::StreamConfig,
    error::Result,
    formatter::LineFormatter,
    severity::Severity,
    transport::Transport,
};

#[cfg(unix)]
use crate::transport::UnixSocketStream;

#[cfg(windows)]
use crate::transport::NamedPipe;

/// A synchronous logging client bound to one collector endpoint.
///
/// The client holds no transport state between calls (each [`log`](LoggingClient::log) opens
/// and closes its own connection), so moving a client is nothing more than moving its
/// destination and configuration, and dropping one has no side effects.
pub struct LoggingClient<T: Transport> {
    transport: T,
    streams: StreamConfig,
    formatter: LineFormatter,
}

#[cfg(unix)]
impl LoggingClient<UnixSocketStream> {
    /// Construct a client targeting the Unix domain socket at `destination`.
    ///
    /// The collector must already have bound its socket: a destination that does not exist
    /// as a filesystem entry fails here with
    /// [`Error::DestinationUnavailable`](crate::Error::DestinationUnavailable). The stream
    /// configuration is accepted as-is, even if empty.
    pub fn new<P: AsRef<std::path::Path>>(
        destination: P,
        streams: StreamConfig,
    ) -> Result<LoggingClient<UnixSocketStream>> {
        Ok(LoggingClient::with_transport(
            UnixSocketStream::new(destination)?,
            streams,
        ))
    }
}

#[cfg(windows)]
impl LoggingClient<NamedPipe> {
    /// Construct a client targeting the named pipe called `destination`.
    ///
    /// There is no static existence check for pipes; a missing collector surfaces on the
    /// first [`log`](LoggingClient::log) call instead. The stream configuration is accepted
    /// as-is, even if empty.
    pub fn new<P: AsRef<std::path::Path>>(
        destination: P,
        streams: StreamConfig,
    ) -> Result<LoggingClient<NamedPipe>> {
        Ok(LoggingClient::with_transport(
            NamedPipe::new(destination)?,
            streams,
        ))
    }
}

impl<T: Transport> LoggingClient<T> {
    /// Construct a client over an arbitrary [`Transport`] implementation.
    ///
    /// This is the seam the platform constructors go through, and the one tests use to
    /// substitute recording or failing transports.
    pub fn with_transport(transport: T, streams: StreamConfig) -> LoggingClient<T> {
        LoggingClient {
            transport,
            streams,
            formatter: LineFormatter::default(),
        }
    }

    /// Replace the line formatter (e.g. to inject a deterministic pid source in tests).
    pub fn with_formatter(mut self, formatter: LineFormatter) -> LoggingClient<T> {
        self.formatter = formatter;
        self
    }

    /// The per-severity stream configuration supplied at construction.
    pub fn streams(&self) -> &StreamConfig {
        &self.streams
    }

    /// Forward one message to the collector at the given severity.
    ///
    /// If `severity` has no enabled stream the call short-circuits before any formatting or
    /// transport work and returns successfully. Otherwise the line is formatted, a fresh
    /// connection is opened, the line is written in full, and the connection is closed.
    ///
    /// Returns `&self` so calls can be chained through `?`. Transport failures propagate to
    /// the caller untouched; a failed call leaves the client fully usable for the next one.
    pub fn log(&self, message: &str, severity: Severity) -> Result<&Self> {
        if !self.streams.enabled(severity) {
            return Ok(self);
        }
        let line = self.formatter.format_line(severity, message);
        self.transport.send(line.as_bytes())?;
        Ok(self)
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::error::Error;

    use backtrace::Backtrace;

    use std::cell::RefCell;

    /// A [`Transport`] that records what it was asked to send.
    struct RecordingTransport {
        sent: RefCell<Vec<Vec<u8>>>,
    }

    impl RecordingTransport {
        fn new() -> RecordingTransport {
            RecordingTransport {
                sent: RefCell::new(Vec::new()),
            }
        }
        fn calls(&self) -> usize {
            self.sent.borrow().len()
        }
        fn line(&self, i: usize) -> String {
            String::from_utf8(self.sent.borrow()[i].clone()).unwrap()
        }
    }

    impl Transport for RecordingTransport {
        fn send(&self, buf: &[u8]) -> Result<usize> {
            self.sent.borrow_mut().push(buf.to_vec());
            Ok(buf.len())
        }
    }

    /// A [`Transport`] that fails every other call, starting with the first.
    struct FlakyTransport {
        calls: std::cell::Cell<usize>,
    }

    impl Transport for FlakyTransport {
        fn send(&self, buf: &[u8]) -> Result<usize> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            if n % 2 == 0 {
                Err(Error::Connection {
                    source: Box::new(std::io::Error::from(std::io::ErrorKind::ConnectionRefused)),
                    back: Backtrace::new(),
                })
            } else {
                Ok(buf.len())
            }
        }
    }

    fn error_only() -> StreamConfig {
        StreamConfig::new().stream(Severity::Error, "err", true)
    }

    #[test]
    fn test_absent_severity_performs_no_transport_work() {
        let client = LoggingClient::with_transport(RecordingTransport::new(), error_only());
        client.log("nobody listens to warnings", Severity::Warning).unwrap();
        assert_eq!(client.transport.calls(), 0);
    }

    #[test]
    fn test_disabled_severity_performs_no_transport_work() {
        let config = StreamConfig::new().stream(Severity::Error, "err", false);
        let client = LoggingClient::with_transport(RecordingTransport::new(), config);
        client.log("x", Severity::Error).unwrap();
        assert_eq!(client.transport.calls(), 0);
    }

    #[test]
    fn test_enabled_severity_transmits_one_line() {
        let client = LoggingClient::with_transport(RecordingTransport::new(), error_only())
            .with_formatter(LineFormatter::with_pid_source(|| 42));
        client.log("disk full", Severity::Error).unwrap();

        assert_eq!(client.transport.calls(), 1);
        let line = client.transport.line(0);
        assert!(line.starts_with('['));
        assert!(line.contains("] [ERROR] [PID:42] "));
        assert!(line.ends_with("disk full\n"));
    }

    #[test]
    fn test_calls_chain() {
        let config = StreamConfig::new()
            .stream(Severity::Error, "err", true)
            .stream(Severity::Warning, "warn", true);
        let client = LoggingClient::with_transport(RecordingTransport::new(), config);
        client
            .log("one", Severity::Error)
            .unwrap()
            .log("two", Severity::Warning)
            .unwrap();
        assert_eq!(client.transport.calls(), 2);
    }

    #[test]
    fn test_failure_does_not_poison_the_next_call() {
        let client = LoggingClient::with_transport(
            FlakyTransport {
                calls: std::cell::Cell::new(0),
            },
            error_only(),
        );
        assert!(client.log("first", Severity::Error).is_err());
        assert!(client.log("second", Severity::Error).is_ok());
    }

    #[test]
    fn test_gating_is_not_reapplied_to_failures() {
        // A transport failure must surface even though the severity was enabled when the
        // call was gated; nothing downgrades it to a silent no-op.
        let client = LoggingClient::with_transport(
            FlakyTransport {
                calls: std::cell::Cell::new(0),
            },
            error_only(),
        );
        match client.log("x", Severity::Error) {
            Err(Error::Connection { .. }) => (),
            _ => panic!("expected Connection"),
        }
    }

    #[test]
    fn test_moved_client_behaves_identically() {
        let original = LoggingClient::with_transport(RecordingTransport::new(), error_only());
        original.log("before the move", Severity::Error).unwrap();

        let relocated = original;
        relocated.log("after the move", Severity::Error).unwrap();

        assert_eq!(relocated.transport.calls(), 2);
        assert!(relocated.transport.line(1).ends_with("after the move\n"));
        assert!(relocated.streams().enabled(Severity::Error));
    }
}
