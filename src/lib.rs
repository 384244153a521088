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
//! A synchronous logging client that forwards log lines to an out-of-process collector over a
//! local IPC channel: a Unix domain stream socket on POSIX systems, a named pipe on Windows.
//!
//! # Introduction
//!
//! A process that wants its log output collected centrally on the local host has a simple
//! job: format a line, hand it to the collector daemon, move on. This crate does exactly
//! that job and nothing more. [`LoggingClient`] owns the collector's address and a
//! per-severity stream configuration; each [`log`] call gates on that configuration, formats
//! one newline-terminated line
//!
//! ```text
//! [<local-datetime>] [<SEVERITY>] [PID:<pid>] <message>\n
//! ```
//!
//! opens a fresh connection to the collector, writes the line, and closes the connection.
//! The collector treats connection close as the message delimiter and sends no
//! acknowledgment.
//!
//! [`log`]: client::LoggingClient::log
//!
//! What this crate deliberately does *not* do: buffer, batch, retry, reconnect, time out, or
//! fall back to another output. Every failure (endpoint creation, connection, write) is
//! surfaced synchronously to the caller as an [`Error`], and the caller decides whether a
//! lost log line is fatal. Console/file/null logger variants belong to other components; so
//! does the collector itself, which is assumed to be listening before a client is built.
//!
//! The platform split lives behind the [`transport::Transport`] trait: the client is generic
//! over it, [`transport::UnixSocketStream`] and [`transport::NamedPipe`] are the two
//! `#[cfg]`-selected implementations, and tests substitute fakes.
//!
//! # Usage
//!
//! ```rust,no_run
//! use logwire::{LoggingClient, Severity, StreamConfig};
//!
//! # fn main() -> logwire::Result<()> {
//! let config = StreamConfig::new()
//!     .stream(Severity::Error, "err", true)
//!     .stream(Severity::Debug, "dbg", false);
//!
//! // Fails if nothing has bound /run/collector.sock yet.
//! let client = LoggingClient::new("/run/collector.sock", config)?;
//!
//! client
//!     .log("disk full", Severity::Error)?     // delivered
//!     .log("verbose detail", Severity::Debug)?; // gated off: no I/O at all
//! # Ok(())
//! # }
//! ```
//!
//! Programs instrumented with [`tracing`] can mount the same client as a subscriber layer;
//! see [`layer`].

pub mod client;
pub mod config;
pub mod error;
pub mod formatter;
pub mod layer;
pub mod severity;
pub mod transport;

pub use client::LoggingClient;
pub use config::{Stream, StreamConfig};
pub use error::{Error, Result};
pub use formatter::LineFormatter;
pub use severity::Severity;
