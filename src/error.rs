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

//! [logwire](crate) errors

use backtrace::Backtrace;

/// [logwire](crate) error type
///
/// [logwire](crate) eschews libraries like [thiserror], [anyhow] & [Snafu] in favor of a
/// straightforward enumeration with match arms chosen on the basis of what the caller will
/// need to respond to: construction-time validation failures versus the three points at which
/// a per-call delivery can fail (creating the endpoint, connecting to the collector, writing
/// the line). None of these is retried or downgraded internally; every variant surfaces to
/// the caller of [`log`] or the constructor.
///
/// [thiserror]: https://docs.rs/thiserror
/// [anyhow]: https://docs.rs/anyhow
/// [Snafu]: https://docs.rs/snafu/latest/snafu
/// [`log`]: crate::client::LoggingClient::log
#[non_exhaustive]
pub enum Error {
    /// The destination could not be statically confirmed to exist at construction time
    /// (POSIX only; on Windows existence is deferred to first use)
    DestinationUnavailable {
        path: std::path::PathBuf,
        back: Backtrace,
    },
    /// The destination path exceeds the platform's socket-address limit. The original
    /// behavior here was silent truncation; this implementation rejects instead.
    DestinationTooLong {
        path: std::path::PathBuf,
        limit: usize,
        back: Backtrace,
    },
    /// The socket or handle could not be created
    TransportCreation {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        back: Backtrace,
    },
    /// Connecting/opening to the destination failed (no listener, permissions, stale node)
    Connection {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        back: Backtrace,
    },
    /// The formatted line could not be fully written
    Write {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        back: Backtrace,
    },
}

impl std::fmt::Display for Error {
    // `Error` is non-exhaustive so that adding variants won't be a breaking change to our
    // callers. That means the compiler won't catch us if we miss a variant here, so we
    // always include a `_` arm.
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::DestinationUnavailable { path, .. } => {
                write!(f, "Log collector endpoint {:?} does not exist", path)
            }
            Error::DestinationTooLong { path, limit, .. } => write!(
                f,
                "Destination {:?} exceeds the {}-byte socket address limit",
                path, limit
            ),
            Error::TransportCreation { source, .. } => {
                write!(f, "Failed to create a transport endpoint: {}", source)
            }
            Error::Connection { source, .. } => {
                write!(f, "Failed to connect to the log collector: {}", source)
            }
            Error::Write { source, .. } => {
                write!(f, "Failed to write the log line: {}", source)
            }
            _ => write!(f, "Other logwire error"),
        }
    }
}

impl std::fmt::Debug for Error {
    // `Error` is non-exhaustive so that adding variants won't be a breaking change to our
    // callers. That means the compiler won't catch us if we miss a variant here, so we
    // always include a `_` arm.
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::DestinationUnavailable { path: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::DestinationTooLong {
                path: _,
                limit: _,
                back,
            } => write!(f, "{}\n{:#?}", self, back),
            Error::TransportCreation { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::Connection { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::Write { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            err => write!(f, "logwire error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    #[allow(unreachable_patterns)]
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::TransportCreation { source, .. }
            | Error::Connection { source, .. }
            | Error::Write { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
