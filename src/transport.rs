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

//! The local-channel transport layer.
//!
//! This module defines the [`Transport`] trait that all implementations must support, as well
//! as the two concrete local IPC implementations: Unix domain stream sockets on POSIX
//! ([`UnixSocketStream`]) and named pipes on Windows ([`NamedPipe`]). The client depends only
//! on the trait, so the platform split lives entirely here.
//!
//! Both implementations are deliberately *connectionless between calls*: [`Transport::send`]
//! opens a fresh connection, writes the whole buffer, and tears the connection down before
//! returning, on success and failure alike. The collector accepts one connection per message
//! and reads until EOF, so connection close is the message delimiter. Per-call churn is
//! acceptable at logging volumes; a pooling implementation of the same trait could be added
//! without touching the client.
//!
//! # Examples
//!
//! To target a collector listening on a Unix domain socket:
//!
//! ```rust
//! use logwire::transport::UnixSocketStream;
//! let transpo = UnixSocketStream::new("/i/am/not/there.sock");
//! assert!(transpo.is_err()); // no such socket, after all
//! ```

use crate::error::{Error, Result};

use backtrace::Backtrace;

use std::path::{Path, PathBuf};

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                      transport mechanisms                                      //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Operations all transport layers must support.
pub trait Transport {
    /// Deliver one complete, already-formatted log line to the collector: connect, write
    /// `buf` in full, close. Returns the number of bytes written.
    ///
    /// Implementations must release the underlying socket/handle on every exit path,
    /// including failures, so a failed call never leaks a descriptor or poisons the next
    /// call.
    fn send(&self, buf: &[u8]) -> Result<usize>;
}

/// Delivering log lines over a Unix domain stream socket.
///
/// The destination path is validated twice at construction: it must fit in a socket address
/// (see [`UnixSocketStream::MAX_PATH`]), and it must already exist as a filesystem entry,
/// since the collector is expected to have bound its listening socket before any client is
/// built.
/// Only existence is checked; whether anyone is *listening* is discovered per call.
#[cfg(unix)]
pub struct UnixSocketStream {
    path: PathBuf,
}

#[cfg(unix)]
impl UnixSocketStream {
    /// The longest destination path accepted, in bytes. One less than the platform's
    /// `sun_path` size, leaving room for the trailing NUL.
    #[cfg(any(target_os = "macos", target_os = "ios"))]
    pub const MAX_PATH: usize = 103;
    #[cfg(not(any(target_os = "macos", target_os = "ios")))]
    pub const MAX_PATH: usize = 107;

    /// Construct a [`Transport`] implementation over Unix stream sockets at `path`.
    ///
    /// Fails with [`Error::DestinationTooLong`] if `path` cannot fit in a socket address
    /// (the C library would silently truncate it; we refuse instead), and with
    /// [`Error::DestinationUnavailable`] if `path` does not exist.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<UnixSocketStream> {
        let path = path.as_ref().to_path_buf();
        if path.as_os_str().len() > Self::MAX_PATH {
            return Err(Error::DestinationTooLong {
                path,
                limit: Self::MAX_PATH,
                back: Backtrace::new(),
            });
        }
        // Any stat failure counts as "not there": NotFound, of course, but also e.g.
        // PermissionDenied on a parent directory.
        if std::fs::metadata(&path).is_err() {
            return Err(Error::DestinationUnavailable {
                path,
                back: Backtrace::new(),
            });
        }
        Ok(UnixSocketStream { path })
    }

    /// The destination this transport connects to on every call.
    pub fn destination(&self) -> &Path {
        &self.path
    }
}

/// `UnixStream::connect` performs both `socket(2)` and `connect(2)`, so we tell the two
/// failure modes apart by error kind: the kinds a refused/absent/forbidden endpoint can
/// produce become [`Error::Connection`]; anything else (descriptor exhaustion and the like)
/// is a failure to create the endpoint itself.
#[cfg(unix)]
fn classify_connect_error(err: std::io::Error) -> Error {
    use std::io::ErrorKind;
    match err.kind() {
        ErrorKind::NotFound
        | ErrorKind::PermissionDenied
        | ErrorKind::ConnectionRefused
        | ErrorKind::ConnectionReset
        | ErrorKind::AddrNotAvailable
        | ErrorKind::TimedOut => Error::Connection {
            source: Box::new(err),
            back: Backtrace::new(),
        },
        _ => Error::TransportCreation {
            source: Box::new(err),
            back: Backtrace::new(),
        },
    }
}

#[cfg(unix)]
impl Transport for UnixSocketStream {
    fn send(&self, buf: &[u8]) -> Result<usize> {
        use std::io::Write;
        use std::os::unix::net::UnixStream;

        // `socket` is dropped (and the descriptor closed) on every path out of this
        // function, including the error returns below.
        let mut socket = UnixStream::connect(&self.path).map_err(classify_connect_error)?;
        socket.write_all(buf).map_err(|err| Error::Write {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        socket.flush().map_err(|err| Error::Write {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        Ok(buf.len())
    }
}

/// Delivering log lines over a Windows named pipe.
///
/// The pipe name (e.g. `\\.\pipe\collector`) is stored as-is; Windows offers no cheap way to
/// check for a pipe's existence without opening it, so validation is deferred to the first
/// [`Transport::send`]. The pipe is opened with `OPEN_EXISTING` semantics (opening a path
/// for write never creates one), so a missing collector surfaces as [`Error::Connection`].
#[cfg(windows)]
pub struct NamedPipe {
    name: PathBuf,
}

#[cfg(windows)]
impl NamedPipe {
    /// Construct a [`Transport`] implementation over the named pipe called `name`.
    pub fn new<P: AsRef<Path>>(name: P) -> Result<NamedPipe> {
        Ok(NamedPipe {
            name: name.as_ref().to_path_buf(),
        })
    }

    /// The pipe name this transport opens on every call.
    pub fn destination(&self) -> &Path {
        &self.name
    }
}

#[cfg(windows)]
impl Transport for NamedPipe {
    fn send(&self, buf: &[u8]) -> Result<usize> {
        use std::io::Write;

        // CreateFileW under the hood: GENERIC_WRITE + OPEN_EXISTING.
        let mut pipe = std::fs::OpenOptions::new()
            .write(true)
            .open(&self.name)
            .map_err(|err| Error::Connection {
                source: Box::new(err),
                back: Backtrace::new(),
            })?;
        pipe.write_all(buf).map_err(|err| Error::Write {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        Ok(buf.len())
    }
}
