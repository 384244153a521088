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

//! Per-severity stream configuration.
//!
//! A "stream" is a named, independently enable/disable-able output channel associated with one
//! [`Severity`]. The collector side uses the tag to route messages; on the client side the tag
//! is contract surface only, never inspected by the transport. What the client *does* consult,
//! on every single [`log`] call, is the enabled flag: a severity with no stream at all, or with
//! a disabled one, produces no formatting work and no I/O.
//!
//! [`log`]: crate::client::LoggingClient::log
//!
//! The configuration is expected to be assembled once (typically by whatever loads the
//! process's logger settings) and never mutated afterward. Nothing here is synchronized; if
//! one client instance is shared across threads, that immutability is what makes the
//! concurrent reads sound.
//!
//! # Examples
//!
//! ```rust
//! use logwire::{Severity, StreamConfig};
//!
//! let config = StreamConfig::new()
//!     .stream(Severity::Error, "err", true)
//!     .stream(Severity::Debug, "dbg", false);
//! assert!(config.enabled(Severity::Error));
//! assert!(!config.enabled(Severity::Debug));       // present, but disabled
//! assert!(!config.enabled(Severity::Information)); // absent counts as disabled
//! ```

use crate::severity::Severity;

use std::collections::HashMap;

/// One output channel: a collector-side routing tag and an on/off switch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stream {
    tag: String,
    enabled: bool,
}

impl Stream {
    pub fn new<S: Into<String>>(tag: S, enabled: bool) -> Stream {
        Stream {
            tag: tag.into(),
            enabled,
        }
    }
    pub fn tag(&self) -> &str {
        &self.tag
    }
    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Mapping from [`Severity`] to its [`Stream`].
///
/// Keys need not cover all severities; a missing key behaves as "disabled". Insertion order
/// is irrelevant. An empty configuration is legal (the client will simply never transmit).
#[derive(Clone, Debug, Default)]
pub struct StreamConfig {
    streams: HashMap<Severity, Stream>,
}

impl StreamConfig {
    pub fn new() -> StreamConfig {
        StreamConfig::default()
    }
    /// Add (or replace) the stream for `severity`. Builder-style, so configurations can be
    /// assembled in one expression.
    pub fn stream<S: Into<String>>(mut self, severity: Severity, tag: S, enabled: bool) -> Self {
        self.streams.insert(severity, Stream::new(tag, enabled));
        self
    }
    /// Is there an enabled stream for `severity`? Absent keys answer `false`.
    pub fn enabled(&self, severity: Severity) -> bool {
        self.streams
            .get(&severity)
            .map(|s| s.enabled())
            .unwrap_or(false)
    }
    /// The tag for `severity`'s stream, if one is configured (enabled or not).
    pub fn tag(&self, severity: Severity) -> Option<&str> {
        self.streams.get(&severity).map(|s| s.tag())
    }
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

impl FromIterator<(Severity, Stream)> for StreamConfig {
    fn from_iter<I: IntoIterator<Item = (Severity, Stream)>>(iter: I) -> Self {
        StreamConfig {
            streams: iter.into_iter().collect(),
        }
    }
}
