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

//! Log severity definitions.
//!
//! [`Severity`] is the ordinal level attached to every log record. The set is fixed & closed:
//! the collector protocol names exactly these six levels, and the per-severity stream
//! configuration ([`StreamConfig`]) is keyed on them.
//!
//! [`StreamConfig`]: crate::config::StreamConfig

type StdResult<T, E> = std::result::Result<T, E>;

/// The six log levels understood by the collector, in ascending order of urgency.
///
/// The derived [`Ord`] follows declaration order, so `Severity::Trace < Severity::Critical`
/// holds, and callers can threshold on severities if they wish (this crate itself gates on
/// per-severity streams, not on a threshold). The [`Display`](std::fmt::Display)
/// implementation yields the uppercase name that appears on the wire between the second pair
/// of brackets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Finest-grained tracing output
    Trace,
    /// Diagnostic detail useful while developing
    Debug,
    /// Normal operational messages
    Information,
    /// Something unexpected, but the process can continue
    Warning,
    /// An operation failed
    Error,
    /// The process is unlikely to survive
    Critical,
}

impl Severity {
    /// The name written to the wire for this severity.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Information => "INFORMATION",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(f, "{}", self.name())
    }
}
