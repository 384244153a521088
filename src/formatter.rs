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

//! Log line formatting.
//!
//! Every message delivered to the collector is a single newline-terminated text line:
//!
//! ```text
//! [<local-datetime>] [<SEVERITY-NAME>] [PID:<integer>] <message>\n
//! ```
//!
//! The timestamp is captured at format time, in local time, at second resolution. The process
//! id is read fresh on every call rather than cached at construction, so a client carried
//! across a `fork()` stamps the child's pid, not the parent's.
//!
//! # Examples
//!
//! ```rust
//! use logwire::{LineFormatter, Severity};
//!
//! let formatter = LineFormatter::default();
//! let line = formatter.format_line(Severity::Error, "disk full");
//! assert!(line.ends_with("disk full\n"));
//! assert!(line.contains("[ERROR]"));
//! ```

use crate::severity::Severity;

use chrono::prelude::*;

/// The `strftime`-style layout of the leading timestamp field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Assembles wire-format log lines.
///
/// The pid is an injected provider rather than a direct call to [`std::process::id`], so that
/// tests can substitute a deterministic value; the default provider *is*
/// [`std::process::id`], invoked per line.
pub struct LineFormatter {
    pid_source: Box<dyn Fn() -> u32 + Send + Sync>,
}

impl std::default::Default for LineFormatter {
    fn default() -> Self {
        LineFormatter {
            pid_source: Box::new(std::process::id),
        }
    }
}

impl LineFormatter {
    /// Construct a [`LineFormatter`] that stamps lines with pids drawn from `pid_source`
    /// instead of the running process's id.
    pub fn with_pid_source<F>(pid_source: F) -> Self
    where
        F: Fn() -> u32 + Send + Sync + 'static,
    {
        LineFormatter {
            pid_source: Box::new(pid_source),
        }
    }
    /// Build the complete wire line for (`severity`, `message`), timestamp captured now.
    pub fn format_line(&self, severity: Severity, message: &str) -> String {
        format!(
            "[{}] [{}] [PID:{}] {}\n",
            Local::now().format(TIMESTAMP_FORMAT),
            severity,
            (self.pid_source)(),
            message
        )
    }
}
