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

//! [logwire](crate) [`Layer`] implementation.
//!
//! [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
//!
//! Programs already instrumented with [`tracing`] need not call
//! [`LoggingClient::log`](crate::client::LoggingClient::log) by hand: [`Layer`] wraps a
//! [`LoggingClient`] and forwards each [`Event`]'s "message" field to the collector, mapping
//! the event's [`tracing::Level`] onto a [`Severity`]. Per-severity gating still happens
//! inside the client, so a disabled stream silently swallows the corresponding events.
//!
//! [`Event`]: https://docs.rs/tracing/latest/tracing/struct.Event.html
//!
//! A transport failure inside the layer cannot be propagated to the instrumented code (the
//! [`Layer`] trait's hooks return `()`), so the event is dropped after reporting the failure
//! through `tracing` itself.
//!
//! # Examples
//!
//! ```rust,no_run
//! use logwire::{layer::Layer, LoggingClient, Severity, StreamConfig};
//! use tracing_subscriber::{layer::SubscriberExt, registry::Registry};
//!
//! # fn main() -> logwire::Result<()> {
//! let config = StreamConfig::new().stream(Severity::Error, "err", true);
//! let client = LoggingClient::new("/run/collector.sock", config)?;
//! let subscriber = Registry::default().with(Layer::new(client));
//! let _guard = tracing::subscriber::set_default(subscriber);
//!
//! tracing::error!("disk full"); // forwarded to the collector
//! tracing::info!("routine");    // gated off: no Information stream
//! # Ok(())
//! # }
//! ```

use crate::{client::LoggingClient, severity::Severity, transport::Transport};

use tracing::Event;
use tracing_subscriber::layer::Context;

/// The conventional mapping from [`tracing`]'s levels onto [`Severity`]. Nothing in
/// `tracing` maps to [`Severity::Critical`]; reach it through
/// [`LoggingClient::log`](crate::client::LoggingClient::log) directly.
fn default_level_mapping(level: &tracing::Level) -> Severity {
    match level {
        &tracing::Level::TRACE => Severity::Trace,
        &tracing::Level::DEBUG => Severity::Debug,
        &tracing::Level::INFO => Severity::Information,
        &tracing::Level::WARN => Severity::Warning,
        &tracing::Level::ERROR => Severity::Error,
    }
}

struct MessageEventVisitor {
    message: Option<String>,
}

impl tracing_core::field::Visit for MessageEventVisitor {
    fn record_debug(&mut self, field: &tracing_core::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            // Regrettably, we have only a `Debug` implementation available to us; but the
            // tracing macros `info!()`, `event!()` & the like all take care to "pre-format"
            // the `message` field so that `value` actually refers to a `std::fmt::Arguments`
            // instance, which will print to a debug format without enclosing double-quotes.
            self.message = Some(format!("{:?}", value));
        }
    }
}

/// A [`tracing-subscriber`]-compliant [`Layer`] implementation that forwards [`Event`]s to a
/// log collector through a [`LoggingClient`].
///
/// [`tracing-subscriber`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/index.html
/// [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
/// [`Event`]: https://docs.rs/tracing/latest/tracing/struct.Event.html
pub struct Layer<S, T: Transport>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    client: LoggingClient<T>,
    map_level: Box<dyn Fn(&tracing::Level) -> Severity + Send + Sync>,
    // I need the Subscriber implementation type as a type parameter to transmit it to the
    // Layer trait. 👇 gets the compiler to shut-up about unused type parameters.
    subscriber_type: std::marker::PhantomData<S>,
}

impl<S, T: Transport> Layer<S, T>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    /// Wrap `client` in a [`Layer`] using the conventional level mapping.
    pub fn new(client: LoggingClient<T>) -> Self {
        Layer {
            client,
            map_level: Box::new(default_level_mapping),
            subscriber_type: std::marker::PhantomData,
        }
    }

    /// Replace the level mapping (e.g. to route `WARN` events to the Error stream).
    pub fn with_level_mapping<F>(mut self, map_level: F) -> Self
    where
        F: Fn(&tracing::Level) -> Severity + Send + Sync + 'static,
    {
        self.map_level = Box::new(map_level);
        self
    }
}

impl<S, T> tracing_subscriber::Layer<S> for Layer<S, T>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    T: Transport + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageEventVisitor { message: None };
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            let severity = (self.map_level)(event.metadata().level());
            self.client
                .log(&message, severity)
                .map(|_| ())
                .unwrap_or_else(|_err| {
                    ::tracing::error!("failed to forward an event to the log collector");
                });
        }
    }
}
