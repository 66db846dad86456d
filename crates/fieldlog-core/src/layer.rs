//! Bridge from the `tracing` ecosystem.
//!
//! [`FieldLayer`] is a `tracing_subscriber` Layer that turns every event into
//! fields and emits them through a [`Logger`], so libraries instrumented
//! with `tracing` end up in the same output as direct log calls.
//!
//! ```ignore
//! use fieldlog_core::{layer::FieldLayer, registry};
//! use tracing_subscriber::prelude::*;
//!
//! tracing_subscriber::registry()
//!     .with(FieldLayer::new(registry::new_logger("app", Vec::new())))
//!     .init();
//!
//! tracing::warn!(retries = 3, "upstream unavailable");
//! ```

use std::fmt::Write as FmtWrite;

use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::classify::Loggable;
use crate::ecs::{self, Level};
use crate::field::{Field, FieldValue};
use crate::logger::SharedLogger;

/// A tracing Layer that forwards events to a logger.
///
/// Each event becomes `log.level`, `message`, the event's own fields in
/// recording order, then `log.origin.file.name` / `log.origin.file.line`
/// when the callsite knows them.
pub struct FieldLayer {
    logger: SharedLogger,
    origin: bool,
}

impl FieldLayer {
    pub fn new(logger: SharedLogger) -> Self {
        Self {
            logger,
            origin: true,
        }
    }

    /// Omit the `log.origin.*` fields.
    pub fn without_origin(mut self) -> Self {
        self.origin = false;
        self
    }
}

impl<S> Layer<S> for FieldLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut fields = Vec::with_capacity(visitor.fields.len() + 4);
        fields.push(Level::from(*metadata.level()).field());
        if let Some(message) = visitor.message {
            fields.push(ecs::message(message));
        }
        fields.extend(visitor.fields);

        if self.origin {
            if let Some(file) = metadata.file() {
                fields.push(Field::new(ecs::LOG_ORIGIN_FILE_NAME, file));
            }
            if let Some(line) = metadata.line() {
                fields.push(Field::new(ecs::LOG_ORIGIN_FILE_LINE, line));
            }
        }

        self.logger
            .log(fields.into_iter().map(Loggable::Field).collect());
    }
}

/// Collects the message and the remaining event fields.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn push(&mut self, field: &TracingField, value: FieldValue) {
        self.fields.push(Field::new(field.name(), value));
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &TracingField, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);

        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.push(field, FieldValue::Str(buf));
        }
    }

    fn record_str(&mut self, field: &TracingField, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.push(field, FieldValue::from(value));
        }
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, FieldValue::Int(value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, FieldValue::UInt(value));
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, FieldValue::Float(value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, FieldValue::Bool(value));
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(field, FieldValue::Str(value.to_string()));
    }
}
