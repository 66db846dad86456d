//! Explicit logger configuration.
//!
//! The process-wide registry is convenient for top-level code; everything
//! else can describe its logger with a [`LogConfig`] and build it directly.
//!
//! ```
//! use fieldlog_core::{ecs, emit, Format, LogConfig};
//!
//! let logger = LogConfig::new()
//!     .with_format(Format::Structured)
//!     .with_name("billing")
//!     .with_field(ecs::labels([("region", "eu")]))
//!     .build();
//!
//! emit!(logger, "info", "invoice sent");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::env;
use crate::field::Field;
use crate::logger::{with_fields, with_name, with_time, ConsoleLogger, SharedLogger};
use crate::registry;
use crate::render::Format;
use crate::sink::Sink;

#[derive(Clone, Default)]
pub struct LogConfig {
    /// `None` follows the process-wide default renderer at emit time
    format: Option<Format>,
    timestamps: bool,
    name: Option<String>,
    fields: Vec<Field>,
    /// `None` writes to standard output
    sink: Option<Arc<dyn Sink>>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `FIELDLOG_FORMAT` and `FIELDLOG_TIMESTAMPS`.
    pub fn from_env() -> Self {
        Self::from_env_in(env::process_vars())
    }

    /// [`LogConfig::from_env`] over an explicit variable list. Unparsable
    /// values are ignored.
    pub fn from_env_in<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = env::collect(vars);
        Self {
            format: vars.get(env::FORMAT_VAR).and_then(|v| v.parse().ok()),
            timestamps: vars
                .get(env::TIMESTAMPS_VAR)
                .is_some_and(|v| env::is_truthy(v)),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Prepend a fresh `@timestamp` to every event.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Build the logger. Field order of every event: `log.logger`,
    /// `@timestamp`, configured fields, then the emitted inputs.
    pub fn build(&self) -> SharedLogger {
        let mut base = match self.format {
            Some(format) => ConsoleLogger::with_format(format),
            None => ConsoleLogger::new(),
        };
        if let Some(sink) = &self.sink {
            base = base.with_sink(sink.clone());
        }

        let mut logger = with_fields(Arc::new(base), self.fields.clone());
        if self.timestamps {
            logger = with_time(logger);
        }
        match &self.name {
            Some(name) => with_name(logger, name),
            None => logger,
        }
    }

    /// Build the logger and make its format the process-wide default.
    pub fn install(&self) -> SharedLogger {
        if let Some(format) = self.format {
            registry::set_default_format(format);
        }
        self.build()
    }
}

impl fmt::Debug for LogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogConfig")
            .field("format", &self.format)
            .field("timestamps", &self.timestamps)
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("sink", &self.sink.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs;
    use crate::emit;
    use crate::sink::MemorySink;

    #[test]
    fn test_from_env_in() {
        let config = LogConfig::from_env_in([("FIELDLOG_FORMAT", "plain"), ("FIELDLOG_TIMESTAMPS", "yes")]);
        assert_eq!(config.format(), Some(Format::Plain));
        assert!(config.timestamps());

        let config = LogConfig::from_env_in([("FIELDLOG_FORMAT", "yaml")]);
        assert_eq!(config.format(), None);
        assert!(!config.timestamps());
    }

    #[test]
    fn test_build_orders_fields() {
        let sink = Arc::new(MemorySink::new());
        let logger = LogConfig::new()
            .with_format(Format::Plain)
            .with_name("api")
            .with_field(ecs::server_port(8080))
            .with_sink(sink.clone())
            .build();

        emit!(logger, "info", "ready");
        assert_eq!(sink.take(), vec!["api 8080 info ready"]);
        assert_eq!(logger.name(), Some("api"));
    }

    #[test]
    fn test_build_with_timestamps() {
        let sink = Arc::new(MemorySink::new());
        let logger = LogConfig::new()
            .with_format(Format::Structured)
            .with_timestamps(true)
            .with_sink(sink.clone())
            .build();

        emit!(logger, "tick");
        let line = sink.take().remove(0);
        let json: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(json["@timestamp"].is_string());
        assert_eq!(json["message"], "tick");
    }
}
