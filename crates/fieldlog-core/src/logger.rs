//! Loggers and their composition.
//!
//! ## Architecture
//!
//! ```text
//! caller ──▶ NamedLogger ──▶ TimedLogger ──▶ FieldsLogger ──▶ ConsoleLogger ──▶ Sink
//!            + log.logger    + @timestamp    + fixed fields   classify
//!                                                             render
//! ```
//!
//! Decorators never mutate the logger they wrap. Each one appends its fields
//! to a [`Prefix`] that travels down the chain, so the outermost decorator's
//! fields come first in the final line. The root logger classifies
//! `prefix ++ inputs` and hands the result to a renderer.

use std::fmt;
use std::sync::Arc;

use crate::classify::{classify, Loggable};
use crate::ecs;
use crate::field::Field;
use crate::registry;
use crate::render::{Format, SharedRender};
use crate::sink::{Sink, StdoutSink};

/// Fields accumulated by decorators on their way to the root logger.
///
/// Besides the fields it records whether an enclosing [`NamedLogger`]
/// already emitted the full, dot-joined name, so inner named loggers stay
/// quiet. A `log.logger` field supplied by the caller does not count.
#[derive(Debug, Clone, Default)]
pub struct Prefix {
    fields: Vec<Field>,
    named: bool,
}

impl Prefix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn extend<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        self.fields.extend(fields);
    }

    /// Push `log.logger` and mark the prefix as named.
    pub fn push_name(&mut self, name: &str) {
        self.fields.push(ecs::logger(name));
        self.named = true;
    }

    pub fn is_named(&self) -> bool {
        self.named
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl From<Vec<Field>> for Prefix {
    fn from(fields: Vec<Field>) -> Self {
        Self {
            fields,
            named: false,
        }
    }
}

/// The logging capability.
///
/// Emitting never fails and returns nothing; a broken renderer or sink
/// degrades the output, not the caller's control flow.
pub trait Logger: Send + Sync {
    /// Emit one event built from the given inputs.
    fn log(&self, inputs: Vec<Loggable>) {
        self.log_with(Prefix::new(), inputs)
    }

    /// Emit one event whose first fields are `prefix`, as accumulated by
    /// enclosing decorators.
    fn log_with(&self, prefix: Prefix, inputs: Vec<Loggable>);

    /// Hierarchical, dot-joined name, if any decorator in the chain set one.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Shared handle to any logger.
pub type SharedLogger = Arc<dyn Logger>;

/// Root logger: classifies, renders, writes one line to a sink.
pub struct ConsoleLogger {
    /// `None` looks up the process-wide default renderer on every emit
    renderer: Option<SharedRender>,
    sink: Arc<dyn Sink>,
}

impl ConsoleLogger {
    /// Logger that resolves the process-wide default renderer at emit time,
    /// so later calls to [`registry::set_default_renderer`] affect it.
    pub fn new() -> Self {
        Self {
            renderer: None,
            sink: Arc::new(StdoutSink),
        }
    }

    /// Logger that keeps the given renderer for its whole lifetime.
    pub fn with_renderer(renderer: SharedRender) -> Self {
        Self {
            renderer: Some(renderer),
            sink: Arc::new(StdoutSink),
        }
    }

    pub fn with_format(format: Format) -> Self {
        Self::with_renderer(format.renderer())
    }

    /// Replace the output sink (standard output by default).
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    /// Whether the renderer is looked up at emit time.
    pub fn follows_default_renderer(&self) -> bool {
        self.renderer.is_none()
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("follows_default_renderer", &self.follows_default_renderer())
            .finish_non_exhaustive()
    }
}

impl Logger for ConsoleLogger {
    fn log_with(&self, prefix: Prefix, inputs: Vec<Loggable>) {
        let fields = classify(
            prefix.into_fields().into_iter().map(Loggable::Field).chain(inputs),
        );
        let line = match &self.renderer {
            Some(renderer) => renderer.render(&fields),
            None => registry::default_renderer().render(&fields),
        };
        self.sink.write_line(&line);
    }
}

/// Adapts a closure receiving the classified fields into a logger.
pub struct FnLogger<F> {
    f: F,
}

impl<F> Logger for FnLogger<F>
where
    F: Fn(Vec<Field>) + Send + Sync,
{
    fn log_with(&self, prefix: Prefix, inputs: Vec<Loggable>) {
        (self.f)(classify(
            prefix.into_fields().into_iter().map(Loggable::Field).chain(inputs),
        ))
    }
}

pub fn logger_fn<F>(f: F) -> SharedLogger
where
    F: Fn(Vec<Field>) + Send + Sync + 'static,
{
    Arc::new(FnLogger { f })
}

/// Prepends `log.logger`.
pub struct NamedLogger {
    inner: SharedLogger,
    name: String,
}

impl Logger for NamedLogger {
    fn log_with(&self, mut prefix: Prefix, inputs: Vec<Loggable>) {
        // an enclosing NamedLogger already emitted the longer, joined name
        if !prefix.is_named() {
            prefix.push_name(&self.name);
        }
        self.inner.log_with(prefix, inputs)
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Prepends `@timestamp`, taken at each emit.
pub struct TimedLogger {
    inner: SharedLogger,
}

impl Logger for TimedLogger {
    fn log_with(&self, mut prefix: Prefix, inputs: Vec<Loggable>) {
        prefix.push(ecs::timestamp());
        self.inner.log_with(prefix, inputs)
    }

    fn name(&self) -> Option<&str> {
        self.inner.name()
    }
}

/// Prepends a fixed set of fields computed once, at wrap time.
pub struct FieldsLogger {
    inner: SharedLogger,
    fields: Vec<Field>,
}

impl Logger for FieldsLogger {
    fn log_with(&self, mut prefix: Prefix, inputs: Vec<Loggable>) {
        prefix.extend(self.fields.iter().cloned());
        self.inner.log_with(prefix, inputs)
    }

    fn name(&self) -> Option<&str> {
        self.inner.name()
    }
}

/// Wrap `inner` so every event carries `log.logger`.
///
/// If `inner` is already named `parent`, the new name is `parent.name`.
/// An empty name returns `inner` unchanged.
pub fn with_name(inner: SharedLogger, name: &str) -> SharedLogger {
    if name.is_empty() {
        return inner;
    }

    let name = match inner.name() {
        Some(parent) if !parent.is_empty() => format!("{}.{}", parent, name),
        _ => name.to_string(),
    };
    Arc::new(NamedLogger { inner, name })
}

/// Wrap `inner` so every event carries the current `@timestamp`.
pub fn with_time(inner: SharedLogger) -> SharedLogger {
    Arc::new(TimedLogger { inner })
}

/// Wrap `inner` so every event starts with `fields`. No fields returns
/// `inner` unchanged.
pub fn with_fields(inner: SharedLogger, fields: Vec<Field>) -> SharedLogger {
    if fields.is_empty() {
        return inner;
    }
    Arc::new(FieldsLogger { inner, fields })
}

/// Log heterogeneous values through any logger.
///
/// ```
/// use fieldlog_core::{emit, ecs, ConsoleLogger, Format};
///
/// let logger = ConsoleLogger::with_format(Format::Plain);
/// emit!(logger, "info", "listening", ecs::server_port(8080));
/// ```
#[macro_export]
macro_rules! emit {
    ($logger:expr $(, $value:expr)* $(,)?) => {{
        use $crate::Logger as _;
        $logger.log($crate::loggables![$($value),*])
    }};
}
