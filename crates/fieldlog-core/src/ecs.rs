//! Convention constructors following the Elastic Common Schema.
//!
//! Every constructor returns a single [`Field`] with a fixed, reserved key.
//! The key constants are the wire contract for consumers of the structured
//! output and must stay stable.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, TimeZone};

use crate::error::LogError;
use crate::field::{Field, FieldValue};

pub const MESSAGE: &str = "message";
pub const TIMESTAMP: &str = "@timestamp";
pub const TAGS: &str = "tags";
pub const LABELS: &str = "labels";
pub const LOG_LEVEL: &str = "log.level";
pub const LOG_LOGGER: &str = "log.logger";
pub const LOG_ORIGIN_FILE_NAME: &str = "log.origin.file.name";
pub const LOG_ORIGIN_FILE_LINE: &str = "log.origin.file.line";
pub const ERROR_MESSAGE: &str = "error.message";
pub const ERROR_TYPE: &str = "error.type";
pub const ERROR_STACK_TRACE: &str = "error.stack_trace";
pub const SERVER_ADDRESS: &str = "server.address";
pub const SERVER_DOMAIN: &str = "server.domain";
pub const SERVER_IP: &str = "server.ip";
pub const SERVER_PORT: &str = "server.port";
pub const URL_PATH: &str = "url.path";

/// Severity carried in the `log.level` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }

    /// The `log.level` field for this level.
    pub fn field(&self) -> Field {
        Field::new(LOG_LEVEL, self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LogError::InvalidFormat(format!("unknown level: {}", s)))
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            _ => Level::Error,
        }
    }
}

/// Format a point in time the way every `@timestamp` is written: RFC3339,
/// second precision, `Z` for UTC.
pub fn rfc3339<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Message field. The key is "message". It contains an optimized view for humans.
pub fn message(msg: impl Into<String>) -> Field {
    Field::new(MESSAGE, msg.into())
}

/// Date/time when the event originated, captured now. The key is "@timestamp".
pub fn timestamp() -> Field {
    Field::new(TIMESTAMP, rfc3339(&chrono::Local::now()))
}

/// Keywords used to tag each event. The key is "tags".
pub fn tags<I, S>(tags: I) -> Field
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    Field::new(TAGS, tags)
}

/// Un-nestable custom key/value pairs. The key is "labels".
pub fn labels<I, K, V>(labels: I) -> Field
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let labels: BTreeMap<String, FieldValue> = labels
        .into_iter()
        .map(|(k, v)| (k.into(), FieldValue::Str(v.into())))
        .collect();
    Field::new(LABELS, FieldValue::Map(labels))
}

/// Name of the logger, like `org.elasticsearch.bootstrap.Bootstrap`. The key is "log.logger".
pub fn logger(name: impl Into<String>) -> Field {
    Field::new(LOG_LOGGER, name.into())
}

pub fn level(level: Level) -> Field {
    level.field()
}

pub fn trace() -> Field {
    Level::Trace.field()
}

pub fn debug() -> Field {
    Level::Debug.field()
}

pub fn info() -> Field {
    Level::Info.field()
}

pub fn warn() -> Field {
    Level::Warn.field()
}

pub fn error() -> Field {
    Level::Error.field()
}

pub fn fatal() -> Field {
    Level::Fatal.field()
}

pub fn panic() -> Field {
    Level::Panic.field()
}

/// Error message field. The key is "error.message".
pub fn error_message<E>(err: &E) -> Field
where
    E: std::error::Error + ?Sized,
{
    Field::new(ERROR_MESSAGE, err.to_string())
}

/// Rust type name of the error. The key is "error.type". For trait objects
/// this is the `dyn` type, not the concrete one.
pub fn error_type<E>(_err: &E) -> Field
where
    E: std::error::Error + ?Sized,
{
    Field::new(ERROR_TYPE, std::any::type_name::<E>())
}

/// Capture the caller's stack. The key is "error.stack_trace".
///
/// This is expensive: the backtrace is always captured and symbolized,
/// regardless of `RUST_BACKTRACE`. Frames of the capture machinery itself
/// are stripped so the first frame shown is the caller's.
#[inline(never)]
pub fn stack_trace() -> Field {
    let trace = std::backtrace::Backtrace::force_capture();
    let rendered = match trace.status() {
        std::backtrace::BacktraceStatus::Captured => strip_capture_frames(&trace.to_string()),
        _ => trace.to_string(),
    };
    Field::new(ERROR_STACK_TRACE, rendered)
}

/// Server address, may be a host name or an ip. The key is "server.address".
pub fn server_address(address: impl Into<String>) -> Field {
    Field::new(SERVER_ADDRESS, address.into())
}

/// The key is "server.domain".
pub fn server_domain(domain: impl Into<String>) -> Field {
    Field::new(SERVER_DOMAIN, domain.into())
}

/// Accepts anything printable, typically a `std::net::IpAddr`. The key is "server.ip".
pub fn server_ip(ip: impl fmt::Display) -> Field {
    Field::new(SERVER_IP, ip.to_string())
}

/// The key is "server.port".
pub fn server_port(port: u16) -> Field {
    Field::new(SERVER_PORT, port)
}

/// Drop the leading frames that belong to `std::backtrace` and to
/// [`stack_trace`] itself.
fn strip_capture_frames(trace: &str) -> String {
    let frames = split_frames(trace);
    let skip = frames
        .iter()
        .take_while(|frame| is_capture_frame(frame))
        .count();

    frames[skip..].join("\n")
}

/// Group the lines of a rendered backtrace into frames. A frame starts at a
/// line of the form `<index>: <symbol>`; `at <file>` lines belong to it.
fn split_frames(trace: &str) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    for line in trace.lines() {
        match frames.last_mut() {
            Some(frame) if frame_symbol(line).is_none() => {
                frame.push('\n');
                frame.push_str(line);
            }
            _ => frames.push(line.to_string()),
        }
    }
    frames
}

fn frame_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.trim_start().split_once(": ")?;
    if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
        Some(symbol)
    } else {
        None
    }
}

fn is_capture_frame(frame: &str) -> bool {
    let Some(symbol) = frame.lines().next().and_then(frame_symbol) else {
        return false;
    };
    symbol.starts_with("std::backtrace")
        || symbol.starts_with("<std::backtrace")
        || symbol.starts_with("fieldlog_core::ecs::stack_trace")
}
