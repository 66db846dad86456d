//! Classification of loosely typed log inputs into fields.
//!
//! Callers pass a mix of pre-built fields, bare strings, errors and
//! timestamps (`"info", "doing X", err`) and get ECS keys without tagging
//! every call site:
//!
//! | Input                                   | Field(s)                          |
//! |-----------------------------------------|-----------------------------------|
//! | [`Field`]                               | passed through unchanged          |
//! | lazy field closure                      | invoked, result passed through    |
//! | error                                   | `error.message`, then `error.type`|
//! | `trace`/`debug`/`info`/`warn`/`fatal`   | `log.level`                       |
//! | other string starting with `http`       | `url.path`                        |
//! | any other string                        | `message`                         |
//! | timestamp                               | `@timestamp` (RFC3339)            |
//! | anything else                           | `message` (its `Display` text)    |
//!
//! The `http` prefix rule also catches plain messages that merely start with
//! "http"; that is accepted in exchange for short call sites.

use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use crate::ecs;
use crate::field::Field;

/// Bare strings that classify as a `log.level` field. Matching is exact and
/// case-sensitive; `error` and `panic` are deliberately absent so that those
/// words stay messages.
pub const LEVEL_TOKENS: [&str; 5] = ["trace", "debug", "info", "warn", "fatal"];

/// A raw value handed to a log call, before classification.
pub enum Loggable {
    Field(Field),
    /// Produces its field when classified
    Lazy(Box<dyn FnOnce() -> Field + Send>),
    Error {
        message: String,
        type_name: String,
    },
    Str(String),
    Time(DateTime<FixedOffset>),
    /// Any other value, already converted with `Display`
    Other(String),
}

impl Loggable {
    /// Capture an error's display text and its Rust type name.
    pub fn error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Loggable::Error {
            message: err.to_string(),
            type_name: std::any::type_name::<E>().to_string(),
        }
    }

    /// Defer building a field until the event is classified.
    pub fn lazy<F>(f: F) -> Self
    where
        F: FnOnce() -> Field + Send + 'static,
    {
        Loggable::Lazy(Box::new(f))
    }

    /// Treat any printable value as a message fragment.
    pub fn display(value: impl fmt::Display) -> Self {
        Loggable::Other(value.to_string())
    }

    /// Classify this single input, appending the resulting field(s) to `out`.
    fn classify_into(self, out: &mut Vec<Field>) {
        match self {
            Loggable::Field(field) => out.push(field),
            Loggable::Lazy(f) => out.push(f()),
            Loggable::Error { message, type_name } => {
                out.push(Field::new(ecs::ERROR_MESSAGE, message));
                out.push(Field::new(ecs::ERROR_TYPE, type_name));
            }
            Loggable::Str(s) => out.push(classify_str(s)),
            Loggable::Time(time) => out.push(Field::new(ecs::TIMESTAMP, ecs::rfc3339(&time))),
            Loggable::Other(s) => out.push(Field::new(ecs::MESSAGE, s)),
        }
    }
}

impl fmt::Debug for Loggable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loggable::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Loggable::Lazy(_) => f.write_str("Lazy(..)"),
            Loggable::Error { message, type_name } => f
                .debug_struct("Error")
                .field("message", message)
                .field("type_name", type_name)
                .finish(),
            Loggable::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Loggable::Time(t) => f.debug_tuple("Time").field(t).finish(),
            Loggable::Other(s) => f.debug_tuple("Other").field(s).finish(),
        }
    }
}

fn classify_str(s: String) -> Field {
    if LEVEL_TOKENS.contains(&s.as_str()) {
        Field::new(ecs::LOG_LEVEL, s)
    } else if s.starts_with("http") {
        Field::new(ecs::URL_PATH, s)
    } else {
        Field::new(ecs::MESSAGE, s)
    }
}

/// Normalize inputs into fields.
///
/// Total: every input yields at least one field. Input order is preserved;
/// an error expands in place to `error.message` followed by `error.type`.
pub fn classify<I>(inputs: I) -> Vec<Field>
where
    I: IntoIterator<Item = Loggable>,
{
    let inputs = inputs.into_iter();
    let mut fields = Vec::with_capacity(inputs.size_hint().0);
    for input in inputs {
        input.classify_into(&mut fields);
    }
    fields
}

impl From<Field> for Loggable {
    fn from(field: Field) -> Self {
        Loggable::Field(field)
    }
}

impl From<&str> for Loggable {
    fn from(s: &str) -> Self {
        Loggable::Str(s.to_string())
    }
}

impl From<String> for Loggable {
    fn from(s: String) -> Self {
        Loggable::Str(s)
    }
}

impl From<&String> for Loggable {
    fn from(s: &String) -> Self {
        Loggable::Str(s.clone())
    }
}

impl From<std::io::Error> for Loggable {
    fn from(err: std::io::Error) -> Self {
        Loggable::error(&err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Loggable {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Loggable::error(err.as_ref())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Loggable {
    fn from(time: DateTime<Tz>) -> Self {
        Loggable::Time(time.fixed_offset())
    }
}

impl From<SystemTime> for Loggable {
    fn from(time: SystemTime) -> Self {
        Loggable::from(DateTime::<Utc>::from(time))
    }
}

macro_rules! impl_from_display {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Loggable {
                fn from(v: $t) -> Self {
                    Loggable::Other(v.to_string())
                }
            }
        )+
    };
}

impl_from_display!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Build a `Vec<Loggable>` from heterogeneous values.
///
/// ```
/// use fieldlog_core::{classify, ecs, loggables};
///
/// let fields = classify(loggables!["info", "opening connection", ecs::server_port(80)]);
/// assert_eq!(fields.len(), 3);
/// ```
#[macro_export]
macro_rules! loggables {
    () => {
        ::std::vec::Vec::<$crate::Loggable>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Loggable::from($value)),+]
    };
}
