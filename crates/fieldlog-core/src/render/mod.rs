//! Renderers: from a classified field sequence to one output line.
//!
//! ## Available renderers
//!
//! | Renderer       | Output                                         | Dedup            |
//! |----------------|------------------------------------------------|------------------|
//! | [`Plain`]      | values only, space separated                   | none             |
//! | [`Colored`]    | values only, ANSI colored by reserved keys     | none             |
//! | [`Structured`] | one JSON object, keys sorted                   | last key wins    |
//!
//! A renderer never mutates its input and never fails: the structured
//! renderer degrades to a diagnostic line when serialization is impossible.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::LogError;
use crate::field::Field;

mod colored;
mod plain;
mod structured;

pub use colored::{Colored, STACK_TRACE_INDENT};
pub use plain::Plain;
pub use structured::Structured;

/// Turns a field sequence into a single line (without trailing newline).
pub trait Render: Send + Sync {
    fn render(&self, fields: &[Field]) -> String;
}

impl<F> Render for F
where
    F: Fn(&[Field]) -> String + Send + Sync,
{
    fn render(&self, fields: &[Field]) -> String {
        self(fields)
    }
}

/// Shared handle to a renderer, as stored in loggers and the registry.
pub type SharedRender = Arc<dyn Render>;

/// The built-in renderers, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Plain,
    Colored,
    Structured,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Plain => "plain",
            Format::Colored => "color",
            Format::Structured => "json",
        }
    }

    /// A shared instance of the renderer this format names.
    pub fn renderer(&self) -> SharedRender {
        match self {
            Format::Plain => Arc::new(Plain),
            Format::Colored => Arc::new(Colored),
            Format::Structured => Arc::new(Structured),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Format::Plain),
            "color" | "colored" | "colour" => Ok(Format::Colored),
            "json" | "structured" => Ok(Format::Structured),
            other => Err(LogError::InvalidFormat(other.to_string())),
        }
    }
}
