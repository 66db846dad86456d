//! fieldlog Core Library
//!
//! A structured logging facade: application code emits leveled,
//! field-tagged events without binding to a concrete backend.
//!
//! ## Overview
//!
//! ```text
//! caller ─▶ Logger::log(inputs) ─▶ decorators prepend fields ─▶ classify ─▶ render ─▶ stdout
//!                                  (name, @timestamp, fixed)     (Loggable   (plain, colored,
//!                                                                 → Field)    structured JSON)
//! ```
//!
//! - [`Field`]: immutable key/value datum with ECS-style keys (`log.level`, `error.message`)
//! - [`classify`]: turns loosely typed inputs into fields
//! - [`ecs`]: constructors for the reserved keys
//! - [`render`]: plain, colored and structured renderers
//! - [`Logger`]: emit capability plus `with_name` / `with_time` / `with_fields`
//! - [`registry`]: process-wide factory and default renderer
//! - [`context`]: request-scoped logger lookup
//!
//! ## Quick Start
//!
//! ```
//! use fieldlog_core::{ecs, emit, registry};
//!
//! let logger = registry::new_logger("app", vec![ecs::labels([("env", "dev")])]);
//! let db = registry::child_logger(Some(logger), "db", Vec::new());
//!
//! let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
//! emit!(db, "warn", "query failed", fieldlog_core::Loggable::error(&err));
//! ```
//!
//! In development (IDE or non-production `APP_ENV`/`NODE_ENV`) lines are
//! colored; otherwise every line is a JSON object.

pub mod classify;
pub mod config;
pub mod context;
pub mod ecs;
pub mod env;
pub mod error;
pub mod field;
pub mod layer;
pub mod logger;
pub mod registry;
pub mod render;
pub mod sink;

// Re-exports
pub use classify::{classify, Loggable, LEVEL_TOKENS};
pub use config::LogConfig;
pub use context::Context;
pub use ecs::Level;
pub use error::{LogError, LogResult};
pub use field::{Field, FieldValue};
pub use layer::FieldLayer;
pub use logger::{
    logger_fn, with_fields, with_name, with_time, ConsoleLogger, Logger, Prefix, SharedLogger,
};
pub use render::{Colored, Format, Plain, Render, SharedRender, Structured};
pub use sink::{MemorySink, Sink, StdoutSink, WriterSink};
