//! Error types for fieldlog

use thiserror::Error;

/// Errors raised by the fallible helpers of the facade.
///
/// Emitting a log line never returns one of these; they only surface from
/// functions like [`crate::render::Structured::try_render`] or when parsing a
/// [`crate::render::Format`].
#[derive(Error, Debug)]
pub enum LogError {
    /// Field values could not be serialized to JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing to the output sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown renderer name
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type alias using LogError
pub type LogResult<T> = Result<T, LogError>;
