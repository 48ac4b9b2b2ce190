//! Error types for shiftsync operations.
//!
//! Unparseable fragments are not errors: the parser rejects them with `None`.

use thiserror::Error;

/// Errors raised by a schedule source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid schedule snapshot: {0}")]
    Snapshot(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),
}

/// Errors raised by a remote calendar backend.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Calendar configuration error: {0}")]
    Config(String),

    #[error("Calendar authentication failed: {0}")]
    Auth(String),

    #[error("Calendar API error: {0}")]
    Api(String),
}

/// Result type alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
