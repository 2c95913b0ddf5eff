//! Error types for the offscreen engine
//!
//! Recoverable failures only: texture allocation, configuration and
//! target bookkeeping. Attachment failures are fatal and never reach
//! this type (see `engine_fatal!`).

use std::fmt;

/// Result type for offscreen engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Offscreen engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Graphics backend refused an operation (texture creation, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (unknown or duplicate target, bad texture, etc.)
    InvalidResource(String),

    /// Repaint configuration could not be read or is inconsistent
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::InvalidConfig(err.message().to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
