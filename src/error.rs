//! Error types for the proctoring library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input parameters provided (non-finite angles, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Geometry estimation failed (face detection or pose fitting)
    #[error("Geometry estimation error: {0}")]
    Estimation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
