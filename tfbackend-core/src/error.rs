//! Error types for tfbackend

use thiserror::Error;

/// Result type for tfbackend operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tfbackend
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend record error
    #[error("Backend error: {0}")]
    Backend(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
