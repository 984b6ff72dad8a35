//! Error types for the gesture control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// OS input simulation call failed
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Session log could not be written or parsed
    #[error("Session log error: {0}")]
    Log(String),

    /// Session lifecycle violation (e.g. processing frames while stopped)
    #[error("Session error: {0}")]
    Session(String),

    /// Recorded observation trace could not be loaded
    #[error("Trace error: {0}")]
    Trace(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
