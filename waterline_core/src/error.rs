//! Error types for the waterline_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for waterline_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-positive or out-of-range numeric input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Food lookup returned nothing usable
    #[error("Not found: {0}")]
    NotFound(String),
}
