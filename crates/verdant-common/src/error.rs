//! Error types for Verdant.

use thiserror::Error;

/// Top-level error type for host-facing Verdant operations.
#[derive(Debug, Error)]
pub enum VerdantError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// Configuration was parsed but is not usable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for Verdant operations.
pub type VerdantResult<T> = Result<T, VerdantError>;
