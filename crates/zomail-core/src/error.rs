//! Error types for configuration handling

use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while building or validating a [`crate::Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required keys are empty
    #[error("missing required configuration: {}", .keys.join(", "))]
    MissingKeys { keys: Vec<&'static str> },

    /// File-backed token store selected without a path
    #[error("token_file_path is required when token_store is \"file\"")]
    MissingTokenFilePath,

    /// A value could not be parsed (bad enum variant, non-numeric timeout, ...)
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
