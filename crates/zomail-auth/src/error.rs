//! Error types for token operations

use thiserror::Error;

/// Result type for token operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while obtaining or persisting tokens
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP transport failure talking to the token endpoint
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Token endpoint answered with a non-success status
    #[error("token endpoint returned {status}: {body}")]
    ApiError { status: u16, body: String },

    /// Response body was not the expected token payload
    #[error("malformed token response: {0}")]
    MalformedResponse(String),

    /// Persisted token could not be read or written
    #[error("token store error: {0}")]
    StoreError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
