//! Error types for Mail API operations

use thiserror::Error;
use zomail_auth::AuthError;
use zomail_core::ConfigError;

/// Result type for Mail API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Broad failure categories.
///
/// Outer boundaries log one message per category; `Configuration` failures
/// need a caller-side fix, `Api` failures came back from Zoho, everything
/// else is `Unexpected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Api,
    Unexpected,
}

/// Errors that can occur during Mail API operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required send parameters are absent
    #[error("missing required parameters: {}", .keys.join(", "))]
    MissingParams { keys: Vec<&'static str> },

    /// Invalid client configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Token acquisition failed
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Zoho answered with a non-success status
    #[error("Zoho API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("failed to parse response: {0}")]
    ParseError(String),

    /// Account listing came back without any account
    #[error("no mail accounts returned for these credentials")]
    NoAccounts,

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ApiError {
    /// Classify this error into the category used for boundary logging.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MissingParams { .. } | ApiError::Config(_) => ErrorKind::Configuration,
            ApiError::Api { .. } | ApiError::ParseError(_) | ApiError::NoAccounts => {
                ErrorKind::Api
            }
            ApiError::Auth(e) => match e {
                AuthError::ApiError { .. } | AuthError::MalformedResponse(_) => ErrorKind::Api,
                _ => ErrorKind::Unexpected,
            },
            ApiError::RequestFailed(_) | ApiError::IoError(_) => ErrorKind::Unexpected,
        }
    }
}
