//! Error handling

use thiserror::Error;

/// Error
#[derive(Error, Debug)]
pub enum SDKError {
    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The service answered with a non-success status
    #[error("API error: status {status}, body: {body}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Authentication did not yield a usable token
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// SDK result type
pub type Result<T> = std::result::Result<T, SDKError>;

impl SDKError {
    /// Builds an [`SDKError::ApiError`] from a status and raw body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        SDKError::ApiError {
            status,
            body: body.into(),
        }
    }

    /// Whether a later attempt could reasonably succeed.
    ///
    /// Nothing in this crate retries; the flag is surfaced so batch failures
    /// can be triaged from the dumps and logs.
    pub fn is_retryable(&self) -> bool {
        match self {
            SDKError::NetworkError(_) => true,
            SDKError::ApiError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Error
    pub fn is_auth_error(&self) -> bool {
        match self {
            SDKError::AuthError(_) => true,
            SDKError::ApiError { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, SDKError::ConfigError(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SDKError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
