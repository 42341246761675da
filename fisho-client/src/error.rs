//! Client error types

use http::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response that was not one of the specific statuses below
    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected the request body (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// 2xx response carrying `success: false`
    #[error("{0}")]
    Business(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session file access
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Map a non-2xx status and its (already extracted) message.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::BAD_REQUEST => Self::Validation(message),
            _ => Self::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status associated with the failure, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(400),
            _ => None,
        }
    }

    /// `success: false` envelope rather than a transport failure
    pub fn is_business(&self) -> bool {
        matches!(self, Self::Business(_))
    }

    /// Text suitable for a toast: the backend message when there is one.
    pub fn user_message(&self) -> String {
        match self {
            Self::Business(message)
            | Self::Status { message, .. }
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Validation(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            Self::Http(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            Self::Http(e) if e.is_connect() => "Unable to reach the server".to_string(),
            _ => "Something went wrong, please try again".to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
