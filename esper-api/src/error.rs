use esper_transport::{ErrorBody, TransportError};
use thiserror::Error;

use crate::command::ValidationError;

/// High-level API errors for Esper operations
///
/// This enum abstracts the transport details and separates failures that
/// happened before anything was sent (validation) from those reported by the
/// network or the API itself.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request could not be built
    #[error("Request error: {0}")]
    RequestError(String),

    /// Network communication error
    ///
    /// Connection failures, DNS resolution failures, timeouts, or a body
    /// that could not be read.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The API answered with an HTTP status of 400 or above
    #[error("API error (HTTP {status}): {body}")]
    HttpError { status: u16, body: ErrorBody },

    /// Response parsing error
    ///
    /// The API answered successfully but the body was not the expected JSON.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid parameter value, rejected before any request was sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ValidationError),
}

impl ApiError {
    /// HTTP status of an API error response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message extracted from an API error body
    pub fn api_message(&self) -> Option<String> {
        match self {
            ApiError::HttpError { body, .. } => body.message(),
            _ => None,
        }
    }

    /// Whether the call was rejected client-side, before any network I/O
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::InvalidParameter(_))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Request(msg) => ApiError::RequestError(msg),
            TransportError::Network(msg) => ApiError::NetworkError(msg),
            TransportError::Api { status, body } => ApiError::HttpError { status, body },
            TransportError::Decode(msg) => ApiError::ParseError(msg),
        }
    }
}
