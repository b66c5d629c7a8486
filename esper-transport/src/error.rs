//! Error types for the HTTP transport

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Keys the Esper API uses to carry a human readable error message
const MESSAGE_KEYS: [&str; 4] = ["error", "detail", "message", "errors"];

/// Body of an error response, kept as JSON when it parses as an object
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// The server answered with a JSON object
    Json(Map<String, Value>),
    /// Anything else, kept verbatim
    Raw(String),
}

impl ErrorBody {
    /// Parse an error response body, falling back to the raw text
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Map<String, Value>>(text) {
            Ok(map) => ErrorBody::Json(map),
            Err(_) => ErrorBody::Raw(text.to_string()),
        }
    }

    /// Best-effort error message extracted from the body
    pub fn message(&self) -> Option<String> {
        match self {
            ErrorBody::Json(map) => MESSAGE_KEYS
                .iter()
                .find_map(|key| map.get(*key))
                .map(|value| match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                }),
            ErrorBody::Raw(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }

    /// The parsed JSON object, if the body was one
    pub fn as_json(&self) -> Option<&Map<String, Value>> {
        match self {
            ErrorBody::Json(map) => Some(map),
            ErrorBody::Raw(_) => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBody::Json(map) => {
                let rendered = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
            ErrorBody::Raw(text) => f.write_str(text),
        }
    }
}

/// Errors that can occur while talking to the Esper API
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be built (unserializable body, malformed URL)
    #[error("Request construction error: {0}")]
    Request(String),

    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The API answered with a status code of 400 or above
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: ErrorBody },

    /// The response body was not the expected JSON object
    #[error("Response decode error: {0}")]
    Decode(String),
}

impl TransportError {
    /// HTTP status carried by an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_ureq_transport(error: ureq::Transport) -> Self {
        match error.kind() {
            ureq::ErrorKind::InvalidUrl
            | ureq::ErrorKind::UnknownScheme
            | ureq::ErrorKind::BadHeader => TransportError::Request(error.to_string()),
            _ => TransportError::Network(error.to_string()),
        }
    }
}
