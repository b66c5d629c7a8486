//! Decoded API responses

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::TransportError;

/// A successful API response: the HTTP status and the decoded JSON object
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: u16,
    data: Map<String, Value>,
}

impl ApiResponse {
    pub fn new(status: u16, data: Map<String, Value>) -> Self {
        Self { status, data }
    }

    /// HTTP status code of the response
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The decoded body as a generic mapping
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    /// Look up a top-level key of the body
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Deserialize the body into a caller-chosen type
    ///
    /// # Example
    /// ```rust,ignore
    /// #[derive(serde::Deserialize)]
    /// struct CommandRequest { id: String, state: String }
    ///
    /// let request: CommandRequest = response.deserialize_into()?;
    /// ```
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_value(Value::Object(self.data.clone()))
            .map_err(|e| TransportError::Decode(format!("failed to map response body: {}", e)))
    }

    /// Indented JSON rendering of the body
    pub fn pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.data)
            .unwrap_or_else(|e| format!("Error formatting JSON: {}", e))
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_string())
    }
}
