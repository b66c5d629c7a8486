//! Private HTTP transport for the Esper cloud API
//!
//! This crate provides a minimal blocking JSON client specifically designed for
//! talking to an Esper tenant. It owns the base URL, enterprise id and bearer
//! token, attaches the authentication and tenant headers to every request, and
//! turns each response into an [`ApiResponse`] or a [`TransportError`].
//!
//! There is no retry and no caching: one call, one HTTP round trip.

mod error;
mod response;

pub use error::{ErrorBody, TransportError};
pub use response::ApiResponse;

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

/// Whole-request timeout used unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Value of the `X-Caller-Id` header unless configured otherwise
pub const DEFAULT_CALLER_ID: &str = "Esper-sdk";

/// Connection settings for one Esper enterprise
#[derive(Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Scheme and host, e.g. `https://acme-api.esper.cloud`
    pub base_url: String,
    /// Enterprise (tenant) id, sent as `X-Tenant-Id` and used in endpoint paths
    pub enterprise_id: String,
    /// Bearer token
    pub token: String,
    pub timeout: Duration,
    pub caller_id: String,
}

impl TransportConfig {
    pub fn new(
        base_url: impl Into<String>,
        enterprise_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            enterprise_id: enterprise_id.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            caller_id: DEFAULT_CALLER_ID.to_string(),
        }
    }

    /// Settings for a hosted tenant at `https://<tenant>-api.esper.cloud`
    pub fn for_tenant(
        tenant: &str,
        enterprise_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self::new(tenant_base_url(tenant), enterprise_id, token)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_caller_id(mut self, caller_id: impl Into<String>) -> Self {
        self.caller_id = caller_id.into();
        self
    }
}

// Keeps the bearer token out of logs and panic messages.
impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("base_url", &self.base_url)
            .field("enterprise_id", &self.enterprise_id)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("caller_id", &self.caller_id)
            .finish()
    }
}

/// Base URL of a hosted Esper tenant
pub fn tenant_base_url(tenant: &str) -> String {
    format!("https://{}-api.esper.cloud", tenant)
}

/// A blocking JSON client bound to one Esper enterprise
///
/// The underlying agent holds no per-call state, so a `Transport` can be
/// shared between threads (typically behind an `Arc`).
#[derive(Debug, Clone)]
pub struct Transport {
    config: TransportConfig,
    agent: ureq::Agent,
}

impl Transport {
    pub fn new(config: TransportConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { config, agent }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn enterprise_id(&self) -> &str {
        &self.config.enterprise_id
    }

    /// Issue a GET request with the given query parameters
    ///
    /// # Arguments
    /// * `endpoint` - Path relative to the base URL, e.g. `/api/enterprise/{id}/device/`
    /// * `query` - Query parameters, encoded in the order given
    pub fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<ApiResponse, TransportError> {
        let url = self.url(endpoint);
        tracing::debug!(method = "GET", endpoint, params = query.len(), "sending request");

        let request = query
            .iter()
            .fold(self.authorized(self.agent.get(&url)), |request, (key, value)| {
                request.query(key, value)
            });

        self.dispatch("GET", endpoint, request.call())
    }

    /// Serialize `body` to JSON and POST it
    pub fn post<B>(&self, endpoint: &str, body: &B) -> Result<ApiResponse, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_string(body).map_err(|e| {
            TransportError::Request(format!("failed to serialize request body: {}", e))
        })?;

        let url = self.url(endpoint);
        tracing::debug!(method = "POST", endpoint, bytes = payload.len(), "sending request");

        let request = self.authorized(self.agent.post(&url));
        self.dispatch("POST", endpoint, request.send_string(&payload))
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    fn authorized(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("Authorization", &format!("Bearer {}", self.config.token))
            .set("Content-Type", "application/json")
            .set("X-Caller-Id", &self.config.caller_id)
            .set("X-Tenant-Id", &self.config.enterprise_id)
    }

    fn dispatch(
        &self,
        method: &str,
        endpoint: &str,
        outcome: Result<ureq::Response, ureq::Error>,
    ) -> Result<ApiResponse, TransportError> {
        match outcome {
            Ok(response) => {
                let status = response.status();
                let text = response.into_string().map_err(|e| {
                    TransportError::Network(format!("failed to read response body: {}", e))
                })?;
                tracing::debug!(method, endpoint, status, "request completed");

                Ok(ApiResponse::new(status, decode_body(&text)?))
            }
            Err(ureq::Error::Status(status, response)) => {
                tracing::warn!(method, endpoint, status, "API returned an error status");

                Err(TransportError::Api {
                    status,
                    body: error_body(response.into_string()),
                })
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::warn!(method, endpoint, error = %transport, "request failed");
                Err(TransportError::from_ureq_transport(transport))
            }
        }
    }
}

/// Parse an error body, keeping a read failure visible in the raw text
fn error_body(read: std::io::Result<String>) -> ErrorBody {
    match read {
        Ok(text) => ErrorBody::parse(&text),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read error response body");
            ErrorBody::Raw(format!("failed to read response body: {}", e))
        }
    }
}

/// Decode a success body; an empty body is an empty mapping
fn decode_body(text: &str) -> Result<Map<String, Value>, TransportError> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    serde_json::from_str(text)
        .map_err(|e| TransportError::Decode(format!("failed to parse response JSON: {}", e)))
}
