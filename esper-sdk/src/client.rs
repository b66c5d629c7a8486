//! EsperClient - Main entry point for the SDK

use std::sync::Arc;
use std::time::Duration;

use esper_api::{Commands, Device};
use esper_transport::{tenant_base_url, Transport, TransportConfig, DEFAULT_CALLER_ID, DEFAULT_TIMEOUT};

use crate::config::ClientConfig;
use crate::{ConfigError, SdkError};

/// Client for one Esper enterprise
///
/// Owns a single [`Transport`] that every resource client shares. Cloning is
/// cheap and clones talk through the same connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use esper_sdk::EsperClient;
///
/// fn main() -> Result<(), esper_sdk::SdkError> {
///     let client = EsperClient::new("acme", "enterprise-id", "api-token");
///
///     let devices = client.device().list(&Default::default())?;
///     println!("{}", devices);
///
///     client.commands().reboot(["device-id"])?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EsperClient {
    transport: Arc<Transport>,
    device: Device,
    commands: Commands,
}

impl EsperClient {
    /// Client for the hosted tenant `https://<tenant>-api.esper.cloud`
    pub fn new(tenant: &str, enterprise_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self::from_transport_config(TransportConfig::for_tenant(tenant, enterprise_id, token))
    }

    pub fn builder() -> EsperClientBuilder {
        EsperClientBuilder::default()
    }

    /// Client configured from `ESPER_*` environment variables
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, SdkError> {
        Ok(Self::from_transport_config(config.to_transport_config()?))
    }

    pub fn from_transport_config(config: TransportConfig) -> Self {
        tracing::debug!(
            base_url = %config.base_url,
            enterprise_id = %config.enterprise_id,
            "creating Esper client"
        );
        let transport = Arc::new(Transport::new(config));
        Self {
            device: Device::new(Arc::clone(&transport)),
            commands: Commands::new(Arc::clone(&transport)),
            transport,
        }
    }

    /// Device listing and lookup
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Remote commands
    pub fn commands(&self) -> &Commands {
        &self.commands
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    pub fn enterprise_id(&self) -> &str {
        self.transport.enterprise_id()
    }

    pub fn base_url(&self) -> &str {
        &self.transport.config().base_url
    }
}

/// Builder for [`EsperClient`]
///
/// An enterprise id, a token, and either a tenant or a base URL are
/// required. A base URL wins over a tenant.
#[derive(Default)]
pub struct EsperClientBuilder {
    tenant: Option<String>,
    enterprise_id: Option<String>,
    token: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    caller_id: Option<String>,
}

impl EsperClientBuilder {
    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    pub fn enterprise_id(mut self, enterprise_id: impl Into<String>) -> Self {
        self.enterprise_id = Some(enterprise_id.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Send requests to `base_url` instead of the hosted tenant URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Whole-request timeout, 30 seconds by default
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Value of the `X-Caller-Id` header
    pub fn caller_id(mut self, caller_id: impl Into<String>) -> Self {
        self.caller_id = Some(caller_id.into());
        self
    }

    pub fn build(self) -> Result<EsperClient, SdkError> {
        let enterprise_id = required(self.enterprise_id, "enterprise_id")?;
        let token = required(self.token, "token")?;

        let base_url = match (self.base_url, self.tenant) {
            (Some(url), _) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
            (_, Some(tenant)) if !tenant.trim().is_empty() => tenant_base_url(tenant.trim()),
            _ => return Err(ConfigError::Missing("tenant or base_url").into()),
        };

        let config = TransportConfig::new(base_url, enterprise_id, token)
            .with_timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .with_caller_id(self.caller_id.unwrap_or_else(|| DEFAULT_CALLER_ID.to_string()));

        Ok(EsperClient::from_transport_config(config))
    }
}

impl std::fmt::Debug for EsperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsperClientBuilder")
            .field("tenant", &self.tenant)
            .field("enterprise_id", &self.enterprise_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("caller_id", &self.caller_id)
            .finish()
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_tenant_url() {
        let client = EsperClient::new("acme", "ent-1", "token");
        assert_eq!(client.base_url(), "https://acme-api.esper.cloud");
        assert_eq!(client.enterprise_id(), "ent-1");
        assert_eq!(client.transport().config().timeout, DEFAULT_TIMEOUT);
        assert_eq!(client.transport().config().caller_id, DEFAULT_CALLER_ID);
    }

    #[test]
    fn test_resources_share_one_transport() {
        let client = EsperClient::new("acme", "ent-1", "token");
        // The client plus its two resource clients.
        assert_eq!(Arc::strong_count(client.transport()), 3);

        let copy = client.clone();
        assert!(Arc::ptr_eq(copy.transport(), client.transport()));
    }

    #[test]
    fn test_builder_overrides() {
        let client = EsperClient::builder()
            .tenant("acme")
            .base_url("http://127.0.0.1:9000/")
            .enterprise_id("ent-1")
            .token("token")
            .timeout(Duration::from_secs(3))
            .caller_id("fleet-tool")
            .build()
            .unwrap();

        let config = client.transport().config();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.caller_id, "fleet-tool");
    }

    #[test]
    fn test_builder_requires_fields() {
        let err = EsperClient::builder().tenant("acme").token("t").build().unwrap_err();
        assert!(matches!(err, SdkError::Config(ConfigError::Missing("enterprise_id"))));

        let err = EsperClient::builder().tenant("acme").enterprise_id("e").build().unwrap_err();
        assert!(matches!(err, SdkError::Config(ConfigError::Missing("token"))));

        let err = EsperClient::builder().enterprise_id("e").token("t").build().unwrap_err();
        assert!(matches!(err, SdkError::Config(ConfigError::Missing("tenant or base_url"))));
    }

    #[test]
    fn test_builder_debug_redacts_token() {
        let builder = EsperClient::builder().token("super-secret");
        assert!(!format!("{:?}", builder).contains("super-secret"));
    }
}
