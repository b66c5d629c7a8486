//! Client configuration from the environment

use std::time::Duration;

use esper_transport::{tenant_base_url, TransportConfig, DEFAULT_TIMEOUT};

use crate::ConfigError;

pub const ENV_ENTERPRISE_ID: &str = "ESPER_ENTERPRISE_ID";
pub const ENV_TOKEN: &str = "ESPER_TOKEN";
pub const ENV_TENANT: &str = "ESPER_TENANT";
pub const ENV_BASE_URL: &str = "ESPER_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "ESPER_TIMEOUT_SECS";

/// Tenant used when neither `ESPER_TENANT` nor `ESPER_BASE_URL` is set
pub const DEFAULT_TENANT: &str = "develop";

/// Settings needed to reach one Esper enterprise
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub enterprise_id: String,
    pub token: String,
    /// Full base URL; wins over `tenant` when set
    pub base_url: Option<String>,
    pub tenant: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Read the configuration from `ESPER_*` environment variables
    ///
    /// `ESPER_ENTERPRISE_ID` and `ESPER_TOKEN` are required. `ESPER_BASE_URL`
    /// overrides `ESPER_TENANT`, which defaults to `develop`.
    /// `ESPER_TIMEOUT_SECS` is a whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());

        let enterprise_id = var(ENV_ENTERPRISE_ID).ok_or(ConfigError::MissingVar(ENV_ENTERPRISE_ID))?;
        let token = var(ENV_TOKEN).ok_or(ConfigError::MissingVar(ENV_TOKEN))?;
        let base_url = var(ENV_BASE_URL);
        let tenant = match (&base_url, var(ENV_TENANT)) {
            (_, Some(tenant)) => Some(tenant),
            (None, None) => Some(DEFAULT_TENANT.to_string()),
            (Some(_), None) => None,
        };

        let timeout = match var(ENV_TIMEOUT_SECS) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            enterprise_id,
            token,
            base_url,
            tenant,
            timeout,
        })
    }

    /// The base URL requests go to
    pub fn resolved_base_url(&self) -> Result<String, ConfigError> {
        match (&self.base_url, &self.tenant) {
            (Some(url), _) => Ok(url.trim_end_matches('/').to_string()),
            (None, Some(tenant)) => Ok(tenant_base_url(tenant)),
            (None, None) => Err(ConfigError::Missing("tenant or base_url")),
        }
    }

    pub fn to_transport_config(&self) -> Result<TransportConfig, ConfigError> {
        Ok(
            TransportConfig::new(self.resolved_base_url()?, &self.enterprise_id, &self.token)
                .with_timeout(self.timeout),
        )
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("enterprise_id", &self.enterprise_id)
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("tenant", &self.tenant)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidVar {
            name: ENV_TIMEOUT_SECS,
            value: raw.to_string(),
        }),
    }
}
