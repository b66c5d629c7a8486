use esper_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SdkError {
    /// HTTP status, when the API rejected the call
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Api(err) => err.status(),
            SdkError::Config(_) => None,
        }
    }
}

/// Problems assembling a client configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("Environment variable {name} has an invalid value: {value:?}")]
    InvalidVar { name: &'static str, value: String },

    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}
