//! # Esper SDK - blocking client for the Esper device-management API
//!
//! Manage a fleet of Android devices from Rust: list and inspect devices,
//! and send remote commands to devices or groups, immediately or on a
//! schedule.
//!
//! ```rust,no_run
//! use esper_sdk::{DeviceFilters, EsperClient};
//!
//! fn main() -> Result<(), esper_sdk::SdkError> {
//!     esper_sdk::logging::init_logging_from_env().ok();
//!
//!     let client = EsperClient::from_env()?;
//!
//!     let kiosks = client.device().list(&DeviceFilters::new().search("kiosk"))?;
//!     println!("{}", kiosks);
//!
//!     client.commands().set_brightness(["device-id"], 70)?;
//!     client.commands().reboot_groups(["group-id"])?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! esper-sdk (EsperClient, configuration, logging)
//!     ↓
//! esper-api (Device and Commands resources, command envelopes)
//!     ↓
//! esper-transport (blocking HTTP + JSON, error bodies)
//! ```
//!
//! Every call is synchronous and returns either an [`ApiResponse`] or a
//! structured error. Arguments are validated before anything is sent.

pub use client::{EsperClient, EsperClientBuilder};
pub use config::ClientConfig;
pub use error::{ConfigError, SdkError};

// Re-export the types callers need alongside the client
pub use esper_api::command;
pub use esper_api::{
    ApiError, ApiResponse, Command, CommandEnvelope, CommandTarget, Commands, Device,
    DeviceFilters, ErrorBody, Schedule, ScheduleArgs, Transport, TransportConfig,
    ValidationError,
};

pub mod config;
pub mod logging;

mod client;
mod error;
