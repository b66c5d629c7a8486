//! High-level Esper API for device management
//!
//! This crate provides a type-safe API for listing devices and dispatching
//! remote commands to them. It uses the private `esper-transport` crate for
//! the HTTP round trip.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use esper_api::{Commands, Transport, TransportConfig};
//!
//! let transport = Arc::new(Transport::new(TransportConfig::for_tenant(
//!     "acme",
//!     "enterprise-id",
//!     "api-token",
//! )));
//! let commands = Commands::new(transport);
//!
//! let response = commands.set_brightness(["d774ae8c-7466-42df-a472-6f04b39b8907"], 70)?;
//! println!("{}", response.pretty_string());
//! # Ok::<(), esper_api::ApiError>(())
//! ```
//!
//! Arguments are validated while the command envelope is built; an
//! out-of-range value fails with [`ApiError::InvalidParameter`] and no request
//! is sent.

pub mod command;
pub mod endpoint;
pub mod error;
pub mod resources;

pub use command::{Command, CommandEnvelope, CommandTarget, Schedule, ScheduleArgs, ValidationError};
pub use endpoint::Endpoint;
pub use error::{ApiError, Result};
pub use esper_transport::{ApiResponse, ErrorBody, Transport, TransportConfig};
pub use resources::{Commands, Device, DeviceFilters};
