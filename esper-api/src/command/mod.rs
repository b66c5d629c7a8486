//! Command envelope construction
//!
//! This module maps typed calls onto the generic command envelope the Esper
//! API accepts:
//! - a closed catalog of commands, targets and schedules
//! - range-checked setting values
//! - schedule arguments for WINDOW and RECURRING execution
//! - a fluent builder that validates before anything is sent

mod macros;
mod catalog;
mod envelope;
mod schedule;
mod settings;
mod validation;

pub use catalog::{AppState, Command, CommandType, DeviceType, LockdownState, Schedule, TimeType};
pub use envelope::{CommandBuilder, CommandEnvelope, CommandTarget};
pub use schedule::{parse_window_time, ScheduleArgs};
pub use settings::{Brightness, GpsState, RotationState, ScreenOffTimeout, VolumeLevel, VolumeStream};
pub use validation::{ensure_in_range, ensure_not_blank, ValidationError};
