//! Resource clients grouping related endpoint methods

mod commands;
mod device;

pub use commands::Commands;
pub use device::{Device, DeviceFilters};
