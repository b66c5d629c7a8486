//! Device listing and lookup

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use esper_transport::{ApiResponse, Transport};

use crate::command::{ensure_not_blank, ValidationError};
use crate::endpoint::Endpoint;
use crate::Result;

/// Query filters for [`Device::list`]
///
/// Keys are unique: setting a key again replaces its value, so every key is
/// sent exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilters {
    params: BTreeMap<String, String>,
}

impl DeviceFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary filter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.with("name", name)
    }

    /// Free-text search across name, serial and IMEI
    pub fn search(self, term: impl Into<String>) -> Self {
        self.with("search", term)
    }

    pub fn serial(self, serial: impl Into<String>) -> Self {
        self.with("serial", serial)
    }

    pub fn group(self, group_id: impl Into<String>) -> Self {
        self.with("group", group_id)
    }

    /// Numeric device state code, e.g. `1` for active
    pub fn state(self, state: u8) -> Self {
        self.with("state", state.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Query pairs in key order
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DeviceFilters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<HashMap<String, String>> for DeviceFilters {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// Device resource client
#[derive(Debug, Clone)]
pub struct Device {
    transport: Arc<Transport>,
}

impl Device {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List devices matching `filters`
    ///
    /// # Example
    /// ```rust,ignore
    /// let response = client.device().list(&DeviceFilters::new().group(group_id).state(1))?;
    /// for device in response.get("results").and_then(|r| r.as_array()).into_iter().flatten() {
    ///     println!("{}", device["device_name"]);
    /// }
    /// ```
    pub fn list(&self, filters: &DeviceFilters) -> Result<ApiResponse> {
        let endpoint = Endpoint::DeviceList.path(self.transport.enterprise_id());
        tracing::debug!(filters = filters.len(), "listing devices");
        Ok(self.transport.get(&endpoint, &filters.pairs())?)
    }

    /// Fetch a single device by id
    ///
    /// The id is sent as one path segment; `.` and `..` are rejected.
    pub fn get(&self, device_id: &str) -> Result<ApiResponse> {
        ensure_not_blank("device_id", device_id)?;
        if matches!(device_id, "." | "..") {
            return Err(ValidationError::invalid_value(
                "device_id",
                device_id,
                "not a device id",
            )
            .into());
        }
        let endpoint = Endpoint::Device(device_id.to_string()).path(self.transport.enterprise_id());
        Ok(self.transport.get(&endpoint, &[])?)
    }
}
