/// The Esper API endpoints this crate talks to
///
/// Each endpoint belongs to an enterprise; the id is filled in when the path
/// is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Command dispatch - `POST`
    Commands,

    /// Device listing - `GET`
    DeviceList,

    /// A single device - `GET`
    Device(String),
}

impl Endpoint {
    /// Get the path of this endpoint, relative to the tenant base URL
    ///
    /// A device id is percent-encoded as a single path segment.
    ///
    /// # Returns
    /// The path, always with a trailing slash
    pub fn path(&self, enterprise_id: &str) -> String {
        match self {
            Endpoint::Commands => format!("/api/v0/enterprise/{}/command/", enterprise_id),
            Endpoint::DeviceList => format!("/api/enterprise/{}/device/", enterprise_id),
            Endpoint::Device(device_id) => format!(
                "/api/enterprise/{}/device/{}/",
                enterprise_id,
                urlencoding::encode(device_id)
            ),
        }
    }

    /// Get the name of this endpoint as a string
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Commands => "Commands",
            Endpoint::DeviceList => "DeviceList",
            Endpoint::Device(_) => "Device",
        }
    }
}
