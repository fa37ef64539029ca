use std::net::IpAddr;

/// Label recorded when no location can be determined.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Best-effort coarse geolocation for a visit.
pub trait LocationProvider: Send + Sync + 'static {
    /// Returns a label such as a city or country, or `None` when unknown.
    fn locate(&self, client: Option<IpAddr>) -> Option<String>;

    /// Provider name, used in logs.
    fn name(&self) -> &'static str;
}

/// Never knows where a visit came from.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderLocation;

impl LocationProvider for PlaceholderLocation {
    fn locate(&self, _client: Option<IpAddr>) -> Option<String> {
        None
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}

/// Tags every visit with the same label.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub String);

impl FixedLocation {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl LocationProvider for FixedLocation {
    fn locate(&self, _client: Option<IpAddr>) -> Option<String> {
        Some(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
