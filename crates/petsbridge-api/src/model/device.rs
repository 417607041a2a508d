// ── Device ──

use serde::{Deserialize, Serialize};
use std::fmt;

use super::home::HomeId;

/// Opaque identifier for a [`Device`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A feeder or camera registered under exactly one [`Home`](super::Home).
///
/// Carries one Settings record and zero-or-one local-status record per
/// snapshot; both live on the snapshot side, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub home_id: HomeId,
    /// Product capability code (e.g. `AWX6741/10` for a feeder-camera).
    pub product_ctn: Option<String>,
    /// Vendor-side external reference, present on newer firmware only.
    pub external_id: Option<String>,
}
