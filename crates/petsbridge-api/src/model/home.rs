// ── Home ──
//
// A home is one physical account location and the root of a device tree.
// Ids are opaque vendor strings; the API has no numeric or UUID form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a [`Home`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomeId(String);

impl HomeId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HomeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for HomeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One account location, immutable during a snapshot build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    pub id: HomeId,
    pub name: String,
    /// Whether the home is shared with other accounts.
    #[serde(default)]
    pub shared: bool,
}
