// ── Device settings ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw per-device configuration as returned by the cloud: a mapping of
/// configuration keys to values. Keys vary by product, so this stays an
/// open map rather than a struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    pub values: Map<String, Value>,
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}
