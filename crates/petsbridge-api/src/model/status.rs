// ── Local device status ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status reported by the Tuya local backend: the raw data-point map.
///
/// Data-point keys are protocol indices (`"1"`, `"101"`, ...) whose meaning
/// is product-specific, so no decoding happens at this layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalStatus {
    pub dps: Map<String, Value>,
}
