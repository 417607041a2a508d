// ── Meal ──

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::device::DeviceId;
use super::home::HomeId;

/// A scheduled feeding record, scoped to one home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub home_id: HomeId,
    pub name: String,
    /// Portion size in the feeder's native unit.
    pub portion_amount: f64,
    /// Local wall-clock time the feeder dispenses at.
    pub feed_time: NaiveTime,
    /// Weekdays the schedule repeats on, ISO numbering (1 = Monday).
    #[serde(default)]
    pub repeat_days: Vec<u8>,
    /// Target feeder, when the home has more than one.
    pub device_id: Option<DeviceId>,
    pub enabled: bool,
}
