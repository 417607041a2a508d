// ── Event and event-type domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::home::HomeId;

/// The fixed set of historical event categories the cloud exposes.
///
/// Global reference data, not owned by any entity. The canonical string form
/// is the snake_case `Display` rendering, which is also what the cloud
/// expects in its event-type query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    MotionDetected,
    MealDispensed,
    MealUpcoming,
    FoodLevelLow,
}

impl EventType {
    /// Static provider for the full enumeration, in canonical iteration
    /// order. Fetch plans and consumers iterate this, never a subset.
    pub fn all() -> &'static [EventType] {
        static ALL: [EventType; 4] = [
            EventType::MotionDetected,
            EventType::MealDispensed,
            EventType::MealUpcoming,
            EventType::FoodLevelLow,
        ];
        &ALL
    }
}

/// One historical event, scoped to a home and an event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Canonical event-type string as returned by the cloud.
    pub event_type: String,
    pub home_id: HomeId,
    pub occurred_at: DateTime<Utc>,
    pub message: Option<String>,
    pub thumbnail_url: Option<String>,
}
