// ── Published snapshot ──
//
// The aggregate artifact one refresh produces. Either fully populated or
// never published; replaced wholesale behind an `Arc`, never mutated.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use petsbridge_api::model::{Device, DeviceId, Event, EventType, Home, HomeId, LocalStatus, Meal, Settings};

/// Composite key for [`Snapshot::events_by_home_and_type`]:
/// `"{home_id}_{event_type}"` with the event type in canonical string form.
pub fn event_key(home: &HomeId, event_type: EventType) -> String {
    format!("{home}_{event_type}")
}

/// A device's settings as published: the cloud mapping plus the local-status
/// augmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSettings {
    pub settings: Settings,
    /// Live status from the local backend. `None` is the single defined
    /// marker for "no local backend configured" -- the field is always set,
    /// never missing.
    pub tuya_status: Option<LocalStatus>,
}

/// Home-scoped base data, independent of any device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeBaseData {
    pub tuya_status: Option<LocalStatus>,
}

/// One complete, consistent view of all remote state.
///
/// Consumers read the last published snapshot without performing any
/// network I/O themselves. A snapshot never mixes data from two refreshes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All homes of the account, in listing order.
    pub homes: Vec<Home>,
    /// Devices flattened across homes, preserving home listing order.
    pub devices: Vec<Device>,
    /// Meal schedules flattened across homes.
    pub meals: Vec<Meal>,
    /// Events keyed by [`event_key`]; a key exists for every
    /// (home, event type) pair visited, even when the list is empty.
    pub events_by_home_and_type: HashMap<String, Vec<Event>>,
    /// The full fixed event-type enumeration, for consumers that iterate it.
    pub event_types: Vec<EventType>,
    /// Per-device settings, keyed by device id.
    pub settings: HashMap<DeviceId, DeviceSettings>,
    /// Home-scoped base data, keyed by home id.
    pub base_data: HashMap<HomeId, HomeBaseData>,
    /// When this snapshot finished building.
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Events for one (home, event type) pair, if that pair was visited.
    pub fn events_for(&self, home: &HomeId, event_type: EventType) -> Option<&[Event]> {
        self.events_by_home_and_type
            .get(&event_key(home, event_type))
            .map(Vec::as_slice)
    }

    pub fn settings_for(&self, device: &DeviceId) -> Option<&DeviceSettings> {
        self.settings.get(device)
    }

    pub fn base_data_for(&self, home: &HomeId) -> Option<&HomeBaseData> {
        self.base_data.get(home)
    }
}
