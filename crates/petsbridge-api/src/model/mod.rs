// ── Pets Series domain model ──
//
// Canonical representation of every entity the cloud API returns. These are
// the types the client contract speaks; the bridge aggregates them into its
// published snapshot without reshaping them.

pub mod device;
pub mod event;
pub mod home;
pub mod meal;
pub mod settings;
pub mod status;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use petsbridge_api::model::*` gives you everything.

pub use device::{Device, DeviceId};
pub use event::{Event, EventType};
pub use home::{Home, HomeId};
pub use meal::Meal;
pub use settings::Settings;
pub use status::LocalStatus;
