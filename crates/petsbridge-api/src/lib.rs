// petsbridge-api: contract and domain model for the Pets Series cloud API
// and the optional Tuya local backend.

pub mod client;
pub mod error;
pub mod model;

pub use client::{CloudApi, LocalStatusProvider};
pub use error::ApiError;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Device, DeviceId, Event, EventType, Home, HomeId, LocalStatus, Meal, Settings,
};
