// petsbridge-core: the refresh coordinator between the Pets Series cloud
// client and the host platform's display surfaces.

pub mod bridge;
pub mod config;
pub mod context;
pub mod error;
pub mod snapshot;

mod builder;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bridge::{Availability, Bridge};
pub use config::{BridgeConfig, Credentials, LocalBackendConfig, ProtocolVersion};
pub use context::{BridgeContext, DisplaySurface, SurfaceKind};
pub use error::BridgeError;
pub use snapshot::{DeviceSettings, HomeBaseData, Snapshot, event_key};
