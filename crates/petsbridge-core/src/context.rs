// ── Per-instance context ──
//
// One configuration instance of the integration: the bridge plus the
// display surfaces derived from it. Surfaces receive this context instead
// of looking the bridge up in a process-global table, so several instances
// can coexist and tear down independently.

use std::sync::{Arc, Mutex};

use strum::Display;
use tracing::{info, warn};

use petsbridge_api::{ApiError, CloudApi, LocalStatusProvider};

use crate::bridge::Bridge;
use crate::config::{BridgeConfig, Credentials, LocalBackendConfig};
use crate::error::BridgeError;

/// The platform surface families the integration renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SurfaceKind {
    Switch,
    Sensor,
    Select,
    Number,
    Button,
    Calendar,
}

/// A read-only view registered on the host platform, driven off the last
/// published snapshot.
///
/// Implemented by the platform adapter; the context only needs to know how
/// to ask a surface to go away during teardown.
pub trait DisplaySurface: Send + Sync {
    fn kind(&self) -> SurfaceKind;

    /// Unregister from the platform. Returns `false` when the platform
    /// refused, in which case teardown is abandoned and the bridge keeps
    /// running.
    fn unregister(&self) -> bool;
}

/// Everything retained for one configuration instance.
pub struct BridgeContext<C> {
    bridge: Bridge<C>,
    surfaces: Mutex<Vec<Arc<dyn DisplaySurface>>>,
}

impl<C: CloudApi> BridgeContext<C> {
    /// Set up the bridge (see [`Bridge::setup`]) and wrap it in a fresh
    /// context with no surfaces registered yet.
    pub async fn setup<F>(config: BridgeConfig, connect: F) -> Result<Self, BridgeError>
    where
        F: FnOnce(
            &Credentials,
            Option<&LocalBackendConfig>,
        ) -> Result<(C, Option<Arc<dyn LocalStatusProvider>>), ApiError>,
    {
        let bridge = Bridge::setup(config, connect).await?;
        Ok(Self {
            bridge,
            surfaces: Mutex::new(Vec::new()),
        })
    }

    pub fn bridge(&self) -> &Bridge<C> {
        &self.bridge
    }

    /// Record a surface derived from this instance so teardown can
    /// unregister it.
    pub fn register_surface(&self, surface: Arc<dyn DisplaySurface>) {
        self.surfaces
            .lock()
            .expect("surface registry poisoned")
            .push(surface);
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces
            .lock()
            .expect("surface registry poisoned")
            .len()
    }

    /// Tear this instance down.
    ///
    /// Every registered surface is asked to unregister; only when all of
    /// them report success does the context stop the refresh task, close
    /// the client connection, and release its retained state. If any
    /// surface refuses, nothing is torn down and `false` is returned --
    /// the instance stays fully operational.
    pub async fn teardown(&self) -> bool {
        let surfaces: Vec<Arc<dyn DisplaySurface>> = self
            .surfaces
            .lock()
            .expect("surface registry poisoned")
            .clone();

        let mut all_unregistered = true;
        for surface in &surfaces {
            if !surface.unregister() {
                warn!(kind = %surface.kind(), "surface refused to unregister");
                all_unregistered = false;
            }
        }
        if !all_unregistered {
            return false;
        }

        self.surfaces
            .lock()
            .expect("surface registry poisoned")
            .clear();
        self.bridge.shutdown().await;
        info!("context torn down");
        true
    }
}
