// ── Refresh scheduler ──
//
// Lifecycle and cadence for the snapshot builder: one build in flight at a
// time, a fixed periodic timer, atomic publication, and failure translation.
// Per refresh the state machine is Idle -> Fetching -> {Published, Failed};
// Failed returns to Idle with the previous snapshot still visible.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use petsbridge_api::{ApiError, CloudApi, LocalStatusProvider};

use crate::builder;
use crate::config::{BridgeConfig, Credentials, LocalBackendConfig};
use crate::error::BridgeError;
use crate::snapshot::Snapshot;

/// Outcome of one refresh, shared between the caller that ran the build and
/// every caller that coalesced onto it.
pub type RefreshOutcome = Result<Arc<Snapshot>, BridgeError>;

/// Reader-visible freshness of the published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// The last refresh succeeded; the snapshot is current.
    Ready,
    /// The last refresh failed; the previous snapshot (if any) stays
    /// visible but may no longer reflect remote state.
    Stale,
}

/// The main entry point for the host platform.
///
/// Cheaply cloneable via `Arc`. Owns the cloud client, the optional local
/// backend, the published snapshot, and the periodic refresh task. Create
/// one with [`Bridge::setup`]; tear it down through
/// [`BridgeContext`](crate::context::BridgeContext).
pub struct Bridge<C> {
    inner: Arc<BridgeInner<C>>,
}

impl<C> Clone for Bridge<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct BridgeInner<C> {
    config: BridgeConfig,
    client: C,
    local: Option<Arc<dyn LocalStatusProvider>>,
    /// The only state shared between the refresh path and readers, swapped
    /// as a single reference so a reader never observes a torn snapshot.
    published: ArcSwapOption<Snapshot>,
    availability: watch::Sender<Availability>,
    /// Single-flight slot: `Some` while a build runs, holding the channel
    /// late arrivals subscribe to instead of starting a second build.
    in_flight: Mutex<Option<watch::Receiver<Option<RefreshOutcome>>>>,
    consecutive_failures: AtomicU32,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

enum FlightEntry {
    Leader(watch::Sender<Option<RefreshOutcome>>),
    Follower(watch::Receiver<Option<RefreshOutcome>>),
}

impl<C: CloudApi> Bridge<C> {
    /// Set up a bridge instance: build the client via `connect`, run the
    /// first refresh, and start the periodic refresh task.
    ///
    /// `connect` is the host platform's factory for its client library; it
    /// receives the credentials and the optional local-backend config from
    /// `config`. An `invalid_client` rejection -- from the factory or from
    /// the first refresh -- surfaces as [`BridgeError::AuthFailure`] so the
    /// platform can start re-authentication; any other failure is
    /// [`BridgeError::SetupFailure`]. On error nothing is registered: no
    /// task was spawned and the client is dropped.
    pub async fn setup<F>(config: BridgeConfig, connect: F) -> Result<Self, BridgeError>
    where
        F: FnOnce(
            &Credentials,
            Option<&LocalBackendConfig>,
        ) -> Result<(C, Option<Arc<dyn LocalStatusProvider>>), ApiError>,
    {
        let (client, local) =
            connect(&config.credentials, config.local_backend.as_ref()).map_err(|err| {
                error!(error = %err, "client initialization failed");
                BridgeError::from(err).into_setup_error()
            })?;

        let (availability, _) = watch::channel(Availability::Stale);
        let bridge = Self {
            inner: Arc::new(BridgeInner {
                config,
                client,
                local,
                published: ArcSwapOption::empty(),
                availability,
                in_flight: Mutex::new(None),
                consecutive_failures: AtomicU32::new(0),
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        };

        // First load. A failure here aborts the whole setup.
        if let Err(err) = bridge.refresh_now().await {
            error!(error = %err, "initial refresh failed; aborting setup");
            return Err(err.into_setup_error());
        }

        bridge.spawn_refresh_task().await;
        info!(
            interval_secs = bridge.inner.config.refresh_interval.as_secs(),
            "bridge set up"
        );
        Ok(bridge)
    }

    /// Access the bridge configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.inner.config
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Run a full refresh now, or join the one already in flight.
    ///
    /// At most one build executes concurrently: the first caller becomes
    /// the leader and runs the builder; callers arriving while it runs
    /// subscribe to the same outcome and never trigger a second build.
    /// Refresh N+1 therefore never starts before N has published or failed.
    pub async fn refresh_now(&self) -> RefreshOutcome {
        let entry = {
            let mut slot = self.inner.in_flight.lock().await;
            match slot.as_ref() {
                Some(rx) => FlightEntry::Follower(rx.clone()),
                None => {
                    let (tx, rx) = watch::channel(None);
                    *slot = Some(rx);
                    FlightEntry::Leader(tx)
                }
            }
        };

        match entry {
            FlightEntry::Leader(tx) => {
                let outcome = self.run_refresh().await;
                *self.inner.in_flight.lock().await = None;
                let _ = tx.send(Some(outcome.clone()));
                outcome
            }
            FlightEntry::Follower(mut rx) => loop {
                if let Some(outcome) = rx.borrow_and_update().as_ref() {
                    return outcome.clone();
                }
                if rx.changed().await.is_err() {
                    // Leader dropped without publishing (its task was
                    // cancelled). Release the slot so the next caller can
                    // run a fresh build instead of joining a dead channel.
                    let mut slot = self.inner.in_flight.lock().await;
                    if slot
                        .as_ref()
                        .is_some_and(|stored| stored.has_changed().is_err())
                    {
                        *slot = None;
                    }
                    return Err(BridgeError::RefreshFailed {
                        source: ApiError::Transport {
                            message: "in-flight refresh abandoned".into(),
                        },
                    });
                }
            },
        }
    }

    /// Build and publish one snapshot. Failure keeps the previous snapshot
    /// and marks the data stale for consumers.
    async fn run_refresh(&self) -> RefreshOutcome {
        let inner = &self.inner;
        debug!("starting snapshot build");

        match builder::build(
            &inner.client,
            inner.local.as_ref(),
            inner.config.delay_between_calls,
        )
        .await
        {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                inner.published.store(Some(Arc::clone(&snapshot)));
                inner.consecutive_failures.store(0, Ordering::Relaxed);
                let _ = inner.availability.send(Availability::Ready);
                debug!(
                    homes = snapshot.homes.len(),
                    devices = snapshot.devices.len(),
                    meals = snapshot.meals.len(),
                    "snapshot published"
                );
                Ok(snapshot)
            }
            Err(err) => {
                let failures = inner.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(
                    error = %err,
                    consecutive_failures = failures,
                    "snapshot build failed; keeping previous snapshot"
                );
                let _ = inner.availability.send(Availability::Stale);
                Err(BridgeError::from(err))
            }
        }
    }

    // ── State observation ────────────────────────────────────────────

    /// The last published snapshot, or `None` before the first publication.
    /// Wait-free; the returned `Arc` stays internally consistent even while
    /// a newer snapshot replaces it.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.inner.published.load_full()
    }

    /// Subscribe to availability changes ("data may be stale").
    pub fn availability(&self) -> watch::Receiver<Availability> {
        self.inner.availability.subscribe()
    }

    /// When the published snapshot finished building.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.snapshot().map(|snapshot| snapshot.fetched_at)
    }

    /// How long ago the published snapshot was built, or `None` if nothing
    /// was published yet.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh().map(|at| Utc::now() - at)
    }

    /// Failed refreshes since the last successful one.
    pub fn consecutive_failures(&self) -> u32 {
        self.inner.consecutive_failures.load(Ordering::Relaxed)
    }

    // ── Lifecycle internals ──────────────────────────────────────────

    async fn spawn_refresh_task(&self) {
        let period = self.inner.config.refresh_interval;
        if period.is_zero() {
            return;
        }
        let bridge = self.clone();
        let cancel = self.inner.cancel.clone();
        let handle = tokio::spawn(refresh_task(bridge, period, cancel));
        self.inner.task_handles.lock().await.push(handle);
    }

    /// Stop the refresh task, close the client, and release the published
    /// snapshot. Called by the context after every surface unregistered.
    pub(crate) async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        self.inner.client.close().await;
        self.inner.published.store(None);
        debug!("bridge shut down");
    }
}

// ── Background task ──────────────────────────────────────────────────

/// Drive the bridge on the configured cadence until cancelled.
async fn refresh_task<C: CloudApi>(bridge: Bridge<C>, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(err) = bridge.refresh_now().await {
                    warn!(error = %err, "scheduled refresh failed");
                }
            }
        }
    }
}
