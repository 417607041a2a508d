// ── Snapshot builder ──
//
// One full traversal of all remote state: homes -> devices -> events-by-type
// -> settings (+ local status) -> meals -> home base data, strictly sequential
// with enforced spacing between outbound calls. Produces a complete
// `Snapshot` or fails atomically -- the partial accumulators are dropped
// with the error and the previously published snapshot stays visible.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use tracing::debug;

use petsbridge_api::model::{EventType, LocalStatus};
use petsbridge_api::{ApiError, CloudApi, LocalStatusProvider};

use crate::snapshot::{DeviceSettings, HomeBaseData, Snapshot, event_key};

/// Fixed spacing between successive outbound calls.
///
/// No token bucket or burst allowance -- the call count per refresh is small
/// and bounded, so a plain sleep keeps us under the vendor's rate ceiling.
pub(crate) struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Suspend for the configured inter-call delay.
    pub(crate) async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Query window for the event fetch: a fixed epoch range meaning "all events
/// ever, past and far future". Deliberately not incremental sync -- this is
/// a low-volume consumer device, not a high-throughput feed. The bounds
/// carry +02:00 because the cloud filters in local time.
fn event_window() -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    let offset = FixedOffset::east_opt(2 * 3600).expect("static offset");
    let from = offset
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("static window start");
    let to = offset
        .with_ymd_and_hms(2100, 1, 1, 0, 0, 0)
        .single()
        .expect("static window end");
    (from, to)
}

/// Query the local backend off the cooperative path.
///
/// The local protocol library is blocking, so the call runs on tokio's
/// blocking pool where it cannot starve the scheduler's timer; the builder
/// still awaits the single result before proceeding.
async fn poll_local_status(
    provider: &Arc<dyn LocalStatusProvider>,
) -> Result<LocalStatus, ApiError> {
    let provider = Arc::clone(provider);
    tokio::task::spawn_blocking(move || provider.poll_status())
        .await
        .map_err(|err| ApiError::LocalUnavailable {
            reason: format!("local status worker failed: {err}"),
        })?
}

/// Produce one complete [`Snapshot`] or fail atomically.
pub(crate) async fn build<C: CloudApi>(
    client: &C,
    local: Option<&Arc<dyn LocalStatusProvider>>,
    delay: Duration,
) -> Result<Snapshot, ApiError> {
    let pace = Pacer::new(delay);
    let (from, to) = event_window();

    let homes = client.list_homes().await?;

    let mut devices = Vec::new();
    let mut meals = Vec::new();
    let mut events_by_home_and_type = HashMap::new();
    let mut settings = HashMap::new();
    let mut base_data = HashMap::new();

    for home in &homes {
        let home_devices = client.list_devices(home).await?;
        devices.extend(home_devices.iter().cloned());
        debug!(home = %home.id, count = home_devices.len(), "fetched devices");
        pace.pause().await;

        for event_type in EventType::all() {
            let events = client.list_events(home, *event_type, from, to).await?;
            debug!(
                home = %home.id,
                event_type = %event_type,
                count = events.len(),
                "fetched events"
            );
            events_by_home_and_type.insert(event_key(&home.id, *event_type), events);
            pace.pause().await;
        }

        for device in &home_devices {
            let device_settings = client.get_settings(home, &device.id).await?;
            let tuya_status = match local {
                Some(provider) => Some(poll_local_status(provider).await?),
                None => None,
            };
            settings.insert(
                device.id.clone(),
                DeviceSettings {
                    settings: device_settings,
                    tuya_status,
                },
            );
            debug!(device = %device.id, "fetched settings");
            pace.pause().await;
        }

        let home_meals = client.list_meals(home).await?;
        debug!(home = %home.id, count = home_meals.len(), "fetched meals");
        meals.extend(home_meals);

        let tuya_status = match local {
            Some(provider) => Some(poll_local_status(provider).await?),
            None => None,
        };
        base_data.insert(home.id.clone(), HomeBaseData { tuya_status });

        pace.pause().await;
    }

    Ok(Snapshot {
        homes,
        devices,
        meals,
        events_by_home_and_type,
        event_types: EventType::all().to_vec(),
        settings,
        base_data,
        fetched_at: Utc::now(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn event_window_spans_the_fixed_epoch_range() {
        let (from, to) = event_window();
        assert_eq!(from.to_rfc3339(), "2024-01-01T00:00:00+02:00");
        assert_eq!(to.to_rfc3339(), "2100-01-01T00:00:00+02:00");
    }
}
