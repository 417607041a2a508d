//! Client contract -- the boundary behind which the vendor libraries live.
//!
//! The cloud client (authentication, token refresh, HTTP transport) and the
//! Tuya local-control client are external collaborators. This module defines
//! the operations the bridge needs from them and nothing else; no protocol
//! details leak through.

use std::future::Future;

use chrono::{DateTime, FixedOffset};

use crate::error::ApiError;
use crate::model::{Device, DeviceId, Event, EventType, Home, LocalStatus, Meal, Settings};

/// The Pets Series cloud API, as the bridge consumes it.
///
/// This is a **port** -- a concrete implementation owns its session and token
/// state exclusively; the bridge never touches either. Call-level timeouts
/// and per-call retries are the implementation's responsibility too.
pub trait CloudApi: Send + Sync + 'static {
    /// List all homes for the authenticated account.
    fn list_homes(&self) -> impl Future<Output = Result<Vec<Home>, ApiError>> + Send;

    /// List the devices registered under one home.
    fn list_devices(
        &self,
        home: &Home,
    ) -> impl Future<Output = Result<Vec<Device>, ApiError>> + Send;

    /// Fetch the events of one type for one home within a time window.
    ///
    /// The window bounds carry an explicit offset because the cloud filters
    /// in local time, not UTC.
    fn list_events(
        &self,
        home: &Home,
        event_type: EventType,
        from: DateTime<FixedOffset>,
        to: DateTime<FixedOffset>,
    ) -> impl Future<Output = Result<Vec<Event>, ApiError>> + Send;

    /// Fetch the settings mapping for one device.
    fn get_settings(
        &self,
        home: &Home,
        device: &DeviceId,
    ) -> impl Future<Output = Result<Settings, ApiError>> + Send;

    /// List the meal schedules for one home.
    fn list_meals(&self, home: &Home)
    -> impl Future<Output = Result<Vec<Meal>, ApiError>> + Send;

    /// Close the underlying connection and invalidate the session.
    fn close(&self) -> impl Future<Output = ()> + Send;
}

/// The local device-control backend (Tuya), queried for live status.
///
/// Blocking by design: the local protocol library is synchronous, so the
/// bridge dispatches calls to a worker thread and awaits the result. Must be
/// object-safe -- the bridge holds it as `Arc<dyn LocalStatusProvider>`
/// because the backend is optional and chosen at setup time.
pub trait LocalStatusProvider: Send + Sync + 'static {
    /// Query the device status over the local protocol.
    fn poll_status(&self) -> Result<LocalStatus, ApiError>;
}
