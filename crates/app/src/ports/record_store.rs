//! Record store port — append-only persistence for device records.

use std::future::Future;

use sigbox_domain::error::SigboxError;
use sigbox_domain::record::{DeviceRecord, Telemetry};

/// Append-only repository of [`DeviceRecord`]s.
///
/// Implementations assign the record id and receipt time themselves and must
/// keep ids strictly increasing in insertion order, even when called from
/// concurrent requests.
pub trait RecordStore {
    /// Persist a new record built from `telemetry`.
    ///
    /// The insert is atomic: on error nothing is stored.
    fn append(
        &self,
        telemetry: Telemetry,
    ) -> impl Future<Output = Result<DeviceRecord, SigboxError>> + Send;

    /// Get at most `limit` records, newest first (`received_at` then `id`,
    /// both descending).
    fn list_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<DeviceRecord>, SigboxError>> + Send;
}
