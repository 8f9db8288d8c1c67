//! Record service — use-cases for ingesting and browsing device records.

use sigbox_domain::error::SigboxError;
use sigbox_domain::record::{DeviceRecord, Telemetry};

use crate::ports::RecordStore;

/// Number of records shown by the listing page.
pub const LISTING_WINDOW: usize = 100;

/// Application service wrapping a [`RecordStore`].
pub struct RecordService<S> {
    store: S,
}

impl<S: RecordStore> RecordService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist one callback.
    ///
    /// No field is validated; absent values are stored as null.
    ///
    /// # Errors
    ///
    /// Returns [`SigboxError::Storage`] when the store rejects the insert.
    #[tracing::instrument(
        skip(self, telemetry),
        fields(
            device = telemetry.device.as_deref().unwrap_or("-"),
            station = telemetry.station.as_deref().unwrap_or("-"),
            seq_number = telemetry.seq_number,
        )
    )]
    pub async fn ingest(&self, telemetry: Telemetry) -> Result<DeviceRecord, SigboxError> {
        let record = self.store.append(telemetry).await?;
        tracing::info!(record_id = %record.id, "callback stored");
        Ok(record)
    }

    /// List at most `limit` records, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<DeviceRecord>, SigboxError> {
        self.store.list_recent(limit).await
    }

    /// List the records shown on the listing page.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_window(&self) -> Result<Vec<DeviceRecord>, SigboxError> {
        self.list_recent(LISTING_WINDOW).await
    }
}
