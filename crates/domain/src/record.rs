//! Device record — one telemetry callback accepted by the store.
//!
//! A callback carries seven optional fields ([`Telemetry`]). Once persisted it
//! gains a store-assigned [`RecordId`] and receipt time and becomes a
//! [`DeviceRecord`]. Records are append-only: nothing in the system updates or
//! deletes them.

use serde::Serialize;

use crate::id::RecordId;
use crate::time::Timestamp;

/// Fields supplied by the network operator in a callback.
///
/// Every field is optional and stored as received; no semantic validation is
/// applied. Serialized with the operator's wire names (`seqNumber`,
/// `deviceTypeId`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    /// Identifier of the reporting device.
    pub device: Option<String>,
    /// Client-supplied time, kept verbatim.
    pub time: Option<String>,
    /// Identifier of the receiving base station.
    pub station: Option<String>,
    /// Opaque payload, encoding defined by the device.
    pub data: Option<String>,
    /// Received signal strength indicator.
    pub rssi: Option<i64>,
    /// Device-side sequence number.
    pub seq_number: Option<i64>,
    /// Operator-side device type.
    pub device_type_id: Option<String>,
}

impl Telemetry {
    /// Create a builder for constructing a [`Telemetry`].
    #[must_use]
    pub fn builder() -> TelemetryBuilder {
        TelemetryBuilder::default()
    }

    /// `true` when none of the seven fields was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Step-by-step builder for [`Telemetry`].
#[derive(Debug, Default)]
pub struct TelemetryBuilder {
    inner: Telemetry,
}

impl TelemetryBuilder {
    #[must_use]
    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.inner.device = Some(device.into());
        self
    }

    #[must_use]
    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.inner.time = Some(time.into());
        self
    }

    #[must_use]
    pub fn station(mut self, station: impl Into<String>) -> Self {
        self.inner.station = Some(station.into());
        self
    }

    #[must_use]
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.inner.data = Some(data.into());
        self
    }

    #[must_use]
    pub fn rssi(mut self, rssi: i64) -> Self {
        self.inner.rssi = Some(rssi);
        self
    }

    #[must_use]
    pub fn seq_number(mut self, seq_number: i64) -> Self {
        self.inner.seq_number = Some(seq_number);
        self
    }

    #[must_use]
    pub fn device_type_id(mut self, device_type_id: impl Into<String>) -> Self {
        self.inner.device_type_id = Some(device_type_id.into());
        self
    }

    /// Consume the builder and return the [`Telemetry`].
    #[must_use]
    pub fn build(self) -> Telemetry {
        self.inner
    }
}

/// A persisted telemetry row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub telemetry: Telemetry,
    /// Set by the store when the row is inserted.
    pub received_at: Timestamp,
}
