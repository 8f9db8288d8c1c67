//! `SQLite` implementation of [`RecordStore`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use sigbox_app::ports::RecordStore;
use sigbox_domain::error::SigboxError;
use sigbox_domain::id::RecordId;
use sigbox_domain::record::{DeviceRecord, Telemetry};
use sigbox_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(DeviceRecord);

fn parse_received_at(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&chrono::Utc))
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let received_at: String = row.try_get("received_at")?;

        let telemetry = Telemetry {
            device: row.try_get("device")?,
            time: row.try_get("time")?,
            station: row.try_get("station")?,
            data: row.try_get("data")?,
            rssi: row.try_get("rssi")?,
            seq_number: row.try_get("seqNumber")?,
            device_type_id: row.try_get("deviceTypeId")?,
        };

        Ok(Self(DeviceRecord {
            id: RecordId::from_raw(id),
            telemetry,
            received_at: parse_received_at(&received_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO device_data (device, time, station, data, rssi, seqNumber, deviceTypeId)
    VALUES (?, ?, ?, ?, ?, ?, ?)
    RETURNING id, received_at
";

const SELECT_RECENT: &str = r"
    SELECT id, device, time, station, data, rssi, seqNumber, deviceTypeId, received_at
    FROM device_data
    ORDER BY received_at DESC, id DESC
    LIMIT ?
";

/// `SQLite`-backed record store.
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RecordStore for SqliteRecordStore {
    async fn append(&self, telemetry: Telemetry) -> Result<DeviceRecord, SigboxError> {
        let (id, received_at): (i64, String) = sqlx::query_as(INSERT)
            .bind(telemetry.device.as_deref())
            .bind(telemetry.time.as_deref())
            .bind(telemetry.station.as_deref())
            .bind(telemetry.data.as_deref())
            .bind(telemetry.rssi)
            .bind(telemetry.seq_number)
            .bind(telemetry.device_type_id.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let received_at = parse_received_at(&received_at).map_err(StorageError::from)?;

        Ok(DeviceRecord {
            id: RecordId::from_raw(id),
            telemetry,
            received_at,
        })
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<DeviceRecord>, SigboxError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
