//! Dashboard page listing the most recent device records.

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use chrono::SecondsFormat;

use sigbox_app::ports::RecordStore;
use sigbox_domain::record::DeviceRecord;

use super::DashboardError;
use crate::state::AppState;

/// One table row, every cell already turned into display text.
pub struct RecordRow {
    id: String,
    device: String,
    time: String,
    station: String,
    data: String,
    rssi: String,
    seq_number: String,
    device_type_id: String,
    received_at: String,
}

impl From<DeviceRecord> for RecordRow {
    fn from(record: DeviceRecord) -> Self {
        let telemetry = record.telemetry;
        Self {
            id: record.id.to_string(),
            device: telemetry.device.unwrap_or_default(),
            time: telemetry.time.unwrap_or_default(),
            station: telemetry.station.unwrap_or_default(),
            data: telemetry.data.unwrap_or_default(),
            rssi: display_integer(telemetry.rssi),
            seq_number: display_integer(telemetry.seq_number),
            device_type_id: telemetry.device_type_id.unwrap_or_default(),
            received_at: record
                .received_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn display_integer(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Record list page template.
#[derive(Template)]
#[template(path = "record_list.html")]
pub struct RecordListTemplate {
    rows: Vec<RecordRow>,
}

/// `GET /` — most recent records, newest first.
pub async fn list<RS>(
    State(state): State<AppState<RS>>,
) -> Result<Html<String>, DashboardError>
where
    RS: RecordStore + Send + Sync + 'static,
{
    let records = state.record_service.list_window().await?;

    let page = RecordListTemplate {
        rows: records.into_iter().map(RecordRow::from).collect(),
    };
    Ok(Html(page.render()?))
}
