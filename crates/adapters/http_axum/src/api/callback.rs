//! Handler for operator telemetry callbacks.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sigbox_app::ports::RecordStore;

use super::payload::CallbackPayload;
use crate::error::ApiError;
use crate::state::AppState;

/// Acknowledgement body sent once the record is stored.
#[derive(Debug, Serialize)]
pub struct Acknowledgement {
    pub status: &'static str,
    pub message: &'static str,
}

/// Possible responses from the callback endpoint.
pub enum ReceiveResponse {
    Stored(Json<Acknowledgement>),
}

impl IntoResponse for ReceiveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Stored(json) => json.into_response(),
        }
    }
}

/// `POST /sigfox/callback`
///
/// Responds only after the insert has completed.
pub async fn receive<RS>(
    State(state): State<AppState<RS>>,
    CallbackPayload(telemetry): CallbackPayload,
) -> Result<ReceiveResponse, ApiError>
where
    RS: RecordStore + Send + Sync + 'static,
{
    tracing::debug!(?telemetry, "callback received");
    state.record_service.ingest(telemetry).await?;

    Ok(ReceiveResponse::Stored(Json(Acknowledgement {
        status: "success",
        message: "Data received and stored",
    })))
}
