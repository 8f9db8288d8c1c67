//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sigbox_domain::error::SigboxError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

/// Maps [`SigboxError`] to an HTTP response with appropriate status code.
pub struct ApiError(SigboxError);

impl From<SigboxError> for ApiError {
    fn from(err: SigboxError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SigboxError::Storage(err) => {
                tracing::error!(error = ?err, "failed to store callback");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to store data".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
