//! Server-side rendered HTML pages (no JavaScript).
//!
//! Pages are rebuilt from storage on every request; nothing is cached.

pub mod records;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use sigbox_app::ports::RecordStore;
use sigbox_domain::error::SigboxError;

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<RS>() -> Router<AppState<RS>>
where
    RS: RecordStore + Send + Sync + 'static,
{
    Router::new().route("/", get(records::list::<RS>))
}

/// Failure while producing an HTML page, rendered as plain text.
#[derive(Debug)]
pub enum DashboardError {
    /// The records could not be loaded.
    Service(SigboxError),
    /// The template failed to render.
    Render(askama::Error),
}

impl From<SigboxError> for DashboardError {
    fn from(err: SigboxError) -> Self {
        Self::Service(err)
    }
}

impl From<askama::Error> for DashboardError {
    fn from(err: askama::Error) -> Self {
        Self::Render(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Service(err) => {
                tracing::error!(error = ?err, "failed to load records");
                "failed to load data"
            }
            Self::Render(err) => {
                tracing::error!(error = %err, "failed to render page");
                "failed to render page"
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}
