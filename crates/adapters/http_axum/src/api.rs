//! JSON endpoints consumed by the network operator.

#[allow(clippy::missing_errors_doc)]
pub mod callback;
pub mod payload;

use axum::Router;
use axum::routing::post;

use sigbox_app::ports::RecordStore;

use crate::state::AppState;

/// Build the operator-facing sub-router.
pub fn routes<RS>() -> Router<AppState<RS>>
where
    RS: RecordStore + Send + Sync + 'static,
{
    Router::new().route("/sigfox/callback", post(callback::receive::<RS>))
}
