//! Axum router assembly.

use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use sigbox_app::ports::RecordStore;

use crate::state::AppState;

/// Upper bound on a single request, body upload included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the top-level axum [`Router`].
///
/// Merges the operator callback route and the dashboard page at `/`.
/// Requests running longer than [`REQUEST_TIMEOUT`] are answered with
/// `408 Request Timeout`, so a stalled client cannot hold up shutdown.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<RS>(state: AppState<RS>) -> Router
where
    RS: RecordStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .merge(crate::dashboard::routes())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use sigbox_app::services::record_service::RecordService;
    use sigbox_domain::error::SigboxError;
    use sigbox_domain::id::RecordId;
    use sigbox_domain::record::{DeviceRecord, Telemetry};
    use tower::ServiceExt;

    #[derive(Default)]
    struct StubRecordStore {
        rows: Arc<Mutex<Vec<DeviceRecord>>>,
        failing: bool,
    }

    impl RecordStore for StubRecordStore {
        async fn append(&self, telemetry: Telemetry) -> Result<DeviceRecord, SigboxError> {
            if self.failing {
                return Err(SigboxError::storage(std::io::Error::other("database is locked")));
            }
            let mut rows = self.rows.lock().unwrap();
            let record = DeviceRecord {
                id: RecordId::from_raw(i64::try_from(rows.len()).unwrap() + 1),
                telemetry,
                received_at: sigbox_domain::time::now(),
            };
            rows.push(record.clone());
            Ok(record)
        }

        async fn list_recent(&self, limit: usize) -> Result<Vec<DeviceRecord>, SigboxError> {
            if self.failing {
                return Err(SigboxError::storage(std::io::Error::other("database is locked")));
            }
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().rev().take(limit).cloned().collect())
        }
    }

    fn app(store: StubRecordStore) -> Router {
        build(AppState::new(RecordService::new(store)))
    }

    fn callback(content_type: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/sigfox/callback")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app(StubRecordStore::default())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_store_json_callback_and_acknowledge() {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let store = StubRecordStore {
            rows: Arc::clone(&rows),
            failing: false,
        };

        let response = app(store)
            .oneshot(callback(
                "application/json",
                r#"{"device":"D1","station":"S1","rssi":-120,"seqNumber":5}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "success");
        assert!(body["message"].is_string());

        let rows = rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].telemetry.device.as_deref(), Some("D1"));
        assert_eq!(rows[0].telemetry.rssi, Some(-120));
    }

    #[tokio::test]
    async fn should_store_form_callback() {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let store = StubRecordStore {
            rows: Arc::clone(&rows),
            failing: false,
        };

        let response = app(store)
            .oneshot(callback(
                "application/x-www-form-urlencoded",
                "device=D2&data=CAFE&rssi=-98.00&seqNumber=12",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let rows = rows.lock().unwrap();
        assert_eq!(rows[0].telemetry.device.as_deref(), Some("D2"));
        assert_eq!(rows[0].telemetry.data.as_deref(), Some("CAFE"));
        assert_eq!(rows[0].telemetry.rssi, Some(-98));
        assert_eq!(rows[0].telemetry.seq_number, Some(12));
    }

    #[tokio::test]
    async fn should_store_empty_record_when_body_is_empty() {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let store = StubRecordStore {
            rows: Arc::clone(&rows),
            failing: false,
        };

        let response = app(store)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/sigfox/callback")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let rows = rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].telemetry.is_empty());
    }

    #[tokio::test]
    async fn should_store_empty_record_when_body_format_is_unsupported() {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let store = StubRecordStore {
            rows: Arc::clone(&rows),
            failing: false,
        };

        let response = app(store)
            .oneshot(callback("text/plain", "device=D1&rssi=-120"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let rows = rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].telemetry.is_empty());
    }

    #[tokio::test]
    async fn should_return_500_when_storage_fails_on_callback() {
        let store = StubRecordStore {
            failing: true,
            ..StubRecordStore::default()
        };

        let response = app(store)
            .oneshot(callback("application/json", r#"{"device":"D1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["error"].is_string());
        assert!(body.get("status").is_none());
    }

    #[tokio::test]
    async fn should_return_400_without_storing_when_json_is_malformed() {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let store = StubRecordStore {
            rows: Arc::clone(&rows),
            failing: false,
        };

        let response = app(store)
            .oneshot(callback("application/json", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["error"].is_string());
        assert!(rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_get_on_callback_route() {
        let response = app(StubRecordStore::default())
            .oneshot(
                Request::builder()
                    .uri("/sigfox/callback")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn should_render_listing_page() {
        let app = app(StubRecordStore::default());

        app.clone()
            .oneshot(callback(
                "application/json",
                r#"{"device":"D1","station":"S1","data":"AABB"}"#,
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let body = body_string(response).await;
        assert!(body.contains("Sigfox device data"));
        assert!(body.contains("<td>D1</td>"));
        assert!(body.contains("<td>AABB</td>"));
    }

    #[tokio::test]
    async fn should_escape_markup_in_listing() {
        let app = app(StubRecordStore::default());

        app.clone()
            .oneshot(callback(
                "application/json",
                r#"{"device":"<img src=x onerror=alert(1)>"}"#,
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_string(response).await;
        assert!(!body.contains("<img src=x"));
        assert!(body.contains("&lt;img"));
    }

    #[tokio::test]
    async fn should_return_500_text_when_listing_fails() {
        let store = StubRecordStore {
            failing: true,
            ..StubRecordStore::default()
        };

        let response = app(store)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "failed to load data");
    }
}
