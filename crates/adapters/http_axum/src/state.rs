//! Shared application state for axum handlers.

use std::sync::Arc;

use sigbox_app::ports::RecordStore;
use sigbox_app::services::record_service::RecordService;

/// Application state shared across all axum handlers.
///
/// Generic over the record store to avoid dynamic dispatch. `Clone` is
/// implemented manually so the store itself does not need to be `Clone` —
/// only the `Arc` wrapper is cloned.
pub struct AppState<RS> {
    /// Ingestion and listing use-cases.
    pub record_service: Arc<RecordService<RS>>,
}

impl<RS> Clone for AppState<RS> {
    fn clone(&self) -> Self {
        Self {
            record_service: Arc::clone(&self.record_service),
        }
    }
}

impl<RS> AppState<RS>
where
    RS: RecordStore + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(record_service: RecordService<RS>) -> Self {
        Self {
            record_service: Arc::new(record_service),
        }
    }
}
