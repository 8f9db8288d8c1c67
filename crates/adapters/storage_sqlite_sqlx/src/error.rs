//! Storage-specific error type wrapping sqlx errors.

use sigbox_domain::error::SigboxError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for SigboxError {
    fn from(err: StorageError) -> Self {
        Self::storage(err)
    }
}
