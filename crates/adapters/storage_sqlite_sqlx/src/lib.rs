//! # sigbox-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`RecordStore`](sigbox_app::ports::RecordStore) port
//! - Manage the `SQLite` connection pool lifecycle (initialize once, close once)
//! - Create the `device_data` table when missing (no migrations, no versioning)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `sigbox-app` (for port traits) and `sigbox-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod pool;
mod record_store;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use record_store::SqliteRecordStore;
