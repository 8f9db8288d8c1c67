//! `SQLite` connection pool setup, schema bootstrap and shutdown.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

const CREATE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS device_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        device TEXT,
        time TEXT,
        station TEXT,
        data TEXT,
        rssi INTEGER,
        seqNumber INTEGER,
        deviceTypeId TEXT,
        received_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
";

const CREATE_RECENT_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS device_data_recent_idx
    ON device_data (received_at DESC, id DESC)
";

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:sigfox_data.db` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool, creates the database file if missing,
    /// and makes sure the record table exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database cannot be opened or written.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url).await
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Holds the `SQLite` connection pool and provides access to it.
///
/// Owned by the composition root; released with [`Database::close`].
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or schema creation fails.
    async fn initialize(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // every connection to `:memory:` opens a fresh database
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;

        let db = Self { pool };
        db.ensure_schema().await?;

        tracing::debug!(url = database_url, "database ready");
        Ok(db)
    }

    /// Create the record table and its index when absent.
    ///
    /// Safe to call any number of times; an existing table is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the statements fail.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_RECENT_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every connection and wait for them to be released.
    ///
    /// Takes `self` so the pool is released exactly once.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("database connection closed");
    }
}
