//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;
use std::time::Duration;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Returns true for `sqlite::memory:` / `:memory:` URLs.
pub(crate) fn is_memory_url(database_url: &str) -> bool {
    matches!(database_url, "sqlite::memory:" | ":memory:" | "sqlite://:memory:")
}

/// Manages a single SQLite pool; creates DB file if missing.
///
/// In-memory databases live inside one connection, so the pool is capped at a
/// single connection that never expires.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL (file path, `file:`/`sqlite:` URL, or in-memory).
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!("Initializing SQLite pool: {}", database_url);

        let pool = if is_memory_url(database_url) {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await?
        } else {
            let options = if database_url.starts_with("sqlite:") {
                SqliteConnectOptions::from_str(database_url)?
            } else {
                SqliteConnectOptions::new().filename(database_url.trim_start_matches("file:"))
            };
            SqlitePool::connect_with(options.create_if_missing(true)).await?
        };

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
