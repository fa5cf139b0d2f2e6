//! SQLite connection management

use std::str::FromStr;

use endqueue_domain::{Admin, DynamicQueue, Organization, Participant, Queue};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::records::SqlRecord;
use crate::infrastructure::ports::RepoError;

/// Shared SQLite pool holding every record table.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Opens (creating if missing) the database at `url` and ensures the schema.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepoError::database("connect", e))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));

        // Each connection to `:memory:` is its own database; keep exactly one alive.
        if url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        let database = Self { pool };
        database.initialize_schema().await?;
        tracing::info!("Connected to record store at {}", url);

        Ok(database)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every record table if it does not exist yet.
    pub async fn initialize_schema(&self) -> Result<(), RepoError> {
        let schemas = [
            Admin::SCHEMA,
            Organization::SCHEMA,
            DynamicQueue::SCHEMA,
            Queue::SCHEMA,
            Participant::SCHEMA,
        ];

        for schema in schemas {
            sqlx::query(schema)
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::database("initialize_schema", e))?;
        }

        Ok(())
    }
}
