use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::store::{NewRunRecord, RunLog, RunRecord, StoreError};

use super::{migrate, records};

pub struct SqliteRunLog {
    pool: SqlitePool,
}

impl SqliteRunLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if needed) and migrate.
    ///
    /// `sqlite::memory:` databases are per-connection, so callers using one
    /// must pass `max_connections = 1`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        migrate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RunLog for SqliteRunLog {
    async fn append(&self, record: NewRunRecord) -> Result<i64, StoreError> {
        records::insert_record(&self.pool, record).await
    }

    async fn recent(&self, limit: i64) -> Result<Vec<RunRecord>, StoreError> {
        records::fetch_recent(&self.pool, limit).await
    }
}
