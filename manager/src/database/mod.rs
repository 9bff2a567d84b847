//! Database layer for the cache manager.
//!
//! This module provides SQLite persistence for:
//! - Schedule preferences (key-value rows, written transactionally)
//! - Cache operation history (audit trail of manual and scheduled runs)
//!
//! The module is organized into submodules:
//! - `records` - Record types
//! - `settings` - Schedule preference rows
//! - `operations` - Operation history

mod operations;
mod records;
pub mod settings;

pub use records::*;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, Transaction};
use std::path::Path;
use std::str::FromStr;
use tracing::{error, info};

use crate::errors::{DatabaseError, ManagerError};

pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Expose pool for integration test queries
    #[allow(dead_code)]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn new(database_path: &str) -> Result<Self> {
        info!("Initializing database at {}", database_path);

        if let Some(parent) = Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    error!("Failed to create parent directory {:?}: {}", parent, e);
                    return Err(e.into());
                }
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", database_path))?
            .create_if_missing(true);

        // One connection: transactions queue for it instead of failing on
        // SQLite's write lock.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Failed to connect to database {}: {}", database_path, e);
                ManagerError::from(DatabaseError::ConnectionFailed {
                    reason: e.to_string(),
                })
            })?;

        let database = Self { pool };
        database.initialize_tables().await?;

        info!("Database initialized");
        Ok(database)
    }

    /// Start a transaction. Multi-key schedule updates go through one of
    /// these so readers never see half of an update.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    async fn initialize_tables(&self) -> Result<()> {
        let prefs_table_sql = r#"
            CREATE TABLE IF NOT EXISTS schedule_prefs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME NOT NULL
            )
        "#;
        if let Err(e) = sqlx::query(prefs_table_sql).execute(&self.pool).await {
            error!("FAILED to create schedule_prefs table: {}", e);
            return Err(e.into());
        }

        let operations_table_sql = r#"
            CREATE TABLE IF NOT EXISTS cache_operations (
                id TEXT PRIMARY KEY,
                operation TEXT NOT NULL,
                trigger_source TEXT NOT NULL,
                status TEXT NOT NULL,
                message TEXT NOT NULL,
                started_at DATETIME NOT NULL,
                completed_at DATETIME
            )
        "#;
        if let Err(e) = sqlx::query(operations_table_sql).execute(&self.pool).await {
            error!("FAILED to create cache_operations table: {}", e);
            return Err(e.into());
        }

        let operations_index_sql = "CREATE INDEX IF NOT EXISTS idx_cache_operations_started ON cache_operations(started_at DESC)";
        if let Err(e) = sqlx::query(operations_index_sql).execute(&self.pool).await {
            error!("FAILED to create cache_operations index: {}", e);
            return Err(e.into());
        }

        Ok(())
    }
}
