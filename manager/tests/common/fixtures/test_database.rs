//! Test database backed by a file in a temporary directory

use anyhow::Result;
use cache_manager::Database;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestDatabase {
    _dir: TempDir,
    pub db: Arc<Database>,
}

impl TestDatabase {
    pub async fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join("cache-manager.db");
        let db = Database::new(&path.to_string_lossy()).await?;
        Ok(Self {
            _dir: dir,
            db: Arc::new(db),
        })
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        self.db.pool()
    }

    /// Write a raw preference row, bypassing the repository encoding.
    pub async fn put_raw_pref(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.pool().acquire().await?;
        cache_manager::database::settings::upsert_pref(&mut conn, key, value).await
    }
}
