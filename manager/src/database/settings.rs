//! Schedule preference rows.
//!
//! The free functions take a connection so they can run inside a caller's
//! transaction; the `Database` methods are single-statement conveniences.

use anyhow::Result;
use chrono::Utc;
use sqlx::{Row, SqliteConnection};
use std::collections::HashMap;
use tracing::debug;

use super::Database;

pub async fn read_prefs(conn: &mut SqliteConnection) -> Result<HashMap<String, String>> {
    let rows = sqlx::query(
        r#"
        SELECT key, value
        FROM schedule_prefs
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut prefs = HashMap::with_capacity(rows.len());
    for row in rows {
        prefs.insert(row.try_get("key")?, row.try_get("value")?);
    }
    Ok(prefs)
}

pub async fn upsert_pref(conn: &mut SqliteConnection, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO schedule_prefs (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;
    debug!("Preference {} = {}", key, value);
    Ok(())
}

pub async fn remove_pref(conn: &mut SqliteConnection, key: &str) -> Result<()> {
    sqlx::query("DELETE FROM schedule_prefs WHERE key = ?")
        .bind(key)
        .execute(&mut *conn)
        .await?;
    debug!("Preference {} removed", key);
    Ok(())
}

impl Database {
    pub async fn get_schedule_prefs(&self) -> Result<HashMap<String, String>> {
        let mut conn = self.pool.acquire().await?;
        read_prefs(&mut conn).await
    }
}
