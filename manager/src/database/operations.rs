//! Cache operation history.

use anyhow::Result;
use sqlx::Row;
use tracing::{debug, error};

use super::records::OperationRecord;
use super::Database;
use crate::errors::{DatabaseError, ManagerError};

impl Database {
    pub async fn store_operation(&self, operation: &OperationRecord) -> Result<()> {
        match sqlx::query(
            r#"
            INSERT OR REPLACE INTO cache_operations (
                id, operation, trigger_source, status, message, started_at, completed_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&operation.id)
        .bind(&operation.operation)
        .bind(&operation.trigger_source)
        .bind(&operation.status)
        .bind(&operation.message)
        .bind(operation.started_at)
        .bind(operation.completed_at)
        .execute(&self.pool)
        .await
        {
            Ok(_) => {
                debug!("Cache operation stored: {}", operation.id);
                Ok(())
            }
            Err(e) => {
                error!("Failed to store cache operation {}: {}", operation.id, e);
                Err(ManagerError::from(DatabaseError::QueryFailed {
                    query: "store_operation".to_string(),
                    reason: e.to_string(),
                })
                .into())
            }
        }
    }

    /// Most recent operations first.
    pub async fn get_recent_operations(&self, limit: i64) -> Result<Vec<OperationRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, operation, trigger_source, status, message, started_at, completed_at
            FROM cache_operations
            ORDER BY started_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut operations = Vec::with_capacity(rows.len());
        for row in rows {
            operations.push(OperationRecord {
                id: row.try_get("id")?,
                operation: row.try_get("operation")?,
                trigger_source: row.try_get("trigger_source")?,
                status: row.try_get("status")?,
                message: row.try_get("message")?,
                started_at: row.try_get("started_at")?,
                completed_at: row.try_get("completed_at")?,
            });
        }
        Ok(operations)
    }
}
