// File: manager/src/services/history.rs
use anyhow::Result;
use cache_executor::OperationOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::constants::history::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::database::{Database, OperationRecord};

/// What started an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerSource {
    Manual,
    Scheduled,
}

impl TriggerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerSource::Manual => "manual",
            TriggerSource::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit trail of executed cache operations.
pub struct OperationHistory {
    db: Arc<Database>,
}

impl OperationHistory {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn record(
        &self,
        outcome: &OperationOutcome,
        source: TriggerSource,
        started_at: DateTime<Utc>,
    ) -> Result<OperationRecord> {
        let record = OperationRecord {
            id: Uuid::new_v4().to_string(),
            operation: outcome.operation.as_str().to_string(),
            trigger_source: source.as_str().to_string(),
            status: outcome.status.as_str().to_string(),
            message: outcome.message.clone(),
            started_at,
            completed_at: Some(Utc::now()),
        };
        self.db.store_operation(&record).await?;
        debug!(
            "Recorded {} {} as {}",
            source, record.operation, record.status
        );
        Ok(record)
    }

    /// Newest first. `None` means the default page size.
    pub async fn recent(&self, limit: Option<i64>) -> Result<Vec<OperationRecord>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
        self.db.get_recent_operations(limit).await
    }
}
