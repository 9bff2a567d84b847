// File: manager/src/services/cache_service.rs
use anyhow::Result;
use cache_executor::{BackupInfo, CacheExecutor, CacheOperation, OperationOutcome};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

use super::history::{OperationHistory, TriggerSource};

/// Manual cache actions requested through the API.
#[derive(Clone)]
pub struct CacheService {
    executor: Arc<CacheExecutor>,
    history: Arc<OperationHistory>,
}

impl CacheService {
    pub fn new(executor: Arc<CacheExecutor>, history: Arc<OperationHistory>) -> Self {
        Self { executor, history }
    }

    /// Runs one operation and records it. Skips and failures come back as
    /// outcomes, never as errors.
    pub async fn run(&self, operation: CacheOperation) -> OperationOutcome {
        info!("Manual {} requested", operation);
        let started_at = Utc::now();
        let outcome = self.executor.execute(operation).await;

        if let Err(e) = self
            .history
            .record(&outcome, TriggerSource::Manual, started_at)
            .await
        {
            error!("Failed to record manual {}: {}", operation, e);
        }
        outcome
    }

    pub async fn list_atak_backups(&self) -> Result<Vec<BackupInfo>> {
        self.executor.list_atak_backups().await
    }

    pub async fn list_atos_archives(&self) -> Result<Vec<BackupInfo>> {
        self.executor.list_atos_archives().await
    }
}
