use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};

use crate::detector::RunningAppDetector;
use crate::layout::{CacheLayout, ATAK_BACKUP_PREFIX, ATOS_ARCHIVE_PREFIX, SQLITE_EXTENSION};
use crate::operations;
use crate::services::files;
use crate::types::{BackupInfo, CacheOperation, CacheType, OperationOutcome};

/// Runs cache operations against one storage root.
pub struct CacheExecutor {
    layout: CacheLayout,
    detector: Arc<dyn RunningAppDetector>,
}

impl CacheExecutor {
    pub fn new(layout: CacheLayout, detector: Arc<dyn RunningAppDetector>) -> Self {
        Self { layout, detector }
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    /// Process scans block, so they run off the async workers. A scan that
    /// cannot complete counts as "running" and the operation is refused.
    pub async fn is_host_app_running(&self) -> bool {
        let detector = self.detector.clone();
        match tokio::task::spawn_blocking(move || detector.is_running()).await {
            Ok(running) => running,
            Err(e) => {
                error!("Host app detection failed, assuming it is running: {}", e);
                true
            }
        }
    }

    pub async fn offload_atak(&self) -> OperationOutcome {
        let running = self.is_host_app_running().await;
        operations::execute_atak_offload(&self.layout, running).await
    }

    pub async fn delete_atak(&self) -> OperationOutcome {
        let running = self.is_host_app_running().await;
        operations::execute_atak_delete(&self.layout, running).await
    }

    pub async fn restore_atak(&self) -> OperationOutcome {
        let running = self.is_host_app_running().await;
        operations::execute_atak_restore(&self.layout, running).await
    }

    pub async fn archive_atos(&self) -> OperationOutcome {
        operations::execute_atos_archive(&self.layout).await
    }

    pub async fn execute(&self, operation: CacheOperation) -> OperationOutcome {
        match operation {
            CacheOperation::AtakOffload => self.offload_atak().await,
            CacheOperation::AtakDelete => self.delete_atak().await,
            CacheOperation::AtakRestore => self.restore_atak().await,
            CacheOperation::AtosArchive => self.archive_atos().await,
        }
    }

    /// Run every operation for `selection` in order. One outcome per
    /// operation; a skip or failure does not stop the ones after it.
    pub async fn run_selection(&self, selection: CacheType) -> Vec<OperationOutcome> {
        info!("Running cache operations for selection {}", selection);
        let mut outcomes = Vec::with_capacity(selection.operations().len());
        for operation in selection.operations() {
            outcomes.push(self.execute(*operation).await);
        }
        outcomes
    }

    pub async fn list_atak_backups(&self) -> Result<Vec<BackupInfo>> {
        let dir = self.layout.atak_backup_dir();
        if !files::is_directory(&dir).await {
            return Ok(Vec::new());
        }
        let paths =
            files::find_matching_files(&dir, ATAK_BACKUP_PREFIX, SQLITE_EXTENSION).await?;
        files::describe_files(paths).await
    }

    pub async fn list_atos_archives(&self) -> Result<Vec<BackupInfo>> {
        let dir = self.layout.atos_archive_dir();
        if !files::is_directory(&dir).await {
            return Ok(Vec::new());
        }
        let paths =
            files::find_matching_files(&dir, ATOS_ARCHIVE_PREFIX, SQLITE_EXTENSION).await?;
        files::describe_files(paths).await
    }
}
