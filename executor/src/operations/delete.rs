use anyhow::Result;
use tracing::{info, warn};

use super::fail;
use crate::layout::CacheLayout;
use crate::services::files;
use crate::types::{CacheOperation, OperationOutcome};

const OPERATION: CacheOperation = CacheOperation::AtakDelete;

pub async fn execute_atak_delete(layout: &CacheLayout, host_app_running: bool) -> OperationOutcome {
    if host_app_running {
        warn!("ATAK is running, refusing to delete its cache");
        return OperationOutcome::skipped(OPERATION, "Please close ATAK before deleting the cache.");
    }

    match delete(layout).await {
        Ok(outcome) => outcome,
        Err(e) => fail(OPERATION, "Error deleting ATAK cache", e),
    }
}

async fn delete(layout: &CacheLayout) -> Result<OperationOutcome> {
    let live = layout.atak_live_db();
    if !files::is_file(&live).await {
        warn!("ATAK cache file not found: {}", live.display());
        return Ok(OperationOutcome::skipped(OPERATION, "ATAK cache file not found"));
    }

    files::remove_file(&live).await?;

    info!("✓ ATAK cache deleted: {}", live.display());
    Ok(OperationOutcome::deleted(OPERATION, "ATAK cache deleted successfully"))
}
