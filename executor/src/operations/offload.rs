use anyhow::Result;
use tracing::{info, warn};

use super::{fail, move_into};
use crate::layout::CacheLayout;
use crate::naming;
use crate::services::files;
use crate::types::{CacheOperation, OperationOutcome};

const OPERATION: CacheOperation = CacheOperation::AtakOffload;

pub async fn execute_atak_offload(layout: &CacheLayout, host_app_running: bool) -> OperationOutcome {
    if host_app_running {
        warn!("ATAK is running, refusing to offload its cache");
        return OperationOutcome::skipped(OPERATION, "Please close ATAK before clearing the cache.");
    }

    match offload(layout).await {
        Ok(outcome) => outcome,
        Err(e) => fail(OPERATION, "Error offloading ATAK cache", e),
    }
}

async fn offload(layout: &CacheLayout) -> Result<OperationOutcome> {
    let live = layout.atak_live_db();
    if !files::is_file(&live).await {
        warn!("ATAK cache file not found: {}", live.display());
        return Ok(OperationOutcome::skipped(OPERATION, "ATAK cache file not found"));
    }

    let backup = layout.atak_backup_path(&naming::current_backup_timestamp());
    move_into(&live, &backup).await?;

    info!("✓ ATAK cache offloaded to {}", backup.display());
    Ok(OperationOutcome::completed(
        OPERATION,
        "ATAK cache offloaded successfully",
        backup,
    ))
}
