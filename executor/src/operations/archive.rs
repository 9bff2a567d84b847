use anyhow::Result;
use tracing::{info, warn};

use super::{fail, move_into};
use crate::layout::CacheLayout;
use crate::naming;
use crate::services::files;
use crate::types::{CacheOperation, OperationOutcome};

const OPERATION: CacheOperation = CacheOperation::AtosArchive;

/// Archive the ATOS history database. The host app check does not apply.
pub async fn execute_atos_archive(layout: &CacheLayout) -> OperationOutcome {
    match archive(layout).await {
        Ok(outcome) => outcome,
        Err(e) => fail(OPERATION, "Error clearing ATOS cache", e),
    }
}

async fn archive(layout: &CacheLayout) -> Result<OperationOutcome> {
    let atos_dir = layout.atos_dir();
    if !files::is_directory(&atos_dir).await {
        warn!("ATOS directory not found: {}", atos_dir.display());
        return Ok(OperationOutcome::skipped(
            OPERATION,
            "ATOS directory not found - cannot clear ATOS cache",
        ));
    }

    let live = layout.atos_live_db();
    if !files::is_file(&live).await {
        warn!("ATOS cache file not found: {}", live.display());
        return Ok(OperationOutcome::skipped(OPERATION, "ATOS cache file not found"));
    }

    let archive = layout.atos_archive_path(&naming::current_backup_timestamp());
    move_into(&live, &archive).await?;

    info!("✓ ATOS cache archived to {}", archive.display());
    Ok(OperationOutcome::completed(
        OPERATION,
        "ATOS cache cleared successfully",
        archive,
    ))
}
