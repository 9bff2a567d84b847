use anyhow::Result;
use tracing::{info, warn};

use super::{fail, move_into};
use crate::layout::{CacheLayout, ATAK_BACKUP_PREFIX, SQLITE_EXTENSION};
use crate::services::files;
use crate::types::{CacheOperation, OperationOutcome};

const OPERATION: CacheOperation = CacheOperation::AtakRestore;

pub async fn execute_atak_restore(layout: &CacheLayout, host_app_running: bool) -> OperationOutcome {
    if host_app_running {
        warn!("ATAK is running, refusing to restore its cache");
        return OperationOutcome::skipped(OPERATION, "Please close ATAK before restoring the cache.");
    }

    match restore(layout).await {
        Ok(outcome) => outcome,
        Err(e) => fail(OPERATION, "Error restoring ATAK cache", e),
    }
}

async fn restore(layout: &CacheLayout) -> Result<OperationOutcome> {
    let backup_dir = layout.atak_backup_dir();
    if !files::is_directory(&backup_dir).await {
        warn!("No backup directory found: {}", backup_dir.display());
        return Ok(OperationOutcome::skipped(OPERATION, "No backup directory found"));
    }

    let candidates =
        files::find_matching_files(&backup_dir, ATAK_BACKUP_PREFIX, SQLITE_EXTENSION).await?;
    if candidates.is_empty() {
        warn!("No backup files found in {}", backup_dir.display());
        return Ok(OperationOutcome::skipped(OPERATION, "No backup files found"));
    }

    let Some(newest) = files::most_recent_file(&candidates).await? else {
        warn!("No valid backup files found in {}", backup_dir.display());
        return Ok(OperationOutcome::skipped(OPERATION, "No valid backup files found"));
    };
    info!(
        "Restoring ATAK cache from {} ({} candidates)",
        newest.display(),
        candidates.len()
    );

    let live = layout.atak_live_db();
    if files::is_file(&live).await {
        // The rename below replaces the live file anyway.
        if let Err(e) = files::remove_file(&live).await {
            warn!("Could not remove current ATAK cache before restore: {}", e);
        }
    }

    move_into(&newest, &live).await?;

    let source = newest
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    info!("✓ ATAK cache restored from {}", source);
    Ok(OperationOutcome::completed(
        OPERATION,
        format!("ATAK cache restored successfully from {}", source),
        live,
    ))
}
