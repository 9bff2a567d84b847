// Manual cache operation endpoints

use axum::{extract::State, response::Json};
use cache_executor::{BackupInfo, CacheOperation, OperationOutcome};

use super::common::{error_response, ApiResponse, ApiResult};
use crate::web::AppState;

// Skips and failures are still a 200; the outcome carries the status.
async fn run_manual(state: &AppState, operation: CacheOperation) -> ApiResult<OperationOutcome> {
    let outcome = state.cache_service.run(operation).await;
    let message = outcome.message.clone();
    Ok(Json(ApiResponse::success_with_message(outcome, message)))
}

/// Move the live ATAK cache into the backup directory
pub async fn offload_atak_cache(State(state): State<AppState>) -> ApiResult<OperationOutcome> {
    run_manual(&state, CacheOperation::AtakOffload).await
}

/// Delete the live ATAK cache without a backup
pub async fn delete_atak_cache(State(state): State<AppState>) -> ApiResult<OperationOutcome> {
    run_manual(&state, CacheOperation::AtakDelete).await
}

/// Restore the most recent ATAK backup
pub async fn restore_atak_cache(State(state): State<AppState>) -> ApiResult<OperationOutcome> {
    run_manual(&state, CacheOperation::AtakRestore).await
}

/// Archive the live ATOS history
pub async fn archive_atos_cache(State(state): State<AppState>) -> ApiResult<OperationOutcome> {
    run_manual(&state, CacheOperation::AtosArchive).await
}

pub async fn list_atak_backups(State(state): State<AppState>) -> ApiResult<Vec<BackupInfo>> {
    match state.cache_service.list_atak_backups().await {
        Ok(backups) => Ok(Json(ApiResponse::success(backups))),
        Err(e) => Err(error_response("Failed to list ATAK backups", e)),
    }
}

pub async fn list_atos_archives(State(state): State<AppState>) -> ApiResult<Vec<BackupInfo>> {
    match state.cache_service.list_atos_archives().await {
        Ok(archives) => Ok(Json(ApiResponse::success(archives))),
        Err(e) => Err(error_response("Failed to list ATOS archives", e)),
    }
}
