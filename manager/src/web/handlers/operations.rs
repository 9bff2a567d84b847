// Operation history endpoints

use axum::{
    extract::{Query, State},
    response::Json,
};

use super::common::{error_response, ApiResponse, ApiResult, LimitQuery};
use crate::database::OperationRecord;
use crate::web::AppState;

/// Most recent cache operations, newest first
pub async fn get_recent_operations(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<OperationRecord>> {
    match state.history.recent(query.limit).await {
        Ok(records) => Ok(Json(ApiResponse::success(records))),
        Err(e) => Err(error_response("Failed to load operation history", e)),
    }
}
