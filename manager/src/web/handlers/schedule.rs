// Schedule endpoints

use axum::{extract::State, response::Json};
use tracing::info;

use super::common::{error_response, ApiResponse, ApiResult};
use crate::schedule::{ScheduleConfig, ScheduleStatus};
use crate::web::AppState;

pub async fn get_schedule(State(state): State<AppState>) -> ApiResult<ScheduleConfig> {
    match state.state_machine.get_config().await {
        Ok(config) => Ok(Json(ApiResponse::success(config))),
        Err(e) => Err(error_response("Failed to load schedule", e)),
    }
}

/// Store a schedule without starting it
pub async fn configure_schedule(
    State(state): State<AppState>,
    Json(config): Json<ScheduleConfig>,
) -> ApiResult<ScheduleConfig> {
    match state.state_machine.configure(config).await {
        Ok(config) => Ok(Json(ApiResponse::success_with_message(
            config,
            "Schedule saved",
        ))),
        Err(e) => Err(error_response("Failed to configure schedule", e)),
    }
}

pub async fn start_schedule(
    State(state): State<AppState>,
    Json(config): Json<ScheduleConfig>,
) -> ApiResult<ScheduleStatus> {
    info!("Schedule start requested");
    match state.state_machine.start(config).await {
        Ok(status) => {
            let message = status.status_line.clone();
            Ok(Json(ApiResponse::success_with_message(status, message)))
        }
        Err(e) => Err(error_response("Failed to start schedule", e)),
    }
}

pub async fn stop_schedule(State(state): State<AppState>) -> ApiResult<ScheduleStatus> {
    info!("Schedule stop requested");
    if let Err(e) = state.state_machine.stop().await {
        return Err(error_response("Failed to stop schedule", e));
    }
    match state.state_machine.get_status().await {
        Ok(status) => Ok(Json(ApiResponse::success_with_message(
            status,
            "Schedule stopped",
        ))),
        Err(e) => Err(error_response("Failed to read schedule status", e)),
    }
}

/// Zero the run counter
pub async fn reset_schedule_runs(State(state): State<AppState>) -> ApiResult<ScheduleStatus> {
    if let Err(e) = state.state_machine.reset_runs().await {
        return Err(error_response("Failed to reset schedule runs", e));
    }
    match state.state_machine.get_status().await {
        Ok(status) => Ok(Json(ApiResponse::success_with_message(
            status,
            "Run counter reset",
        ))),
        Err(e) => Err(error_response("Failed to read schedule status", e)),
    }
}

pub async fn get_schedule_status(State(state): State<AppState>) -> ApiResult<ScheduleStatus> {
    match state.state_machine.get_status().await {
        Ok(status) => Ok(Json(ApiResponse::success(status))),
        Err(e) => Err(error_response("Failed to read schedule status", e)),
    }
}
