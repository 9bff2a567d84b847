// File: manager/src/web/server.rs
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub async fn start_web_server(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // === MANUAL CACHE ROUTES ===
        .route(
            "/api/cache/atak/offload",
            post(handlers::offload_atak_cache),
        )
        .route("/api/cache/atak/delete", post(handlers::delete_atak_cache))
        .route(
            "/api/cache/atak/restore",
            post(handlers::restore_atak_cache),
        )
        .route(
            "/api/cache/atos/archive",
            post(handlers::archive_atos_cache),
        )
        // === BACKUP LISTING ROUTES ===
        .route("/api/cache/atak/backups", get(handlers::list_atak_backups))
        .route(
            "/api/cache/atos/archives",
            get(handlers::list_atos_archives),
        )
        // === SCHEDULE ROUTES ===
        .route(
            "/api/schedule",
            get(handlers::get_schedule).put(handlers::configure_schedule),
        )
        .route("/api/schedule/start", post(handlers::start_schedule))
        .route("/api/schedule/stop", post(handlers::stop_schedule))
        .route("/api/schedule/reset", post(handlers::reset_schedule_runs))
        .route("/api/schedule/status", get(handlers::get_schedule_status))
        // === OPERATION HISTORY ROUTES ===
        .route("/api/operations", get(handlers::get_recent_operations))
        // Add middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
