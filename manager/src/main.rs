// File: manager/src/main.rs
use anyhow::Result;
use cache_executor::{CacheExecutor, CacheLayout, ProcessListDetector};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use cache_manager::constants::schedule::TRIGGER_NAME;
use cache_manager::web::{start_web_server, AppState};
use cache_manager::{
    CacheService, ConfigManager, CronTrigger, Database, ForegroundIndicator, OperationHistory,
    RetryPolicy, ScheduleStateMachine, SqliteScheduleRepository,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with reduced verbosity
    let env_filter = EnvFilter::from_default_env()
        .add_directive("cache_manager=info".parse()?)
        .add_directive("cache_executor=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("tokio_cron_scheduler=warn".parse()?)
        .add_directive("sqlx=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting ATAK Cache Manager");

    // Load configuration
    let config_manager = ConfigManager::new("config".to_string()).await?;
    let config = config_manager.get_current_config();
    info!(
        "Configuration loaded: storage root {}, database {}",
        config.storage_root, config.database_path
    );

    // Initialize database
    let database = Arc::new(Database::new(&config.database_path).await?);
    info!("Database initialized");

    // Cache executor over the configured storage root
    let detector = Arc::new(ProcessListDetector::new(
        config.host_process_fragment.clone(),
    ));
    let executor = Arc::new(CacheExecutor::new(
        CacheLayout::new(&config.storage_root),
        detector,
    ));
    info!("Cache executor initialized for {:?}", executor.layout().atak_dir());

    let retry = RetryPolicy {
        backoff: config.retry_backoff(),
        max_attempts: config.max_retry_attempts,
    };
    let trigger = Arc::new(CronTrigger::new(TRIGGER_NAME, retry).await?);
    info!("Periodic trigger initialized");

    let repository = Arc::new(SqliteScheduleRepository::new(database.clone()));
    let history = Arc::new(OperationHistory::new(database.clone()));
    let indicator = Arc::new(ForegroundIndicator::new());

    let state_machine = Arc::new(ScheduleStateMachine::new(
        repository,
        trigger,
        executor.clone(),
        history.clone(),
        indicator,
    ));

    // Pick up a schedule that was active before the restart
    match state_machine.resume().await {
        Ok(true) => info!("Active schedule resumed"),
        Ok(false) => {}
        Err(e) => error!("Failed to resume schedule: {}", e),
    }

    let cache_service = Arc::new(CacheService::new(executor, history.clone()));

    info!("Starting web server on {}:{}", config.host, config.port);
    let state = AppState::new(config, state_machine, cache_service, history);
    start_web_server(state).await?;

    Ok(())
}
