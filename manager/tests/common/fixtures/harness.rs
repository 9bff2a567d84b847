//! Fully wired state machine over temporary storage and database

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use cache_manager::schedule::{ScheduleConfig, ScheduleRepository, SqliteScheduleRepository};
use cache_manager::services::{CacheService, ForegroundIndicator, OperationHistory};
use cache_manager::web::AppState;
use cache_manager::{Config, ScheduleStateMachine};
use chrono::NaiveDateTime;
use std::sync::Arc;

use super::{FakeTrigger, TestDatabase, TestStorage};

pub struct TestHarness {
    pub storage: TestStorage,
    pub database: TestDatabase,
    pub repository: Arc<dyn ScheduleRepository>,
    pub trigger: Arc<FakeTrigger>,
    pub history: Arc<OperationHistory>,
    pub indicator: Arc<ForegroundIndicator>,
    pub machine: Arc<ScheduleStateMachine>,
}

impl TestHarness {
    pub async fn new(storage: TestStorage) -> Self {
        let database = TestDatabase::new().await.expect("Failed to create database");
        let repository: Arc<dyn ScheduleRepository> =
            Arc::new(SqliteScheduleRepository::new(database.db.clone()));
        Self::with_repository(storage, database, repository)
    }

    pub async fn with_failing_runs(storage: TestStorage) -> Self {
        let database = TestDatabase::new().await.expect("Failed to create database");
        let repository: Arc<dyn ScheduleRepository> = Arc::new(FailingRunRepository {
            inner: SqliteScheduleRepository::new(database.db.clone()),
        });
        Self::with_repository(storage, database, repository)
    }

    fn with_repository(
        storage: TestStorage,
        database: TestDatabase,
        repository: Arc<dyn ScheduleRepository>,
    ) -> Self {
        let trigger = Arc::new(FakeTrigger::new());
        let history = Arc::new(OperationHistory::new(database.db.clone()));
        let indicator = Arc::new(ForegroundIndicator::new());
        let machine = Arc::new(ScheduleStateMachine::new(
            repository.clone(),
            trigger.clone(),
            storage.executor(false),
            history.clone(),
            indicator.clone(),
        ));

        Self {
            storage,
            database,
            repository,
            trigger,
            history,
            indicator,
            machine,
        }
    }

    /// A second state machine over the same store, as after a restart.
    pub fn restarted(&self) -> (Arc<ScheduleStateMachine>, Arc<FakeTrigger>) {
        let trigger = Arc::new(FakeTrigger::new());
        let machine = Arc::new(ScheduleStateMachine::new(
            self.repository.clone(),
            trigger.clone(),
            self.storage.executor(false),
            self.history.clone(),
            Arc::new(ForegroundIndicator::new()),
        ));
        (machine, trigger)
    }

    pub fn app_state(&self) -> AppState {
        let cache_service = Arc::new(CacheService::new(
            self.storage.executor(false),
            self.history.clone(),
        ));
        AppState::new(
            Arc::new(Config::default()),
            self.machine.clone(),
            cache_service,
            self.history.clone(),
        )
    }
}

/// Repository whose run bookkeeping always fails.
pub struct FailingRunRepository {
    inner: SqliteScheduleRepository,
}

#[async_trait]
impl ScheduleRepository for FailingRunRepository {
    async fn load(&self) -> Result<ScheduleConfig> {
        self.inner.load().await
    }

    async fn save(&self, config: &ScheduleConfig) -> Result<()> {
        self.inner.save(config).await
    }

    async fn set_active(&self, active: bool) -> Result<()> {
        self.inner.set_active(active).await
    }

    async fn record_run(&self, _at: NaiveDateTime) -> Result<ScheduleConfig> {
        Err(anyhow!("disk I/O error"))
    }

    async fn last_run(&self) -> Result<Option<String>> {
        self.inner.last_run().await
    }

    async fn reset_runs(&self) -> Result<()> {
        self.inner.reset_runs().await
    }
}
