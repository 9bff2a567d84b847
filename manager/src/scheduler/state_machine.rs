// File: manager/src/scheduler/state_machine.rs
use anyhow::{anyhow, Result};
use cache_executor::{CacheExecutor, OperationOutcome};
use chrono::{Local, NaiveDateTime, Utc};
use futures::future::BoxFuture;
use serde::Serialize;
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use super::trigger::{PeriodicTrigger, TriggerCallback};
use crate::errors::ManagerError;
use crate::schedule::{
    format_schedule_time, initial_delay, next_occurrence, Frequency, ScheduleConfig,
    ScheduleRepository, ScheduleStatus,
};
use crate::services::{ForegroundIndicator, OperationHistory, TriggerSource};

/// What one scheduled firing did.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub outcomes: Vec<OperationOutcome>,
    pub runs_completed: u32,
    pub limit_reached: bool,
}

/// Drives the schedule between DISABLED and ACTIVE.
///
/// Only ACTIVE has a registered trigger. `start`, `stop` and the firing
/// callback are serialised so a manual stop cannot interleave with the run
/// limit check of a firing.
pub struct ScheduleStateMachine {
    repository: Arc<dyn ScheduleRepository>,
    trigger: Arc<dyn PeriodicTrigger>,
    executor: Arc<CacheExecutor>,
    history: Arc<OperationHistory>,
    indicator: Arc<ForegroundIndicator>,
    lock: Mutex<()>,
}

impl ScheduleStateMachine {
    pub fn new(
        repository: Arc<dyn ScheduleRepository>,
        trigger: Arc<dyn PeriodicTrigger>,
        executor: Arc<CacheExecutor>,
        history: Arc<OperationHistory>,
        indicator: Arc<ForegroundIndicator>,
    ) -> Self {
        Self {
            repository,
            trigger,
            executor,
            history,
            indicator,
            lock: Mutex::new(()),
        }
    }

    pub fn indicator(&self) -> &ForegroundIndicator {
        &self.indicator
    }

    pub async fn get_config(&self) -> Result<ScheduleConfig> {
        self.repository.load().await
    }

    /// Validates and stores `config` as given without touching the trigger.
    #[instrument(skip(self, config))]
    pub async fn configure(&self, config: ScheduleConfig) -> Result<ScheduleConfig> {
        config.validate()?;
        let _guard = self.lock.lock().await;

        let config = config.normalized();
        self.repository.save(&config).await?;

        info!(
            "Schedule configured: every {} {} at {}, {}, cache {}",
            config.frequency_value,
            config.frequency,
            config.time,
            config.duration,
            config.cache_type
        );
        Ok(config)
    }

    /// Persists `config` as active and registers the recurring trigger.
    #[instrument(skip(self, config))]
    pub async fn start(self: &Arc<Self>, config: ScheduleConfig) -> Result<ScheduleStatus> {
        let config = ScheduleConfig {
            active: true,
            ..config.normalized()
        };
        config.validate()?;
        let _guard = self.lock.lock().await;

        self.repository.save(&config).await?;

        if let Err(e) = self.register_trigger(&config).await {
            error!("✗ Failed to start schedule: {}", e);
            if let Err(revert) = self.repository.set_active(false).await {
                error!("Failed to revert schedule activation: {}", revert);
            }
            return Err(e);
        }

        let status = self.status_now(&config).await?;
        self.indicator.start(&status.status_line);
        info!("✓ Schedule started: {}", status.status_line);
        Ok(status)
    }

    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.stop_locked().await
    }

    /// Re-registers the trigger for a schedule persisted as active.
    /// Returns whether a trigger was registered.
    #[instrument(skip(self))]
    pub async fn resume(self: &Arc<Self>) -> Result<bool> {
        let _guard = self.lock.lock().await;

        let config = self.repository.load().await?;
        if !config.active {
            info!("No active schedule to resume");
            return Ok(false);
        }
        if let Err(e) = config.validate() {
            warn!("Stored schedule is invalid, deactivating: {}", e);
            self.repository.set_active(false).await?;
            return Ok(false);
        }

        self.register_trigger(&config).await?;
        let status = self.status_now(&config).await?;
        self.indicator.start(&status.status_line);
        info!("✓ Schedule resumed: {}", status.status_line);
        Ok(true)
    }

    /// One scheduled firing. An `Err` leaves the counters untouched.
    #[instrument(skip(self))]
    pub async fn on_trigger_fired(&self) -> Result<RunSummary> {
        let _guard = self.lock.lock().await;

        let config = self.repository.load().await?;
        if !config.active {
            // A firing that raced with a stop.
            warn!("Trigger fired while the schedule is inactive, cancelling");
            self.trigger.cancel().await?;
            self.indicator.stop();
            return Ok(RunSummary {
                outcomes: Vec::new(),
                runs_completed: config.runs_completed,
                limit_reached: false,
            });
        }

        info!("Running scheduled cache maintenance for {}", config.cache_type);
        let started_at = Utc::now();
        let executor = self.executor.clone();
        let selection = config.cache_type;
        let outcomes = tokio::spawn(async move { executor.run_selection(selection).await })
            .await
            .map_err(|e| anyhow!("Scheduled cache operations aborted: {}", e))?;

        for outcome in &outcomes {
            if let Err(e) = self
                .history
                .record(outcome, TriggerSource::Scheduled, started_at)
                .await
            {
                error!("Failed to record scheduled {}: {}", outcome.operation, e);
            }
        }

        let now = Local::now().naive_local();
        let updated = self.repository.record_run(now).await?;
        let limit_reached = !updated.active;

        if limit_reached {
            info!(
                "Run limit reached after {} runs, stopping schedule",
                updated.runs_completed
            );
            if let Err(e) = self.trigger.cancel().await {
                error!("✗ Failed to cancel trigger after run limit: {}", e);
            }
            self.indicator.stop();
        } else {
            let status = ScheduleStatus::derive(&updated, None, now);
            self.indicator.update(&status.status_line);
        }

        info!(
            "✓ Scheduled run {} finished ({} operations)",
            updated.runs_completed,
            outcomes.len()
        );
        Ok(RunSummary {
            outcomes,
            runs_completed: updated.runs_completed,
            limit_reached,
        })
    }

    pub async fn get_status(&self) -> Result<ScheduleStatus> {
        self.status_at(Local::now().naive_local()).await
    }

    pub async fn status_at(&self, now: NaiveDateTime) -> Result<ScheduleStatus> {
        let config = self.repository.load().await?;
        let last_run = self.repository.last_run().await?;
        Ok(ScheduleStatus::derive(&config, last_run, now))
    }

    #[instrument(skip(self))]
    pub async fn reset_runs(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.repository.reset_runs().await
    }

    async fn stop_locked(&self) -> Result<()> {
        self.trigger.cancel().await?;
        self.indicator.stop();
        self.repository.set_active(false).await?;
        info!("✓ Schedule stopped");
        Ok(())
    }

    async fn status_now(&self, config: &ScheduleConfig) -> Result<ScheduleStatus> {
        let last_run = self.repository.last_run().await?;
        Ok(ScheduleStatus::derive(
            config,
            last_run,
            Local::now().naive_local(),
        ))
    }

    async fn register_trigger(self: &Arc<Self>, config: &ScheduleConfig) -> Result<()> {
        let time = config
            .time
            .to_naive_time()
            .ok_or_else(|| {
                ManagerError::Other(format!("Invalid schedule time {}", config.time))
            })?;
        let now = Local::now().naive_local();
        let delay = initial_delay(now, time);

        if config.frequency != Frequency::Days {
            warn!(
                "Frequency {} is scheduled as every {} days",
                config.frequency, config.frequency_value
            );
        }

        self.trigger
            .schedule(config.interval(), delay, self.firing_callback())
            .await?;
        info!(
            "Trigger registered, first run at {}",
            format_schedule_time(next_occurrence(now, time))
        );
        Ok(())
    }

    fn firing_callback(self: &Arc<Self>) -> TriggerCallback {
        let machine: Weak<Self> = Arc::downgrade(self);
        Arc::new(move || -> BoxFuture<'static, Result<()>> {
            let machine = machine.clone();
            Box::pin(async move {
                let Some(machine) = machine.upgrade() else {
                    return Ok(());
                };
                machine.on_trigger_fired().await.map(|_| ())
            })
        })
    }
}
