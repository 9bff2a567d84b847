//! `PeriodicTrigger` backed by `tokio-cron-scheduler`.
//!
//! A schedule is realised as a one-shot job at the initial delay. When that
//! fires it registers a repeated job at the configured interval and runs the
//! callback. Failed runs get one-shot retry jobs with linear backoff.
//! Every job carries the generation it was created for, so jobs that outlive
//! a cancel or reschedule do nothing when they fire.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::trigger::{PeriodicTrigger, TriggerCallback};
use crate::errors::{ManagerError, ScheduleError};

/// Retry policy for failed runs.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempt `n` waits `n * backoff`
    pub backoff: Duration,
    pub max_attempts: u32,
}

impl RetryPolicy {
    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

struct TriggerContext {
    scheduler: JobScheduler,
    name: String,
    retry: RetryPolicy,
    generation: AtomicU64,
    scheduled: AtomicBool,
    jobs: Mutex<Vec<Uuid>>,
    running: Mutex<()>,
}

pub struct CronTrigger {
    ctx: Arc<TriggerContext>,
}

impl CronTrigger {
    pub async fn new(name: impl Into<String>, retry: RetryPolicy) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create JobScheduler: {}", e))?;
        scheduler
            .start()
            .await
            .map_err(|e| anyhow!("Failed to start JobScheduler: {}", e))?;

        Ok(Self {
            ctx: Arc::new(TriggerContext {
                scheduler,
                name: name.into(),
                retry,
                generation: AtomicU64::new(0),
                scheduled: AtomicBool::new(false),
                jobs: Mutex::new(Vec::new()),
                running: Mutex::new(()),
            }),
        })
    }
}

impl TriggerContext {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn register(&self, job: Job) -> Result<()> {
        let id = self.scheduler.add(job).await.map_err(|e| {
            ManagerError::from(ScheduleError::RegistrationFailed {
                reason: e.to_string(),
            })
        })?;
        self.jobs.lock().await.push(id);
        Ok(())
    }

    async fn remove_all(&self) -> usize {
        let ids: Vec<Uuid> = self.jobs.lock().await.drain(..).collect();
        for id in &ids {
            // Fired one-shot jobs are already gone from the scheduler.
            if let Err(e) = self.scheduler.remove(id).await {
                debug!("Job {} for {} not removed: {}", id, self.name, e);
            }
        }
        ids.len()
    }
}

fn first_run_job(
    ctx: Arc<TriggerContext>,
    generation: u64,
    interval: Duration,
    initial_delay: Duration,
    callback: TriggerCallback,
) -> Result<Job> {
    Job::new_one_shot_async(initial_delay, move |_uuid, _scheduler| {
        first_run(ctx.clone(), generation, interval, callback.clone())
    })
    .map_err(|e| anyhow!("Failed to create first-run job: {}", e))
}

fn repeated_job(
    ctx: Arc<TriggerContext>,
    generation: u64,
    interval: Duration,
    callback: TriggerCallback,
) -> Result<Job> {
    Job::new_repeated_async(interval, move |_uuid, _scheduler| {
        run_once(ctx.clone(), generation, callback.clone(), 0)
    })
    .map_err(|e| anyhow!("Failed to create repeated job: {}", e))
}

fn retry_job(
    ctx: Arc<TriggerContext>,
    generation: u64,
    delay: Duration,
    callback: TriggerCallback,
    attempt: u32,
) -> Result<Job> {
    Job::new_one_shot_async(delay, move |_uuid, _scheduler| {
        run_once(ctx.clone(), generation, callback.clone(), attempt)
    })
    .map_err(|e| anyhow!("Failed to create retry job: {}", e))
}

fn first_run(
    ctx: Arc<TriggerContext>,
    generation: u64,
    interval: Duration,
    callback: TriggerCallback,
) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        if !ctx.is_current(generation) {
            debug!("Ignoring stale first run of {}", ctx.name);
            return;
        }

        match repeated_job(ctx.clone(), generation, interval, callback.clone()) {
            Ok(job) => {
                if let Err(e) = ctx.register(job).await {
                    error!("✗ Failed to register recurring job for {}: {}", ctx.name, e);
                }
            }
            Err(e) => error!("✗ {}", e),
        }

        run_once(ctx, generation, callback, 0).await;
    })
}

fn run_once(
    ctx: Arc<TriggerContext>,
    generation: u64,
    callback: TriggerCallback,
    attempt: u32,
) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        let _running = ctx.running.lock().await;
        if !ctx.is_current(generation) {
            debug!("Ignoring stale run of {}", ctx.name);
            return;
        }

        info!("Firing {} (attempt {})", ctx.name, attempt + 1);
        let result = callback().await;

        let Err(e) = result else {
            return;
        };
        if attempt >= ctx.retry.max_attempts {
            error!(
                "✗ {} failed after {} retries, waiting for next interval: {}",
                ctx.name, attempt, e
            );
            return;
        }

        let next_attempt = attempt + 1;
        let delay = ctx.retry.delay_for(next_attempt);
        warn!(
            "{} failed, retry {} of {} in {}s: {}",
            ctx.name,
            next_attempt,
            ctx.retry.max_attempts,
            delay.as_secs(),
            e
        );

        match retry_job(ctx.clone(), generation, delay, callback.clone(), next_attempt) {
            Ok(job) => {
                if let Err(e) = ctx.register(job).await {
                    error!("✗ Failed to register retry for {}: {}", ctx.name, e);
                }
            }
            Err(e) => error!("✗ {}", e),
        }
    })
}

#[async_trait]
impl PeriodicTrigger for CronTrigger {
    async fn schedule(
        &self,
        interval: Duration,
        initial_delay: Duration,
        callback: TriggerCallback,
    ) -> Result<()> {
        if interval.is_zero() {
            return Err(ManagerError::invalid_value("interval", "must be positive").into());
        }

        // Replace semantics: drop whatever the previous registration left.
        let generation = self.ctx.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let removed = self.ctx.remove_all().await;
        if removed > 0 {
            debug!("Replaced {} existing jobs for {}", removed, self.ctx.name);
        }

        let job = first_run_job(
            self.ctx.clone(),
            generation,
            interval,
            initial_delay,
            callback,
        )?;
        self.ctx.register(job).await?;
        self.ctx.scheduled.store(true, Ordering::SeqCst);

        info!(
            "✓ Scheduled {}: first run in {}s, then every {}s",
            self.ctx.name,
            initial_delay.as_secs(),
            interval.as_secs()
        );
        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        self.ctx.generation.fetch_add(1, Ordering::SeqCst);
        let removed = self.ctx.remove_all().await;
        self.ctx.scheduled.store(false, Ordering::SeqCst);
        info!("Cancelled {} ({} jobs removed)", self.ctx.name, removed);
        Ok(())
    }

    async fn is_scheduled(&self) -> bool {
        self.ctx.scheduled.load(Ordering::SeqCst)
    }
}
