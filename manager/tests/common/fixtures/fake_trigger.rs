//! Recording `PeriodicTrigger` that only fires when told to

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use cache_manager::scheduler::{PeriodicTrigger, TriggerCallback};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleCall {
    pub interval: Duration,
    pub initial_delay: Duration,
}

#[derive(Default)]
pub struct FakeTrigger {
    calls: Mutex<Vec<ScheduleCall>>,
    callback: Mutex<Option<TriggerCallback>>,
    cancels: AtomicUsize,
}

impl FakeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_calls(&self) -> Vec<ScheduleCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }

    /// Run the registered callback once, as a real firing would.
    pub async fn fire(&self) -> Result<()> {
        let callback = self.callback.lock().unwrap().clone();
        match callback {
            Some(callback) => callback().await,
            None => Err(anyhow!("No callback registered")),
        }
    }
}

#[async_trait]
impl PeriodicTrigger for FakeTrigger {
    async fn schedule(
        &self,
        interval: Duration,
        initial_delay: Duration,
        callback: TriggerCallback,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(ScheduleCall {
            interval,
            initial_delay,
        });
        *self.callback.lock().unwrap() = Some(callback);
        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        *self.callback.lock().unwrap() = None;
        Ok(())
    }

    async fn is_scheduled(&self) -> bool {
        self.callback.lock().unwrap().is_some()
    }
}
