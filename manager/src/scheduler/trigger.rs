use anyhow::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;

/// Work run on every firing. An `Err` asks the trigger for a retry.
pub type TriggerCallback = Arc<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// A single named recurring task.
///
/// Implementations must keep at most one registration alive: scheduling
/// again replaces the previous registration, and one firing never overlaps
/// another of the same task.
#[async_trait]
pub trait PeriodicTrigger: Send + Sync {
    async fn schedule(
        &self,
        interval: Duration,
        initial_delay: Duration,
        callback: TriggerCallback,
    ) -> Result<()>;

    async fn cancel(&self) -> Result<()>;

    async fn is_scheduled(&self) -> bool;
}
