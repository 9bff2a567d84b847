//! Recurring cache maintenance.
//!
//! - [`trigger`]: the `PeriodicTrigger` seam for a single named recurring task
//! - [`cron_trigger`]: its `tokio-cron-scheduler` implementation with retries
//! - [`state_machine`]: DISABLED/ACTIVE transitions, run counting and limits

pub mod cron_trigger;
pub mod state_machine;
pub mod trigger;

pub use cron_trigger::{CronTrigger, RetryPolicy};
pub use state_machine::{RunSummary, ScheduleStateMachine};
pub use trigger::{PeriodicTrigger, TriggerCallback};
