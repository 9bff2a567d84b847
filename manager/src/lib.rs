pub mod config;
pub mod constants;
pub mod database;
pub mod errors;
pub mod schedule;
pub mod scheduler;
pub mod services;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigManager};
pub use database::Database;
pub use errors::ManagerError;
pub use schedule::{ScheduleConfig, ScheduleRepository, ScheduleStatus, SqliteScheduleRepository};
pub use scheduler::{CronTrigger, PeriodicTrigger, RetryPolicy, ScheduleStateMachine};
pub use services::{CacheService, ForegroundIndicator, OperationHistory};
