pub mod manager;
use serde::{Deserialize, Serialize};
use std::time::Duration;
pub use manager::ConfigManager;

use crate::constants::defaults;

/// Service configuration, read from `config/main.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// External-storage root that contains the `atak/` directory
    #[serde(default = "default_storage_root")]
    pub storage_root: String,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Process-name fragment identifying the running host app
    #[serde(default = "default_host_process_fragment")]
    pub host_process_fragment: String,
    #[serde(default = "default_retry_backoff_minutes")]
    pub retry_backoff_minutes: u64,
    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            storage_root: default_storage_root(),
            database_path: default_database_path(),
            host_process_fragment: default_host_process_fragment(),
            retry_backoff_minutes: default_retry_backoff_minutes(),
            max_retry_attempts: default_max_retry_attempts(),
        }
    }
}

impl Config {
    /// Base delay between retries of a failed scheduled run.
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff_minutes.saturating_mul(60))
    }
}

fn default_host() -> String {
    defaults::HOST.to_string()
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_storage_root() -> String {
    defaults::STORAGE_ROOT.to_string()
}

fn default_database_path() -> String {
    defaults::DATABASE_PATH.to_string()
}

fn default_host_process_fragment() -> String {
    cache_executor::detector::DEFAULT_HOST_PROCESS_FRAGMENT.to_string()
}

fn default_retry_backoff_minutes() -> u64 {
    defaults::RETRY_BACKOFF_MINUTES
}

fn default_max_retry_attempts() -> u32 {
    defaults::MAX_RETRY_ATTEMPTS
}
