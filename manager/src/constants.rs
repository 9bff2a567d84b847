//! Central repository for defaults, formats and intervals.

use std::time::Duration;

/// Defaults for the service configuration file
pub mod defaults {
    pub const HOST: &str = "127.0.0.1";

    pub const PORT: u16 = 8096;

    /// External-storage root holding the `atak/` directory
    pub const STORAGE_ROOT: &str = "/sdcard";

    pub const DATABASE_PATH: &str = "data/cache-manager.db";

    /// Base delay between retries of a failed scheduled run
    pub const RETRY_BACKOFF_MINUTES: u64 = 60;

    pub const MAX_RETRY_ATTEMPTS: u32 = 3;

    /// Upper bound for `retry_backoff_minutes`, one week
    pub const MAX_RETRY_BACKOFF_MINUTES: u64 = 7 * 24 * 60;
}

/// Defaults of the persisted schedule, matching existing installations
pub mod schedule {
    pub const DEFAULT_FREQUENCY_VALUE: u32 = 1;

    pub const DEFAULT_HOUR: u32 = 2;

    pub const DEFAULT_MINUTE: u32 = 0;

    /// Name of the single recurring task
    pub const TRIGGER_NAME: &str = "cache_scheduler_work";
}

/// Display formats
pub mod formats {
    /// `yyyy-MM-dd HH:mm`, used for last-run and next-run values
    pub const SCHEDULE_DATETIME: &str = "%Y-%m-%d %H:%M";
}

/// Operation history limits
pub mod history {
    pub const DEFAULT_LIST_LIMIT: i64 = 50;

    pub const MAX_LIST_LIMIT: i64 = 500;
}

pub const SECONDS_PER_DAY: u64 = 86_400;

pub fn days(count: u32) -> Duration {
    Duration::from_secs(SECONDS_PER_DAY * count as u64)
}
