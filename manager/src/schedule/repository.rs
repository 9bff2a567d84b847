//! Persistence of the schedule configuration.
//!
//! Keys and value encodings match the preference file of existing
//! installations: booleans as `true`/`false`, integers in decimal, enums by
//! upper-case name, `max_runs` and `last_run` absent when unset.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{format_schedule_time, ScheduleConfig, TimeOfDay};
use crate::database::{settings, Database};

pub const KEY_IS_ACTIVE: &str = "is_active";
pub const KEY_FREQUENCY: &str = "frequency";
pub const KEY_FREQUENCY_VALUE: &str = "frequency_value";
pub const KEY_TIME_HOUR: &str = "time_hour";
pub const KEY_TIME_MINUTE: &str = "time_minute";
pub const KEY_DURATION: &str = "duration";
pub const KEY_MAX_RUNS: &str = "max_runs";
pub const KEY_RUNS_COMPLETED: &str = "runs_completed";
pub const KEY_LAST_RUN: &str = "last_run";
pub const KEY_CACHE_TYPE: &str = "cache_type";

/// Store shared by the interactive handlers and the periodic trigger.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn load(&self) -> Result<ScheduleConfig>;

    /// Persist every field of `config` in one write.
    async fn save(&self, config: &ScheduleConfig) -> Result<()>;

    async fn set_active(&self, active: bool) -> Result<()>;

    /// Record a finished run at `at`: bump `runs_completed`, stamp
    /// `last_run`, and deactivate when a run limit is reached. All in one
    /// write. Returns the configuration after the update.
    async fn record_run(&self, at: NaiveDateTime) -> Result<ScheduleConfig>;

    /// `yyyy-MM-dd HH:mm` of the last completed run.
    async fn last_run(&self) -> Result<Option<String>>;

    async fn reset_runs(&self) -> Result<()>;
}

pub struct SqliteScheduleRepository {
    db: Arc<Database>,
}

impl SqliteScheduleRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepository {
    async fn load(&self) -> Result<ScheduleConfig> {
        let prefs = self.db.get_schedule_prefs().await?;
        Ok(config_from_prefs(&prefs))
    }

    async fn save(&self, config: &ScheduleConfig) -> Result<()> {
        let mut tx = self.db.begin().await?;
        for (key, value) in prefs_from_config(config) {
            settings::upsert_pref(&mut tx, key, &value).await?;
        }
        if config.max_runs.is_none() {
            settings::remove_pref(&mut tx, KEY_MAX_RUNS).await?;
        }
        tx.commit().await?;

        debug!("Schedule configuration saved: {:?}", config);
        Ok(())
    }

    async fn set_active(&self, active: bool) -> Result<()> {
        let mut tx = self.db.begin().await?;
        settings::upsert_pref(&mut tx, KEY_IS_ACTIVE, &active.to_string()).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn record_run(&self, at: NaiveDateTime) -> Result<ScheduleConfig> {
        let mut tx = self.db.begin().await?;

        let prefs = settings::read_prefs(&mut tx).await?;
        let mut config = config_from_prefs(&prefs);
        config.runs_completed = config.runs_completed.saturating_add(1);

        settings::upsert_pref(&mut tx, KEY_LAST_RUN, &format_schedule_time(at)).await?;
        settings::upsert_pref(
            &mut tx,
            KEY_RUNS_COMPLETED,
            &config.runs_completed.to_string(),
        )
        .await?;

        if config.run_limit_reached() && config.active {
            config.active = false;
            settings::upsert_pref(&mut tx, KEY_IS_ACTIVE, "false").await?;
            info!(
                "Run limit reached ({} of {:?}), schedule deactivated",
                config.runs_completed, config.max_runs
            );
        }

        tx.commit().await?;
        Ok(config)
    }

    async fn last_run(&self) -> Result<Option<String>> {
        let prefs = self.db.get_schedule_prefs().await?;
        Ok(prefs.get(KEY_LAST_RUN).cloned())
    }

    async fn reset_runs(&self) -> Result<()> {
        let mut tx = self.db.begin().await?;
        settings::upsert_pref(&mut tx, KEY_RUNS_COMPLETED, "0").await?;
        tx.commit().await?;
        info!("Schedule run counter reset");
        Ok(())
    }
}

fn prefs_from_config(config: &ScheduleConfig) -> Vec<(&'static str, String)> {
    let mut prefs = vec![
        (KEY_IS_ACTIVE, config.active.to_string()),
        (KEY_FREQUENCY, config.frequency.as_str().to_string()),
        (KEY_FREQUENCY_VALUE, config.frequency_value.to_string()),
        (KEY_TIME_HOUR, config.time.hour.to_string()),
        (KEY_TIME_MINUTE, config.time.minute.to_string()),
        (KEY_DURATION, config.duration.as_str().to_string()),
        (KEY_RUNS_COMPLETED, config.runs_completed.to_string()),
        (KEY_CACHE_TYPE, config.cache_type.as_str().to_string()),
    ];
    if let Some(max_runs) = config.max_runs {
        prefs.push((KEY_MAX_RUNS, max_runs.to_string()));
    }
    prefs
}

fn config_from_prefs(prefs: &HashMap<String, String>) -> ScheduleConfig {
    let defaults = ScheduleConfig::default();
    ScheduleConfig {
        active: parse_or(prefs, KEY_IS_ACTIVE, defaults.active),
        frequency: parse_or(prefs, KEY_FREQUENCY, defaults.frequency),
        frequency_value: parse_or(prefs, KEY_FREQUENCY_VALUE, defaults.frequency_value),
        time: TimeOfDay::new(
            parse_or(prefs, KEY_TIME_HOUR, defaults.time.hour),
            parse_or(prefs, KEY_TIME_MINUTE, defaults.time.minute),
        ),
        duration: parse_or(prefs, KEY_DURATION, defaults.duration),
        max_runs: prefs
            .get(KEY_MAX_RUNS)
            .and_then(|value| parse_value(KEY_MAX_RUNS, value)),
        runs_completed: parse_or(prefs, KEY_RUNS_COMPLETED, defaults.runs_completed),
        cache_type: parse_or(prefs, KEY_CACHE_TYPE, defaults.cache_type),
    }
}

fn parse_or<T>(prefs: &HashMap<String, String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    prefs
        .get(key)
        .and_then(|value| parse_value(key, value))
        .unwrap_or(default)
}

fn parse_value<T>(key: &str, value: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("Ignoring unreadable preference {}={:?}: {}", key, value, e);
            None
        }
    }
}
