//! Schedule configuration and derived status.
//!
//! The configuration is persisted as a flat key-value record (see
//! [`repository`]). Status is never stored; it is rebuilt from the
//! configuration and the current wall-clock time on every query.

pub mod repository;
pub use repository::{ScheduleRepository, SqliteScheduleRepository};

pub use cache_executor::CacheType;

use chrono::{Duration as ChronoDuration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{self, formats, schedule as schedule_defaults};
use crate::errors::ManagerError;

/// Declared recurrence unit. Scheduling always uses day granularity; see
/// [`ScheduleConfig::interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    #[default]
    Days,
    Weeks,
    Months,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Days => "DAYS",
            Frequency::Weeks => "WEEKS",
            Frequency::Months => "MONTHS",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAYS" => Ok(Frequency::Days),
            "WEEKS" => Ok(Frequency::Weeks),
            "MONTHS" => Ok(Frequency::Months),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunDuration {
    #[default]
    Indefinite,
    LimitedRuns,
}

impl RunDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunDuration::Indefinite => "INDEFINITE",
            RunDuration::LimitedRuns => "LIMITED_RUNS",
        }
    }
}

impl fmt::Display for RunDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INDEFINITE" => Ok(RunDuration::Indefinite),
            "LIMITED_RUNS" => Ok(RunDuration::LimitedRuns),
            other => Err(format!("Unknown duration: {}", other)),
        }
    }
}

/// Local wall-clock time each run is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// `None` when hour or minute is out of range.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self::new(schedule_defaults::DEFAULT_HOUR, schedule_defaults::DEFAULT_MINUTE)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default = "default_frequency_value")]
    pub frequency_value: u32,
    #[serde(default)]
    pub time: TimeOfDay,
    #[serde(default)]
    pub duration: RunDuration,
    #[serde(default)]
    pub max_runs: Option<u32>,
    #[serde(default)]
    pub runs_completed: u32,
    #[serde(default)]
    pub cache_type: CacheType,
}

fn default_frequency_value() -> u32 {
    schedule_defaults::DEFAULT_FREQUENCY_VALUE
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            active: false,
            frequency: Frequency::default(),
            frequency_value: default_frequency_value(),
            time: TimeOfDay::default(),
            duration: RunDuration::default(),
            max_runs: None,
            runs_completed: 0,
            cache_type: CacheType::default(),
        }
    }
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<(), ManagerError> {
        if self.frequency_value == 0 {
            return Err(ManagerError::invalid_value(
                "frequency_value",
                "must be at least 1",
            ));
        }
        if self.time.hour > 23 {
            return Err(ManagerError::invalid_value(
                "time_hour",
                "must be between 0 and 23",
            ));
        }
        if self.time.minute > 59 {
            return Err(ManagerError::invalid_value(
                "time_minute",
                "must be between 0 and 59",
            ));
        }
        if self.duration == RunDuration::LimitedRuns {
            match self.max_runs {
                None => return Err(ManagerError::missing_required("max_runs")),
                Some(0) => {
                    return Err(ManagerError::invalid_value("max_runs", "must be at least 1"))
                }
                Some(_) => {}
            }
        }
        if self.active && self.run_limit_reached() {
            return Err(ManagerError::invalid_value(
                "runs_completed",
                "an active schedule must be below max_runs",
            ));
        }
        Ok(())
    }

    /// `max_runs` only exists for limited schedules.
    pub fn normalized(mut self) -> Self {
        if self.duration == RunDuration::Indefinite {
            self.max_runs = None;
        }
        self
    }

    /// Recurrence interval. The unit collapses to days: `frequency_value`
    /// days for DAYS, WEEKS and MONTHS alike.
    pub fn interval(&self) -> Duration {
        constants::days(self.frequency_value)
    }

    pub fn run_limit_reached(&self) -> bool {
        self.duration == RunDuration::LimitedRuns
            && self
                .max_runs
                .is_some_and(|max_runs| self.runs_completed >= max_runs)
    }
}

/// Derived view of the schedule, rebuilt on every query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleStatus {
    pub active: bool,
    /// Estimate from the configured time of day, not a read of the trigger.
    pub next_run: Option<NaiveDateTime>,
    pub last_run: Option<String>,
    pub runs_completed: u32,
    pub max_runs: Option<u32>,
    pub status_line: String,
}

impl ScheduleStatus {
    pub fn derive(config: &ScheduleConfig, last_run: Option<String>, now: NaiveDateTime) -> Self {
        let next_run = if config.active {
            config
                .time
                .to_naive_time()
                .map(|time| next_occurrence(now, time))
        } else {
            None
        };

        Self {
            active: config.active,
            next_run,
            last_run,
            runs_completed: config.runs_completed,
            max_runs: config.max_runs,
            status_line: status_line(next_run),
        }
    }
}

/// Foreground indicator text for an optional next run.
pub fn status_line(next_run: Option<NaiveDateTime>) -> String {
    match next_run {
        Some(next) => format!("Active • Next: {}", format_schedule_time(next)),
        None => "Not scheduled".to_string(),
    }
}

/// Today at `time` if that has not passed yet, otherwise tomorrow at `time`.
/// A `now` exactly at `time` counts as not passed.
pub fn next_occurrence(now: NaiveDateTime, time: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(time);
    if today < now {
        today + ChronoDuration::days(1)
    } else {
        today
    }
}

pub fn initial_delay(now: NaiveDateTime, time: NaiveTime) -> Duration {
    (next_occurrence(now, time) - now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

pub fn format_schedule_time(at: NaiveDateTime) -> String {
    at.format(formats::SCHEDULE_DATETIME).to_string()
}
