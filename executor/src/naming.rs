//! Timestamp naming for backup and archive files.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// `dd_MMM_yyyy_HH_mm`, e.g. `15_Jan_2024_14_30`. No seconds, so two
/// backups taken within the same minute share a name.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%d_%b_%Y_%H_%M";

pub fn format_backup_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(BACKUP_TIMESTAMP_FORMAT).to_string()
}

pub fn current_backup_timestamp() -> String {
    format_backup_timestamp(&Local::now())
}

/// Whether `filename` looks like `<prefix>*<extension>`.
pub fn matches_backup_name(filename: &str, prefix: &str, extension: &str) -> bool {
    filename.starts_with(prefix) && filename.ends_with(extension)
}
