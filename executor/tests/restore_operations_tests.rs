//! Integration tests for restoring the ATAK cache from its newest backup.

mod common;

use cache_executor::OutcomeStatus;
use common::MockStorage;
use std::fs;
use std::time::Duration;

#[tokio::test]
async fn restore_picks_backup_with_latest_mtime() {
    let storage = MockStorage::new().with_atak_cache(b"current");
    // Name order disagrees with mtime order on purpose.
    let oldest = storage.add_backup(
        "statesaver2_31_Dec_2024_23_59.sqlite",
        b"oldest",
        Duration::from_secs(3 * 3600),
    );
    let newest = storage.add_backup(
        "statesaver2_01_Jan_2024_00_00.sqlite",
        b"newest",
        Duration::from_secs(60),
    );
    let middle = storage.add_backup(
        "statesaver2_15_Jun_2024_12_00.sqlite",
        b"middle",
        Duration::from_secs(3600),
    );

    let outcome = storage.executor(false).restore_atak().await;

    assert_eq!(outcome.status, OutcomeStatus::Completed);
    assert_eq!(fs::read(storage.layout.atak_live_db()).unwrap(), b"newest");
    assert!(!newest.exists(), "Restored backup is moved, not copied");
    assert!(oldest.exists());
    assert!(middle.exists());
}

#[tokio::test]
async fn restore_without_backups_leaves_live_cache_untouched() {
    let storage = MockStorage::new().with_atak_cache(b"current");
    fs::create_dir_all(storage.layout.atak_backup_dir()).unwrap();

    let outcome = storage.executor(false).restore_atak().await;

    assert_eq!(outcome.status, OutcomeStatus::Skipped);
    assert_eq!(outcome.message, "No backup files found");
    assert_eq!(fs::read(storage.layout.atak_live_db()).unwrap(), b"current");
}

#[tokio::test]
async fn restore_without_backup_dir_is_skipped() {
    let storage = MockStorage::new().with_atak_cache(b"current");

    let outcome = storage.executor(false).restore_atak().await;

    assert_eq!(outcome.status, OutcomeStatus::Skipped);
    assert_eq!(outcome.message, "No backup directory found");
    assert_eq!(fs::read(storage.layout.atak_live_db()).unwrap(), b"current");
}

#[tokio::test]
async fn restore_ignores_files_outside_naming_pattern() {
    let storage = MockStorage::new();
    storage.add_backup("notes.txt", b"not a backup", Duration::from_secs(1));
    storage.add_backup("statesaver2.sqlite", b"not a backup either", Duration::from_secs(1));

    let outcome = storage.executor(false).restore_atak().await;

    assert_eq!(outcome.status, OutcomeStatus::Skipped);
    assert!(!storage.layout.atak_live_db().exists());
}

#[tokio::test]
async fn restore_without_live_cache_creates_it() {
    let storage = MockStorage::new();
    storage.add_backup(
        "statesaver2_01_Feb_2024_02_00.sqlite",
        b"backup",
        Duration::from_secs(10),
    );

    let outcome = storage.executor(false).restore_atak().await;

    assert!(outcome.is_completed());
    assert_eq!(fs::read(storage.layout.atak_live_db()).unwrap(), b"backup");
    assert_eq!(outcome.path, Some(storage.layout.atak_live_db()));
}

#[tokio::test]
async fn restore_refused_while_host_app_running() {
    let storage = MockStorage::new().with_atak_cache(b"current");
    let backup = storage.add_backup(
        "statesaver2_01_Feb_2024_02_00.sqlite",
        b"backup",
        Duration::from_secs(10),
    );

    let outcome = storage.executor(true).restore_atak().await;

    assert_eq!(outcome.status, OutcomeStatus::Skipped);
    assert!(backup.exists());
    assert_eq!(fs::read(storage.layout.atak_live_db()).unwrap(), b"current");
}

#[tokio::test]
async fn offload_then_restore_round_trips_contents() {
    let storage = MockStorage::new().with_atak_cache(b"round trip");
    let executor = storage.executor(false);

    assert!(executor.offload_atak().await.is_completed());
    assert!(!storage.layout.atak_live_db().exists());

    assert!(executor.restore_atak().await.is_completed());
    assert_eq!(fs::read(storage.layout.atak_live_db()).unwrap(), b"round trip");
    assert!(storage.backup_files().is_empty());
}
