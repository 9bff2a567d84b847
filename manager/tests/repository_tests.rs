//! SQLite-backed schedule preferences and operation history

mod common;

use cache_executor::{CacheOperation, OperationOutcome};
use cache_manager::schedule::repository::{
    KEY_FREQUENCY_VALUE, KEY_IS_ACTIVE, KEY_LAST_RUN, KEY_MAX_RUNS,
};
use cache_manager::schedule::{
    CacheType, Frequency, RunDuration, ScheduleConfig, ScheduleRepository,
    SqliteScheduleRepository, TimeOfDay,
};
use cache_manager::services::{OperationHistory, TriggerSource};
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use common::fixtures::*;
use sqlx::Row;

fn repository(db: &TestDatabase) -> SqliteScheduleRepository {
    SqliteScheduleRepository::new(db.db.clone())
}

#[tokio::test]
async fn test_database_initialization() {
    let db = TestDatabase::new().await.unwrap();

    let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type='table'")
        .fetch_all(db.pool())
        .await
        .unwrap();
    let table_names: Vec<String> = rows.iter().map(|row| row.get("name")).collect();

    assert!(table_names.contains(&"schedule_prefs".to_string()));
    assert!(table_names.contains(&"cache_operations".to_string()));
}

#[tokio::test]
async fn empty_store_loads_defaults() {
    let db = TestDatabase::new().await.unwrap();
    let config = repository(&db).load().await.unwrap();

    assert_eq!(config, ScheduleConfig::default());
    assert!(!config.active);
    assert_eq!(config.frequency, Frequency::Days);
    assert_eq!(config.frequency_value, 1);
    assert_eq!(config.time, TimeOfDay::new(2, 0));
    assert_eq!(config.duration, RunDuration::Indefinite);
    assert_eq!(config.max_runs, None);
    assert_eq!(config.cache_type, CacheType::Both);
}

#[tokio::test]
async fn save_and_load_round_trip() {
    let db = TestDatabase::new().await.unwrap();
    let repo = repository(&db);
    let config = ScheduleConfig {
        active: true,
        frequency: Frequency::Months,
        frequency_value: 3,
        time: TimeOfDay::new(23, 45),
        duration: RunDuration::LimitedRuns,
        max_runs: Some(6),
        runs_completed: 2,
        cache_type: CacheType::Atos,
    };

    repo.save(&config).await.unwrap();

    assert_eq!(repo.load().await.unwrap(), config);
}

#[tokio::test]
async fn saving_without_max_runs_removes_stored_value() {
    let db = TestDatabase::new().await.unwrap();
    let repo = repository(&db);
    repo.save(&ScheduleConfig {
        duration: RunDuration::LimitedRuns,
        max_runs: Some(4),
        ..ScheduleConfig::default()
    })
    .await
    .unwrap();

    repo.save(&ScheduleConfig::default()).await.unwrap();

    let prefs = db.db.get_schedule_prefs().await.unwrap();
    assert!(!prefs.contains_key(KEY_MAX_RUNS));
    assert_eq!(repo.load().await.unwrap().max_runs, None);
}

#[tokio::test]
async fn values_are_stored_as_text() {
    let db = TestDatabase::new().await.unwrap();
    repository(&db)
        .save(&ScheduleConfig {
            active: true,
            frequency_value: 7,
            ..ScheduleConfig::default()
        })
        .await
        .unwrap();

    let prefs = db.db.get_schedule_prefs().await.unwrap();
    assert_eq!(prefs[KEY_IS_ACTIVE], "true");
    assert_eq!(prefs[KEY_FREQUENCY_VALUE], "7");

    let rows = sqlx::query("SELECT updated_at FROM schedule_prefs")
        .fetch_all(db.pool())
        .await
        .unwrap();
    assert!(!rows.is_empty());
    for row in rows {
        let updated_at: chrono::DateTime<Utc> = row.try_get("updated_at").unwrap();
        assert!(updated_at <= Utc::now());
    }
}

#[tokio::test]
async fn unreadable_stored_value_falls_back_to_default() {
    let db = TestDatabase::new().await.unwrap();
    db.put_raw_pref(KEY_FREQUENCY_VALUE, "often").await.unwrap();
    db.put_raw_pref(KEY_IS_ACTIVE, "true").await.unwrap();

    let config = repository(&db).load().await.unwrap();

    assert_eq!(config.frequency_value, 1);
    assert!(config.active);
}

#[tokio::test]
async fn record_run_stamps_last_run_and_counts() {
    let db = TestDatabase::new().await.unwrap();
    let repo = repository(&db);
    repo.save(&ScheduleConfig {
        active: true,
        ..ScheduleConfig::default()
    })
    .await
    .unwrap();
    let at = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(2, 0, 41)
        .unwrap();

    let updated = repo.record_run(at).await.unwrap();

    assert_eq!(updated.runs_completed, 1);
    assert!(updated.active);
    assert_eq!(
        repo.last_run().await.unwrap().as_deref(),
        Some("2024-03-09 02:00")
    );
    let prefs = db.db.get_schedule_prefs().await.unwrap();
    assert_eq!(prefs[KEY_LAST_RUN], "2024-03-09 02:00");
}

#[tokio::test]
async fn record_run_deactivates_at_limit() {
    let db = TestDatabase::new().await.unwrap();
    let repo = repository(&db);
    repo.save(&ScheduleConfig {
        active: true,
        duration: RunDuration::LimitedRuns,
        max_runs: Some(2),
        ..ScheduleConfig::default()
    })
    .await
    .unwrap();
    let at = Utc::now().naive_local();

    assert!(repo.record_run(at).await.unwrap().active);
    let updated = repo.record_run(at).await.unwrap();

    assert!(!updated.active);
    assert_eq!(updated.runs_completed, 2);
    assert!(!repo.load().await.unwrap().active);
}

#[tokio::test]
async fn concurrent_runs_are_not_lost() {
    let db = TestDatabase::new().await.unwrap();
    let repo = std::sync::Arc::new(repository(&db));
    repo.save(&ScheduleConfig {
        active: true,
        ..ScheduleConfig::default()
    })
    .await
    .unwrap();
    let at = Utc::now().naive_local();

    let mut handles = Vec::new();
    for _ in 0..5 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move { repo.record_run(at).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(repo.load().await.unwrap().runs_completed, 5);
}

#[tokio::test]
async fn reset_runs_zeroes_counter() {
    let db = TestDatabase::new().await.unwrap();
    let repo = repository(&db);
    repo.save(&ScheduleConfig {
        runs_completed: 4,
        frequency_value: 2,
        ..ScheduleConfig::default()
    })
    .await
    .unwrap();

    repo.reset_runs().await.unwrap();

    let config = repo.load().await.unwrap();
    assert_eq!(config.runs_completed, 0);
    assert_eq!(config.frequency_value, 2);
}

#[tokio::test]
async fn history_lists_newest_first() {
    let db = TestDatabase::new().await.unwrap();
    let history = OperationHistory::new(db.db.clone());
    let earlier = Utc::now() - ChronoDuration::minutes(5);

    history
        .record(
            &OperationOutcome::skipped(CacheOperation::AtakOffload, "ATAK cache file not found"),
            TriggerSource::Scheduled,
            earlier,
        )
        .await
        .unwrap();
    history
        .record(
            &OperationOutcome::deleted(CacheOperation::AtakDelete, "ATAK cache deleted"),
            TriggerSource::Manual,
            Utc::now(),
        )
        .await
        .unwrap();

    let records = history.recent(None).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].operation, "atak_delete");
    assert_eq!(records[0].trigger_source, "manual");
    assert_eq!(records[0].status, "completed");
    assert_eq!(records[1].operation, "atak_offload");
    assert_eq!(records[1].status, "skipped");
    assert_ne!(records[0].id, records[1].id);

    assert_eq!(history.recent(Some(1)).await.unwrap().len(), 1);
}
