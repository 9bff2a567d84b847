//! This module provides reusable test utilities:
//! - Temporary SQLite databases
//! - Temporary storage roots with ATAK/ATOS cache files
//! - A recording periodic trigger
//! - A fully wired state machine harness

// Each test binary uses a different subset of the fixtures
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fake_trigger;
pub mod harness;
pub mod test_database;
pub mod test_storage;

// Re-export commonly used items
pub use fake_trigger::{FakeTrigger, ScheduleCall};
pub use harness::{FailingRunRepository, TestHarness};
pub use test_database::TestDatabase;
pub use test_storage::TestStorage;
