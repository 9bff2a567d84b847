//! File-level operations on the ATAK cache databases.
//!
//! Every operation here is fail-soft: it reports an [`OperationOutcome`]
//! instead of returning an error, so a batch of scheduled operations keeps
//! going when one cache file is missing.

pub mod detector;
pub mod executor;
pub mod layout;
pub mod naming;
pub mod operations;
pub mod services;
pub mod types;

pub use detector::{FixedDetector, ProcessListDetector, RunningAppDetector};
pub use executor::CacheExecutor;
pub use layout::CacheLayout;
pub use types::{BackupInfo, CacheOperation, CacheType, OperationOutcome, OutcomeStatus};
