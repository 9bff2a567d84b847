//! Database record types (entities).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One executed cache operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    pub id: String,
    pub operation: String,
    /// `manual` or `scheduled`
    pub trigger_source: String,
    pub status: String,
    pub message: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
