use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The four file actions the executor knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheOperation {
    AtakOffload,
    AtakDelete,
    AtakRestore,
    AtosArchive,
}

impl CacheOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOperation::AtakOffload => "atak_offload",
            CacheOperation::AtakDelete => "atak_delete",
            CacheOperation::AtakRestore => "atak_restore",
            CacheOperation::AtosArchive => "atos_archive",
        }
    }
}

impl fmt::Display for CacheOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "atak_offload" => Ok(CacheOperation::AtakOffload),
            "atak_delete" => Ok(CacheOperation::AtakDelete),
            "atak_restore" => Ok(CacheOperation::AtakRestore),
            "atos_archive" => Ok(CacheOperation::AtosArchive),
            other => Err(format!("Unknown cache operation: {}", other)),
        }
    }
}

/// Which cache files a scheduled run touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheType {
    Atak,
    Atos,
    #[default]
    Both,
}

impl CacheType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheType::Atak => "ATAK",
            CacheType::Atos => "ATOS",
            CacheType::Both => "BOTH",
        }
    }

    /// Operations performed for this selection, in execution order.
    pub fn operations(&self) -> &'static [CacheOperation] {
        match self {
            CacheType::Atak => &[CacheOperation::AtakOffload],
            CacheType::Atos => &[CacheOperation::AtosArchive],
            CacheType::Both => &[CacheOperation::AtakOffload, CacheOperation::AtosArchive],
        }
    }
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATAK" => Ok(CacheType::Atak),
            "ATOS" => Ok(CacheType::Atos),
            "BOTH" => Ok(CacheType::Both),
            other => Err(format!("Unknown cache type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Completed,
    /// A precondition was not met; nothing was touched.
    Skipped,
    Failed,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Completed => "completed",
            OutcomeStatus::Skipped => "skipped",
            OutcomeStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single cache operation, with a message fit for the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub operation: CacheOperation,
    pub status: OutcomeStatus,
    pub message: String,
    /// File produced by the operation (backup, archive or restored live file).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl OperationOutcome {
    pub fn completed(operation: CacheOperation, message: impl Into<String>, path: PathBuf) -> Self {
        Self {
            operation,
            status: OutcomeStatus::Completed,
            message: message.into(),
            path: Some(path),
        }
    }

    pub fn deleted(operation: CacheOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            status: OutcomeStatus::Completed,
            message: message.into(),
            path: None,
        }
    }

    pub fn skipped(operation: CacheOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            status: OutcomeStatus::Skipped,
            message: message.into(),
            path: None,
        }
    }

    pub fn failed(operation: CacheOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            status: OutcomeStatus::Failed,
            message: message.into(),
            path: None,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == OutcomeStatus::Completed
    }
}

/// A timestamped backup or archive file found on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: DateTime<Local>,
}
