//! The four cache operations.
//!
//! Each public function wraps a fallible inner sequence and folds any error
//! into a `Failed` outcome. Nothing here returns `Err` to the caller.

pub mod archive;
pub mod delete;
pub mod offload;
pub mod restore;

pub use archive::execute_atos_archive;
pub use delete::execute_atak_delete;
pub use offload::execute_atak_offload;
pub use restore::execute_atak_restore;

use anyhow::Result;
use std::path::Path;
use tracing::error;

use crate::services::files;
use crate::types::{CacheOperation, OperationOutcome};

/// Move `source` to `target`, creating the target's directory first. A
/// failed rename leaves the directory in place.
async fn move_into(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        files::ensure_directory(parent).await?;
    }
    files::rename_file(source, target).await
}

fn fail(operation: CacheOperation, context: &str, error: anyhow::Error) -> OperationOutcome {
    error!("✗ {}: {}", context, error);
    OperationOutcome::failed(operation, format!("{}: {}", context, error))
}
