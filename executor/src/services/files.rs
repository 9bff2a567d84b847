use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tracing::{debug, warn};

use crate::types::BackupInfo;

pub async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

pub async fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

pub async fn ensure_directory(path: &Path) -> Result<()> {
    if is_directory(path).await {
        return Ok(());
    }
    fs::create_dir_all(path)
        .await
        .map_err(|e| anyhow!("Failed to create directory {}: {}", path.display(), e))?;
    debug!("Created directory {}", path.display());
    Ok(())
}

/// Rename `from` to `to`. An existing file at `to` is replaced.
pub async fn rename_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await.map_err(|e| {
        anyhow!(
            "Failed to rename {} to {}: {}",
            from.display(),
            to.display(),
            e
        )
    })?;
    debug!("Renamed {} -> {}", from.display(), to.display());
    Ok(())
}

pub async fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path)
        .await
        .map_err(|e| anyhow!("Failed to delete {}: {}", path.display(), e))
}

/// Regular files in `dir` named `<prefix>*<extension>`. The scan runs on the
/// blocking pool.
pub async fn find_matching_files(
    dir: &Path,
    prefix: &str,
    extension: &str,
) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/{}*{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(prefix),
        Pattern::escape(extension)
    );

    tokio::task::spawn_blocking(move || scan(&pattern))
        .await
        .map_err(|e| anyhow!("File scan task failed: {}", e))?
}

fn scan(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    for entry in glob(pattern).map_err(|e| anyhow!("Glob pattern error: {}", e))? {
        match entry {
            Ok(path) if path.is_file() => matches.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable backup entry: {}", e),
        }
    }
    Ok(matches)
}

async fn modified_at(path: &Path) -> Result<SystemTime> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|e| anyhow!("Failed to stat {}: {}", path.display(), e))?;
    Ok(metadata.modified()?)
}

/// The candidate with the greatest modification time. Ties go to whichever
/// was seen first.
pub async fn most_recent_file(candidates: &[PathBuf]) -> Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, &PathBuf)> = None;
    for path in candidates {
        let modified = modified_at(path).await?;
        if newest.is_none_or(|(current, _)| modified > current) {
            newest = Some((modified, path));
        }
    }
    Ok(newest.map(|(_, path)| path.clone()))
}

/// Describe files newest-first.
pub async fn describe_files(paths: Vec<PathBuf>) -> Result<Vec<BackupInfo>> {
    let mut infos = Vec::with_capacity(paths.len());
    for path in paths {
        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| anyhow!("Failed to stat {}: {}", path.display(), e))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        infos.push(BackupInfo {
            filename,
            size_bytes: metadata.len(),
            modified: DateTime::<Local>::from(metadata.modified()?),
            path,
        });
    }
    infos.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(infos)
}
