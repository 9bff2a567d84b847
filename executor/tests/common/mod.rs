#![allow(dead_code)]

use cache_executor::{CacheExecutor, CacheLayout, FixedDetector};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// A temporary external-storage root with the ATAK directory tree.
pub struct MockStorage {
    pub root: TempDir,
    pub layout: CacheLayout,
}

impl MockStorage {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let layout = CacheLayout::new(root.path());
        fs::create_dir_all(layout.atak_databases_dir()).expect("Failed to create Databases dir");
        Self { root, layout }
    }

    pub fn with_atak_cache(self, contents: &[u8]) -> Self {
        fs::write(self.layout.atak_live_db(), contents).expect("Failed to write ATAK cache");
        self
    }

    pub fn with_atos_dir(self) -> Self {
        fs::create_dir_all(self.layout.atos_dir()).expect("Failed to create ATOS dir");
        self
    }

    pub fn with_atos_cache(self, contents: &[u8]) -> Self {
        let storage = self.with_atos_dir();
        fs::write(storage.layout.atos_live_db(), contents).expect("Failed to write ATOS cache");
        storage
    }

    /// Write a backup file whose modification time is `age` in the past.
    pub fn add_backup(&self, filename: &str, contents: &[u8], age: Duration) -> PathBuf {
        let dir = self.layout.atak_backup_dir();
        fs::create_dir_all(&dir).expect("Failed to create backup dir");
        let path = dir.join(filename);
        fs::write(&path, contents).expect("Failed to write backup");
        set_modified(&path, SystemTime::now() - age);
        path
    }

    pub fn executor(&self, host_app_running: bool) -> CacheExecutor {
        CacheExecutor::new(
            self.layout.clone(),
            Arc::new(FixedDetector::new(host_app_running)),
        )
    }

    pub fn backup_files(&self) -> Vec<String> {
        list_names(&self.layout.atak_backup_dir())
    }

    pub fn archive_files(&self) -> Vec<String> {
        list_names(&self.layout.atos_archive_dir())
    }
}

pub fn set_modified(path: &Path, at: SystemTime) {
    let file = fs::File::options()
        .write(true)
        .open(path)
        .expect("Failed to open file for mtime update");
    file.set_modified(at).expect("Failed to set mtime");
}

pub fn list_names(dir: &Path) -> Vec<String> {
    match fs::read_dir(dir) {
        Ok(entries) => {
            let mut names: Vec<String> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().to_string())
                .collect();
            names.sort();
            names
        }
        Err(_) => Vec::new(),
    }
}
