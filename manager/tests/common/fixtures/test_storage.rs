//! Temporary external-storage root

use cache_executor::{CacheExecutor, CacheLayout, FixedDetector};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestStorage {
    _root: TempDir,
    pub layout: CacheLayout,
}

impl TestStorage {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create storage root");
        let layout = CacheLayout::new(root.path());
        Self {
            _root: root,
            layout,
        }
    }

    pub fn with_atak_cache(self) -> Self {
        fs::create_dir_all(self.layout.atak_databases_dir()).unwrap();
        fs::write(self.layout.atak_live_db(), b"atak cache").unwrap();
        self
    }

    pub fn with_atos_cache(self) -> Self {
        fs::create_dir_all(self.layout.atos_dir()).unwrap();
        fs::write(self.layout.atos_live_db(), b"atos history").unwrap();
        self
    }

    pub fn executor(&self, host_running: bool) -> Arc<CacheExecutor> {
        Arc::new(CacheExecutor::new(
            self.layout.clone(),
            Arc::new(FixedDetector::new(host_running)),
        ))
    }

    pub fn files_in(&self, dir: PathBuf) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
