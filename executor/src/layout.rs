use std::path::{Path, PathBuf};

pub const ATAK_DIR: &str = "atak";
pub const ATAK_DB_FILENAME: &str = "statesaver2.sqlite";
pub const ATAK_BACKUP_PREFIX: &str = "statesaver2_";
pub const ATOS_DB_FILENAME: &str = "atos_history.sqlite";
pub const ATOS_ARCHIVE_PREFIX: &str = "atos_history_";
pub const SQLITE_EXTENSION: &str = ".sqlite";

/// Fixed locations of the cache databases under an external-storage root.
#[derive(Debug, Clone)]
pub struct CacheLayout {
    storage_root: PathBuf,
}

impl CacheLayout {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
        }
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    pub fn atak_dir(&self) -> PathBuf {
        self.storage_root.join(ATAK_DIR)
    }

    pub fn atak_databases_dir(&self) -> PathBuf {
        self.atak_dir().join("Databases")
    }

    pub fn atak_live_db(&self) -> PathBuf {
        self.atak_databases_dir().join(ATAK_DB_FILENAME)
    }

    pub fn atak_backup_dir(&self) -> PathBuf {
        self.atak_databases_dir().join("backup")
    }

    pub fn atak_backup_path(&self, timestamp: &str) -> PathBuf {
        self.atak_backup_dir()
            .join(format!("{}{}{}", ATAK_BACKUP_PREFIX, timestamp, SQLITE_EXTENSION))
    }

    pub fn atos_dir(&self) -> PathBuf {
        self.atak_dir().join("tools").join("atos")
    }

    pub fn atos_live_db(&self) -> PathBuf {
        self.atos_dir().join(ATOS_DB_FILENAME)
    }

    pub fn atos_archive_dir(&self) -> PathBuf {
        self.atos_dir().join("archive")
    }

    pub fn atos_archive_path(&self, timestamp: &str) -> PathBuf {
        self.atos_archive_dir()
            .join(format!("{}{}{}", ATOS_ARCHIVE_PREFIX, timestamp, SQLITE_EXTENSION))
    }
}
