use super::files::{atomic_write, backup_file, ensure_dir, read_file};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the key-value storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }
}

/// String key-value store, one value per fixed key
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Keep a copy of the current value aside; returns where it went
    fn backup(&mut self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        ensure_dir(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        read_file(self.path_for(key)).map_err(|e| StoreError::io(key, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        atomic_write(self.path_for(key), value).map_err(|e| StoreError::io(key, e))
    }

    fn backup(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        let backup = backup_file(self.path_for(key)).map_err(|e| StoreError::io(key, e))?;
        Ok(backup.map(|p| p.display().to_string()))
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(temp_dir.path()).unwrap();

        assert_eq!(storage.get("tasks").unwrap(), None);
        storage.set("tasks", "[]").unwrap();
        assert_eq!(storage.get("tasks").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("tasks.json").exists());
    }

    #[test]
    fn test_file_storage_creates_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("nested").join(".taskpad");
        FileStorage::open(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_file_storage_backup() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(temp_dir.path()).unwrap();

        assert_eq!(storage.backup("tasks").unwrap(), None);
        storage.set("tasks", "garbage").unwrap();
        let backup = storage.backup("tasks").unwrap().unwrap();
        assert!(backup.contains("tasks.bak."));
    }

    #[test]
    fn test_memory_storage_counts_writes() {
        let mut storage = MemoryStorage::default();
        let view = storage.clone();

        storage.set("k", "v").unwrap();
        assert_eq!(view.value("k").as_deref(), Some("v"));
        assert_eq!(view.writes(), 1);

        view.fail_writes(true);
        assert!(storage.set("k", "w").is_err());
        assert_eq!(view.writes(), 1);
    }
}
