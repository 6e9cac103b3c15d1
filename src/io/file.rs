use std::path::{Path, PathBuf};

use tracing::debug;

use super::SnapshotStorage;
use crate::error::StorageError;

/// Stores the snapshot as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStorage for JsonFileStorage {
    /// A missing file means nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                debug!(path = %self.path.display(), bytes = json.len(), "snapshot read");
                Ok(Some(json))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Write to a sibling temp file first so a failed write never truncates
    /// the previous snapshot.
    fn save(&mut self, snapshot: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, snapshot)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), bytes = snapshot.len(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("projects.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_parent_dirs_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("projects.json");
        let mut storage = JsonFileStorage::new(&path);

        storage.save("{\"version\":1,\"projects\":[]}").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(
            storage.load().unwrap().as_deref(),
            Some("{\"version\":1,\"projects\":[]}")
        );
    }

    #[test]
    fn directory_in_place_of_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        assert!(matches!(storage.load(), Err(StorageError::Io(_))));
    }
}
