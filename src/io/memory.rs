use std::sync::{Arc, Mutex, MutexGuard};

use super::SnapshotStorage;
use crate::error::StorageError;

#[derive(Debug, Default)]
struct Slot {
    blob: Option<String>,
    fail_saves: bool,
    saves: usize,
}

/// In-memory snapshot slot.
///
/// Clones share the same slot, so a test can keep one handle while the store
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Slot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing snapshot already stored.
    pub fn with_snapshot(blob: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.lock().blob = Some(blob.into());
        storage
    }

    /// Last successfully saved snapshot.
    pub fn snapshot(&self) -> Option<String> {
        self.lock().blob.clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // A poisoned slot still holds a consistent blob.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock().blob.clone())
    }

    fn save(&mut self, snapshot: &str) -> Result<(), StorageError> {
        let mut slot = self.lock();
        if slot.fail_saves {
            return Err(StorageError::Unavailable("memory storage is read-only".into()));
        }
        slot.blob = Some(snapshot.to_string());
        slot.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_slot() {
        let handle = MemoryStorage::new();
        let mut owned = handle.clone();
        owned.save("blob").unwrap();
        assert_eq!(handle.snapshot().as_deref(), Some("blob"));
        assert_eq!(handle.save_count(), 1);
    }

    #[test]
    fn failing_saves_keep_previous_blob() {
        let mut storage = MemoryStorage::with_snapshot("old");
        storage.set_fail_saves(true);
        assert!(storage.save("new").is_err());
        assert_eq!(storage.load().unwrap().as_deref(), Some("old"));
        assert_eq!(storage.save_count(), 0);
    }
}
