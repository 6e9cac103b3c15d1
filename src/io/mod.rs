pub mod csv_export;
pub mod file;
pub mod memory;
pub mod snapshot;

pub use csv_export::export_csv;
pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Key-value blob persistence used by the project store.
///
/// `load` is called once at startup, `save` after every applied mutation.
pub trait SnapshotStorage: Send {
    /// The stored snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>, StorageError>;

    fn save(&mut self, snapshot: &str) -> Result<(), StorageError>;
}
