//! Error types for the tracker core.
//!
//! Validation failures are returned to the caller of the operation that
//! caused them. Storage failures come from the persistence adapter and never
//! change in-memory state.

use thiserror::Error;
use uuid::Uuid;

/// Rejection of a project creation request. No state changes when returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a project named '{0}' already exists")]
    DuplicateName(String),
}

/// Why a mutation was not applied.
///
/// A rejected mutation leaves the store exactly as it was. Callers that treat
/// these as silent no-ops can discard the value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("project {0} not found")]
    ProjectNotFound(Uuid),

    #[error("feature {0} not found")]
    FeatureNotFound(Uuid),

    #[error("task {0} not found")]
    TaskNotFound(Uuid),

    #[error("project {0} is locked")]
    Locked(Uuid),

    #[error("cannot move item {from} to {to} in a list of {len}")]
    IndexOutOfRange { from: usize, to: usize, len: usize },
}

/// Failure reported by a snapshot storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot format error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure while exporting a report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),
}
