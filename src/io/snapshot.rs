//! Versioned snapshot codec for the full project list.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::model::Project;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    projects: &'a [Project],
}

#[derive(Deserialize)]
struct SnapshotIn {
    version: u32,
    projects: Vec<Project>,
}

/// Serialize projects, in order, into a snapshot blob.
pub fn encode(projects: &[Project]) -> Result<String, StorageError> {
    let snapshot = SnapshotRef {
        version: SNAPSHOT_VERSION,
        projects,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Parse a snapshot blob back into projects.
///
/// Two unversioned layouts written by the web client are also read: a bare
/// JSON array of projects, and the `{"state": {"projects": [...]}}` envelope.
pub fn decode(blob: &str) -> Result<Vec<Project>, StorageError> {
    let mut value: serde_json::Value = serde_json::from_str(blob)?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }
    if let Some(projects) = value
        .get_mut("state")
        .and_then(|state| state.get_mut("projects"))
    {
        return Ok(serde_json::from_value(projects.take())?);
    }

    let snapshot: SnapshotIn = serde_json::from_value(value)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion(snapshot.version));
    }
    Ok(snapshot.projects)
}
