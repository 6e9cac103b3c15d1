//! Project tracking core.
//!
//! Projects hold ordered features, features hold ordered tasks with a
//! completion percentage. [`ProjectStore`] owns every project, enforces name
//! uniqueness and per-project locks, clones templates, and persists a snapshot
//! through a [`SnapshotStorage`] adapter after each change.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod report;
pub mod store;

pub use error::{ExportError, Rejected, StorageError, ValidationError};
pub use io::{JsonFileStorage, MemoryStorage, SnapshotStorage};
pub use model::{Feature, Project, Tag, Task};
pub use report::{FeatureProgress, ProjectReport};
pub use store::{
    FeaturePatch, NewProject, ProjectPatch, ProjectStore, SharedProjectStore, SubscriptionId,
    TaskPatch,
};
