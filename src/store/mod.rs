//! The project store: single source of truth for all projects.
//!
//! Every mutation either fully applies or is rejected before anything is
//! touched. Applied mutations save a snapshot through the storage adapter and
//! then notify subscribers. A failed save is logged and remembered, never
//! rolled back.

pub mod input;
pub mod shared;

pub use input::{FeaturePatch, NewProject, ProjectPatch, TaskPatch};
pub use shared::SharedProjectStore;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Rejected, StorageError, ValidationError};
use crate::io::{snapshot, MemoryStorage, SnapshotStorage};
use crate::model::project::DEFAULT_COLOR;
use crate::model::{Feature, Project, Task};
use crate::report::ProjectReport;

/// Handle returned by [`ProjectStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Project]) + Send>;

pub struct ProjectStore {
    projects: Vec<Project>,
    storage: Box<dyn SnapshotStorage>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_save_error: Option<StorageError>,
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("projects", &self.projects.len())
            .field("listeners", &self.listeners.len())
            .field("last_save_error", &self.last_save_error)
            .finish()
    }
}

impl ProjectStore {
    /// Load the stored snapshot, or start empty if nothing was saved yet.
    pub fn load(storage: impl SnapshotStorage + 'static) -> Result<Self, StorageError> {
        let projects = match storage.load()? {
            Some(blob) => snapshot::decode(&blob)?,
            None => Vec::new(),
        };
        info!(projects = projects.len(), "project store loaded");
        Ok(Self {
            projects,
            storage: Box::new(storage),
            listeners: Vec::new(),
            next_subscription: 0,
            last_save_error: None,
        })
    }

    /// Empty store backed by a fresh in-memory slot.
    pub fn in_memory() -> Self {
        Self {
            projects: Vec::new(),
            storage: Box::new(MemoryStorage::new()),
            listeners: Vec::new(),
            next_subscription: 0,
            last_save_error: None,
        }
    }

    // ── Reads ───────────────────────────────────────────────────

    /// All projects in creation order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, project_id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    /// First project carrying `slug`.
    pub fn project_by_slug(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    pub fn feature(&self, project_id: Uuid, feature_id: Uuid) -> Option<&Feature> {
        self.project(project_id)?.feature(feature_id)
    }

    pub fn task(&self, project_id: Uuid, feature_id: Uuid, task_id: Uuid) -> Option<&Task> {
        self.feature(project_id, feature_id)?.task(task_id)
    }

    /// Projects saved as templates, in creation order.
    pub fn list_templates(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.template_saved).collect()
    }

    /// Projects not saved as templates.
    pub fn list_regular_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| !p.template_saved).collect()
    }

    /// Search by name or tag within templates or within regular projects.
    pub fn search_projects(&self, query: &str, templates: bool) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.template_saved == templates && p.matches_search(query))
            .collect()
    }

    pub fn report(&self, project_id: Uuid, today: NaiveDate) -> Option<ProjectReport> {
        self.project(project_id)
            .map(|project| ProjectReport::build(project, today))
    }

    /// Error from the most recent save, cleared by the next successful one.
    pub fn last_save_error(&self) -> Option<&StorageError> {
        self.last_save_error.as_ref()
    }

    // ── Subscriptions ───────────────────────────────────────────

    /// Call `listener` with the full project list after every applied mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[Project]) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    // ── Projects ────────────────────────────────────────────────

    /// Create a project, optionally cloning the structure of a template.
    ///
    /// Names must be unique ignoring case. Features cloned from a template get
    /// fresh ids throughout and every task starts at 0%.
    pub fn create_project(&mut self, new: NewProject) -> Result<Project, ValidationError> {
        let lowered = new.name.to_lowercase();
        if self.projects.iter().any(|p| p.name.to_lowercase() == lowered) {
            return Err(ValidationError::DuplicateName(new.name));
        }

        let template = new
            .template_id
            .and_then(|id| self.projects.iter().find(|p| p.id == id));
        if template.is_none() {
            if let Some(id) = new.template_id {
                warn!(template_id = %id, "template not found; creating an empty project");
            }
        }

        let color = new
            .color
            .or_else(|| template.map(|t| t.color.clone()))
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());
        let mut project = Project::new(new.name, new.start_date, new.end_date, color);
        if let Some(template) = template {
            project.features = template
                .features
                .iter()
                .map(Feature::from_template)
                .collect();
        }
        project.tags = new.tags;

        info!(project_id = %project.id, slug = %project.slug, "project created");
        self.projects.push(project.clone());
        self.commit("create_project");
        Ok(project)
    }

    pub fn update_project(
        &mut self,
        project_id: Uuid,
        patch: ProjectPatch,
    ) -> Result<(), Rejected> {
        let project = self.unlocked_project_mut(project_id)?;
        patch.apply(project);
        self.commit("update_project");
        Ok(())
    }

    /// Remove a project and everything under it. Allowed while locked.
    pub fn delete_project(&mut self, project_id: Uuid) -> Result<(), Rejected> {
        self.project_mut(project_id)?;
        self.projects.retain(|p| p.id != project_id);
        info!(%project_id, "project deleted");
        self.commit("delete_project");
        Ok(())
    }

    /// Flag a project as a template. Allowed while locked.
    pub fn save_as_template(&mut self, project_id: Uuid) -> Result<(), Rejected> {
        let project = self.project_mut(project_id)?;
        project.template_saved = true;
        self.commit("save_as_template");
        Ok(())
    }

    /// Flip the lock flag. Always allowed. Returns the new lock state.
    pub fn toggle_project_lock(&mut self, project_id: Uuid) -> Result<bool, Rejected> {
        let project = self.project_mut(project_id)?;
        project.is_locked = !project.is_locked;
        let locked = project.is_locked;
        debug!(%project_id, locked, "project lock toggled");
        self.commit("toggle_project_lock");
        Ok(locked)
    }

    // ── Features ────────────────────────────────────────────────

    /// Append an empty feature. Returns its id.
    pub fn add_feature(
        &mut self,
        project_id: Uuid,
        name: impl Into<String>,
    ) -> Result<Uuid, Rejected> {
        let project = self.unlocked_project_mut(project_id)?;
        let feature = Feature::new(name);
        let feature_id = feature.id;
        project.features.push(feature);
        self.commit("add_feature");
        Ok(feature_id)
    }

    /// Append a copy of a feature with fresh ids. Returns the copy's id.
    pub fn duplicate_feature(
        &mut self,
        project_id: Uuid,
        feature_id: Uuid,
    ) -> Result<Uuid, Rejected> {
        let project = self.unlocked_project_mut(project_id)?;
        let copy = project
            .feature(feature_id)
            .ok_or(Rejected::FeatureNotFound(feature_id))?
            .duplicate();
        let copy_id = copy.id;
        project.features.push(copy);
        self.commit("duplicate_feature");
        Ok(copy_id)
    }

    pub fn update_feature(
        &mut self,
        project_id: Uuid,
        feature_id: Uuid,
        patch: FeaturePatch,
    ) -> Result<(), Rejected> {
        let feature = self.unlocked_feature_mut(project_id, feature_id)?;
        patch.apply(feature);
        self.commit("update_feature");
        Ok(())
    }

    /// Remove a feature and its tasks.
    pub fn delete_feature(&mut self, project_id: Uuid, feature_id: Uuid) -> Result<(), Rejected> {
        let project = self.unlocked_project_mut(project_id)?;
        let index = project
            .features
            .iter()
            .position(|f| f.id == feature_id)
            .ok_or(Rejected::FeatureNotFound(feature_id))?;
        project.features.remove(index);
        self.commit("delete_feature");
        Ok(())
    }

    pub fn reorder_features(
        &mut self,
        project_id: Uuid,
        from: usize,
        to: usize,
    ) -> Result<(), Rejected> {
        let project = self.unlocked_project_mut(project_id)?;
        move_item(&mut project.features, from, to)?;
        self.commit("reorder_features");
        Ok(())
    }

    // ── Tasks ───────────────────────────────────────────────────

    /// Append a task; `completion` is clamped to `0..=100`. Returns its id.
    pub fn add_task(
        &mut self,
        project_id: Uuid,
        feature_id: Uuid,
        name: impl Into<String>,
        completion: i64,
    ) -> Result<Uuid, Rejected> {
        let feature = self.unlocked_feature_mut(project_id, feature_id)?;
        let task = Task::new(name, completion);
        let task_id = task.id;
        feature.tasks.push(task);
        self.commit("add_task");
        Ok(task_id)
    }

    pub fn update_task(
        &mut self,
        project_id: Uuid,
        feature_id: Uuid,
        task_id: Uuid,
        patch: TaskPatch,
    ) -> Result<(), Rejected> {
        let task = self
            .unlocked_feature_mut(project_id, feature_id)?
            .task_mut(task_id)
            .ok_or(Rejected::TaskNotFound(task_id))?;
        patch.apply(task);
        self.commit("update_task");
        Ok(())
    }

    pub fn delete_task(
        &mut self,
        project_id: Uuid,
        feature_id: Uuid,
        task_id: Uuid,
    ) -> Result<(), Rejected> {
        let feature = self.unlocked_feature_mut(project_id, feature_id)?;
        let index = feature
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or(Rejected::TaskNotFound(task_id))?;
        feature.tasks.remove(index);
        self.commit("delete_task");
        Ok(())
    }

    pub fn reorder_tasks(
        &mut self,
        project_id: Uuid,
        feature_id: Uuid,
        from: usize,
        to: usize,
    ) -> Result<(), Rejected> {
        let feature = self.unlocked_feature_mut(project_id, feature_id)?;
        move_item(&mut feature.tasks, from, to)?;
        self.commit("reorder_tasks");
        Ok(())
    }

    // ── Persistence ─────────────────────────────────────────────

    /// Save the current state now and report the outcome to the caller.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        let blob = snapshot::encode(&self.projects)?;
        self.storage.save(&blob)?;
        self.last_save_error = None;
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────

    fn project_mut(&mut self, project_id: Uuid) -> Result<&mut Project, Rejected> {
        self.projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or(Rejected::ProjectNotFound(project_id))
    }

    fn unlocked_project_mut(&mut self, project_id: Uuid) -> Result<&mut Project, Rejected> {
        let project = self.project_mut(project_id)?;
        if project.is_locked {
            debug!(%project_id, "mutation ignored: project is locked");
            return Err(Rejected::Locked(project_id));
        }
        Ok(project)
    }

    fn unlocked_feature_mut(
        &mut self,
        project_id: Uuid,
        feature_id: Uuid,
    ) -> Result<&mut Feature, Rejected> {
        self.unlocked_project_mut(project_id)?
            .feature_mut(feature_id)
            .ok_or(Rejected::FeatureNotFound(feature_id))
    }

    /// Persist, then notify. Runs once per applied mutation.
    fn commit(&mut self, op: &'static str) {
        debug!(op, "mutation applied");
        if let Err(err) = self.flush() {
            warn!(op, error = %err, "failed to save snapshot; keeping in-memory state");
            self.last_save_error = Some(err);
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.projects);
        }
    }
}

/// Move the element at `from` to `to`, shifting the ones in between.
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), Rejected> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(Rejected::IndexOutOfRange { from, to, len });
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}
