use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::task::clamp_completion;
use crate::model::{Feature, Project, Tag, Task};

/// Request to create a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Overrides the template's color when set.
    pub color: Option<String>,
    pub tags: Vec<Tag>,
    pub template_id: Option<Uuid>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date,
            color: None,
            tags: Vec::new(),
            template_id: None,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn template(mut self, template_id: Uuid) -> Self {
        self.template_id = Some(template_id);
        self
    }
}

/// Fields to merge into a project. `None` leaves a field as is.
///
/// Id, slug, lock and template flags are not patchable.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub color: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

impl ProjectPatch {
    pub(crate) fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(start) = self.start_date {
            project.start_date = start;
        }
        if let Some(end) = self.end_date {
            project.end_date = end;
        }
        if let Some(color) = self.color {
            project.color = color;
        }
        if let Some(tags) = self.tags {
            project.tags = tags;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeaturePatch {
    pub name: Option<String>,
}

impl FeaturePatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub(crate) fn apply(self, feature: &mut Feature) {
        if let Some(name) = self.name {
            feature.name = name;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    /// Clamped to `0..=100` when applied.
    pub completion: Option<i64>,
}

impl TaskPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn completion(completion: i64) -> Self {
        Self {
            completion: Some(completion),
            ..Default::default()
        }
    }

    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(completion) = self.completion {
            task.completion = clamp_completion(completion);
        }
    }
}
