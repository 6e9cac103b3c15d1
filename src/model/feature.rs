use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::Task;

/// Suffix appended to the name of a duplicated feature.
pub const COPY_SUFFIX: &str = " (Copy)";

/// A named group of tasks inside a project. Task order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Clone this feature within the same project: fresh ids, `" (Copy)"` name.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: format!("{}{}", self.name, COPY_SUFFIX),
            tasks: self.tasks.iter().map(Task::duplicate).collect(),
        }
    }

    /// Clone this feature into a new project built from a template.
    pub fn from_template(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            tasks: self.tasks.iter().map(Task::from_template).collect(),
        }
    }

    pub fn task(&self, task_id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    /// Mean completion of this feature's tasks, 0 when it has none.
    pub fn completion(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.tasks.iter().map(|t| t.completion as u32).sum();
        sum as f64 / self.tasks.len() as f64
    }
}
