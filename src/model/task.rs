use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Highest completion a task can report.
pub const MAX_COMPLETION: u8 = 100;

/// Clamp an arbitrary integer into the `0..=100` completion range.
pub fn clamp_completion(value: i64) -> u8 {
    value.clamp(0, MAX_COMPLETION as i64) as u8
}

/// A single unit of work inside a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    /// Percent complete, always within `0..=100`.
    #[serde(deserialize_with = "completion_serde::deserialize")]
    pub completion: u8,
}

impl Task {
    pub fn new(name: impl Into<String>, completion: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            completion: clamp_completion(completion),
        }
    }

    /// Copy with a fresh id, keeping name and completion.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    /// Copy with a fresh id and completion reset, used when instantiating a template.
    pub fn from_template(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            completion: 0,
        }
    }

    /// Human-readable status bucket for the completion value.
    pub fn status(&self) -> &'static str {
        completion_to_status(self.completion)
    }
}

/// Map a completion percentage to a status label.
pub fn completion_to_status(completion: u8) -> &'static str {
    if completion >= MAX_COMPLETION {
        "Finished"
    } else if completion >= 50 {
        "In Progress"
    } else if completion > 0 {
        "Started"
    } else {
        "Not Started"
    }
}

/// Snapshots written by other clients may carry floats or out-of-range values.
mod completion_serde {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        if raw.is_nan() {
            return Ok(0);
        }
        Ok(super::clamp_completion(raw.round() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_is_clamped_on_construction() {
        assert_eq!(Task::new("a", -20).completion, 0);
        assert_eq!(Task::new("b", 250).completion, 100);
        assert_eq!(Task::new("c", 42).completion, 42);
    }

    #[test]
    fn duplicate_keeps_fields_but_not_id() {
        let task = Task::new("Write docs", 70);
        let copy = task.duplicate();
        assert_ne!(copy.id, task.id);
        assert_eq!(copy.name, task.name);
        assert_eq!(copy.completion, 70);

        let fresh = task.from_template();
        assert_ne!(fresh.id, task.id);
        assert_eq!(fresh.completion, 0);
    }

    #[test]
    fn status_buckets() {
        assert_eq!(completion_to_status(0), "Not Started");
        assert_eq!(completion_to_status(10), "Started");
        assert_eq!(completion_to_status(50), "In Progress");
        assert_eq!(completion_to_status(100), "Finished");
    }

    #[test]
    fn deserializes_fractional_and_out_of_range_completion() {
        let json = r#"{"id":"8b4f7c5e-0a43-4f36-9d2e-0c2b8f3a1e11","name":"x","completion":130.6}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.completion, 100);

        let json = r#"{"id":"8b4f7c5e-0a43-4f36-9d2e-0c2b8f3a1e11","name":"x","completion":33.4}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.completion, 33);
    }
}
