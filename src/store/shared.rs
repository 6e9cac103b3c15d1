use std::sync::{Arc, Mutex};

use super::ProjectStore;

/// Thread-safe handle to one store.
///
/// Each call to [`with`](Self::with) holds the lock for the whole closure, so a
/// read-modify-write is never interleaved with another caller's mutation.
#[derive(Debug, Clone)]
pub struct SharedProjectStore {
    inner: Arc<Mutex<ProjectStore>>,
}

impl SharedProjectStore {
    pub fn new(store: ProjectStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut ProjectStore) -> R) -> R {
        // Mutations validate before touching state, so a poisoned store is
        // still consistent.
        let mut store = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewProject;
    use chrono::NaiveDate;
    use std::thread;

    #[test]
    fn concurrent_writers_do_not_lose_tasks() {
        let shared = SharedProjectStore::new(ProjectStore::in_memory());
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let (project_id, feature_id) = shared.with(|store| {
            let project = store
                .create_project(NewProject::new("Shared", start, end))
                .unwrap();
            let feature = store.add_feature(project.id, "Work").unwrap();
            (project.id, feature)
        });

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        shared.with(|store| {
                            store
                                .add_task(project_id, feature_id, format!("w{worker}-{i}"), 0)
                                .unwrap();
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let count = shared.with(|store| store.feature(project_id, feature_id).unwrap().tasks.len());
        assert_eq!(count, 100);
    }
}
