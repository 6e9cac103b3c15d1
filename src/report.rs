//! Printable report view of a single project.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::model::timeline::round_percent;
use crate::model::{Feature, Project};

/// Progress summary for one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProgress {
    pub id: Uuid,
    pub name: String,
    pub task_count: usize,
    pub completion: f64,
}

impl From<&Feature> for FeatureProgress {
    fn from(feature: &Feature) -> Self {
        Self {
            id: feature.id,
            name: feature.name.clone(),
            task_count: feature.tasks.len(),
            completion: feature.completion(),
        }
    }
}

/// Totals and per-feature breakdown shown on a project's report page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub name: String,
    pub slug: String,
    pub color: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_features: usize,
    pub total_tasks: usize,
    pub completion: f64,
    pub time_progress: f64,
    /// Highest completion first; ties keep feature list order.
    pub features: Vec<FeatureProgress>,
}

impl ProjectReport {
    pub fn build(project: &Project, today: NaiveDate) -> Self {
        let mut features: Vec<FeatureProgress> =
            project.features.iter().map(FeatureProgress::from).collect();
        features.sort_by(|a, b| b.completion.total_cmp(&a.completion));

        Self {
            name: project.name.clone(),
            slug: project.slug.clone(),
            color: project.color.clone(),
            start_date: project.start_date,
            end_date: project.end_date,
            total_features: project.features.len(),
            total_tasks: project.total_tasks(),
            completion: project.completion(),
            time_progress: project.time_progress(today),
            features,
        }
    }

    /// Plain-text rendering for terminals and printing.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.name));
        out.push_str(&format!(
            "{} -> {}\n",
            self.start_date.format("%b %-d, %Y"),
            self.end_date.format("%b %-d, %Y")
        ));
        out.push_str(&format!(
            "{}% complete, {}% time elapsed\n",
            round_percent(self.completion),
            round_percent(self.time_progress)
        ));
        out.push_str(&format!(
            "Features: {}  Tasks: {}\n",
            self.total_features, self.total_tasks
        ));
        for feature in &self.features {
            out.push_str(&format!(
                "  {:>3}%  {} ({} tasks)\n",
                round_percent(feature.completion),
                feature.name,
                feature.task_count
            ));
        }
        out
    }
}
