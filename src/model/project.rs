use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::feature::Feature;
use super::slug::slugify;
use super::tag::Tag;
use super::task::Task;
use super::timeline;

/// Color used when neither the caller nor a template supplies one (steel blue).
pub const DEFAULT_COLOR: &str = "#4682b4";

/// A tracked project: a date range, a color, ordered features and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// Derived from the name at creation and never recomputed.
    pub slug: String,
    #[serde(deserialize_with = "date_serde::deserialize")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "date_serde::deserialize")]
    pub end_date: NaiveDate,
    pub color: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub template_saved: bool,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        color: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
            start_date,
            end_date,
            color: color.into(),
            features: Vec::new(),
            tags: Vec::new(),
            is_locked: false,
            template_saved: false,
        }
    }

    pub fn feature(&self, feature_id: Uuid) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == feature_id)
    }

    pub fn feature_mut(&mut self, feature_id: Uuid) -> Option<&mut Feature> {
        self.features.iter_mut().find(|f| f.id == feature_id)
    }

    /// All tasks across every feature, in display order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.features.iter().flat_map(|f| f.tasks.iter())
    }

    pub fn total_tasks(&self) -> usize {
        self.features.iter().map(|f| f.tasks.len()).sum()
    }

    /// Completion over every task in the project, each task weighted equally.
    ///
    /// This is not the mean of per-feature completions: a feature with more
    /// tasks pulls the project figure further.
    pub fn completion(&self) -> f64 {
        let total = self.total_tasks();
        if total == 0 {
            return 0.0;
        }
        self.tasks()
            .map(|t| t.completion as f64 / total as f64)
            .sum()
    }

    /// Elapsed share of the project's schedule as of `today`.
    pub fn time_progress(&self, today: NaiveDate) -> f64 {
        timeline::time_progress(self.start_date, self.end_date, today)
    }

    /// True when the name or any tag name contains `query`, ignoring case.
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.name.to_lowercase().contains(&needle))
    }
}

/// Accepts plain `YYYY-MM-DD` dates as well as full RFC 3339 timestamps.
///
/// Timestamps are local midnights serialized as UTC, so they are rounded to
/// the nearest UTC midnight. This recovers the picked day for offsets within
/// eleven hours of UTC.
mod date_serde {
    use chrono::{DateTime, Duration, NaiveDate};
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| (dt.naive_utc() + Duration::hours(12)).date())
            .map_err(|_| de::Error::custom(format!("invalid date '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Project {
        let mut project = Project::new("Launch", date(2024, 1, 1), date(2024, 1, 11), "#ff0000");
        let mut a = Feature::new("A");
        a.tasks.push(Task::new("a1", 100));
        a.tasks.push(Task::new("a2", 0));
        let mut b = Feature::new("B");
        b.tasks.push(Task::new("b1", 50));
        project.features = vec![a, b];
        project
    }

    #[test]
    fn new_project_derives_slug_and_flags() {
        let project = Project::new("My Big Plan", date(2024, 1, 1), date(2024, 2, 1), "red");
        assert_eq!(project.slug, "my-big-plan");
        assert!(!project.is_locked);
        assert!(!project.template_saved);
        assert!(project.features.is_empty());
    }

    #[test]
    fn project_and_feature_averages_use_different_denominators() {
        let project = sample();
        assert_eq!(project.total_tasks(), 3);
        assert!((project.completion() - 50.0).abs() < 1e-9);
        assert_eq!(project.features[0].completion(), 50.0);
        assert_eq!(project.features[1].completion(), 50.0);
    }

    #[test]
    fn weighting_diverges_from_feature_mean() {
        let mut project = sample();
        project.features[1].tasks[0].completion = 100;
        // Tasks: 100, 0, 100 -> 66.67; feature means: 50 and 100 -> 75.
        assert!((project.completion() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_project_is_zero_percent() {
        let project = Project::new("Empty", date(2024, 1, 1), date(2024, 1, 2), "blue");
        assert_eq!(project.completion(), 0.0);
    }

    #[test]
    fn search_matches_name_or_tag() {
        let mut project = sample();
        project.tags = Tag::parse_list("Backend, Q3");
        assert!(project.matches_search("laun"));
        assert!(project.matches_search("backend"));
        assert!(project.matches_search("  "));
        assert!(!project.matches_search("frontend"));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let project = sample();
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["isLocked"], false);
        assert_eq!(json["templateSaved"], false);
    }

    #[test]
    fn accepts_timestamp_dates() {
        let json = r##"{
            "id": "0d5b2f0c-8a5e-4f0e-9b57-2d7f1f0b6a01",
            "name": "Legacy",
            "slug": "legacy",
            "startDate": "2024-01-01T00:00:00.000Z",
            "endDate": "2024-03-31",
            "color": "#00ff00"
        }"##;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.start_date, date(2024, 1, 1));
        assert_eq!(project.end_date, date(2024, 3, 31));
        assert!(project.features.is_empty());
        assert!(!project.is_locked);
    }

    #[test]
    fn timestamps_round_to_the_picked_day() {
        let parse = |raw: &str| -> NaiveDate {
            let json = format!(
                r##"{{"id": "0d5b2f0c-8a5e-4f0e-9b57-2d7f1f0b6a02", "name": "Tz",
                    "slug": "tz", "startDate": "{raw}", "endDate": "2024-03-31",
                    "color": "#00ff00"}}"##
            );
            serde_json::from_str::<Project>(&json).unwrap().start_date
        };
        // Midnight Jan 1 picked at UTC+2 and at UTC-5.
        assert_eq!(parse("2023-12-31T22:00:00.000Z"), date(2024, 1, 1));
        assert_eq!(parse("2024-01-01T05:00:00.000Z"), date(2024, 1, 1));
        assert_eq!(parse("2024-01-01T00:00:00+09:00"), date(2024, 1, 1));
    }
}
