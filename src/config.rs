//! User settings: where projects are stored and how chatty logging is.
//!
//! Read from `settings.json` in the OS config directory, then overridden by
//! `PROJECT_TRACKER_DATA` and `PROJECT_TRACKER_LOG`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

const APP_NAME: &str = "ProjectTracker";
const SETTINGS_FILE: &str = "settings.json";
const DATA_FILE: &str = "projects.json";

pub const ENV_DATA_FILE: &str = "PROJECT_TRACKER_DATA";
pub const ENV_LOG_FILTER: &str = "PROJECT_TRACKER_LOG";

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Snapshot file; `None` means the OS data directory.
    pub data_file: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            log_filter: "warn".into(),
        }
    }
}

impl Settings {
    /// Settings file, then environment overrides.
    pub fn load() -> Self {
        let mut settings = config_dir()
            .map(|dir| Self::from_file(&dir.join(SETTINGS_FILE)))
            .unwrap_or_default();
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    /// Missing files give defaults; malformed ones are reported and ignored.
    pub fn from_file(path: &Path) -> Self {
        let Ok(raw) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
                Self::default()
            }
        }
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENV_DATA_FILE).filter(|v| !v.trim().is_empty()) {
            self.data_file = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup(ENV_LOG_FILTER).filter(|v| !v.trim().is_empty()) {
            self.log_filter = v;
        }
    }

    /// Resolved snapshot location.
    pub fn data_path(&self) -> PathBuf {
        if let Some(path) = &self.data_file {
            return path.clone();
        }
        match directories::ProjectDirs::from("", "", APP_NAME) {
            Some(dirs) => dirs.data_dir().join(DATA_FILE),
            None => PathBuf::from(".").join(DATA_FILE),
        }
    }
}

fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_file(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "log_filter": "debug" }"#).unwrap();
        let settings = Settings::from_file(&path);
        assert_eq!(settings.log_filter, "debug");
        assert!(settings.data_file.is_none());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ log_filter: ").unwrap();
        assert_eq!(Settings::from_file(&path), Settings::default());
    }

    #[test]
    fn environment_overrides_win() {
        let env: HashMap<&str, &str> = [
            (ENV_DATA_FILE, "/tmp/tracker/projects.json"),
            (ENV_LOG_FILTER, "project_tracker=debug"),
        ]
        .into_iter()
        .collect();
        let mut settings = Settings::default();
        settings.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.data_path(), PathBuf::from("/tmp/tracker/projects.json"));
        assert_eq!(settings.log_filter, "project_tracker=debug");
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut settings = Settings::default();
        settings.apply_overrides(|_| Some("  ".to_string()));
        assert_eq!(settings, Settings::default());
    }
}
