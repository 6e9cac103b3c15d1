use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::config::Settings;
use crate::io::JsonFileStorage;
use crate::model::timeline::round_percent;
use crate::model::{Project, Tag};
use crate::store::{NewProject, ProjectStore, TaskPatch};

#[derive(Parser, Debug)]
#[command(name = "project-tracker", version, about = "Track projects, features and tasks")]
pub struct Cli {
    /// Snapshot file to use instead of the configured one.
    #[arg(long, global = true)]
    pub data: Option<std::path::PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Projects are addressed by slug, exact name or id.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List projects (or templates), optionally filtered by name or tag.
    List {
        #[arg(long)]
        templates: bool,
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        name: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        color: Option<String>,
        /// Comma-separated tag names.
        #[arg(long, default_value = "")]
        tags: String,
        /// Slug of a template project to copy features from.
        #[arg(long)]
        template: Option<String>,
    },
    /// Print the report for a project.
    Show { slug: String },
    AddFeature { slug: String, name: String },
    DuplicateFeature { slug: String, feature: String },
    MoveFeature { slug: String, from: usize, to: usize },
    AddTask {
        slug: String,
        feature: String,
        name: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        completion: i64,
    },
    SetCompletion {
        slug: String,
        feature: String,
        task: String,
        #[arg(allow_negative_numbers = true)]
        completion: i64,
    },
    MoveTask {
        slug: String,
        feature: String,
        from: usize,
        to: usize,
    },
    /// Toggle the project lock.
    Lock { slug: String },
    SaveTemplate { slug: String },
    Delete { slug: String },
    ExportCsv {
        slug: String,
        path: std::path::PathBuf,
    },
}

impl Command {
    /// Whether running the command changes the store.
    pub fn mutates(&self) -> bool {
        !matches!(
            self,
            Command::List { .. } | Command::Show { .. } | Command::ExportCsv { .. }
        )
    }
}

/// Application state: owns the one store for this process.
pub struct TrackerApp {
    pub store: ProjectStore,
}

impl TrackerApp {
    pub fn new(store: ProjectStore) -> Self {
        Self { store }
    }

    /// Load the store from the snapshot file named by `settings`.
    pub fn open(settings: &Settings) -> Result<Self> {
        let storage = JsonFileStorage::new(settings.data_path());
        let path = storage.path().display().to_string();
        let store = ProjectStore::load(storage)
            .with_context(|| format!("failed to load projects from {path}"))?;
        Ok(Self::new(store))
    }

    /// Execute one command and return the text to print.
    ///
    /// Commands that change the store fail if their change could not be saved.
    pub fn run(&mut self, command: Command, today: NaiveDate) -> Result<String> {
        let mutates = command.mutates();
        let output = self.dispatch(command, today)?;
        if mutates {
            if let Some(err) = self.store.last_save_error() {
                bail!("change applied but not saved: {err}");
            }
        }
        Ok(output)
    }

    fn dispatch(&mut self, command: Command, today: NaiveDate) -> Result<String> {
        match command {
            Command::List { templates, search } => {
                let query = search.unwrap_or_default();
                let projects = self.store.search_projects(&query, templates);
                if projects.is_empty() {
                    return Ok(if templates {
                        "No templates found".to_string()
                    } else {
                        "No projects found".to_string()
                    });
                }
                Ok(projects
                    .iter()
                    .map(|p| list_line(p, today))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Command::Create {
                name,
                start,
                end,
                color,
                tags,
                template,
            } => {
                let mut request = NewProject::new(name, start, end).tags(Tag::parse_list(&tags));
                if let Some(color) = color {
                    request = request.color(color);
                }
                if let Some(slug) = template {
                    request = request.template(self.project_id(&slug)?);
                }
                let project = self.store.create_project(request)?;
                Ok(format!("Created '{}' ({})", project.name, project.slug))
            }
            Command::Show { slug } => {
                let id = self.project_id(&slug)?;
                let report = self
                    .store
                    .report(id, today)
                    .ok_or_else(|| anyhow!("project '{slug}' not found"))?;
                Ok(report.to_text())
            }
            Command::AddFeature { slug, name } => {
                let id = self.project_id(&slug)?;
                self.store.add_feature(id, name.clone())?;
                Ok(format!("Feature '{name}' added"))
            }
            Command::DuplicateFeature { slug, feature } => {
                let (id, feature_id) = self.feature_ids(&slug, &feature)?;
                let copy = self.store.duplicate_feature(id, feature_id)?;
                let name = self
                    .store
                    .feature(id, copy)
                    .map(|f| f.name.clone())
                    .unwrap_or_default();
                Ok(format!("Feature '{name}' added"))
            }
            Command::MoveFeature { slug, from, to } => {
                let id = self.project_id(&slug)?;
                self.store.reorder_features(id, from, to)?;
                Ok("Features reordered".to_string())
            }
            Command::AddTask {
                slug,
                feature,
                name,
                completion,
            } => {
                let (id, feature_id) = self.feature_ids(&slug, &feature)?;
                self.store.add_task(id, feature_id, name.clone(), completion)?;
                Ok(format!("Task '{name}' added"))
            }
            Command::SetCompletion {
                slug,
                feature,
                task,
                completion,
            } => {
                let (id, feature_id) = self.feature_ids(&slug, &feature)?;
                let task_id = self
                    .store
                    .feature(id, feature_id)
                    .and_then(|f| find_by_name(&f.tasks, &task, |t| &t.name, |t| t.id))
                    .ok_or_else(|| anyhow!("task '{task}' not found in '{feature}'"))?;
                self.store
                    .update_task(id, feature_id, task_id, TaskPatch::completion(completion))?;
                let stored = self
                    .store
                    .task(id, feature_id, task_id)
                    .map(|t| t.completion)
                    .unwrap_or_default();
                Ok(format!("Task '{task}' at {stored}%"))
            }
            Command::MoveTask {
                slug,
                feature,
                from,
                to,
            } => {
                let (id, feature_id) = self.feature_ids(&slug, &feature)?;
                self.store.reorder_tasks(id, feature_id, from, to)?;
                Ok("Tasks reordered".to_string())
            }
            Command::Lock { slug } => {
                let id = self.project_id(&slug)?;
                let locked = self.store.toggle_project_lock(id)?;
                Ok(if locked {
                    format!("'{slug}' locked")
                } else {
                    format!("'{slug}' unlocked")
                })
            }
            Command::SaveTemplate { slug } => {
                let id = self.project_id(&slug)?;
                self.store.save_as_template(id)?;
                Ok(format!("'{slug}' saved as template"))
            }
            Command::Delete { slug } => {
                let id = self.project_id(&slug)?;
                self.store.delete_project(id)?;
                Ok(format!("'{slug}' deleted"))
            }
            Command::ExportCsv { slug, path } => {
                let id = self.project_id(&slug)?;
                let project = self
                    .store
                    .project(id)
                    .ok_or_else(|| anyhow!("project '{slug}' not found"))?;
                let count = crate::io::export_csv(project, &path)?;
                Ok(format!("Exported {count} tasks to {}", path.display()))
            }
        }
    }

    /// Resolve a project by id, then slug, then exact name.
    ///
    /// Slugs can collide, so the id or name reaches projects the slug cannot.
    fn project_id(&self, key: &str) -> Result<Uuid> {
        if let Ok(id) = Uuid::parse_str(key) {
            if self.store.project(id).is_some() {
                return Ok(id);
            }
        }
        self.store
            .project_by_slug(key)
            .or_else(|| self.store.projects().iter().find(|p| p.name == key))
            .map(|p| p.id)
            .ok_or_else(|| anyhow!("project '{key}' not found"))
    }

    fn feature_ids(&self, slug: &str, feature: &str) -> Result<(Uuid, Uuid)> {
        let id = self.project_id(slug)?;
        let feature_id = self
            .store
            .project(id)
            .and_then(|p| find_by_name(&p.features, feature, |f| &f.name, |f| f.id))
            .ok_or_else(|| anyhow!("feature '{feature}' not found in '{slug}'"))?;
        Ok((id, feature_id))
    }
}

/// First item whose name matches ignoring case.
fn find_by_name<T>(
    items: &[T],
    name: &str,
    name_of: impl Fn(&T) -> &String,
    id_of: impl Fn(&T) -> Uuid,
) -> Option<Uuid> {
    let wanted = name.trim().to_lowercase();
    items
        .iter()
        .find(|item| name_of(item).to_lowercase() == wanted)
        .map(id_of)
}

fn list_line(project: &Project, today: NaiveDate) -> String {
    let mut line = format!(
        "{:<24} {:<24} {:>3}% done  {:>3}% time  {} -> {}  {}",
        project.slug,
        project.name,
        round_percent(project.completion()),
        round_percent(project.time_progress(today)),
        project.start_date.format("%Y-%m-%d"),
        project.end_date.format("%Y-%m-%d"),
        project.id,
    );
    if project.is_locked {
        line.push_str("  [locked]");
    }
    if !project.tags.is_empty() {
        let tags: Vec<&str> = project.tags.iter().map(|t| t.name.as_str()).collect();
        line.push_str(&format!("  #{}", tags.join(" #")));
    }
    line
}
