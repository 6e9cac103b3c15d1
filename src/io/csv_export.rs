use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::model::Project;

/// Write one semicolon-delimited row per task.
///
/// Columns: Feature ; Task ; Completion ; Status
/// Returns the number of task rows written (header excluded).
pub fn write_tasks_csv<W: Write>(project: &Project, writer: W) -> Result<usize, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(["Feature", "Task", "Completion", "Status"])?;

    let mut rows = 0usize;
    for feature in &project.features {
        for task in &feature.tasks {
            let completion = task.completion.to_string();
            wtr.write_record([
                feature.name.as_str(),
                task.name.as_str(),
                completion.as_str(),
                task.status(),
            ])?;
            rows += 1;
        }
    }

    wtr.flush()?;
    Ok(rows)
}

/// Export a project's tasks to a CSV file at `path`.
pub fn export_csv(project: &Project, path: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path)?;
    write_tasks_csv(project, file)
}
