//! Project loading, saving and validation.

use std::path::Path;

use wf_project::Project;

use crate::error::{AppError, AppResult};
use crate::topology;

enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> AppResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(AppError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a project from a `.yaml`/`.yml` or `.json` file and validate it.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let project = match format_of(path)? {
        Format::Yaml => wf_project::load_yaml(path)?,
        Format::Json => wf_project::load_json(path)?,
    };
    validate_project(&project)?;
    tracing::info!(path = %path.display(), name = %project.name, "project loaded");
    Ok(project)
}

/// Save a project, choosing the format from the file extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    match format_of(path)? {
        Format::Yaml => wf_project::save_yaml(path, project)?,
        Format::Json => wf_project::save_json(path, project)?,
    }
    Ok(())
}

/// Schema validation plus resolution of the declared topology.
pub fn validate_project(project: &Project) -> AppResult<()> {
    wf_project::validate_project(project)?;
    topology::resolve_layout(&project.simulation.topology)?;
    Ok(())
}
