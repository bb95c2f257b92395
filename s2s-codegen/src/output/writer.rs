//! Writing generated files into the project layout

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use super::path_resolver;
use super::safety::{sanitize_filename, PathGuard};
use crate::codegen::GeneratedFiles;
use crate::config::{validation, ProjectMetadata};
use crate::error::{CodegenError, Result};

/// Where one generated file ends up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePlacement {
    pub logical_name: String,
    /// Relative to the project directory
    pub relative_path: PathBuf,
    /// Absolute, validated against the guard
    pub absolute_path: PathBuf,
}

/// Resolve and validate every target path without writing anything.
///
/// The project directory (`<output_root>/<project_name>`) and every file path must
/// pass `guard`; file count and sizes are checked here too. Two names that end up at
/// the same path after sanitizing are rejected.
pub fn plan_project(
    files: &GeneratedFiles,
    project: &ProjectMetadata,
    guard: &PathGuard,
) -> Result<Vec<FilePlacement>> {
    validation::validate_file_count(files.len())?;
    let base = guard.validate_dir(project.project_dir())?;

    let mut placements = Vec::with_capacity(files.len());
    let mut claimed: HashMap<PathBuf, &str> = HashMap::with_capacity(files.len());
    for (name, content) in files {
        validation::validate_file_size(name, content.len())?;
        let safe_name = sanitize_filename(name)?;
        let relative_path = path_resolver::resolve(&safe_name, &project.package_name);
        if let Some(first) = claimed.insert(relative_path.clone(), name) {
            return Err(CodegenError::validation(format!(
                "Generated files {} and {} both resolve to {}",
                first,
                name,
                relative_path.display()
            )));
        }
        let absolute_path = guard.validate_path(&base, &relative_path)?;
        placements.push(FilePlacement {
            logical_name: name.clone(),
            relative_path,
            absolute_path,
        });
    }
    Ok(placements)
}

/// Write all files into `<output_root>/<project_name>`, creating directories as needed.
///
/// Every path is validated before the first byte is written. Returns the placements written.
pub fn write_project(
    files: &GeneratedFiles,
    project: &ProjectMetadata,
    guard: &PathGuard,
) -> Result<Vec<FilePlacement>> {
    let placements = plan_project(files, project, guard)?;

    for placement in &placements {
        if let Some(parent) = placement.absolute_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = &files[placement.logical_name.as_str()];
        fs::write(&placement.absolute_path, content.as_bytes())?;
        debug!("Wrote {}", placement.absolute_path.display());
    }

    info!(
        "Wrote {} files to {}",
        placements.len(),
        project.project_dir().display()
    );
    Ok(placements)
}
