//! Zip packaging of a generated project directory

use std::fs::File;
use std::io::{self, Cursor};
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::safety::PathGuard;
use crate::error::{CodegenError, Result};

/// Zip every regular file under `project_dir`.
///
/// Entry names are relative to `project_dir` and always use `/`. Directories and
/// symlinks are not stored.
pub fn pack_project(project_dir: impl AsRef<Path>, guard: &PathGuard) -> Result<Vec<u8>> {
    let project_dir = project_dir.as_ref();
    if !project_dir.is_dir() {
        return Err(CodegenError::validation(format!(
            "Project directory does not exist: {}",
            project_dir.display()
        )));
    }
    let root = guard.validate_dir(project_dir)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut count = 0usize;

    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry_name(&root, entry.path())?;
        zip.start_file(name.as_str(), options)?;
        let mut file = File::open(entry.path())?;
        io::copy(&mut file, &mut zip)?;
        debug!("Packed {}", name);
        count += 1;
    }

    let bytes = zip.finish()?.into_inner();
    info!(
        "Packed {} files from {} ({} bytes)",
        count,
        root.display(),
        bytes.len()
    );
    Ok(bytes)
}

fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|e| {
        CodegenError::ArchiveError(format!("{}: {}", path.display(), e))
    })?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Ok(parts.join("/"))
}
