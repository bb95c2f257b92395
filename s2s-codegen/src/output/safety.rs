//! Filename sanitizing and root confinement for everything written to disk

use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::error::{CodegenError, Result};

/// Longest filename produced by [`sanitize_filename`], in characters
pub const MAX_FILE_NAME_LEN: usize = 200;

/// Characters that are illegal in filenames on at least one platform
const ILLEGAL_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Device names Windows refuses as file stems
const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Make a logical filename safe to use as a single path component.
///
/// Separators, wildcard and control characters become `_`, `..` sequences are
/// collapsed until none remain, Windows device names get a `_` prefix and the
/// result is capped at [`MAX_FILE_NAME_LEN`] characters.
pub fn sanitize_filename(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(CodegenError::validation("Filename cannot be empty"));
    }

    let mut sanitized: String = name
        .chars()
        .map(|c| {
            if ILLEGAL_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", "_");
    }
    let mut sanitized = sanitized.trim().to_string();
    if sanitized.is_empty() {
        return Err(CodegenError::validation(format!(
            "Filename '{}' is empty after sanitizing",
            name.escape_debug()
        )));
    }

    if is_reserved(&sanitized) {
        sanitized.insert(0, '_');
    }

    if sanitized.chars().count() > MAX_FILE_NAME_LEN {
        sanitized = sanitized.chars().take(MAX_FILE_NAME_LEN).collect();
    }

    if sanitized != name {
        warn!("Sanitized filename {:?} -> {:?}", name, sanitized);
    }
    Ok(sanitized)
}

fn is_reserved(name: &str) -> bool {
    let upper = name.to_uppercase();
    RESERVED_NAMES.iter().any(|reserved| {
        upper == *reserved
            || upper
                .strip_prefix(reserved)
                .is_some_and(|rest| rest.starts_with('.'))
    })
}

/// Confines paths to an authorized root directory.
///
/// Checks are lexical: `.` and `..` are resolved without touching the filesystem,
/// so paths that do not exist yet can be validated before anything is written.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Guard for `allowed_base_dir`; relative roots are resolved against the current directory
    pub fn new(allowed_base_dir: impl AsRef<Path>) -> Result<Self> {
        let root = absolutize(allowed_base_dir.as_ref())?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `candidate` against `base` and return the normalized absolute path.
    ///
    /// Both `base` itself and the result must lie inside the root.
    pub fn validate_path(&self, base: impl AsRef<Path>, candidate: impl AsRef<Path>) -> Result<PathBuf> {
        let base = absolutize(base.as_ref())?;
        if !base.starts_with(&self.root) {
            return Err(CodegenError::security(format!(
                "Base directory is outside allowed path: {}",
                base.display()
            )));
        }

        let candidate = candidate.as_ref();
        let full = normalize(&base.join(candidate));
        if !full.starts_with(&self.root) {
            return Err(CodegenError::security(format!(
                "Path traversal detected: {}",
                candidate.display()
            )));
        }
        Ok(full)
    }

    /// Validate a directory on its own
    pub fn validate_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        self.validate_path(dir, "")
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(CodegenError::validation("Path cannot be empty"));
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&absolute))
}

/// Lexically resolve `.` and `..`; `..` never climbs above the filesystem root
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
