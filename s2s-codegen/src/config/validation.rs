//! Input checks applied before anything is parsed or written

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::defaults;
use crate::error::{CodegenError, Result};

fn project_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[a-z0-9][a-z0-9._-]*[a-z0-9]|[a-z0-9])$").expect("valid project name regex")
    })
}

fn package_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z][a-z0-9_]*(?:\.[a-z][a-z0-9_]*)*$").expect("valid package name regex")
    })
}

/// Project name: lower-cased form must match the pattern; at most 50 chars
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CodegenError::validation("Project name cannot be empty"));
    }
    if !project_name_pattern().is_match(&name.to_lowercase()) {
        return Err(CodegenError::validation(format!(
            "Invalid project name format: {}",
            name
        )));
    }
    if name.chars().count() > defaults::MAX_PROJECT_NAME_LEN {
        return Err(CodegenError::validation(format!(
            "Project name too long (max {} characters)",
            defaults::MAX_PROJECT_NAME_LEN
        )));
    }
    Ok(())
}

/// Package name: dotted lower-case segments; at most 100 chars
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CodegenError::validation("Package name cannot be empty"));
    }
    if !package_name_pattern().is_match(&name.to_lowercase()) {
        return Err(CodegenError::validation(format!(
            "Invalid package name format: {}",
            name
        )));
    }
    if name.chars().count() > defaults::MAX_PACKAGE_NAME_LEN {
        return Err(CodegenError::validation(format!(
            "Package name too long (max {} characters)",
            defaults::MAX_PACKAGE_NAME_LEN
        )));
    }
    Ok(())
}

/// SQL input: non-blank and at most 10 MiB
pub fn validate_sql(sql: &str) -> Result<()> {
    if sql.trim().is_empty() {
        return Err(CodegenError::validation("SQL cannot be empty"));
    }
    if sql.len() > defaults::MAX_SQL_BYTES {
        return Err(CodegenError::validation(format!(
            "SQL too large (max {} MiB)",
            defaults::MAX_SQL_BYTES / 1024 / 1024
        )));
    }
    Ok(())
}

/// Read a SQL file, refusing oversized files before any of it is loaded
pub fn read_sql_file(path: &Path) -> Result<String> {
    let size = fs::metadata(path)?.len();
    if size > defaults::MAX_SQL_BYTES as u64 {
        return Err(CodegenError::validation(format!(
            "SQL file {} too large (max {} MiB)",
            path.display(),
            defaults::MAX_SQL_BYTES / 1024 / 1024
        )));
    }
    let sql = fs::read_to_string(path)?;
    validate_sql(&sql)?;
    Ok(sql)
}

/// Output directory: non-empty, no `..` and no `~`
pub fn validate_output_dir(dir: &str) -> Result<()> {
    if dir.trim().is_empty() {
        return Err(CodegenError::validation("Output directory cannot be empty"));
    }
    if dir.contains("..") || dir.contains('~') {
        return Err(CodegenError::validation(format!(
            "Invalid output directory (path traversal): {}",
            dir
        )));
    }
    Ok(())
}

/// One generated file: at most 10 MiB
pub fn validate_file_size(name: &str, size: usize) -> Result<()> {
    if size > defaults::MAX_FILE_BYTES {
        return Err(CodegenError::validation(format!(
            "File {} too large ({} bytes, max {} MiB)",
            name,
            size,
            defaults::MAX_FILE_BYTES / 1024 / 1024
        )));
    }
    Ok(())
}

/// Number of files written for one project
pub fn validate_file_count(count: usize) -> Result<()> {
    if count > defaults::MAX_FILES {
        return Err(CodegenError::validation(format!(
            "Too many files to generate ({}, max {})",
            count,
            defaults::MAX_FILES
        )));
    }
    Ok(())
}
