//! Error types for s2s-codegen

use thiserror::Error;

/// Result type alias for s2s-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Broad category of a [`CodegenError`], used by callers to decide how to report it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input
    Validation,
    /// The SQL itself could not be turned into tables
    Parse,
    /// Unknown dialect, ORM, build tool or language version
    UnsupportedConfiguration,
    /// Path escaped the authorized root
    Security,
    /// Template lookup or rendering failed
    Render,
    /// Filesystem failure
    Io,
    /// Configuration file could not be loaded
    Config,
}

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Failed to parse SQL schema: {0}")]
    ParseError(String),

    #[error("Failed to parse SQL schema: no CREATE TABLE statements found")]
    NoTablesFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Validation error: too many tables ({count}, max {max})")]
    TooManyTables { count: usize, max: usize },

    #[error("Unsupported dialect '{dialect}' (supported: {})", supported.join(", "))]
    UnsupportedDialect {
        dialect: String,
        supported: Vec<&'static str>,
    },

    #[error("Unsupported {field} '{value}' (supported: {})", supported.join(", "))]
    UnsupportedConfiguration {
        field: &'static str,
        value: String,
        supported: Vec<&'static str>,
    },

    #[error("Security violation: {0}")]
    SecurityViolation(String),

    #[error("Failed to render template {template}: {message}")]
    RenderError { template: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    ArchiveError(String),
}

impl CodegenError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodegenError::ParseError(_) | CodegenError::NoTablesFound => ErrorKind::Parse,
            CodegenError::ValidationError(_) | CodegenError::TooManyTables { .. } => {
                ErrorKind::Validation
            }
            CodegenError::UnsupportedDialect { .. }
            | CodegenError::UnsupportedConfiguration { .. } => ErrorKind::UnsupportedConfiguration,
            CodegenError::SecurityViolation(_) => ErrorKind::Security,
            CodegenError::RenderError { .. } => ErrorKind::Render,
            CodegenError::ConfigError(_) => ErrorKind::Config,
            CodegenError::IoError(_) | CodegenError::ArchiveError(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        CodegenError::ValidationError(msg.into())
    }

    pub(crate) fn security(msg: impl Into<String>) -> Self {
        CodegenError::SecurityViolation(msg.into())
    }
}

impl From<sqlparser::parser::ParserError> for CodegenError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        CodegenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}

impl From<zip::result::ZipError> for CodegenError {
    fn from(err: zip::result::ZipError) -> Self {
        CodegenError::ArchiveError(err.to_string())
    }
}

impl From<walkdir::Error> for CodegenError {
    fn from(err: walkdir::Error) -> Self {
        CodegenError::ArchiveError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(CodegenError::NoTablesFound.kind(), ErrorKind::Parse);
        assert_eq!(
            CodegenError::TooManyTables { count: 101, max: 100 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CodegenError::security("escape").kind(),
            ErrorKind::Security
        );
    }

    #[test]
    fn test_unsupported_dialect_lists_supported() {
        let err = CodegenError::UnsupportedDialect {
            dialect: "oracle".into(),
            supported: vec!["mysql", "postgresql"],
        };
        let msg = err.to_string();
        assert!(msg.contains("oracle"));
        assert!(msg.contains("mysql, postgresql"));
    }
}
