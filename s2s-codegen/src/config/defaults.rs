//! Default configuration values - single source of truth

/// Default project name
pub const PROJECT_NAME: &str = "demo";

/// Default base package of the generated sources
pub const PACKAGE_NAME: &str = "com.example.demo";

/// Default directory the project folder is created in
pub const OUTPUT_DIR: &str = "./generated";

/// Default directory holding the template files
pub const TEMPLATES_DIR: &str = "./templates";

/// Default Spring Boot version written into the build file
pub const FRAMEWORK_VERSION: &str = "3.2.0";

/// Maximum number of tables per run
pub const MAX_TABLES: usize = 100;

/// Maximum number of files written per project
pub const MAX_FILES: usize = 1000;

/// Maximum size of the SQL input in bytes (10 MiB)
pub const MAX_SQL_BYTES: usize = 10 * 1024 * 1024;

/// Maximum size of one generated file in bytes (10 MiB)
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Maximum project name length
pub const MAX_PROJECT_NAME_LEN: usize = 50;

/// Maximum package name length
pub const MAX_PACKAGE_NAME_LEN: usize = 100;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
