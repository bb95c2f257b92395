//! s2s-codegen: Generate a Spring Boot backend project from SQL `CREATE TABLE` statements
//!
//! This crate provides both a CLI tool and a library. It parses SQL DDL using
//! `sqlparser-rs` into normalized table metadata and generates, per table:
//!
//! - an entity class
//! - a data-access layer (MyBatis mapper + XML, MyBatis-Plus mapper, or JPA repository)
//! - a service interface and implementation
//! - a REST controller
//!
//! plus the project-wide files (build file, `application.properties`, result wrapper,
//! application entry point and optionally an OpenAPI config).
//!
//! Which template renders which file is decided by a decision table over the
//! technology stack (ORM framework, build tool, feature flags). Template bodies live
//! outside the crate and are loaded from a directory.
//!
//! # Library usage
//!
//! ```rust,ignore
//! use s2s_codegen::config::OrmFramework;
//!
//! s2s_codegen::CodegenBuilder::new("schema.sql")
//!     .project_name("order-center")
//!     .package_name("com.acme.order")
//!     .orm_framework(OrmFramework::Jpa)
//!     .templates_dir("templates")
//!     .output_dir("generated")
//!     .generate()?;
//! ```
//!
//! The pure part of the pipeline needs no filesystem at all:
//!
//! ```rust,ignore
//! let files = s2s_codegen::generate_files(sql, &project, &renderer)?;
//! for (name, content) in &files { /* ... */ }
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! s2s-codegen --sql schema.sql --templates ./templates --output ./generated generate
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use codegen::{CodeGenerator, GeneratedFiles, Renderer, TemplateDirRenderer};
pub use config::{CodegenConfig, ProjectMetadata, TechStackConfig};
pub use error::{CodegenError, ErrorKind, Result};
pub use output::{FilePlacement, PathGuard};

/// Parse `sql` and render every artifact for `project`; nothing touches the disk.
///
/// The dialect is the project's database type.
pub fn generate_files(
    sql: &str,
    project: &ProjectMetadata,
    renderer: &dyn Renderer,
) -> Result<GeneratedFiles> {
    CodeGenerator::new(renderer).generate(sql, None, project)
}

/// Main entry point for code generation
///
/// Reads the SQL file, renders with templates from `templates_dir` and writes the
/// project into `<output_dir>/<project_name>`. In dry-run mode the placements are
/// computed and validated but nothing is written.
pub fn generate(config: &CodegenConfig) -> Result<Vec<FilePlacement>> {
    config.validate()?;

    info!("Parsing schema: {:?}", config.sql_file);
    let sql = crate::config::validation::read_sql_file(&config.sql_file)?;
    let project = config.project_metadata();

    let renderer = TemplateDirRenderer::from_dir(&config.templates_dir)?;
    let files = CodeGenerator::new(&renderer)
        .max_tables(config.max_tables)
        .generate(&sql, config.dialect.as_deref(), &project)?;

    let guard = PathGuard::new(config.allowed_base_dir())?;
    debug!("Output confined to {}", guard.root().display());

    if config.dry_run {
        let placements = output::plan_project(&files, &project, &guard)?;
        info!("Dry run: {} files planned, nothing written", placements.len());
        return Ok(placements);
    }

    let placements = output::write_project(&files, &project, &guard)?;
    info!("Code generation complete");
    Ok(placements)
}

/// Builder pattern for programmatic configuration
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder with the given SQL file
    pub fn new(sql_file: impl AsRef<Path>) -> Self {
        Self {
            config: CodegenConfig::default_with_sql(sql_file.as_ref().to_path_buf()),
        }
    }

    /// Set the project name (also the generated directory name)
    pub fn project_name(mut self, name: &str) -> Self {
        self.config.project_name = name.to_string();
        self
    }

    /// Set the base Java package
    pub fn package_name(mut self, name: &str) -> Self {
        self.config.package_name = name.to_string();
        self
    }

    /// Set the directory the project directory is created in
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Restrict writes to this directory (defaults to the output directory)
    pub fn allowed_base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.allowed_base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set the directory templates are loaded from
    pub fn templates_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.templates_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the DDL dialect (`mysql`, `postgresql`)
    pub fn dialect(mut self, dialect: &str) -> Self {
        self.config.dialect = Some(dialect.to_string());
        self
    }

    /// Replace the whole technology stack
    pub fn tech_stack(mut self, tech_stack: TechStackConfig) -> Self {
        self.config.tech_stack = tech_stack;
        self
    }

    /// Set the ORM framework
    pub fn orm_framework(mut self, orm: config::OrmFramework) -> Self {
        self.config.tech_stack.orm_framework = orm;
        self
    }

    /// Set the build tool
    pub fn build_tool(mut self, build_tool: config::BuildTool) -> Self {
        self.config.tech_stack.build_tool = build_tool;
        self
    }

    /// Set the maximum number of tables
    pub fn max_tables(mut self, max_tables: usize) -> Self {
        self.config.max_tables = max_tables;
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate the project
    pub fn generate(self) -> Result<Vec<FilePlacement>> {
        generate(&self.config)
    }
}

/// Path of the archive written for a project: `<output_dir>/<project_name>.zip`
pub fn archive_path(config: &CodegenConfig) -> PathBuf {
    config
        .output_dir
        .join(format!("{}.zip", config.project_name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_config() {
        let builder = CodegenBuilder::new("schema.sql")
            .project_name("shop")
            .package_name("com.acme.shop")
            .output_dir("/tmp/out")
            .dialect("postgresql")
            .orm_framework(config::OrmFramework::Jpa)
            .build_tool(config::BuildTool::Gradle)
            .max_tables(3)
            .dry_run();

        let config = builder.config();
        assert_eq!(config.sql_file, PathBuf::from("schema.sql"));
        assert_eq!(config.project_name, "shop");
        assert_eq!(config.dialect.as_deref(), Some("postgresql"));
        assert_eq!(config.tech_stack.orm_framework, config::OrmFramework::Jpa);
        assert_eq!(config.tech_stack.build_tool, config::BuildTool::Gradle);
        assert_eq!(config.max_tables, 3);
        assert!(config.dry_run);
        assert_eq!(config.allowed_base_dir(), Path::new("/tmp/out"));
    }

    #[test]
    fn test_archive_path() {
        let config = CodegenConfig {
            project_name: "shop".into(),
            output_dir: PathBuf::from("/tmp/out"),
            ..Default::default()
        };
        assert_eq!(archive_path(&config), PathBuf::from("/tmp/out/shop.zip"));
    }
}
