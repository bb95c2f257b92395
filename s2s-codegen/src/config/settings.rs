//! Configuration settings for s2s-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use super::tech_stack::{ProjectMetadata, TechStackConfig};
use super::validation;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Path to the SQL file with the CREATE TABLE statements
    #[serde(default)]
    pub sql_file: PathBuf,

    /// DDL dialect; defaults to the tech stack's database type
    #[serde(default)]
    pub dialect: Option<String>,

    /// Name of the generated project (also its directory name)
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Base Java package of the generated sources
    #[serde(default = "default_package_name")]
    pub package_name: String,

    /// Directory the project directory is created in
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Root every written path must stay inside; defaults to `output_dir`
    #[serde(default)]
    pub allowed_base_dir: Option<PathBuf>,

    /// Directory holding the template files
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Technology stack of the generated project
    #[serde(default)]
    pub tech_stack: TechStackConfig,

    /// Maximum number of tables accepted in one run
    #[serde(default = "default_max_tables")]
    pub max_tables: usize,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_project_name() -> String {
    defaults::PROJECT_NAME.to_string()
}
fn default_package_name() -> String {
    defaults::PACKAGE_NAME.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_templates_dir() -> PathBuf {
    PathBuf::from(defaults::TEMPLATES_DIR)
}
fn default_max_tables() -> usize {
    defaults::MAX_TABLES
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            sql_file: PathBuf::new(),
            dialect: None,
            project_name: default_project_name(),
            package_name: default_package_name(),
            output_dir: default_output_dir(),
            allowed_base_dir: None,
            templates_dir: default_templates_dir(),
            tech_stack: TechStackConfig::default(),
            max_tables: default_max_tables(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config with the given SQL file
    pub fn default_with_sql(sql_file: PathBuf) -> Self {
        Self {
            sql_file,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("s2s-codegen").required(false));
        }

        // Override with environment variables (S2S_CODEGEN_*, nested with __)
        builder = builder.add_source(
            Environment::with_prefix("S2S_CODEGEN")
                .prefix_separator("_")
                .separator("__"),
        );

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Root that every written path must stay inside
    pub fn allowed_base_dir(&self) -> &Path {
        self.allowed_base_dir.as_deref().unwrap_or(self.output_dir.as_path())
    }

    /// Project metadata derived from this configuration
    pub fn project_metadata(&self) -> ProjectMetadata {
        ProjectMetadata::new(
            self.project_name.trim(),
            self.package_name.trim(),
            self.output_dir.clone(),
            self.tech_stack.clone(),
        )
    }

    /// Validate everything that does not need the SQL file's content
    pub fn validate_project(&self) -> Result<()> {
        validation::validate_project_name(&self.project_name)?;
        validation::validate_package_name(&self.package_name)?;
        validation::validate_output_dir(&self.output_dir.to_string_lossy())?;
        self.tech_stack.validate()?;

        if self.max_tables == 0 {
            return Err(CodegenError::validation("max_tables must be at least 1"));
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.sql_file.as_os_str().is_empty() {
            return Err(CodegenError::validation("sql_file is required"));
        }

        if !self.sql_file.exists() {
            return Err(CodegenError::validation(format!(
                "SQL file not found: {}",
                self.sql_file.display()
            )));
        }

        self.validate_project()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildTool, OrmFramework};
    use crate::error::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = CodegenConfig::default();
        assert_eq!(config.project_name, "demo");
        assert_eq!(config.max_tables, 100);
        assert!(!config.dry_run);
        assert!(config.log_level.is_none());
        assert_eq!(config.allowed_base_dir(), Path::new("./generated"));
        assert!(config.validate_project().is_ok());
    }

    #[test]
    fn test_validation_missing_sql() {
        let config = CodegenConfig::default();
        assert!(config.validate().is_err());

        let config = CodegenConfig::default_with_sql(PathBuf::from("/no/such/schema.sql"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
            sql_file = "schema.sql"
            project_name = "order-center"
            package_name = "com.acme.order"
            log_level = "debug"

            [tech_stack]
            orm_framework = "mybatis-plus"
            build_tool = "gradle"
            use_api_docs = true
        "#;
        let config: CodegenConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.log_level, Some("debug".to_string()));
        assert_eq!(config.tech_stack.orm_framework, OrmFramework::MyBatisPlus);
        assert_eq!(config.tech_stack.build_tool, BuildTool::Gradle);
        assert!(config.tech_stack.use_api_docs);

        let project = config.project_metadata();
        assert_eq!(project.project_dir(), PathBuf::from("./generated/order-center"));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let config = CodegenConfig {
            package_name: "com..acme".into(),
            ..Default::default()
        };
        assert_eq!(config.validate_project().unwrap_err().kind(), ErrorKind::Validation);

        let config = CodegenConfig {
            output_dir: PathBuf::from("../escape"),
            ..Default::default()
        };
        assert!(config.validate_project().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s2s-codegen.toml");
        std::fs::write(&path, "project_name = \"shop\"\nmax_tables = 5\n").unwrap();

        let config = CodegenConfig::from_file(&path).unwrap();
        assert_eq!(config.project_name, "shop");
        assert_eq!(config.max_tables, 5);

        std::fs::write(&path, "[tech_stack]\norm_framework = \"hibernate\"\n").unwrap();
        let err = CodegenConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "project_name = \"inventory\"\n[tech_stack]\norm_framework = \"jpa\"\n").unwrap();

        let config = CodegenConfig::load(Some(&path)).unwrap();
        assert_eq!(config.project_name, "inventory");
        assert_eq!(config.tech_stack.orm_framework, OrmFramework::Jpa);
    }
}
