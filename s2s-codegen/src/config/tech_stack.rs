//! Technology stack and project metadata

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::error::{CodegenError, Result};

/// Implements `as_str`, `Display`, `FromStr` (case-insensitive) and a `SUPPORTED` list
/// for a closed set of configuration values.
macro_rules! config_enum {
    ($name:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// All accepted spellings, in declaration order
            pub const SUPPORTED: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CodegenError;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(CodegenError::UnsupportedConfiguration {
                        field: $field,
                        value: s.to_string(),
                        supported: Self::SUPPORTED.to_vec(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CodegenError;

            fn try_from(s: String) -> Result<Self> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }
    };
}

/// ORM framework used by the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OrmFramework {
    #[default]
    MyBatis,
    MyBatisPlus,
    Jpa,
}

config_enum!(OrmFramework, "ORM framework", {
    MyBatis => "mybatis",
    MyBatisPlus => "mybatis-plus",
    Jpa => "jpa",
});

/// Build tool of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuildTool {
    #[default]
    Maven,
    Gradle,
}

config_enum!(BuildTool, "build tool", {
    Maven => "maven",
    Gradle => "gradle",
});

/// Database the generated project connects to; also the default DDL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DatabaseType {
    #[default]
    MySql,
    PostgreSql,
    Oracle,
}

config_enum!(DatabaseType, "database type", {
    MySql => "mysql",
    PostgreSql => "postgresql",
    Oracle => "oracle",
});

/// Target Java language level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageVersion {
    Java8,
    Java11,
    #[default]
    Java17,
    Java21,
}

config_enum!(LanguageVersion, "Java version", {
    Java8 => "8",
    Java11 => "11",
    Java17 => "17",
    Java21 => "21",
});

/// Optional features toggled per project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    LombokAccessors,
    ApiDocs,
    Validation,
    Pagination,
    Cache,
}

/// Technology stack configuration
///
/// Closed-set fields are enums, so an unrecognized value is rejected while
/// deserializing or parsing instead of being silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TechStackConfig {
    pub orm_framework: OrmFramework,
    pub build_tool: BuildTool,
    pub database_type: DatabaseType,
    #[serde(alias = "use_lombok")]
    pub use_lombok_style_accessors: bool,
    #[serde(alias = "use_swagger")]
    pub use_api_docs: bool,
    pub use_validation: bool,
    pub use_pagination: bool,
    #[serde(alias = "use_redis")]
    pub use_cache: bool,
    pub language_version: LanguageVersion,
    pub framework_version: String,
}

impl Default for TechStackConfig {
    fn default() -> Self {
        Self {
            orm_framework: OrmFramework::default(),
            build_tool: BuildTool::default(),
            database_type: DatabaseType::default(),
            use_lombok_style_accessors: true,
            use_api_docs: false,
            use_validation: true,
            use_pagination: false,
            use_cache: false,
            language_version: LanguageVersion::default(),
            framework_version: defaults::FRAMEWORK_VERSION.to_string(),
        }
    }
}

impl TechStackConfig {
    /// Whether a feature flag is switched on
    pub fn has_feature(&self, feature: Feature) -> bool {
        match feature {
            Feature::LombokAccessors => self.use_lombok_style_accessors,
            Feature::ApiDocs => self.use_api_docs,
            Feature::Validation => self.use_validation,
            Feature::Pagination => self.use_pagination,
            Feature::Cache => self.use_cache,
        }
    }

    /// Validate the free-form fields (the enums are valid by construction)
    pub fn validate(&self) -> Result<()> {
        let version = self.framework_version.trim();
        let well_formed = !version.is_empty()
            && version
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
        if !well_formed {
            return Err(CodegenError::validation(format!(
                "Invalid framework version: '{}'",
                self.framework_version
            )));
        }
        Ok(())
    }
}

/// Project-level information shared by every generated artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub project_name: String,
    pub package_name: String,
    pub output_root: PathBuf,
    #[serde(default)]
    pub tech_stack: TechStackConfig,
}

impl ProjectMetadata {
    pub fn new(
        project_name: impl Into<String>,
        package_name: impl Into<String>,
        output_root: impl Into<PathBuf>,
        tech_stack: TechStackConfig,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            package_name: package_name.into(),
            output_root: output_root.into(),
            tech_stack,
        }
    }

    /// Directory the project is written into: `<output_root>/<project_name>`
    pub fn project_dir(&self) -> PathBuf {
        self.output_root.join(&self.project_name)
    }
}
