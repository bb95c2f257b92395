//! Data handed to the renderer for each artifact
//!
//! Templates see a nested view (`project`, `table`, `config`) and, for table-scoped
//! artifacts, the same table fields flattened to the top level (`className`,
//! `columns`, `classNameUncap`, ...).

use std::collections::BTreeSet;

use serde::Serialize;

use super::naming;
use crate::config::{ProjectMetadata, TechStackConfig};
use crate::parser::{ColumnMetadata, TableMetadata};

/// Import added to entities when API docs are enabled
pub const API_DOC_IMPORT: &str = "io.swagger.v3.oas.annotations.media.Schema";

/// Imported by entities with a non-null, non-key column when validation is on
pub const NOT_NULL_IMPORT: &str = "jakarta.validation.constraints.NotNull";

/// Imported by entities with a bounded string column when validation is on
pub const SIZE_IMPORT: &str = "jakarta.validation.constraints.Size";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo<'a> {
    pub project_name: &'a str,
    pub package_name: &'a str,
    /// Base name of the entry point class, `MingMallSystem` for `ming-mall-system`
    pub class_name: String,
    pub java_version: &'static str,
    pub framework_version: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInfo {
    pub orm_framework: &'static str,
    pub build_tool: &'static str,
    pub database_type: &'static str,
    pub use_lombok: bool,
    pub use_api_docs: bool,
    pub use_validation: bool,
    pub use_pagination: bool,
    pub use_cache: bool,
}

impl From<&TechStackConfig> for ConfigInfo {
    fn from(stack: &TechStackConfig) -> Self {
        Self {
            orm_framework: stack.orm_framework.as_str(),
            build_tool: stack.build_tool.as_str(),
            database_type: stack.database_type.as_str(),
            use_lombok: stack.use_lombok_style_accessors,
            use_api_docs: stack.use_api_docs,
            use_validation: stack.use_validation,
            use_pagination: stack.use_pagination,
            use_cache: stack.use_cache,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo<'a> {
    pub table_name: &'a str,
    pub class_name: &'a str,
    pub class_name_uncap: String,
    pub table_comment: &'a str,
    pub primary_key_type: &'a str,
    pub primary_key_column: Option<&'a str>,
    pub primary_key_column_name: Option<&'a str>,
    pub primary_key_property_name: Option<&'a str>,
    pub columns: &'a [ColumnMetadata],
    pub imports: BTreeSet<&'a str>,
}

impl<'a> TableInfo<'a> {
    fn new(table: &'a TableMetadata, stack: &TechStackConfig) -> Self {
        let mut imports: BTreeSet<&'a str> = table.imports().iter().map(String::as_str).collect();
        if stack.use_api_docs {
            imports.insert(API_DOC_IMPORT);
        }
        if stack.use_validation {
            let validated = || table.columns().iter().filter(|c| !c.is_primary_key());
            if validated().any(ColumnMetadata::needs_not_null) {
                imports.insert(NOT_NULL_IMPORT);
            }
            if validated().any(ColumnMetadata::needs_size) {
                imports.insert(SIZE_IMPORT);
            }
        }

        let primary_key = table.primary_key();
        Self {
            table_name: table.table_name(),
            class_name: table.class_name(),
            class_name_uncap: naming::to_instance_name(table.class_name()),
            table_comment: table.table_comment(),
            primary_key_type: table.primary_key_type(),
            primary_key_column: table.primary_key_column(),
            primary_key_column_name: primary_key.map(|c| c.column_name()),
            primary_key_property_name: primary_key.map(|c| c.property_name()),
            columns: table.columns(),
            imports,
        }
    }
}

/// Root object passed to [`Renderer::render`](super::Renderer::render)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateModel<'a> {
    pub project: ProjectInfo<'a>,
    pub config: ConfigInfo,
    pub table: Option<TableInfo<'a>>,
    pub package_name: &'a str,
    pub project_name: &'a str,
    /// Entry point base name for project artifacts, the entity class name for table artifacts
    pub class_name: String,
    #[serde(flatten)]
    flat_table: Option<FlatTable<'a>>,
}

/// Table fields repeated at the top level; `className` is already present there
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FlatTable<'a> {
    table_name: &'a str,
    table_comment: &'a str,
    class_name_uncap: String,
    primary_key_type: &'a str,
    primary_key_column: Option<&'a str>,
    primary_key_column_name: Option<&'a str>,
    primary_key_property_name: Option<&'a str>,
    columns: &'a [ColumnMetadata],
    imports: BTreeSet<&'a str>,
}

impl<'a> From<&TableInfo<'a>> for FlatTable<'a> {
    fn from(info: &TableInfo<'a>) -> Self {
        Self {
            table_name: info.table_name,
            table_comment: info.table_comment,
            class_name_uncap: info.class_name_uncap.clone(),
            primary_key_type: info.primary_key_type,
            primary_key_column: info.primary_key_column,
            primary_key_column_name: info.primary_key_column_name,
            primary_key_property_name: info.primary_key_property_name,
            columns: info.columns,
            imports: info.imports.clone(),
        }
    }
}

impl<'a> TemplateModel<'a> {
    /// Model for project-scoped artifacts (no table context)
    pub fn for_project(project: &'a ProjectMetadata) -> Self {
        let stack = &project.tech_stack;
        let app_name = naming::application_class_name(&project.project_name);
        Self {
            project: ProjectInfo {
                project_name: &project.project_name,
                package_name: &project.package_name,
                class_name: app_name.clone(),
                java_version: stack.language_version.as_str(),
                framework_version: &stack.framework_version,
            },
            config: ConfigInfo::from(stack),
            table: None,
            package_name: &project.package_name,
            project_name: &project.project_name,
            class_name: app_name,
            flat_table: None,
        }
    }

    /// Model for table-scoped artifacts
    pub fn for_table(project: &'a ProjectMetadata, table: &'a TableMetadata) -> Self {
        let mut model = Self::for_project(project);
        let info = TableInfo::new(table, &project.tech_stack);
        model.class_name = table.class_name().to_string();
        model.flat_table = Some(FlatTable::from(&info));
        model.table = Some(info);
        model
    }
}
