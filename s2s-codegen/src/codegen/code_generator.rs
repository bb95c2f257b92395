//! Main code generator orchestrator

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use super::model::TemplateModel;
use super::naming;
use super::renderer::Renderer;
use super::template_selector::{ArtifactRole, TemplateId, TemplateSelector};
use crate::config::{defaults, validation, BuildTool, OrmFramework, ProjectMetadata, TechStackConfig};
use crate::error::{CodegenError, Result};
use crate::parser::{select_parser, TableMetadata};

/// Logical filename -> content, in emission order
pub type GeneratedFiles = IndexMap<String, String>;

/// One artifact the generator will emit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedArtifact {
    pub role: ArtifactRole,
    pub file_name: String,
    pub template: TemplateId,
    /// Source table, `None` for project-scoped artifacts
    pub table_name: Option<String>,
    #[serde(skip)]
    table_index: Option<usize>,
}

/// Logical filename of an artifact
///
/// `app_name` is the entry point base name, `class_name` the entity class name
/// (unused for project-scoped roles).
pub fn artifact_file_name(
    role: ArtifactRole,
    class_name: &str,
    app_name: &str,
    stack: &TechStackConfig,
) -> String {
    match role {
        ArtifactRole::BuildFile => match stack.build_tool {
            BuildTool::Gradle => "build.gradle".to_string(),
            BuildTool::Maven => "pom.xml".to_string(),
        },
        ArtifactRole::AppConfig => "application.properties".to_string(),
        ArtifactRole::ResultWrapper => "Result.java".to_string(),
        ArtifactRole::ResultCodeEnum => "ResultCode.java".to_string(),
        ArtifactRole::ApplicationEntryPoint => format!("{}Application.java", app_name),
        ArtifactRole::ApiDocConfig => "OpenApiConfig.java".to_string(),
        ArtifactRole::Entity => format!("{}.java", class_name),
        ArtifactRole::DataAccess => match stack.orm_framework {
            OrmFramework::Jpa => format!("{}Repository.java", class_name),
            OrmFramework::MyBatis | OrmFramework::MyBatisPlus => format!("{}Mapper.java", class_name),
        },
        ArtifactRole::DataAccessMarkup => format!("{}Mapper.xml", class_name),
        ArtifactRole::ServiceInterface => format!("I{}Service.java", class_name),
        ArtifactRole::ServiceImpl => format!("{}ServiceImpl.java", class_name),
        ArtifactRole::Controller => format!("{}Controller.java", class_name),
    }
}

/// Main code generator: tables + project -> rendered files
pub struct CodeGenerator<'a> {
    renderer: &'a dyn Renderer,
    selector: TemplateSelector,
    max_tables: usize,
}

impl<'a> CodeGenerator<'a> {
    /// Create a generator using the built-in template rows
    pub fn new(renderer: &'a dyn Renderer) -> Self {
        Self {
            renderer,
            selector: TemplateSelector::standard(),
            max_tables: defaults::MAX_TABLES,
        }
    }

    /// Replace the template selector
    pub fn with_selector(mut self, selector: TemplateSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Set the maximum number of tables per run
    pub fn max_tables(mut self, max_tables: usize) -> Self {
        self.max_tables = max_tables;
        self
    }

    /// Parse `sql` and render every artifact.
    ///
    /// `dialect` falls back to the project's database type.
    pub fn generate(
        &self,
        sql: &str,
        dialect: Option<&str>,
        project: &ProjectMetadata,
    ) -> Result<GeneratedFiles> {
        let tables = parse_tables(sql, dialect, project)?;
        self.generate_from_tables(&tables, project)
    }

    /// Render every artifact for already parsed tables
    pub fn generate_from_tables(
        &self,
        tables: &[TableMetadata],
        project: &ProjectMetadata,
    ) -> Result<GeneratedFiles> {
        let plan = self.plan(tables, project)?;
        let project_model = TemplateModel::for_project(project);

        let mut files = GeneratedFiles::with_capacity(plan.len());
        for artifact in plan {
            let content = match artifact.table_index {
                Some(index) => {
                    let model = TemplateModel::for_table(project, &tables[index]);
                    self.renderer.render(&model, &artifact.template)?
                }
                None => self.renderer.render(&project_model, &artifact.template)?,
            };
            debug!("Rendered {} from {}", artifact.file_name, artifact.template);
            files.insert(artifact.file_name, content);
        }

        info!(
            "Generated {} files for project {}",
            files.len(),
            project.project_name
        );
        Ok(files)
    }

    /// List the artifacts that would be generated, without rendering
    pub fn plan(
        &self,
        tables: &[TableMetadata],
        project: &ProjectMetadata,
    ) -> Result<Vec<PlannedArtifact>> {
        plan_artifacts(tables, project, &self.selector, self.max_tables)
    }
}

/// Validate the SQL and parse it with the parser for the requested dialect.
///
/// `dialect` falls back to the project's database type.
pub fn parse_tables(
    sql: &str,
    dialect: Option<&str>,
    project: &ProjectMetadata,
) -> Result<Vec<TableMetadata>> {
    validation::validate_sql(sql)?;
    let dialect = dialect.unwrap_or(project.tech_stack.database_type.as_str());
    let parser = select_parser(Some(dialect))?;
    info!("Parsing SQL ({} bytes) as {}", sql.len(), parser.dialect_name());

    let tables = parser.parse(sql)?;
    info!("Parsed {} tables", tables.len());
    Ok(tables)
}

/// List the artifacts that would be generated for `tables`, in emission order.
///
/// Fails when there are no tables, more than `max_tables`, or two artifacts share a
/// logical filename.
pub fn plan_artifacts(
    tables: &[TableMetadata],
    project: &ProjectMetadata,
    selector: &TemplateSelector,
    max_tables: usize,
) -> Result<Vec<PlannedArtifact>> {
    if tables.is_empty() {
        return Err(CodegenError::NoTablesFound);
    }
    if tables.len() > max_tables {
        return Err(CodegenError::TooManyTables {
            count: tables.len(),
            max: max_tables,
        });
    }

    let stack = &project.tech_stack;
    let app_name = naming::application_class_name(&project.project_name);
    if app_name.is_empty() {
        return Err(CodegenError::validation(format!(
            "Project name '{}' does not produce a valid class name",
            project.project_name
        )));
    }

    let mut plan = Vec::new();
    for role in ArtifactRole::PROJECT_SCOPED {
        if let Some(template) = selector.resolve(role, stack) {
            plan.push(PlannedArtifact {
                role,
                file_name: artifact_file_name(role, "", &app_name, stack),
                template,
                table_name: None,
                table_index: None,
            });
        }
    }

    for (index, table) in tables.iter().enumerate() {
        for role in ArtifactRole::TABLE_SCOPED {
            if let Some(template) = selector.resolve(role, stack) {
                plan.push(PlannedArtifact {
                    role,
                    file_name: artifact_file_name(role, table.class_name(), &app_name, stack),
                    template,
                    table_name: Some(table.table_name().to_string()),
                    table_index: Some(index),
                });
            }
        }
    }

    check_unique_file_names(&plan)?;
    debug!("Planned {} artifacts", plan.len());
    Ok(plan)
}

fn check_unique_file_names(plan: &[PlannedArtifact]) -> Result<()> {
    let mut seen: HashMap<&str, &PlannedArtifact> = HashMap::with_capacity(plan.len());
    for artifact in plan {
        if let Some(first) = seen.insert(&artifact.file_name, artifact) {
            return Err(CodegenError::validation(format!(
                "Duplicate artifact {}: produced by {} and {}",
                artifact.file_name,
                describe(first),
                describe(artifact)
            )));
        }
    }
    Ok(())
}

fn describe(artifact: &PlannedArtifact) -> String {
    match &artifact.table_name {
        Some(table) => format!("{} of table {}", artifact.role, table),
        None => artifact.role.to_string(),
    }
}
