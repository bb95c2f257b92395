//! Template selection: (artifact role, tech stack) -> template id
//!
//! The choice is a decision table evaluated top to bottom; the first row whose
//! conditions all hold decides. A row may resolve to "no artifact" (`None`).

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::config::{BuildTool, Feature, OrmFramework, TechStackConfig};

/// Logical role of a generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArtifactRole {
    BuildFile,
    AppConfig,
    ResultWrapper,
    ResultCodeEnum,
    ApplicationEntryPoint,
    ApiDocConfig,
    Entity,
    DataAccess,
    DataAccessMarkup,
    ServiceInterface,
    ServiceImpl,
    Controller,
}

impl ArtifactRole {
    /// Roles emitted once per project, in emission order
    pub const PROJECT_SCOPED: [ArtifactRole; 6] = [
        ArtifactRole::BuildFile,
        ArtifactRole::AppConfig,
        ArtifactRole::ResultWrapper,
        ArtifactRole::ResultCodeEnum,
        ArtifactRole::ApplicationEntryPoint,
        ArtifactRole::ApiDocConfig,
    ];

    /// Roles emitted once per table, in emission order
    pub const TABLE_SCOPED: [ArtifactRole; 6] = [
        ArtifactRole::Entity,
        ArtifactRole::DataAccess,
        ArtifactRole::DataAccessMarkup,
        ArtifactRole::ServiceInterface,
        ArtifactRole::ServiceImpl,
        ArtifactRole::Controller,
    ];
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Stable identifier of an externally supplied template, e.g. `mybatis/Entity.java.ftl`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TemplateId(Cow<'static, str>);

impl TemplateId {
    pub const fn from_static(id: &'static str) -> Self {
        TemplateId(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        TemplateId(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// One row of the decision table. `None` conditions match anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRule {
    pub role: ArtifactRole,
    pub orm: Option<OrmFramework>,
    pub build_tool: Option<BuildTool>,
    pub requires: Option<Feature>,
    /// Template to use, or `None` when this combination produces no artifact
    pub template: Option<TemplateId>,
}

impl TemplateRule {
    /// Unconditional row for `role`
    pub fn new(role: ArtifactRole, template: Option<TemplateId>) -> Self {
        Self {
            role,
            orm: None,
            build_tool: None,
            requires: None,
            template,
        }
    }

    pub fn orm(mut self, orm: OrmFramework) -> Self {
        self.orm = Some(orm);
        self
    }

    pub fn build_tool(mut self, build_tool: BuildTool) -> Self {
        self.build_tool = Some(build_tool);
        self
    }

    pub fn requires(mut self, feature: Feature) -> Self {
        self.requires = Some(feature);
        self
    }

    fn matches(&self, role: ArtifactRole, stack: &TechStackConfig) -> bool {
        self.role == role
            && self.orm.map_or(true, |orm| orm == stack.orm_framework)
            && self.build_tool.map_or(true, |tool| tool == stack.build_tool)
            && self.requires.map_or(true, |feature| stack.has_feature(feature))
    }
}

const fn row(
    role: ArtifactRole,
    orm: Option<OrmFramework>,
    build_tool: Option<BuildTool>,
    requires: Option<Feature>,
    template: Option<&'static str>,
) -> TemplateRule {
    TemplateRule {
        role,
        orm,
        build_tool,
        requires,
        template: match template {
            Some(id) => Some(TemplateId::from_static(id)),
            None => None,
        },
    }
}

use ArtifactRole as R;
use OrmFramework::{Jpa, MyBatis, MyBatisPlus};

/// Built-in rows
static STANDARD_RULES: &[TemplateRule] = &[
    row(R::BuildFile, None, Some(BuildTool::Gradle), None, Some("gradle/build.gradle.ftl")),
    row(R::BuildFile, None, None, None, Some("maven/pom.xml.ftl")),
    row(R::AppConfig, None, None, None, Some("common/application.properties.ftl")),
    row(R::ResultWrapper, None, None, None, Some("common/Result.java.ftl")),
    row(R::ResultCodeEnum, None, None, None, Some("common/ResultCode.java.ftl")),
    row(R::ApplicationEntryPoint, Some(MyBatisPlus), None, None, Some("mybatis-plus/Application.java.ftl")),
    row(R::ApplicationEntryPoint, Some(MyBatis), None, None, Some("mybatis/Application.java.ftl")),
    row(R::ApplicationEntryPoint, Some(Jpa), None, None, Some("jpa/Application.java.ftl")),
    row(R::ApplicationEntryPoint, None, None, None, Some("common/Application.java.ftl")),
    row(R::ApiDocConfig, None, None, Some(Feature::ApiDocs), Some("common/OpenApiConfig.java.ftl")),
    row(R::ApiDocConfig, None, None, None, None),
    row(R::Entity, Some(Jpa), None, None, Some("jpa/Entity.java.ftl")),
    row(R::Entity, Some(MyBatisPlus), None, None, Some("mybatis-plus/Entity.java.ftl")),
    row(R::Entity, None, None, None, Some("mybatis/Entity.java.ftl")),
    row(R::DataAccess, Some(Jpa), None, None, Some("jpa/Repository.java.ftl")),
    row(R::DataAccess, Some(MyBatisPlus), None, None, Some("mybatis-plus/Mapper.java.ftl")),
    row(R::DataAccess, None, None, None, Some("mybatis/Mapper.java.ftl")),
    row(R::DataAccessMarkup, Some(MyBatis), None, None, Some("mybatis/Mapper.xml.ftl")),
    row(R::DataAccessMarkup, None, None, None, None),
    row(R::ServiceInterface, None, None, None, Some("common/Service.java.ftl")),
    row(R::ServiceImpl, Some(Jpa), None, None, Some("jpa/ServiceImpl.java.ftl")),
    row(R::ServiceImpl, Some(MyBatisPlus), None, None, Some("mybatis-plus/ServiceImpl.java.ftl")),
    row(R::ServiceImpl, None, None, None, Some("mybatis/ServiceImpl.java.ftl")),
    row(R::Controller, None, None, None, Some("common/Controller.java.ftl")),
];

/// Decision table over artifact roles
#[derive(Debug, Clone)]
pub struct TemplateSelector {
    rules: Vec<TemplateRule>,
}

impl Default for TemplateSelector {
    fn default() -> Self {
        Self::standard()
    }
}

impl TemplateSelector {
    /// Selector with the built-in rows only
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_RULES.to_vec(),
        }
    }

    /// Add a row that takes priority over every row already present
    pub fn with_rule(mut self, rule: TemplateRule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    /// Template for `role` under `stack`; `None` means the artifact is not emitted
    pub fn resolve(&self, role: ArtifactRole, stack: &TechStackConfig) -> Option<TemplateId> {
        first_match(&self.rules, role, stack)
    }
}

/// Resolve against the built-in rows
pub fn resolve_template(role: ArtifactRole, stack: &TechStackConfig) -> Option<TemplateId> {
    first_match(STANDARD_RULES, role, stack)
}

fn first_match(
    rules: &[TemplateRule],
    role: ArtifactRole,
    stack: &TechStackConfig,
) -> Option<TemplateId> {
    rules
        .iter()
        .find(|rule| rule.matches(role, stack))
        .and_then(|rule| rule.template.clone())
}
