//! Template rendering boundary

use std::path::{Path, PathBuf};

use minijinja::{path_loader, AutoEscape, Environment, UndefinedBehavior};
use tracing::debug;

use super::model::TemplateModel;
use super::template_selector::TemplateId;
use crate::error::{CodegenError, Result};

/// Turns a model into file content. Template bodies are owned by the implementation.
pub trait Renderer {
    fn render(&self, model: &TemplateModel<'_>, template: &TemplateId) -> Result<String>;
}

impl<F> Renderer for F
where
    F: Fn(&TemplateModel<'_>, &TemplateId) -> Result<String>,
{
    fn render(&self, model: &TemplateModel<'_>, template: &TemplateId) -> Result<String> {
        self(model, template)
    }
}

/// Renderer backed by a directory of templates; the template id is the relative path
/// inside that directory (`mybatis/Entity.java.ftl`).
pub struct TemplateDirRenderer {
    env: Environment<'static>,
    root: PathBuf,
}

impl TemplateDirRenderer {
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(CodegenError::ConfigError(format!(
                "Templates directory not found: {}",
                root.display()
            )));
        }

        let mut env = Environment::new();
        env.set_loader(path_loader(&root));
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        // generated sources are not HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);

        debug!("Loading templates from {}", root.display());
        Ok(Self { env, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Renderer for TemplateDirRenderer {
    fn render(&self, model: &TemplateModel<'_>, template: &TemplateId) -> Result<String> {
        let tmpl = self
            .env
            .get_template(template.as_str())
            .map_err(|e| render_error(template, e))?;
        tmpl.render(model).map_err(|e| render_error(template, e))
    }
}

fn render_error(template: &TemplateId, err: minijinja::Error) -> CodegenError {
    CodegenError::RenderError {
        template: template.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProjectMetadata, TechStackConfig};
    use crate::error::ErrorKind;
    use std::fs;

    fn project() -> ProjectMetadata {
        ProjectMetadata::new("order-center", "com.acme.order", "/tmp", TechStackConfig::default())
    }

    #[test]
    fn test_render_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("common")).unwrap();
        fs::write(
            dir.path().join("common/Application.java.ftl"),
            "package {{ packageName }};\n\npublic class {{ className }}Application {}\n",
        )
        .unwrap();

        let renderer = TemplateDirRenderer::from_dir(dir.path()).unwrap();
        let project = project();
        let model = TemplateModel::for_project(&project);
        let out = renderer
            .render(&model, &TemplateId::from_static("common/Application.java.ftl"))
            .unwrap();
        assert_eq!(
            out,
            "package com.acme.order;\n\npublic class OrderCenterApplication {}\n"
        );
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateDirRenderer::from_dir(dir.path()).unwrap();
        let project = project();
        let model = TemplateModel::for_project(&project);
        let err = renderer
            .render(&model, &TemplateId::from_static("jpa/Entity.java.ftl"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Render);
        assert!(err.to_string().contains("jpa/Entity.java.ftl"));
    }

    #[test]
    fn test_undefined_variable_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.ftl"), "{{ noSuchField }}").unwrap();
        let renderer = TemplateDirRenderer::from_dir(dir.path()).unwrap();
        let project = project();
        let model = TemplateModel::for_project(&project);
        assert!(renderer
            .render(&model, &TemplateId::from_static("bad.ftl"))
            .is_err());
    }

    #[test]
    fn test_missing_dir() {
        assert!(TemplateDirRenderer::from_dir("/definitely/not/here").is_err());
    }

    #[test]
    fn test_closure_renderer() {
        let renderer = |model: &TemplateModel<'_>, template: &TemplateId| -> Result<String> {
            Ok(format!("{}:{}", template, model.class_name))
        };
        let project = project();
        let model = TemplateModel::for_project(&project);
        let out = renderer
            .render(&model, &TemplateId::from_static("x.ftl"))
            .unwrap();
        assert_eq!(out, "x.ftl:OrderCenter");
    }
}
