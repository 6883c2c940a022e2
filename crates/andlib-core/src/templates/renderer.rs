//! Template rendering rooted at a templates directory

use super::manifest::TemplateManifest;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tera::{Context as TeraContext, Tera};

/// Manifest filename inside each template directory
pub const TEMPLATE_MANIFEST: &str = "template.yaml";

/// Renders template files and destination paths with one-off tera templates
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    root: PathBuf,
}

impl TemplateRenderer {
    /// Create a renderer rooted at a templates directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Templates root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the manifest for a named template
    pub fn load_manifest(&self, template_name: &str) -> Result<TemplateManifest> {
        let manifest_path = self.root.join(template_name).join(TEMPLATE_MANIFEST);
        let content = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse template '{}' manifest", template_name))
    }

    /// Render one template file's content
    pub fn render_file(
        &self,
        template_name: &str,
        source: &str,
        context: &TeraContext,
    ) -> Result<String> {
        let source_path = self.root.join(template_name).join(source);
        let raw = std::fs::read_to_string(&source_path)
            .with_context(|| format!("Failed to read {}", source_path.display()))?;
        Tera::one_off(&raw, context, false)
            .with_context(|| format!("Failed to render template file '{}'", source))
    }

    /// Render a destination path, which may itself contain placeholders
    pub fn render_path(&self, dest: &str, context: &TeraContext) -> Result<String> {
        Tera::one_off(dest, context, false)
            .with_context(|| format!("Failed to render destination path '{}'", dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn renderer_with_template(files: &[(&str, &str)]) -> (tempfile::TempDir, TemplateRenderer) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path = dir.path().join("java").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let renderer = TemplateRenderer::new(dir.path());
        (dir, renderer)
    }

    #[test]
    fn test_render_file_substitutes_context() {
        let (_dir, renderer) = renderer_with_template(&[(
            "src/main/java/Lib.java",
            "package {{ package }};\n\npublic class {{ name }} {\n}\n",
        )]);

        let mut context = TeraContext::new();
        context.insert("package", "com.example.mylib");
        context.insert("name", "MyLib");

        let rendered = renderer
            .render_file("java", "src/main/java/Lib.java", &context)
            .unwrap();
        assert_eq!(
            rendered,
            "package com.example.mylib;\n\npublic class MyLib {\n}\n"
        );
    }

    #[test]
    fn test_render_path_substitutes_placeholders() {
        let (_dir, renderer) = renderer_with_template(&[]);
        let mut context = TeraContext::new();
        context.insert("package_path", "com/example/mylib");
        context.insert("name", "MyLib");

        let rendered = renderer
            .render_path("src/main/java/{{ package_path }}/{{ name }}.java", &context)
            .unwrap();
        assert_eq!(rendered, "src/main/java/com/example/mylib/MyLib.java");
    }

    #[test]
    fn test_load_manifest_missing_template_is_an_error() {
        let (_dir, renderer) = renderer_with_template(&[]);
        assert!(renderer.load_manifest("kotlin").is_err());
    }
}
