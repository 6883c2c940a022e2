//! Template file copying into the destination module

use super::manifest::TemplateManifest;
use super::renderer::TemplateRenderer;
use anyhow::{Context, Result};
use std::path::Path;
use tera::Context as TeraContext;
use tokio::fs;

/// Render every manifest file into the target directory, returning the
/// relative paths that were written.
pub async fn copy_template(
    renderer: &TemplateRenderer,
    template_name: &str,
    manifest: &TemplateManifest,
    target_dir: &Path,
    context: &TeraContext,
) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut copied_files = Vec::new();

    for file in &manifest.files {
        let content = renderer.render_file(template_name, &file.source, context)?;
        let dest = renderer.render_path(file.destination(), context)?;

        let target_path = target_dir.join(&dest);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&target_path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        copied_files.push(dest);
    }

    Ok(copied_files)
}
