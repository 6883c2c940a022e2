//! Module generation: template emission, Gradle patching, manifest merging
//!
//! Everything the prompts collected lands in one immutable [`GeneratorConfig`]
//! that is threaded through the write phases. The phases themselves only touch
//! the destination directory.

use crate::gradle;
use crate::plugin::{document, PlatformConfig};
use crate::templates::{copy_template, TemplateRenderer};
use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use tera::Context as TeraContext;
use tokio::fs;
use walkdir::WalkDir;

/// Directory (relative to the destination) where plugin source files live
pub const PLUGIN_SOURCE_DIR: &str = "src/android";

/// Directory (relative to the destination) receiving the generated module
pub const ANDROID_DIR: &str = "android";

/// Template languages offered by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Java,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Java => "Java",
        }
    }

    /// Template directory under templates/
    pub fn template_dir(&self) -> &'static str {
        match self {
            Language::Java => "java",
        }
    }

    pub fn source_extension(&self) -> &'static str {
        match self {
            Language::Java => "java",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Immutable configuration for one generation run, assembled after prompting
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Library display name, also the generated class name
    pub name: String,
    /// Module directory name (library name lowercased)
    pub module: String,
    /// Java package of the generated library
    pub package: String,
    pub lang: Language,
    pub min_sdk: u32,
    pub target_sdk: u32,
    /// Maven group derived from the selected remote organization
    pub remote_group: Option<String>,
    /// Skip default dependencies in the module build.gradle
    pub exclude_dependencies: bool,
    /// Configuration extracted from plugin.xml (empty when none was found)
    pub platform: PlatformConfig,
}

impl GeneratorConfig {
    /// Build the rendering context shared by every template file
    pub fn template_context(&self) -> TeraContext {
        let mut context = TeraContext::new();
        context.insert("name", &self.name);
        context.insert("module", &self.module);
        context.insert("package", &self.package);
        context.insert("package_path", &self.package.replace('.', "/"));
        context.insert("lang", self.lang.display_name());
        context.insert("min_sdk", &self.min_sdk);
        context.insert("target_sdk", &self.target_sdk);
        context.insert(
            "group",
            self.remote_group.as_deref().unwrap_or(&self.package),
        );

        let dependencies = if self.exclude_dependencies {
            String::new()
        } else {
            self.platform
                .dependencies
                .iter()
                .map(|dep| dep.gradle_line())
                .collect::<Vec<_>>()
                .join("\n    ")
        };
        context.insert("dependencies", &dependencies);
        context.insert("extend_application", "");

        context
    }
}

/// Render the library module into `<dest>/android/<module>`, patch the Gradle
/// settings and wire extracted plugin fragments. Returns the written paths,
/// relative to the module directory.
pub async fn write_module(
    config: &GeneratorConfig,
    renderer: &TemplateRenderer,
    dest_root: &Path,
) -> Result<Vec<String>> {
    let context = config.template_context();
    let template_name = config.lang.template_dir();
    let manifest = renderer.load_manifest(template_name)?;

    let module_dir = dest_root.join(ANDROID_DIR).join(&config.module);
    let written = copy_template(renderer, template_name, &manifest, &module_dir, &context).await?;

    patch_settings(config, dest_root).await?;
    apply_build_extras(config, dest_root, &module_dir).await?;
    extend_app_manifest(config, renderer, dest_root, &context).await?;

    Ok(written)
}

/// Register the module in `<dest>/android/settings.gradle` when present
async fn patch_settings(config: &GeneratorConfig, dest_root: &Path) -> Result<()> {
    let settings_path = dest_root.join(ANDROID_DIR).join(gradle::SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(());
    }

    let settings = fs::read_to_string(&settings_path)
        .await
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    let patched = gradle::include_module(&settings, &config.module);
    fs::write(&settings_path, patched)
        .await
        .with_context(|| format!("Failed to write {}", settings_path.display()))?;

    Ok(())
}

/// Prepend the build-extras guard to the module build.gradle and copy the
/// extras script next to it when the plugin ships one
async fn apply_build_extras(
    config: &GeneratorConfig,
    dest_root: &Path,
    module_dir: &Path,
) -> Result<()> {
    let Some(extra) = &config.platform.gradle_extra else {
        return Ok(());
    };

    let build_gradle_path = module_dir.join("build.gradle");
    let build_gradle = fs::read_to_string(&build_gradle_path)
        .await
        .with_context(|| format!("Failed to read {}", build_gradle_path.display()))?;
    let patched = gradle::prepend_build_extras(&build_gradle, extra.file_name());
    fs::write(&build_gradle_path, patched)
        .await
        .with_context(|| format!("Failed to write {}", build_gradle_path.display()))?;

    let script_source = dest_root.join(&extra.src);
    if script_source.exists() {
        fs::copy(&script_source, module_dir.join(extra.file_name()))
            .await
            .with_context(|| format!("Failed to copy {}", script_source.display()))?;
    }

    Ok(())
}

/// Merge the extracted manifest fragment into the application manifest
/// template and write it to `<dest>/android/app/src/main/AndroidManifest.xml`
async fn extend_app_manifest(
    config: &GeneratorConfig,
    renderer: &TemplateRenderer,
    dest_root: &Path,
    base_context: &TeraContext,
) -> Result<()> {
    let Some(fragment) = &config.platform.manifest_extra else {
        return Ok(());
    };
    if !fragment.extends_application() {
        return Ok(());
    }

    let mut context = base_context.clone();
    context.insert("extend_application", &document::encode_fragment(&fragment.payload));

    let template_name = format!("app/{}", config.lang.template_dir());
    let rendered = renderer.render_file(
        &template_name,
        "app/src/main/AndroidManifest.xml",
        &context,
    )?;

    let manifest_path = dest_root
        .join(ANDROID_DIR)
        .join("app/src/main/AndroidManifest.xml");
    if let Some(parent) = manifest_path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&manifest_path, rendered)
        .await
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(())
}

/// Move plugin sources under the package directory derived from plugin.xml.
///
/// Ensures `<dest>/src/android/<package_path>` exists and copies the loose
/// source files from `<dest>/src/android` into it when the first source file
/// is not already in place. Skipped entirely when no package path could be
/// derived. Returns the copied filenames.
pub async fn normalize_source_files(
    config: &GeneratorConfig,
    dest_root: &Path,
) -> Result<Vec<String>> {
    let Some(package_path) = &config.platform.package_path else {
        return Ok(Vec::new());
    };

    let source_dir = dest_root.join(PLUGIN_SOURCE_DIR);
    let package_dir = source_dir.join(package_path);
    fs::create_dir_all(&package_dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", package_dir.display()))?;

    if let Some(source_file) = &config.platform.source_file {
        if package_dir.join(source_file.file_name()).exists() {
            return Ok(Vec::new());
        }
    }

    let extension = config.lang.source_extension();
    let mut copied = Vec::new();
    for entry in WalkDir::new(&source_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        fs::copy(entry.path(), package_dir.join(&file_name))
            .await
            .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        copied.push(file_name);
    }

    Ok(copied)
}

/// Remove the loose source files left at the top of `src/android` once they
/// have been relocated under the package directory. Returns the removed
/// filenames.
pub async fn cleanup_source_files(
    config: &GeneratorConfig,
    dest_root: &Path,
) -> Result<Vec<String>> {
    let extension = config.lang.source_extension();

    let relocated = match (&config.platform.source_file, &config.platform.package_path) {
        (Some(source_file), Some(package_path)) => {
            source_file.src.ends_with(extension)
                && dest_root
                    .join(PLUGIN_SOURCE_DIR)
                    .join(package_path)
                    .join(source_file.file_name())
                    .exists()
        }
        _ => false,
    };
    if !relocated {
        return Ok(Vec::new());
    }

    let source_dir = dest_root.join(PLUGIN_SOURCE_DIR);
    let mut removed = Vec::new();
    for entry in WalkDir::new(&source_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }
        fs::remove_file(entry.path())
            .await
            .with_context(|| format!("Failed to remove {}", entry.path().display()))?;
        removed.push(entry.file_name().to_string_lossy().to_string());
    }

    Ok(removed)
}
