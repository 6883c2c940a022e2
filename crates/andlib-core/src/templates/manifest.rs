//! Template manifest types and parsing

use serde::{Deserialize, Serialize};

/// One file shipped by a template. Both the content and the destination path
/// go through the renderer, so `dest` may contain placeholders like
/// `{{ package_path }}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Source path relative to the template directory
    pub source: String,

    /// Destination path in the generated module (defaults to source)
    #[serde(default)]
    pub dest: Option<String>,
}

impl TemplateFile {
    /// Get the destination path (falls back to source if dest not specified)
    pub fn destination(&self) -> &str {
        self.dest.as_deref().unwrap_or(&self.source)
    }
}

/// Per-template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Files to render into the destination
    pub files: Vec<TemplateFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_falls_back_to_source() {
        let file = TemplateFile {
            source: "build.gradle".to_string(),
            dest: None,
        };
        assert_eq!(file.destination(), "build.gradle");
    }

    #[test]
    fn test_manifest_parses_source_dest_entries() {
        let manifest: TemplateManifest = serde_yaml::from_str(
            r#"
name: Java library
description: Android library module (Java)
files:
  - source: build.gradle
  - source: src/main/java/Lib.java
    dest: src/main/java/{{ package_path }}/{{ name }}.java
"#,
        )
        .unwrap();
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.files[0].destination(), "build.gradle");
        assert_eq!(
            manifest.files[1].destination(),
            "src/main/java/{{ package_path }}/{{ name }}.java"
        );
    }
}
