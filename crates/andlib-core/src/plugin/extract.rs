//! Platform configuration extraction from a decoded plugin descriptor
//!
//! Pulls the Android-specific build integration out of a `plugin.xml`-shaped
//! document: the manifest fragment to merge, the extra Gradle script to apply,
//! the first source file and the package derived from its target directory.
//!
//! Extraction is pure and total. A missing platform entry yields an empty
//! record; malformed entries are skipped field by field, never raised as
//! errors. Every repeatable field is normalized through
//! [`OneOrMany`](super::document::OneOrMany) before any selection predicate
//! runs, so single-object and sequence shapes behave identically.

use super::document::OneOrMany;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Platform identifier this generator targets
pub const ANDROID_PLATFORM: &str = "android";

/// Manifest filename a `config-file` entry must target to be selected
pub const MANIFEST_FILENAME: &str = "AndroidManifest.xml";

/// File extension a `framework` entry must carry to count as a build script
pub const GRADLE_EXTENSION: &str = ".gradle";

/// Leading path segment stripped from `target-dir` when deriving the package
pub const SOURCE_PREFIX: &str = "src/";

/// A Gradle dependency rendered into the library module's build.gradle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub coordinate: String,
}

impl Dependency {
    /// Default runtime dependency for a Cordova plugin's Android target
    pub fn cordova_android() -> Self {
        Self {
            name: "cordova-android".to_string(),
            coordinate: "com.github.mfdeveloper:cordova-android:7.1.1".to_string(),
        }
    }

    /// Render as a build.gradle dependency declaration
    pub fn gradle_line(&self) -> String {
        format!("implementation '{}'", self.coordinate)
    }
}

/// A `config-file` entry targeting the Android manifest; `payload` carries the
/// attribute/child structure to merge under the parent element
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManifestFragment {
    pub target: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ManifestFragment {
    /// Last concrete segment of the `parent` XPath, falling back to
    /// `application` when the path ends in a wildcard or is absent
    pub fn parent_tag(&self) -> &str {
        self.parent
            .as_deref()
            .and_then(|parent| {
                parent
                    .rsplit('/')
                    .find(|segment| !segment.is_empty() && *segment != "*")
            })
            .unwrap_or("application")
    }

    /// Whether this fragment extends the application element
    pub fn extends_application(&self) -> bool {
        self.parent
            .as_deref()
            .is_some_and(|parent| parent.contains("application"))
    }
}

/// A `framework` entry pointing at an extra Gradle build script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildScriptFragment {
    pub src: String,
}

impl BuildScriptFragment {
    /// Script filename without its directory part
    pub fn file_name(&self) -> &str {
        self.src.rsplit('/').next().unwrap_or(&self.src)
    }
}

/// A `source-file` entry: origin path plus destination package path hint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceFileRef {
    pub src: String,
    #[serde(default, rename = "target-dir")]
    pub target_dir: Option<String>,
}

impl SourceFileRef {
    /// Source filename without its directory part
    pub fn file_name(&self) -> &str {
        self.src.rsplit('/').next().unwrap_or(&self.src)
    }
}

/// Normalized Android platform configuration extracted from a plugin
/// descriptor. All fields are absent when the platform entry is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformConfig {
    pub dependencies: Vec<Dependency>,
    pub manifest_extra: Option<ManifestFragment>,
    pub gradle_extra: Option<BuildScriptFragment>,
    pub source_file: Option<SourceFileRef>,
    pub package_path: Option<String>,
    pub package: Option<String>,
}

impl PlatformConfig {
    /// Extract the configuration for `platform_name` from a decoded document.
    ///
    /// Never fails: a document without a matching platform entry yields
    /// `PlatformConfig::default()`, and entries that do not deserialize are
    /// skipped individually.
    pub fn extract(doc: &Value, platform_name: &str) -> Self {
        let Some(plugin) = doc.get("plugin") else {
            return Self::default();
        };

        let platforms = entries(plugin, "platform");
        let Some(platform) = platforms
            .iter()
            .find(|p| p.get("name").and_then(Value::as_str) == Some(platform_name))
        else {
            return Self::default();
        };

        let manifest_extra = entries(platform, "config-file")
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<ManifestFragment>(entry).ok())
            .find(|fragment| fragment.target == MANIFEST_FILENAME);

        let gradle_extra = entries(platform, "framework")
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<BuildScriptFragment>(entry).ok())
            .find(|framework| framework.src.ends_with(GRADLE_EXTENSION));

        let source_file = entries(platform, "source-file")
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<SourceFileRef>(entry).ok())
            .next();

        let package_path = source_file
            .as_ref()
            .and_then(|source| source.target_dir.as_deref())
            .map(|dir| dir.strip_prefix(SOURCE_PREFIX).unwrap_or(dir).to_string());
        let package = package_path.as_ref().map(|path| path.replace('/', "."));

        Self {
            dependencies: vec![Dependency::cordova_android()],
            manifest_extra,
            gradle_extra,
            source_file,
            package_path,
            package,
        }
    }

    /// Extract the Android platform configuration
    pub fn extract_android(doc: &Value) -> Self {
        Self::extract(doc, ANDROID_PLATFORM)
    }

    /// Whether any platform entry was found at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Normalize a repeatable field to an ordered sequence of raw values.
/// Missing fields and scalar garbage both come back as an empty sequence.
fn entries(parent: &Value, key: &str) -> Vec<Value> {
    match parent.get(key) {
        Some(value) => serde_json::from_value::<OneOrMany<Value>>(value.clone())
            .map(OneOrMany::into_vec)
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::document;
    use serde_json::json;

    fn doc_with_platform(platform: Value) -> Value {
        json!({ "plugin": { "platform": platform } })
    }

    #[test]
    fn test_missing_platform_yields_empty_record() {
        let doc = doc_with_platform(json!({ "name": "ios" }));
        let config = PlatformConfig::extract_android(&doc);
        assert!(config.is_empty());
        assert!(config.dependencies.is_empty());
    }

    #[test]
    fn test_document_without_plugin_root_yields_empty_record() {
        assert!(PlatformConfig::extract_android(&json!({})).is_empty());
        assert!(PlatformConfig::extract_android(&json!(null)).is_empty());
    }

    #[test]
    fn test_platform_found_populates_default_dependency() {
        let doc = doc_with_platform(json!({ "name": "android" }));
        let config = PlatformConfig::extract_android(&doc);
        assert_eq!(config.dependencies, vec![Dependency::cordova_android()]);
        assert_eq!(
            config.dependencies[0].gradle_line(),
            "implementation 'com.github.mfdeveloper:cordova-android:7.1.1'"
        );
    }

    #[test]
    fn test_platform_list_is_searched_by_name() {
        let doc = doc_with_platform(json!([
            { "name": "ios" },
            { "name": "android", "source-file": { "src": "src/android/Lib.java" } },
        ]));
        let config = PlatformConfig::extract_android(&doc);
        assert_eq!(config.source_file.unwrap().src, "src/android/Lib.java");
    }

    #[test]
    fn test_single_config_file_matching_predicate_is_selected() {
        let doc = doc_with_platform(json!({
            "name": "android",
            "config-file": {
                "target": "AndroidManifest.xml",
                "parent": "/manifest/application",
                "meta-data": { "android:name": "key", "android:value": "v" }
            }
        }));
        let config = PlatformConfig::extract_android(&doc);
        let fragment = config.manifest_extra.unwrap();
        assert_eq!(fragment.target, MANIFEST_FILENAME);
        assert!(fragment.payload.contains_key("meta-data"));
    }

    #[test]
    fn test_single_config_file_failing_predicate_is_not_selected() {
        // The predicate applies to the single-object shape too, not just to
        // sequences.
        let doc = doc_with_platform(json!({
            "name": "android",
            "config-file": { "target": "config.xml", "parent": "/widget" }
        }));
        let config = PlatformConfig::extract_android(&doc);
        assert!(config.manifest_extra.is_none());
    }

    #[test]
    fn test_config_file_sequence_selects_first_manifest_target() {
        let doc = doc_with_platform(json!({
            "name": "android",
            "config-file": [
                { "target": "res/xml/config.xml", "parent": "/*" },
                { "target": "AndroidManifest.xml", "parent": "/manifest" },
                { "target": "AndroidManifest.xml", "parent": "/manifest/application" },
            ]
        }));
        let config = PlatformConfig::extract_android(&doc);
        assert_eq!(config.manifest_extra.unwrap().parent.as_deref(), Some("/manifest"));
    }

    #[test]
    fn test_gradle_framework_selected_regardless_of_position() {
        let doc = doc_with_platform(json!({
            "name": "android",
            "framework": [
                { "src": "com.google.android.gms:play-services:11.0.1" },
                { "src": "src/android/build-extras.gradle", "custom": "true", "type": "gradleReference" },
                { "src": "com.android.support:support-v4:27.1.0" },
            ]
        }));
        let config = PlatformConfig::extract_android(&doc);
        let framework = config.gradle_extra.unwrap();
        assert_eq!(framework.src, "src/android/build-extras.gradle");
        assert_eq!(framework.file_name(), "build-extras.gradle");
    }

    #[test]
    fn test_single_framework_failing_suffix_test_is_not_selected() {
        let doc = doc_with_platform(json!({
            "name": "android",
            "framework": { "src": "com.android.support:support-v4:27.1.0" }
        }));
        let config = PlatformConfig::extract_android(&doc);
        assert!(config.gradle_extra.is_none());
    }

    #[test]
    fn test_first_of_three_source_files_is_selected() {
        let doc = doc_with_platform(json!({
            "name": "android",
            "source-file": [
                { "src": "src/android/First.java", "target-dir": "src/com/example/lib" },
                { "src": "src/android/Second.java", "target-dir": "src/com/example/lib" },
                { "src": "src/android/Third.java", "target-dir": "src/com/example/lib" },
            ]
        }));
        let config = PlatformConfig::extract_android(&doc);
        assert_eq!(config.source_file.unwrap().src, "src/android/First.java");
    }

    #[test]
    fn test_package_derivation_strips_prefix_and_dots_path() {
        let doc = doc_with_platform(json!({
            "name": "android",
            "source-file": { "src": "src/android/Lib.java", "target-dir": "src/com/example/lib" }
        }));
        let config = PlatformConfig::extract_android(&doc);
        assert_eq!(config.package_path.as_deref(), Some("com/example/lib"));
        assert_eq!(config.package.as_deref(), Some("com.example.lib"));
    }

    #[test]
    fn test_missing_source_file_leaves_package_fields_absent() {
        let doc = doc_with_platform(json!({
            "name": "android",
            "config-file": { "target": "AndroidManifest.xml", "parent": "/manifest/application" }
        }));
        let config = PlatformConfig::extract_android(&doc);
        assert!(config.source_file.is_none());
        assert!(config.package_path.is_none());
        assert!(config.package.is_none());
    }

    #[test]
    fn test_source_file_without_target_dir_is_tolerated() {
        let doc = doc_with_platform(json!({
            "name": "android",
            "source-file": { "src": "src/android/Lib.java" }
        }));
        let config = PlatformConfig::extract_android(&doc);
        assert!(config.source_file.is_some());
        assert!(config.package.is_none());
    }

    #[test]
    fn test_malformed_entries_are_skipped_not_fatal() {
        let doc = doc_with_platform(json!({
            "name": "android",
            "config-file": "not-an-object",
            "framework": 42,
            "source-file": [17, { "src": "src/android/Lib.java", "target-dir": "src/com/x" }]
        }));
        let config = PlatformConfig::extract_android(&doc);
        assert!(config.manifest_extra.is_none());
        assert!(config.gradle_extra.is_none());
        // First well-formed entry wins once garbage is skipped.
        assert_eq!(config.source_file.unwrap().src, "src/android/Lib.java");
        assert_eq!(config.package.as_deref(), Some("com.x"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let doc = doc_with_platform(json!({
            "name": "android",
            "config-file": { "target": "AndroidManifest.xml", "parent": "/manifest/application" },
            "framework": { "src": "src/android/extras.gradle" },
            "source-file": { "src": "src/android/Lib.java", "target-dir": "src/com/example/lib" }
        }));
        let first = PlatformConfig::extract_android(&doc);
        let second = PlatformConfig::extract_android(&doc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parent_tag_takes_last_concrete_segment() {
        let fragment = |parent: Option<&str>| ManifestFragment {
            target: MANIFEST_FILENAME.to_string(),
            parent: parent.map(str::to_string),
            payload: Map::new(),
        };
        assert_eq!(fragment(Some("/manifest/application")).parent_tag(), "application");
        assert_eq!(fragment(Some("/manifest/application/*")).parent_tag(), "application");
        assert_eq!(fragment(Some("/manifest")).parent_tag(), "manifest");
        assert_eq!(fragment(None).parent_tag(), "application");
    }

    #[test]
    fn test_extract_from_decoded_xml_end_to_end() {
        let doc = document::decode(
            r#"<plugin xmlns:android="http://schemas.android.com/apk/res/android" id="cordova-plugin-device">
                 <platform name="android">
                   <config-file target="AndroidManifest.xml" parent="/manifest/application">
                     <meta-data android:name="com.example.KEY" android:value="secret"/>
                   </config-file>
                   <framework src="src/android/build-extras.gradle" custom="true" type="gradleReference"/>
                   <source-file src="src/android/Device.java" target-dir="src/org/apache/cordova/device"/>
                 </platform>
               </plugin>"#,
        )
        .unwrap();
        let config = PlatformConfig::extract_android(&doc);
        assert_eq!(config.package.as_deref(), Some("org.apache.cordova.device"));
        assert_eq!(config.package_path.as_deref(), Some("org/apache/cordova/device"));
        assert!(config.manifest_extra.as_ref().unwrap().extends_application());
        assert_eq!(
            config.gradle_extra.as_ref().unwrap().file_name(),
            "build-extras.gradle"
        );
        assert_eq!(config.source_file.unwrap().file_name(), "Device.java");
    }
}
