//! Plugin descriptor decoding and platform configuration extraction

pub mod document;
pub mod extract;

pub use document::{decode, encode_fragment, DocumentError, OneOrMany};
pub use extract::{
    BuildScriptFragment, Dependency, ManifestFragment, PlatformConfig, SourceFileRef,
    ANDROID_PLATFORM, GRADLE_EXTENSION, MANIFEST_FILENAME, SOURCE_PREFIX,
};

/// Name of the plugin descriptor file looked up in the destination directory
pub const PLUGIN_DESCRIPTOR: &str = "plugin.xml";
