//! Andlib Core - Android library module generator
//!
//! This library scaffolds an Android library module from file templates,
//! optionally wired as a Cordova plugin's Android platform target. A
//! `plugin.xml` found in the destination is decoded leniently and mined for
//! the manifest fragment, extra Gradle script and source layout the module
//! should inherit.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Extraction** - Pure decoding of the plugin descriptor and
//!   derivation of the platform configuration (`plugin`)
//! - **Layer 2: Generation** - Template rendering, Gradle patching and source
//!   relocation against a destination directory (`templates`, `gradle`,
//!   `generate`)
//! - **Layer 3: CLI/TUI Interface** - cliclack-based prompts (feature-gated)
//!   plus the hosted Git remote flow (`tui`, `remote`)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use andlib_core::plugin::{self, PlatformConfig};
//!
//! let doc = plugin::decode(&xml)?;
//! let platform = PlatformConfig::extract_android(&doc);
//! if let Some(package) = &platform.package {
//!     println!("library package: {package}");
//! }
//! ```

pub mod generate;
pub mod gradle;
pub mod plugin;
pub mod remote;
pub mod sdk;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use generate::{GeneratorConfig, Language};
pub use plugin::{OneOrMany, PlatformConfig};
pub use remote::{GithubRemote, RemoteProvider};
pub use templates::{copy_template, TemplateManifest, TemplateRenderer};

#[cfg(feature = "tui")]
pub use tui::run;
