//! Template manifests, rendering and copying

pub mod copier;
pub mod manifest;
pub mod renderer;

pub use copier::copy_template;
pub use manifest::{TemplateFile, TemplateManifest};
pub use renderer::{TemplateRenderer, TEMPLATE_MANIFEST};
