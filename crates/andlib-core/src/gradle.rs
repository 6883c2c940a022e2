//! Gradle file patching: settings inclusion and build-extras wiring

/// Gradle settings file patched at the destination root
pub const SETTINGS_FILE: &str = "settings.gradle";

/// Append a library module to an `include` line in a settings.gradle body.
/// Idempotent: a module that is already listed is not appended twice.
pub fn include_module(settings: &str, module: &str) -> String {
    let entry = format!(":'{}'", module);
    if settings.contains(&entry) {
        return settings.to_string();
    }
    format!("{}, {}", settings, entry)
}

/// Guard block that applies an extra build script only when it exists next to
/// the module's build.gradle
pub fn build_extras_header(script_name: &str) -> String {
    format!(
        "def hasBuildExtras = file('{script}').exists()\n\
         if (hasBuildExtras) {{\n\
         \tapply from: '{script}'\n\
         }}\n",
        script = script_name
    )
}

/// Prepend the build-extras guard to a module build.gradle body
pub fn prepend_build_extras(build_gradle: &str, script_name: &str) -> String {
    format!("{}\n{}", build_extras_header(script_name), build_gradle)
}
