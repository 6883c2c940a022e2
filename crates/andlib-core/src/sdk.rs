//! Android SDK version catalog for the min/target SDK prompts

/// One Android release as offered in the SDK selection prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdkVersion {
    pub api: u32,
    pub version: &'static str,
    pub name: &'static str,
}

impl SdkVersion {
    /// Prompt label, e.g. `API 19: Android 4.4 (KitKat)`
    pub fn label(&self) -> String {
        format!("API {}: Android {} ({})", self.api, self.version, self.name)
    }
}

/// Lowest API level offered in the prompts
pub const MIN_SUPPORTED_API: u32 = 14;

/// Default minimum SDK preselected in the prompt
pub const DEFAULT_MIN_API: u32 = 19;

// Ordered by API level; the last entry doubles as the default target SDK.
const VERSIONS: &[SdkVersion] = &[
    SdkVersion { api: 14, version: "4.0.3", name: "Ice Cream Sandwich" },
    SdkVersion { api: 15, version: "4.0.4", name: "Ice Cream Sandwich" },
    SdkVersion { api: 16, version: "4.1", name: "Jelly Bean" },
    SdkVersion { api: 17, version: "4.2", name: "Jelly Bean" },
    SdkVersion { api: 18, version: "4.3", name: "Jelly Bean" },
    SdkVersion { api: 19, version: "4.4", name: "KitKat" },
    SdkVersion { api: 21, version: "5.0", name: "Lollipop" },
    SdkVersion { api: 22, version: "5.1", name: "Lollipop" },
    SdkVersion { api: 23, version: "6.0", name: "Marshmallow" },
    SdkVersion { api: 24, version: "7.0", name: "Nougat" },
    SdkVersion { api: 25, version: "7.1", name: "Nougat" },
    SdkVersion { api: 26, version: "8.0", name: "Oreo" },
    SdkVersion { api: 27, version: "8.1", name: "Oreo" },
    SdkVersion { api: 28, version: "9.0", name: "Pie" },
    SdkVersion { api: 29, version: "10", name: "Q" },
    SdkVersion { api: 30, version: "11", name: "R" },
    SdkVersion { api: 31, version: "12", name: "S" },
    SdkVersion { api: 32, version: "12L", name: "Sv2" },
    SdkVersion { api: 33, version: "13", name: "Tiramisu" },
    SdkVersion { api: 34, version: "14", name: "Upside Down Cake" },
    SdkVersion { api: 35, version: "15", name: "Vanilla Ice Cream" },
];

/// All selectable SDK versions, ordered by API level
pub fn versions() -> &'static [SdkVersion] {
    VERSIONS
}

/// Look up a version by API level
pub fn by_api(api: u32) -> Option<&'static SdkVersion> {
    VERSIONS.iter().find(|version| version.api == api)
}

/// Newest catalogued release, used as the default target SDK
pub fn latest() -> &'static SdkVersion {
    VERSIONS
        .last()
        .expect("SDK version catalog must not be empty")
}
