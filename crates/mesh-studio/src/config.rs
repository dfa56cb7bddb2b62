use std::path::PathBuf;

use mesh_model::PackingMode;

/// Environment variable selecting the legacy uniform packing.
pub const LEGACY_PACKING_VAR: &str = "MESH_LEGACY_PACKING";
/// Environment variable naming the preset to start from.
pub const PRESET_VAR: &str = "MESH_PRESET";

/// Studio settings.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub packing: PackingMode,
    /// Directory the SVG and PNG exports are written to.
    pub export_dir: PathBuf,
    /// PNG export size in pixels.
    pub png_size: (u32, u32),
    /// Starting preset; `None` starts from the built-in three points.
    pub preset: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            packing: PackingMode::Dedicated,
            export_dir: PathBuf::from("."),
            png_size: (1200, 1200),
            preset: None,
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(v) = lookup(LEGACY_PACKING_VAR) {
            if is_truthy(&v) {
                config.packing = PackingMode::Legacy;
            } else {
                log::debug!("{LEGACY_PACKING_VAR}={v:?} ignored");
            }
        }
        config.preset = lookup(PRESET_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        config
    }
}

fn is_truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
