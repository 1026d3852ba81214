//! CLI settings, persisted as TOML in the user's config directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory containing heroes.json and items.json
    pub catalog_dir: PathBuf,
    /// Directory of announcement TOML files
    pub changelogs_dir: PathBuf,
    /// Output directory for classified changelog JSON
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("patchlog");
        Self {
            catalog_dir: base.join("catalog"),
            changelogs_dir: base.join("changelogs"),
            output_dir: base.join("dist"),
        }
    }
}

/// Load settings, falling back to defaults when the file is missing or
/// unreadable.
pub fn load() -> Settings {
    match confy::load("patchlog", "settings") {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load settings, using defaults");
            Settings::default()
        }
    }
}
