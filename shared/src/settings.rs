//! Application settings, adapted from the teacher project's
//! `logic::settings_struct::Settings` (field shape) and `logic::swanson`
//! (RON load/save). Scaled down to what a thin preview shell actually
//! needs: editor tab width (feeds straight into `core::TranslatorConfig`),
//! window geometry, and a recent-files list.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use core::TranslatorConfig;
use serde::{Deserialize, Serialize};

/// Editor-facing settings. Only `spaces_per_tab` has any bearing on
/// translator output; the rest is display-only state the host persists
/// between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EditorSettings {
    pub spaces_per_tab: Option<usize>,
    pub word_wrap: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WindowSettings {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub maximized: Option<bool>,
}

/// Top-level settings document, mirroring the teacher's nested-`Option`
/// shape so an old settings file missing newer fields still deserializes
/// (each section defaults rather than failing the whole load).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub editor: Option<EditorSettings>,
    pub window: Option<WindowSettings>,
    pub recent_files: Vec<PathBuf>,
}

const MAX_RECENT_FILES: usize = 10;

impl Settings {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Settings::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        ron::from_str(&text).with_context(|| format!("parsing settings file {}", path.display()))
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating settings directory {}", parent.display()))?;
        }
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("serializing settings")?;
        fs::write(path, text).with_context(|| format!("writing settings file {}", path.display()))
    }

    /// Moves `path` to the front of the recent-files list, deduplicating
    /// and capping the list, matching the teacher's `RecentFiles::add_file`
    /// ordering behavior.
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    pub fn clear_recent_files(&mut self) {
        self.recent_files.clear();
    }

    /// Builds the `TranslatorConfig` this settings document implies,
    /// falling back to the translator's own default when unset.
    pub fn translator_config(&self) -> TranslatorConfig {
        let spaces_per_tab = self
            .editor
            .as_ref()
            .and_then(|e| e.spaces_per_tab)
            .unwrap_or(TranslatorConfig::default().spaces_per_tab);
        TranslatorConfig { spaces_per_tab }
    }
}

/// Default location for the settings file, mirroring the teacher's use of
/// `dirs::config_dir` for a per-user config path.
pub fn default_settings_path(app_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(app_name).join("settings.ron"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn smoke_test_missing_file_yields_default() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from_file(dir.path().join("nope.ron")).unwrap();
        assert!(settings.editor.is_none());
    }

    #[test]
    fn smoke_test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ron");
        let mut settings = Settings::default();
        settings.editor = Some(EditorSettings { spaces_per_tab: Some(8), word_wrap: Some(true) });
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded.editor.unwrap().spaces_per_tab, Some(8));
    }

    #[test]
    fn smoke_test_recent_files_dedup_and_reorder() {
        let mut settings = Settings::default();
        settings.add_recent_file(PathBuf::from("/a.md"));
        settings.add_recent_file(PathBuf::from("/b.md"));
        settings.add_recent_file(PathBuf::from("/a.md"));
        assert_eq!(settings.recent_files, vec![PathBuf::from("/a.md"), PathBuf::from("/b.md")]);
    }

    #[test]
    fn smoke_test_recent_files_caps_at_max() {
        let mut settings = Settings::default();
        for i in 0..(MAX_RECENT_FILES + 5) {
            settings.add_recent_file(PathBuf::from(format!("/{i}.md")));
        }
        assert_eq!(settings.recent_files.len(), MAX_RECENT_FILES);
    }

    #[test]
    fn smoke_test_translator_config_falls_back_to_default() {
        let settings = Settings::default();
        assert_eq!(settings.translator_config().spaces_per_tab, TranslatorConfig::default().spaces_per_tab);
    }
}
