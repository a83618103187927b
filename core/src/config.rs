//! Translator configuration, adapted from the teacher's RON-backed
//! `logic::swanson::Settings`.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The one tunable the original `Document` constructor exposes
/// (`Document(size_t spacesPerTab)`): how many columns a tab character
/// expands to once the line has left its leading whitespace. The leading
/// whitespace itself always expands to 4-column stops, per the Markdown
/// format's own requirement — see `reader::expand_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub spaces_per_tab: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self { spaces_per_tab: DEFAULT_SPACES_PER_TAB }
    }
}

/// `Document::cDefaultSpacesPerTab` in the original.
pub const DEFAULT_SPACES_PER_TAB: usize = 4;

/// `Document::cSpacesPerInitialTab` — required by the Markdown format
/// itself, not configurable.
pub const SPACES_PER_INITIAL_TAB: usize = 4;

impl TranslatorConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        ron::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn smoke_test_default_spaces_per_tab() {
        assert_eq!(TranslatorConfig::default().spaces_per_tab, 4);
    }

    #[test]
    fn smoke_test_round_trip_through_ron() {
        let file = NamedTempFile::new().unwrap();
        let cfg = TranslatorConfig { spaces_per_tab: 8 };
        cfg.save_to_file(file.path()).unwrap();
        let loaded = TranslatorConfig::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, cfg);
    }
}
