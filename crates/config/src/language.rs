// Language packs
// A pack is a JSON document with display metadata and a flat key-to-string
// table. Keys missing from a pack fall back to built-in English at the
// call site.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::json;
use crate::settings::Settings;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Language {
    /// BCP 47 tag, e.g. `vi-VN`
    pub code: String,
    /// Name in the language itself
    pub display_name: String,
    pub english_name: String,
    pub author: String,
    /// Lowest app version the pack was written for
    pub min_app_version: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub items: BTreeMap<String, String>,

    /// Where this pack was loaded from; runtime-only, never persisted
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Language {
    /// Load a language pack from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut language: Language = json::read_file(path)?;
        language.source_path = Some(path.to_path_buf());
        Ok(language)
    }

    /// Write the pack to a JSON file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        json::write_file(path, self)
    }

    /// Translated string for `key`, if the pack has one
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// All readable language packs under the config `languages/` directory
    ///
    /// Unreadable packs are skipped with a warning so one bad file cannot
    /// hide the rest.
    pub fn list_installed() -> Vec<Language> {
        let dir = Settings::config_dir().join("languages");
        let mut result = Vec::new();

        if let Ok(entries) = fs::read_dir(&dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    match Self::load_from(&path) {
                        Ok(language) => result.push(language),
                        Err(e) => {
                            tracing::warn!(
                                "skipping unreadable language pack {}: {e}",
                                path.display()
                            );
                        }
                    }
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Language {
        let mut items = BTreeMap::new();
        items.insert("Menu.File.Open".to_string(), "Mở tệp".to_string());
        items.insert("Menu.File.Exit".to_string(), "Thoát".to_string());
        Language {
            code: "vi-VN".into(),
            display_name: "Tiếng Việt".into(),
            english_name: "Vietnamese".into(),
            author: "Lumina community".into(),
            min_app_version: "1.0".into(),
            items,
            source_path: None,
        }
    }

    #[test]
    fn lookup_hits_and_misses() {
        let language = sample();
        assert_eq!(language.lookup("Menu.File.Open"), Some("Mở tệp"));
        assert_eq!(language.lookup("Menu.File.Print"), None);
    }

    #[test]
    fn file_roundtrip_sets_source_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vi-VN.json");

        let language = sample();
        language.save_to(&path).unwrap();
        let loaded = Language::load_from(&path).unwrap();

        assert_eq!(loaded.source_path.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.items, language.items);
        assert_eq!(loaded.display_name, language.display_name);
    }

    #[test]
    fn source_path_is_never_emitted() {
        let mut language = sample();
        language.source_path = Some(PathBuf::from("/tmp/vi-VN.json"));
        let text = json::to_string_pretty(&language).unwrap();
        assert!(!text.contains("SourcePath"));
        assert!(!text.contains("/tmp/vi-VN.json"));
    }

    #[test]
    fn mixed_case_metadata_parses() {
        let language: Language = json::from_str(
            r#"{
                "code": "de-DE",
                "DISPLAYNAME": "Deutsch",
                "englishname": "German",
                "Items": { "Menu.File.Open": "Öffnen" }
            }"#,
        )
        .unwrap();
        assert_eq!(language.code, "de-DE");
        assert_eq!(language.display_name, "Deutsch");
        assert_eq!(language.lookup("Menu.File.Open"), Some("Öffnen"));
    }

    #[test]
    fn non_ascii_strings_stay_readable_in_output() {
        let text = json::to_string_pretty(&sample()).unwrap();
        assert!(text.contains("Tiếng Việt"));
        assert!(text.contains("Mở tệp"));
    }
}
