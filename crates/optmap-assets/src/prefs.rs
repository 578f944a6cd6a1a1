//! Persisted user preferences.
//!
//! Stored as a flat JSON object of string keys to enum names, e.g.
//! `{"CombineMode": "General", "OutputFormat": "PNG"}`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use optmap_texture::OutputFormat;

use crate::naming::CombineMode;
use crate::Result;

/// Key holding the selected [`OutputFormat`].
pub const OUTPUT_FORMAT_KEY: &str = "OutputFormat";

/// Key holding the selected [`CombineMode`].
pub const COMBINE_MODE_KEY: &str = "CombineMode";

/// User-facing parameters remembered between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub output_format: OutputFormat,
    pub combine_mode: CombineMode,
}

impl Preferences {
    /// Default location, `<config dir>/optmap/preferences.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("optmap").join("preferences.json"))
    }

    /// Load preferences, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_map(&read_map(path)?))
    }

    /// Save preferences, keeping any other keys already in the file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut map = read_map(path)?;
        map.extend(self.to_map());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(&map)?)?;
        log::debug!("saved preferences to {}", path.display());
        Ok(())
    }

    /// Build preferences from stored key-value pairs.
    ///
    /// Missing keys take their default; unparsable values are logged and
    /// also take their default.
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            output_format: parse_or_default(map, OUTPUT_FORMAT_KEY),
            combine_mode: parse_or_default(map, COMBINE_MODE_KEY),
        }
    }

    /// Key-value pairs to persist.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (OUTPUT_FORMAT_KEY.to_string(), self.output_format.to_string()),
            (COMBINE_MODE_KEY.to_string(), self.combine_mode.to_string()),
        ])
    }
}

fn read_map(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.is_file() {
        return Ok(BTreeMap::new());
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn parse_or_default<T>(map: &BTreeMap<String, String>, key: &str) -> T
where
    T: std::str::FromStr + Default,
{
    match map.get(key).map(String::as_str) {
        None | Some("") => T::default(),
        Some(value) => value.parse().unwrap_or_else(|_| {
            log::warn!("ignoring invalid preference {}={}", key, value);
            T::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(&dir.path().join("none.json")).unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.output_format, OutputFormat::Auto);
        assert_eq!(prefs.combine_mode, CombineMode::BaseOptMap);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("preferences.json");
        let prefs = Preferences {
            output_format: OutputFormat::Png,
            combine_mode: CombineMode::General,
        };

        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load(&path).unwrap(), prefs);

        let stored: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.get(OUTPUT_FORMAT_KEY).map(String::as_str), Some("PNG"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let map = BTreeMap::from([
            (OUTPUT_FORMAT_KEY.to_string(), "webp".to_string()),
            (COMBINE_MODE_KEY.to_string(), "general".to_string()),
        ]);
        let prefs = Preferences::from_map(&map);
        assert_eq!(prefs.output_format, OutputFormat::Auto);
        assert_eq!(prefs.combine_mode, CombineMode::General);
    }

    #[test]
    fn test_save_keeps_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"Theme": "dark"}"#).unwrap();

        Preferences::default().save(&path).unwrap();

        let stored: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.get("Theme").map(String::as_str), Some("dark"));
        assert_eq!(stored.get(COMBINE_MODE_KEY).map(String::as_str), Some("BaseOptMap"));
    }
}
