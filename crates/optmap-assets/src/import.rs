//! Texture import settings and their propagation to generated files.
//!
//! Each asset may carry a JSON sidecar (`<asset>.import.json`) describing how
//! the engine should import it. Split and combined outputs inherit the
//! settings of the texture they were generated from.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Extension appended to an asset path to locate its sidecar.
pub const SIDECAR_EXTENSION: &str = "import.json";

/// Import settings copied verbatim from a source texture to its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    #[serde(default)]
    pub crunched_compression: bool,
    #[serde(default = "default_compression_quality")]
    pub compression_quality: u8,
    #[serde(default = "default_true")]
    pub mipmap_enabled: bool,
    #[serde(default)]
    pub streaming_mipmaps: bool,
    #[serde(default = "default_max_texture_size")]
    pub max_texture_size: u32,
}

fn default_compression_quality() -> u8 {
    50
}

fn default_true() -> bool {
    true
}

fn default_max_texture_size() -> u32 {
    2048
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            crunched_compression: false,
            compression_quality: default_compression_quality(),
            mipmap_enabled: true,
            streaming_mipmaps: false,
            max_texture_size: default_max_texture_size(),
        }
    }
}

/// Where import settings live.
pub trait ImportSettingsStore {
    /// Settings for `asset`, or `None` if it has none.
    fn load(&self, asset: &Path) -> Result<Option<ImportSettings>>;

    /// Store settings for `asset`.
    fn save(&self, asset: &Path, settings: &ImportSettings) -> Result<()>;
}

/// [`ImportSettingsStore`] that keeps settings in JSON sidecar files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarSettingsStore;

impl SidecarSettingsStore {
    /// Sidecar path for an asset.
    pub fn sidecar_path(asset: &Path) -> PathBuf {
        let mut name = asset.as_os_str().to_owned();
        name.push(".");
        name.push(SIDECAR_EXTENSION);
        PathBuf::from(name)
    }
}

impl ImportSettingsStore for SidecarSettingsStore {
    fn load(&self, asset: &Path) -> Result<Option<ImportSettings>> {
        let path = Self::sidecar_path(asset);
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&self, asset: &Path, settings: &ImportSettings) -> Result<()> {
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(Self::sidecar_path(asset), text)?;
        Ok(())
    }
}

/// Copy the import settings of `source` to every path in `targets`.
///
/// Returns the number of targets updated; zero when `source` has no settings.
pub fn propagate<S: ImportSettingsStore + ?Sized>(
    store: &S,
    source: &Path,
    targets: &[PathBuf],
) -> Result<usize> {
    let Some(settings) = store.load(source)? else {
        log::debug!("no import settings for {}, nothing to propagate", source.display());
        return Ok(0);
    };

    for target in targets {
        store.save(target, &settings)?;
        log::debug!("copied import settings {} -> {}", source.display(), target.display());
    }

    Ok(targets.len())
}
