//! Channel file naming conventions.
//!
//! A packed texture `body_opt.tga` splits into `body_opt_rim.tga`,
//! `body_opt_out.tga` and `body_opt_sss.tga`; combining any of those writes
//! `body_opt_mod.tga`. The suffix set depends on the [`CombineMode`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use optmap_texture::{Channel, OutputFormat};
use regex::Regex;

use crate::{Error, Result};

/// Suffix appended to a combined texture.
pub const COMBINED_SUFFIX: &str = "_mod";

/// Suffix for the alpha channel image, shared by every mode.
pub const ALPHA_SUFFIX: &str = "_alp";

/// Base-name ending that marks a specular opt map.
const SPECULAR_OPT_MAP_ENDING: &str = "_spe_opt";

/// Base-name ending that marks a base opt map.
const BASE_OPT_MAP_ENDING: &str = "_opt";

/// Matches any channel suffix at the end of a base name.
const CHANNEL_SUFFIX_PATTERN: &str = r"(?i)_(rim|out|sss|nse|nse_msk|fth|red|blu|grn|alp)$";

fn channel_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CHANNEL_SUFFIX_PATTERN).expect("channel suffix pattern is valid"))
}

/// Which set of channel roles a texture uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CombineMode {
    /// Rim light, outline and subsurface scattering masks.
    #[default]
    BaseOptMap,
    /// Noise texture, noise mask and feather.
    SpecularOptMap,
    /// Plain red, green, blue and alpha channels.
    General,
}

impl CombineMode {
    /// All modes, in menu order.
    pub const ALL: [CombineMode; 3] = [
        CombineMode::BaseOptMap,
        CombineMode::SpecularOptMap,
        CombineMode::General,
    ];

    /// Suffixes for output slots 0..3.
    pub const fn suffixes(self) -> [&'static str; 4] {
        match self {
            CombineMode::BaseOptMap => ["_rim", "_out", "_sss", ALPHA_SUFFIX],
            CombineMode::SpecularOptMap => ["_nse", "_nse_msk", "_fth", ALPHA_SUFFIX],
            CombineMode::General => ["_red", "_grn", "_blu", ALPHA_SUFFIX],
        }
    }

    /// Suffix for the image that feeds `channel`.
    pub const fn suffix(self, channel: Channel) -> &'static str {
        let suffixes = self.suffixes();
        match channel {
            Channel::Red => suffixes[0],
            Channel::Green => suffixes[1],
            Channel::Blue => suffixes[2],
            Channel::Alpha => suffixes[3],
        }
    }

    /// Human-readable role of the image that feeds `channel`.
    pub const fn label(self, channel: Channel) -> &'static str {
        match (self, channel) {
            (_, Channel::Alpha) => "Alpha Channel",
            (CombineMode::BaseOptMap, Channel::Red) => "RimLight Mask",
            (CombineMode::BaseOptMap, Channel::Green) => "Outline Mask",
            (CombineMode::BaseOptMap, Channel::Blue) => "SSS Mask",
            (CombineMode::SpecularOptMap, Channel::Red) => "Noise",
            (CombineMode::SpecularOptMap, Channel::Green) => "Noise Mask",
            (CombineMode::SpecularOptMap, Channel::Blue) => "Feather",
            (CombineMode::General, Channel::Red) => "Red Channel",
            (CombineMode::General, Channel::Green) => "Green Channel",
            (CombineMode::General, Channel::Blue) => "Blue Channel",
        }
    }

    /// Mode used when splitting a packed texture with this base name.
    pub fn for_packed(base_name: &str) -> Self {
        let lower = base_name.to_ascii_lowercase();
        if lower.ends_with(SPECULAR_OPT_MAP_ENDING) {
            CombineMode::SpecularOptMap
        } else if lower.ends_with(BASE_OPT_MAP_ENDING) {
            CombineMode::BaseOptMap
        } else {
            CombineMode::General
        }
    }

    /// Mode for any texture in an opt map family: packed, channel or combined.
    ///
    /// Channel images take the mode of their suffix. A combined `_mod`
    /// texture takes the mode of the packed name it was derived from.
    pub fn for_texture(base_name: &str) -> Self {
        if let Ok(name) = parse_channel_name(base_name) {
            return name.mode;
        }
        let lower = base_name.to_ascii_lowercase();
        let packed = match lower.strip_suffix(COMBINED_SUFFIX) {
            Some(stem) => &base_name[..stem.len()],
            None => base_name,
        };
        Self::for_packed(packed)
    }

    /// Whether an alpha image takes part in combining.
    pub const fn uses_alpha(self) -> bool {
        matches!(self, CombineMode::General)
    }

    fn from_suffix(suffix: &str) -> Self {
        match suffix {
            "rim" | "out" | "sss" => CombineMode::BaseOptMap,
            "nse" | "nse_msk" | "fth" => CombineMode::SpecularOptMap,
            _ => CombineMode::General,
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CombineMode::BaseOptMap => "BaseOptMap",
            CombineMode::SpecularOptMap => "SpecularOptMap",
            CombineMode::General => "General",
        };
        f.write_str(name)
    }
}

impl FromStr for CombineMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CombineMode::ALL
            .into_iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidName(format!("unknown combine mode: {}", s)))
    }
}

/// A base name split into its stem and channel suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelName {
    /// Base name with the channel suffix removed.
    pub stem: String,
    /// Matched suffix, lowercase and without the leading underscore.
    pub suffix: String,
    /// Mode implied by the suffix.
    pub mode: CombineMode,
}

/// Parse a base name (no directory, no extension) that ends in a channel suffix.
pub fn parse_channel_name(base_name: &str) -> Result<ChannelName> {
    let captures = channel_suffix_regex()
        .captures(base_name)
        .ok_or_else(|| Error::InvalidName(base_name.to_string()))?;

    let whole = captures.get(0).map_or(base_name.len(), |m| m.start());
    let suffix = captures
        .get(1)
        .map_or(String::new(), |m| m.as_str().to_ascii_lowercase());

    Ok(ChannelName {
        stem: base_name[..whole].to_string(),
        mode: CombineMode::from_suffix(&suffix),
        suffix,
    })
}

/// Remove a trailing channel suffix, leaving other names unchanged.
pub fn strip_channel_suffix(base_name: &str) -> &str {
    match channel_suffix_regex().find(base_name) {
        Some(m) => &base_name[..m.start()],
        None => base_name,
    }
}

/// File name without directory or extension.
pub fn base_name(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidName(path.display().to_string()))
}

/// Lowercase extension without the dot, or an empty string.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Directory containing `path`.
pub fn directory(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

/// Output path for split slot `slot` of the packed texture at `source`.
///
/// The alpha slot always uses [`ALPHA_SUFFIX`].
pub fn split_output_path(source: &Path, mode: CombineMode, slot: usize, output: OutputFormat) -> Result<PathBuf> {
    let suffix = mode
        .suffixes()
        .get(slot)
        .copied()
        .ok_or_else(|| Error::InvalidName(format!("invalid texture channel: {}", slot)))?;
    let ext = output.resolve_extension(&extension(source));

    Ok(directory(source).join(format!("{}{}.{}", base_name(source)?, suffix, ext)))
}

/// Output path for the texture combined from the red-channel image at `red`.
pub fn combined_output_path(red: &Path, output: OutputFormat) -> Result<PathBuf> {
    let stem = strip_channel_suffix(base_name(red)?);
    let ext = output.resolve_extension(&extension(red));

    Ok(directory(red).join(format!("{}{}.{}", stem, COMBINED_SUFFIX, ext)))
}

/// Paths of the sibling channel images for a selected channel image.
///
/// `alpha` is only filled in for [`CombineMode::General`]; whether the file
/// exists is up to the caller to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionPaths {
    pub mode: CombineMode,
    pub red: PathBuf,
    pub green: PathBuf,
    pub blue: PathBuf,
    pub alpha: Option<PathBuf>,
}

/// Derive the companion channel paths for `selected`, which must follow the naming rules.
pub fn companion_paths(selected: &Path) -> Result<CompanionPaths> {
    let name = parse_channel_name(base_name(selected)?)?;
    let dir = directory(selected);
    let ext = extension(selected);
    let path_for = |channel: Channel| {
        dir.join(format!("{}{}.{}", name.stem, name.mode.suffix(channel), ext))
    };

    Ok(CompanionPaths {
        mode: name.mode,
        red: path_for(Channel::Red),
        green: path_for(Channel::Green),
        blue: path_for(Channel::Blue),
        alpha: name.mode.uses_alpha().then(|| path_for(Channel::Alpha)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_for_texture() {
        assert_eq!(CombineMode::for_texture("body_opt_mod"), CombineMode::BaseOptMap);
        assert_eq!(CombineMode::for_texture("body_spe_opt_MOD"), CombineMode::SpecularOptMap);
        assert_eq!(CombineMode::for_texture("body_opt_sss"), CombineMode::BaseOptMap);
        assert_eq!(CombineMode::for_texture("m_nse_msk"), CombineMode::SpecularOptMap);
        assert_eq!(CombineMode::for_texture("body_spe_opt"), CombineMode::SpecularOptMap);
        assert_eq!(CombineMode::for_texture("face_mod"), CombineMode::General);
    }

    #[test]
    fn test_mode_for_packed() {
        assert_eq!(CombineMode::for_packed("body_spe_opt"), CombineMode::SpecularOptMap);
        assert_eq!(CombineMode::for_packed("body_opt"), CombineMode::BaseOptMap);
        assert_eq!(CombineMode::for_packed("body_OPT"), CombineMode::BaseOptMap);
        assert_eq!(CombineMode::for_packed("body_mask"), CombineMode::General);
    }

    #[test]
    fn test_parse_channel_name() {
        let name = parse_channel_name("hair_opt_rim").unwrap();
        assert_eq!(name.stem, "hair_opt");
        assert_eq!(name.mode, CombineMode::BaseOptMap);

        let name = parse_channel_name("hair_spe_opt_nse_msk").unwrap();
        assert_eq!(name.stem, "hair_spe_opt");
        assert_eq!(name.suffix, "nse_msk");
        assert_eq!(name.mode, CombineMode::SpecularOptMap);

        let name = parse_channel_name("face_GRN").unwrap();
        assert_eq!(name.stem, "face");
        assert_eq!(name.mode, CombineMode::General);

        assert!(matches!(
            parse_channel_name("face_opt"),
            Err(Error::InvalidName(_))
        ));
    }

    #[test]
    fn test_strip_channel_suffix() {
        assert_eq!(strip_channel_suffix("a_opt_sss"), "a_opt");
        assert_eq!(strip_channel_suffix("a_opt"), "a_opt");
    }

    #[test]
    fn test_split_output_paths() {
        let source = Path::new("tex/body_spe_opt.TGA");
        let mode = CombineMode::for_packed(base_name(source).unwrap());

        let paths: Vec<PathBuf> = (0..4)
            .map(|slot| split_output_path(source, mode, slot, OutputFormat::Auto).unwrap())
            .collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("tex/body_spe_opt_nse.tga"),
                PathBuf::from("tex/body_spe_opt_nse_msk.tga"),
                PathBuf::from("tex/body_spe_opt_fth.tga"),
                PathBuf::from("tex/body_spe_opt_alp.tga"),
            ]
        );
        assert!(split_output_path(source, mode, 4, OutputFormat::Auto).is_err());
    }

    #[test]
    fn test_combined_output_path() {
        let path = combined_output_path(Path::new("tex/body_opt_rim.tga"), OutputFormat::Png).unwrap();
        assert_eq!(path, PathBuf::from("tex/body_opt_mod.png"));
    }

    #[test]
    fn test_companion_paths() {
        let companions = companion_paths(Path::new("tex/body_opt_out.png")).unwrap();
        assert_eq!(companions.mode, CombineMode::BaseOptMap);
        assert_eq!(companions.red, PathBuf::from("tex/body_opt_rim.png"));
        assert_eq!(companions.blue, PathBuf::from("tex/body_opt_sss.png"));
        assert_eq!(companions.alpha, None);

        let companions = companion_paths(Path::new("face_blu.tga")).unwrap();
        assert_eq!(companions.mode, CombineMode::General);
        assert_eq!(companions.alpha, Some(PathBuf::from("face_alp.tga")));
    }

    #[test]
    fn test_labels_and_mode_names() {
        assert_eq!(CombineMode::BaseOptMap.label(Channel::Green), "Outline Mask");
        assert_eq!(CombineMode::SpecularOptMap.label(Channel::Blue), "Feather");
        assert_eq!(CombineMode::General.label(Channel::Alpha), "Alpha Channel");
        assert_eq!("specularoptmap".parse::<CombineMode>().unwrap(), CombineMode::SpecularOptMap);
        assert!("other".parse::<CombineMode>().is_err());
    }
}
