//! Split and combine commands.
//!
//! These resolve file names, check that every input exists, run the pixel
//! transforms and only then write outputs. A failure at any step leaves the
//! filesystem untouched; outputs written before a failed write are removed.

use std::path::{Path, PathBuf};

use optmap_texture::{encode, loader, merge3, merge4, split, EncodeFormat, ImageFormat, OutputFormat, PixelBuffer};

use crate::import::{self, ImportSettingsStore};
use crate::naming::{self, CombineMode, CompanionPaths};
use crate::store::AssetStore;
use crate::{Error, Result};

/// Files written by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Combine mode the file names were derived from.
    pub mode: CombineMode,
    /// Written files, in channel order for a split.
    pub written: Vec<PathBuf>,
    /// Number of outputs that received the source's import settings.
    pub settings_copied: usize,
}

/// Images to pack into one texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineRequest {
    pub mode: CombineMode,
    pub red: PathBuf,
    pub green: PathBuf,
    pub blue: PathBuf,
    /// Only used in [`CombineMode::General`].
    pub alpha: Option<PathBuf>,
}

impl CombineRequest {
    /// Build a request from one channel image by locating its siblings.
    ///
    /// In general mode the alpha image is included only if it exists.
    pub fn from_selected<S: AssetStore + ?Sized>(store: &S, selected: &Path) -> Result<Self> {
        let CompanionPaths {
            mode,
            red,
            green,
            blue,
            alpha,
        } = naming::companion_paths(selected)?;

        Ok(Self {
            mode,
            red,
            green,
            blue,
            alpha: alpha.filter(|path| store.exists(path)),
        })
    }

    fn inputs(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.red, &self.green, &self.blue]
            .into_iter()
            .chain(self.alpha.as_ref().filter(|_| self.mode.uses_alpha()))
    }
}

/// Split the packed texture at `source` into one grayscale file per channel.
pub fn separate_channels<S, I>(
    store: &S,
    settings: &I,
    source: &Path,
    output: OutputFormat,
) -> Result<CommandOutput>
where
    S: AssetStore + ?Sized,
    I: ImportSettingsStore + ?Sized,
{
    if !store.exists(source) {
        return Err(Error::MissingInput(source.to_path_buf()));
    }

    let source_format = ImageFormat::from_path(source)?;
    let encode_format = encode_format_for(source, output)?;
    let mode = CombineMode::for_packed(naming::base_name(source)?);

    let channels = {
        let packed = load_buffer(store, source, source_format, true)?;
        log::info!(
            "splitting {} ({}x{}, {:?}) as {}",
            source.display(),
            packed.width(),
            packed.height(),
            packed.format(),
            mode
        );
        split(&packed)
    };

    let mut encoded = Vec::with_capacity(channels.len());
    for (slot, channel) in channels.into_iter().enumerate() {
        let path = naming::split_output_path(source, mode, slot, output)?;
        encoded.push((path, encode(&channel, encode_format)?));
    }

    let written = write_all(store, encoded)?;
    let settings_copied = import::propagate(settings, source, &written)?;

    Ok(CommandOutput {
        mode,
        written,
        settings_copied,
    })
}

/// Combine the channel images named in `request` into one packed texture.
///
/// The output is written next to the red image as `<stem>_mod.<ext>`.
pub fn combine_channels<S, I>(
    store: &S,
    settings: &I,
    request: &CombineRequest,
    output: OutputFormat,
) -> Result<CommandOutput>
where
    S: AssetStore + ?Sized,
    I: ImportSettingsStore + ?Sized,
{
    if let Some(missing) = request.inputs().find(|path| !store.exists(path)) {
        return Err(Error::MissingInput(missing.clone()));
    }

    let target = naming::combined_output_path(&request.red, output)?;
    let encode_format = encode_format_for(&request.red, output)?;

    let combined = {
        let r = load_channel(store, &request.red)?;
        let g = load_channel(store, &request.green)?;
        let b = load_channel(store, &request.blue)?;

        match request.alpha.as_ref().filter(|_| request.mode.uses_alpha()) {
            Some(alpha) => {
                let a = load_channel(store, alpha)?;
                merge4(&r, &g, &b, &a)?
            }
            None => merge3(&r, &g, &b)?,
        }
    };

    log::info!(
        "combined {} images as {} into {}",
        request.inputs().count(),
        request.mode,
        target.display()
    );

    let bytes = encode(&combined, encode_format)?;
    drop(combined);

    let written = write_all(store, vec![(target, bytes)])?;
    let settings_copied = import::propagate(settings, &request.red, &written)?;

    Ok(CommandOutput {
        mode: request.mode,
        written,
        settings_copied,
    })
}

fn encode_format_for(source: &Path, output: OutputFormat) -> Result<EncodeFormat> {
    let ext = output.resolve_extension(&naming::extension(source));
    Ok(EncodeFormat::from_extension(&ext)?)
}

fn load_channel<S: AssetStore + ?Sized>(store: &S, path: &Path) -> Result<PixelBuffer> {
    load_buffer(store, path, ImageFormat::from_path(path)?, false)
}

fn load_buffer<S: AssetStore + ?Sized>(
    store: &S,
    path: &Path,
    format: ImageFormat,
    wants_alpha: bool,
) -> Result<PixelBuffer> {
    let bytes = store.read(path)?;
    Ok(loader::decode(&bytes, format, wants_alpha)?)
}

/// Write every file, removing the ones already written if any write fails.
fn write_all<S: AssetStore + ?Sized>(store: &S, files: Vec<(PathBuf, Vec<u8>)>) -> Result<Vec<PathBuf>> {
    let mut written: Vec<PathBuf> = Vec::with_capacity(files.len());
    for (path, bytes) in files {
        if let Err(err) = store.write(&path, &bytes) {
            for done in &written {
                if let Err(cleanup) = store.remove(done) {
                    log::warn!("failed to remove {}: {}", done.display(), cleanup);
                }
            }
            return Err(err);
        }
        log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
        written.push(path);
    }
    Ok(written)
}
