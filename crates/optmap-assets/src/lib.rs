//! Asset-level commands for opt map textures.
//!
//! This crate sits between a user interface and the pixel core in
//! [`optmap_texture`]. It owns everything that depends on file names and
//! storage:
//!
//! - [`naming`] - Channel suffix conventions and [`CombineMode`]
//! - [`AssetStore`] - Where textures are read from and written to
//! - [`import`] - Import settings propagated to generated textures
//! - [`Preferences`] - Persisted output format and combine mode
//! - [`separate_channels`] / [`combine_channels`] - The two commands
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use optmap_assets::{combine_channels, CombineRequest, FsStore, SidecarSettingsStore};
//! use optmap_texture::OutputFormat;
//!
//! let request = CombineRequest::from_selected(&FsStore, Path::new("body_opt_rim.tga"))?;
//! let output = combine_channels(&FsStore, &SidecarSettingsStore, &request, OutputFormat::Auto)?;
//! println!("wrote {:?}", output.written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod command;
mod error;
mod prefs;
mod store;

pub mod import;
pub mod naming;

pub use command::{combine_channels, separate_channels, CombineRequest, CommandOutput};
pub use error::{Error, Result};
pub use import::{ImportSettings, ImportSettingsStore, SidecarSettingsStore};
pub use naming::CombineMode;
pub use prefs::{Preferences, COMBINE_MODE_KEY, OUTPUT_FORMAT_KEY};
pub use store::{AssetStore, FsStore};
