//! optmap - opt map texture splitting and channel packing library.
//!
//! This crate provides a unified interface to the optmap library crates.
//!
//! # Crates
//!
//! - [`optmap_common`] - Common utilities (bounds-checked binary reading)
//! - [`optmap_tga`] - Uncompressed and RLE true-color TGA decoding
//! - [`optmap_texture`] - Pixel buffers, loading, encoding, split and merge
//! - [`optmap_assets`] - Naming conventions, preferences and the split/combine commands
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use optmap::prelude::*;
//!
//! // Split a packed texture into body_opt_rim.png, body_opt_out.png and body_opt_sss.png
//! let output = separate_channels(
//!     &FsStore,
//!     &SidecarSettingsStore,
//!     Path::new("body_opt.tga"),
//!     OutputFormat::Png,
//! )?;
//! println!("{} files written", output.written.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use optmap_assets as assets;
pub use optmap_common as common;
pub use optmap_texture as texture;
pub use optmap_tga as tga;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use optmap_assets::{
        combine_channels, separate_channels, AssetStore, CombineMode, CombineRequest,
        CommandOutput, FsStore, ImportSettings, ImportSettingsStore, Preferences,
        SidecarSettingsStore,
    };
    pub use optmap_texture::{
        encode, loader, merge3, merge4, split, Channel, EncodeFormat, ImageFormat, OutputFormat,
        PixelBuffer, PixelFormat,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
