//! Pixel buffers, image loading and channel packing for opt map textures.
//!
//! An opt map packs independent grayscale masks into the color channels of
//! one texture. This crate provides the pixel-level operations needed to
//! author them:
//!
//! - [`loader`] - Decode PNG, JPEG and TGA files into a [`PixelBuffer`]
//! - [`split`] / [`merge3`] / [`merge4`] - Channel splitting and packing
//! - [`encode()`] - Serialize a buffer back to PNG, JPEG or TGA
//!
//! # Example
//!
//! ```no_run
//! use optmap_texture::{encode, loader, merge3, split, EncodeFormat};
//!
//! let packed = loader::load("body_opt.tga", true)?;
//! let channels = split(&packed);
//! let repacked = merge3(&channels[0], &channels[1], &channels[2])?;
//! std::fs::write("body_mod.png", encode(&repacked, EncodeFormat::Png)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod buffer;
mod channel;
mod encode;
mod error;
mod pack;

pub mod loader;

pub use buffer::{PixelBuffer, PixelFormat};
pub use channel::{Channel, ChannelAssignment};
pub use encode::{encode, EncodeFormat, OutputFormat, JPEG_QUALITY};
pub use error::{Error, Result};
pub use loader::ImageFormat;
pub use pack::{merge3, merge4, merge_channels, split, split_channels};

/// Re-export of the pixel type used by [`PixelBuffer`].
pub use rgb::RGBA8;
