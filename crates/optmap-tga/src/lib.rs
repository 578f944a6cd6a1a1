//! TGA image decoding for optmap.
//!
//! Texture authoring tools commonly export packed masks as TGA. This crate
//! decodes the two true-color variants such files use:
//!
//! - Image type 2 - uncompressed true-color
//! - Image type 10 - run-length encoded true-color
//!
//! at 24 or 32 bits per pixel. Color-mapped and black/white images are
//! rejected.
//!
//! # Example
//!
//! ```no_run
//! use optmap_tga::decode;
//!
//! let data = std::fs::read("texture_opt.tga")?;
//! let image = decode(&data)?;
//! println!("{}x{}, top-down: {}", image.width(), image.height(), image.header.is_top_down());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decode;
mod error;
mod header;

pub use decode::{decode, decode_pixels, TgaImage};
pub use error::{Error, Result};
pub use header::{TgaHeader, TgaImageType};
