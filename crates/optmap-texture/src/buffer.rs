//! In-memory pixel buffers.

use rgb::RGBA8;

use crate::{Error, Result};

/// Declared pixel layout of a buffer's source.
///
/// Every buffer stores four samples per pixel; the format records whether
/// the alpha sample carries meaningful data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Opaque color, alpha is always 255.
    Rgb24,
    /// Color with a meaningful alpha channel.
    Rgba32,
}

impl PixelFormat {
    /// Whether the alpha sample is meaningful.
    pub const fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Rgba32)
    }

    /// Number of meaningful channels.
    pub const fn channel_count(self) -> usize {
        match self {
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgba32 => 4,
        }
    }
}

/// A decoded image: row-major RGBA8 pixels, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<RGBA8>,
}

impl PixelBuffer {
    /// Create a buffer, checking that `pixels` holds exactly `width * height` entries.
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<RGBA8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::MalformedData(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::MalformedData(format!(
                "expected {} pixels for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Create a buffer from parts already known to satisfy the length invariant.
    pub(crate) fn from_parts(width: u32, height: u32, format: PixelFormat, pixels: Vec<RGBA8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Create a buffer where every pixel has the same value.
    pub fn filled(width: u32, height: u32, format: PixelFormat, pixel: RGBA8) -> Result<Self> {
        let count = width as usize * height as usize;
        Self::new(width, height, format, vec![pixel; count])
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height as a pair.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Declared pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[RGBA8] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Flatten into interleaved RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, p.a])
            .collect()
    }

    /// Flatten into interleaved RGB bytes, dropping alpha.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }

    /// Reverse the row order in place.
    pub fn flip_vertical(&mut self) {
        let row = self.width as usize;
        let rows = self.height as usize;
        for y in 0..rows / 2 {
            let (top, bottom) = self.pixels.split_at_mut((rows - 1 - y) * row);
            top[y * row..(y + 1) * row].swap_with_slice(&mut bottom[..row]);
        }
    }
}
