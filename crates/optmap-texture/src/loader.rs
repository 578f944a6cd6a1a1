//! Image loading.
//!
//! PNG and JPEG files are decoded with the `image` crate; TGA files go through
//! [`optmap_tga`]. Either way the result is a top-down [`PixelBuffer`].

use std::fs;
use std::path::Path;

use rgb::RGBA8;

use crate::{Error, PixelBuffer, PixelFormat, Result};

/// Source image container, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Tga,
}

impl ImageFormat {
    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "tga" => Ok(ImageFormat::Tga),
            other => Err(Error::UnsupportedFormat(format!(
                "texture format not supported: .{}",
                other
            ))),
        }
    }

    /// Determine the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            Error::UnsupportedFormat(format!("no file extension: {}", path.display()))
        })?;
        Self::from_extension(ext)
    }

    fn codec_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Tga => image::ImageFormat::Tga,
        }
    }
}

/// Load an image file into a pixel buffer.
///
/// `wants_alpha` selects the depth requested from the PNG/JPEG decoder. TGA
/// files always decode at their stored depth.
pub fn load<P: AsRef<Path>>(path: P, wants_alpha: bool) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let bytes = fs::read(path)?;

    log::debug!("loading {} as {:?} ({} bytes)", path.display(), format, bytes.len());
    decode(&bytes, format, wants_alpha)
}

/// Decode an in-memory image.
pub fn decode(bytes: &[u8], format: ImageFormat, wants_alpha: bool) -> Result<PixelBuffer> {
    match format {
        ImageFormat::Png | ImageFormat::Jpeg => decode_with_codec(bytes, format, wants_alpha),
        ImageFormat::Tga => decode_tga(bytes),
    }
}

fn decode_with_codec(bytes: &[u8], format: ImageFormat, wants_alpha: bool) -> Result<PixelBuffer> {
    let image = image::load_from_memory_with_format(bytes, format.codec_format())?;
    let (width, height) = (image.width(), image.height());

    if wants_alpha {
        let format = if image.color().has_alpha() {
            PixelFormat::Rgba32
        } else {
            PixelFormat::Rgb24
        };
        let pixels = image
            .to_rgba8()
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                RGBA8::new(r, g, b, a)
            })
            .collect();
        PixelBuffer::new(width, height, format, pixels)
    } else {
        let pixels = image
            .to_rgb8()
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                RGBA8::new(r, g, b, 255)
            })
            .collect();
        PixelBuffer::new(width, height, PixelFormat::Rgb24, pixels)
    }
}

fn decode_tga(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = optmap_tga::decode(bytes)?;
    let (width, height) = (image.width(), image.height());
    let top_down = image.header.is_top_down();
    let format = if image.header.has_alpha() {
        PixelFormat::Rgba32
    } else {
        PixelFormat::Rgb24
    };

    let mut buffer = PixelBuffer::new(width, height, format, image.pixels)?;
    if !top_down {
        buffer.flip_vertical();
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tga(width: i16, height: i16, bpp: u8, descriptor: u8, pixels: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0u8; 18];
        bytes[2] = 2;
        bytes[12..14].copy_from_slice(&width.to_le_bytes());
        bytes[14..16].copy_from_slice(&height.to_le_bytes());
        bytes[16] = bpp;
        bytes[17] = descriptor;
        bytes.extend_from_slice(pixels);
        bytes
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path("a/b_opt.PNG").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("b.jpeg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path("b.tga").unwrap(), ImageFormat::Tga);
        assert!(matches!(
            ImageFormat::from_path("b.psd"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ImageFormat::from_path("noext"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_tga_bottom_up_is_flipped() {
        // Stored bottom row first: blue, then red on top
        let data = tga(1, 2, 24, 0, &[255, 0, 0, 0, 0, 255]);
        let buffer = decode(&data, ImageFormat::Tga, false).unwrap();

        assert_eq!(buffer.format(), PixelFormat::Rgb24);
        assert_eq!(buffer.pixel(0, 0), Some(RGBA8::new(255, 0, 0, 255)));
        assert_eq!(buffer.pixel(0, 1), Some(RGBA8::new(0, 0, 255, 255)));
    }

    #[test]
    fn test_tga_top_down_kept() {
        let data = tga(1, 2, 32, 0x28, &[255, 0, 0, 10, 0, 0, 255, 20]);
        let buffer = decode(&data, ImageFormat::Tga, false).unwrap();

        assert_eq!(buffer.format(), PixelFormat::Rgba32);
        assert_eq!(buffer.pixel(0, 0), Some(RGBA8::new(0, 0, 255, 10)));
    }

    #[test]
    fn test_tga_errors_surface_as_kinds() {
        let mut data = tga(2, 2, 24, 0, &[]);
        data[2] = 1;
        assert!(matches!(
            decode(&data, ImageFormat::Tga, true),
            Err(Error::UnsupportedFormat(_))
        ));

        let data = tga(2, 2, 24, 0, &[1, 2, 3]);
        assert!(matches!(
            decode(&data, ImageFormat::Tga, true),
            Err(Error::MalformedData(_))
        ));
    }

    #[test]
    fn test_png_alpha_depth() {
        let encoded = crate::encode(
            &PixelBuffer::filled(2, 1, PixelFormat::Rgba32, RGBA8::new(1, 2, 3, 4)).unwrap(),
            crate::EncodeFormat::Png,
        )
        .unwrap();

        let with_alpha = decode(&encoded, ImageFormat::Png, true).unwrap();
        assert_eq!(with_alpha.format(), PixelFormat::Rgba32);
        assert_eq!(with_alpha.pixels()[0], RGBA8::new(1, 2, 3, 4));

        let opaque = decode(&encoded, ImageFormat::Png, false).unwrap();
        assert_eq!(opaque.format(), PixelFormat::Rgb24);
        assert_eq!(opaque.pixels()[1], RGBA8::new(1, 2, 3, 255));
    }
}
