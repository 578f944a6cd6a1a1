//! Image encoding and output format selection.

use std::fmt;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tga::TgaEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::{Error, PixelBuffer, Result};

/// Quality used for JPEG output.
pub const JPEG_QUALITY: u8 = 75;

/// Concrete container written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeFormat {
    Png,
    Jpg,
    Tga,
}

impl EncodeFormat {
    /// Map an output extension (without the dot, any case) to an encoder.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(EncodeFormat::Png),
            "jpg" | "jpeg" => Ok(EncodeFormat::Jpg),
            "tga" => Ok(EncodeFormat::Tga),
            other => Err(Error::UnsupportedFormat(format!(
                "invalid image format: .{}",
                other
            ))),
        }
    }

    /// Canonical extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            EncodeFormat::Png => "png",
            EncodeFormat::Jpg => "jpg",
            EncodeFormat::Tga => "tga",
        }
    }
}

/// User-selected output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Keep the source file's extension.
    #[default]
    Auto,
    Tga,
    Png,
    Jpg,
}

impl OutputFormat {
    /// All variants, in menu order.
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Auto,
        OutputFormat::Tga,
        OutputFormat::Png,
        OutputFormat::Jpg,
    ];

    /// Output extension (without the dot) for a source with `source_ext`.
    pub fn resolve_extension(self, source_ext: &str) -> String {
        match self {
            OutputFormat::Auto => source_ext.to_ascii_lowercase(),
            OutputFormat::Tga => "tga".to_string(),
            OutputFormat::Png => "png".to_string(),
            OutputFormat::Jpg => "jpg".to_string(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Auto => "Auto",
            OutputFormat::Tga => "TGA",
            OutputFormat::Png => "PNG",
            OutputFormat::Jpg => "JPG",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedFormat(format!("unknown output format: {}", s)))
    }
}

/// Encode a pixel buffer.
///
/// PNG and TGA keep alpha when the buffer's format carries it; JPEG always
/// drops it.
pub fn encode(buffer: &PixelBuffer, format: EncodeFormat) -> Result<Vec<u8>> {
    let (width, height) = buffer.dimensions();
    let has_alpha = buffer.format().has_alpha() && format != EncodeFormat::Jpg;

    let (data, color) = if has_alpha {
        (buffer.to_rgba_bytes(), ExtendedColorType::Rgba8)
    } else {
        (buffer.to_rgb_bytes(), ExtendedColorType::Rgb8)
    };

    let mut out = Vec::new();
    match format {
        EncodeFormat::Png => PngEncoder::new(&mut out).write_image(&data, width, height, color)?,
        EncodeFormat::Jpg => JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
            .write_image(&data, width, height, color)?,
        EncodeFormat::Tga => TgaEncoder::new(&mut out).write_image(&data, width, height, color)?,
    }

    log::debug!(
        "encoded {}x{} as {} ({} bytes)",
        width,
        height,
        format.extension(),
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{loader, ImageFormat, PixelFormat};
    use rgb::RGBA8;

    #[test]
    fn test_output_format_names() {
        assert_eq!("tga".parse::<OutputFormat>().unwrap(), OutputFormat::Tga);
        assert_eq!("Auto".parse::<OutputFormat>().unwrap(), OutputFormat::Auto);
        assert!("webp".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Jpg.to_string(), "JPG");
    }

    #[test]
    fn test_resolve_extension() {
        assert_eq!(OutputFormat::Auto.resolve_extension("TGA"), "tga");
        assert_eq!(OutputFormat::Png.resolve_extension("tga"), "png");
        assert_eq!(EncodeFormat::from_extension("jpeg").unwrap(), EncodeFormat::Jpg);
        assert!(EncodeFormat::from_extension("bmp").is_err());
    }

    #[test]
    fn test_tga_encode_decodes_with_own_loader() {
        // Single row, so the stored row order cannot matter
        let source = PixelBuffer::new(
            4,
            1,
            PixelFormat::Rgba32,
            vec![
                RGBA8::new(1, 2, 3, 4),
                RGBA8::new(5, 6, 7, 8),
                RGBA8::new(9, 10, 11, 12),
                RGBA8::new(13, 14, 15, 16),
            ],
        )
        .unwrap();

        let bytes = encode(&source, EncodeFormat::Tga).unwrap();
        let decoded = loader::decode(&bytes, ImageFormat::Tga, true).unwrap();
        assert_eq!(decoded.pixels(), source.pixels());
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let source =
            PixelBuffer::filled(8, 8, PixelFormat::Rgba32, RGBA8::new(200, 200, 200, 0)).unwrap();
        let bytes = encode(&source, EncodeFormat::Jpg).unwrap();

        let decoded = loader::decode(&bytes, ImageFormat::Jpeg, true).unwrap();
        assert_eq!(decoded.format(), PixelFormat::Rgb24);
        assert!(decoded.pixels().iter().all(|p| p.a == 255));
    }
}
