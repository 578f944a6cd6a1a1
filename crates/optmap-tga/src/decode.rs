//! TGA pixel decoding.

use optmap_common::BinaryReader;
use rgb::RGBA8;

use crate::header::{TgaHeader, TgaImageType};
use crate::{Error, Result};

/// High bit of an RLE packet byte marks a repeat packet.
const RLE_REPEAT_FLAG: u8 = 0x80;

/// Low seven bits of an RLE packet byte hold the run length minus one.
const RLE_COUNT_MASK: u8 = 0x7F;

/// A decoded TGA image.
#[derive(Debug, Clone)]
pub struct TgaImage {
    /// The parsed file header.
    pub header: TgaHeader,
    /// Pixels in file order, `width * height` entries.
    pub pixels: Vec<RGBA8>,
}

impl TgaImage {
    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.header.width() as u32
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.header.height() as u32
    }
}

/// Decode a TGA file held in memory.
///
/// Only uncompressed and run-length encoded true-color images at 24 or 32
/// bits per pixel are supported. Every other image type is rejected before
/// any pixel data is read.
///
/// Pixels are returned in the order they are stored; check
/// [`TgaHeader::is_top_down`] to find out which row comes first.
pub fn decode(data: &[u8]) -> Result<TgaImage> {
    let mut reader = BinaryReader::new(data);
    let header: TgaHeader = reader.read_struct()?;

    let image_type = match header.image_type() {
        Some(t @ (TgaImageType::UncompressedTrueColor | TgaImageType::RleTrueColor)) => t,
        _ => return Err(Error::UnsupportedFormat(header.image_type)),
    };

    if header.bits_per_pixel != 24 && header.bits_per_pixel != 32 {
        return Err(Error::UnsupportedBitDepth(header.bits_per_pixel));
    }

    let (width, height) = (header.width(), header.height());
    if width <= 0 || height <= 0 {
        return Err(Error::MalformedData(format!(
            "invalid image dimensions {}x{}",
            width, height
        )));
    }

    // Skip the image id and any color map table
    reader.skip(usize::from(header.id_length))?;
    reader.skip(header.color_map_size())?;

    let pixel_count = width as usize * height as usize;
    let bytes_per_pixel = header.bytes_per_pixel();

    log::debug!(
        "decoding {}x{} TGA: {:?}, {} bpp",
        width,
        height,
        image_type,
        header.bits_per_pixel
    );

    let pixels = if image_type.is_rle() {
        read_rle(&mut reader, pixel_count, bytes_per_pixel)?
    } else {
        read_uncompressed(&mut reader, pixel_count, bytes_per_pixel)?
    };

    Ok(TgaImage { header, pixels })
}

/// Decode a TGA file and return only its pixels.
pub fn decode_pixels(data: &[u8]) -> Result<Vec<RGBA8>> {
    decode(data).map(|image| image.pixels)
}

fn read_uncompressed(
    reader: &mut BinaryReader<'_>,
    pixel_count: usize,
    bytes_per_pixel: usize,
) -> Result<Vec<RGBA8>> {
    let needed = pixel_count * bytes_per_pixel;
    if reader.remaining() < needed {
        return Err(Error::MalformedData(format!(
            "pixel data truncated: needed {} bytes but only {} available",
            needed,
            reader.remaining()
        )));
    }

    let mut pixels = Vec::with_capacity(pixel_count);
    for _ in 0..pixel_count {
        pixels.push(read_pixel(reader, bytes_per_pixel)?);
    }
    Ok(pixels)
}

fn read_rle(
    reader: &mut BinaryReader<'_>,
    pixel_count: usize,
    bytes_per_pixel: usize,
) -> Result<Vec<RGBA8>> {
    // A packet expands to at most 128 pixels
    let capacity = pixel_count.min(reader.remaining().saturating_mul(128));
    let mut pixels = Vec::with_capacity(capacity);

    while pixels.len() < pixel_count {
        let packet = reader.read_u8()?;
        let run = usize::from(packet & RLE_COUNT_MASK) + 1;

        if pixels.len() + run > pixel_count {
            return Err(Error::MalformedData(format!(
                "RLE packet of {} pixels at pixel {} overruns image of {} pixels",
                run,
                pixels.len(),
                pixel_count
            )));
        }

        if packet & RLE_REPEAT_FLAG != 0 {
            let pixel = read_pixel(reader, bytes_per_pixel)?;
            pixels.extend(std::iter::repeat(pixel).take(run));
        } else {
            for _ in 0..run {
                pixels.push(read_pixel(reader, bytes_per_pixel)?);
            }
        }
    }

    Ok(pixels)
}

/// Read one stored pixel, reordering B,G,R[,A] to RGBA.
#[inline]
fn read_pixel(reader: &mut BinaryReader<'_>, bytes_per_pixel: usize) -> Result<RGBA8> {
    let b = reader.read_bytes(bytes_per_pixel)?;
    let alpha = if bytes_per_pixel == 4 { b[3] } else { 255 };
    Ok(RGBA8::new(b[2], b[1], b[0], alpha))
}
