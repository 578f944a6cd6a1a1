//! TGA header structures.

use zerocopy::byteorder::{LittleEndian, I16};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// TGA file header.
///
/// Mirrors the 18 bytes at the start of every TGA file. All multi-byte
/// fields are little-endian and signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct TgaHeader {
    /// Length of the image-id field that follows the header.
    pub id_length: u8,
    /// Non-zero when a color map table is present.
    pub color_map: u8,
    /// Image type code, see [`TgaImageType`].
    pub image_type: u8,
    /// First color map entry index.
    pub color_map_origin: I16<LittleEndian>,
    /// Number of color map entries.
    pub color_map_length: I16<LittleEndian>,
    /// Bits per color map entry.
    pub color_map_depth: u8,
    /// Horizontal image origin.
    pub x_origin: I16<LittleEndian>,
    /// Vertical image origin.
    pub y_origin: I16<LittleEndian>,
    /// Image width in pixels.
    pub width: I16<LittleEndian>,
    /// Image height in pixels.
    pub height: I16<LittleEndian>,
    /// Bits per pixel.
    pub bits_per_pixel: u8,
    /// Image descriptor (alpha bits and origin flags).
    pub image_descriptor: u8,
}

impl TgaHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 18;

    /// Descriptor bit set when the first stored row is the top row.
    pub const TOP_LEFT_ORIGIN: u8 = 0x20;

    /// Decoded image type, if the code is one of the known values.
    pub fn image_type(&self) -> Option<TgaImageType> {
        TgaImageType::from_code(self.image_type)
    }

    /// Width in pixels as stored (may be negative in a corrupt file).
    pub fn width(&self) -> i16 {
        self.width.get()
    }

    /// Height in pixels as stored (may be negative in a corrupt file).
    pub fn height(&self) -> i16 {
        self.height.get()
    }

    /// Bytes occupied by one stored pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel) / 8
    }

    /// Whether pixel rows are stored top to bottom.
    pub fn is_top_down(&self) -> bool {
        self.image_descriptor & Self::TOP_LEFT_ORIGIN != 0
    }

    /// Whether the stored pixels carry an alpha sample.
    pub fn has_alpha(&self) -> bool {
        self.bits_per_pixel == 32
    }

    /// Bytes of color map table that sit between the image-id field and the pixels.
    ///
    /// Computed as depth × length × 3 when the color map flag is set.
    pub fn color_map_size(&self) -> usize {
        if self.color_map == 0 {
            return 0;
        }
        let length = usize::try_from(self.color_map_length.get()).unwrap_or(0);
        usize::from(self.color_map_depth) * length * 3
    }
}

/// TGA image type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TgaImageType {
    /// No image data.
    NoImageData = 0,
    /// Uncompressed, color-mapped.
    UncompressedColorMapped = 1,
    /// Uncompressed, true-color.
    UncompressedTrueColor = 2,
    /// Uncompressed, black and white.
    UncompressedBlackWhite = 3,
    /// Run-length encoded, color-mapped.
    RleColorMapped = 9,
    /// Run-length encoded, true-color.
    RleTrueColor = 10,
    /// Run-length encoded, black and white.
    RleBlackWhite = 11,
}

impl TgaImageType {
    /// Map a raw header code to an image type.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NoImageData),
            1 => Some(Self::UncompressedColorMapped),
            2 => Some(Self::UncompressedTrueColor),
            3 => Some(Self::UncompressedBlackWhite),
            9 => Some(Self::RleColorMapped),
            10 => Some(Self::RleTrueColor),
            11 => Some(Self::RleBlackWhite),
            _ => None,
        }
    }

    /// Whether pixel data is run-length encoded.
    pub fn is_rle(self) -> bool {
        matches!(
            self,
            Self::RleColorMapped | Self::RleTrueColor | Self::RleBlackWhite
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        assert_eq!(std::mem::size_of::<TgaHeader>(), TgaHeader::SIZE);
    }

    #[test]
    fn test_header_fields_from_offsets() {
        let bytes: [u8; 18] = [
            3, 1, 10, // id length, color map, image type
            0x01, 0x00, 0x04, 0x00, 24, // color map origin, length, depth
            0x00, 0x00, 0x00, 0x00, // x/y origin
            0x00, 0x01, 0x80, 0x00, // width 256, height 128
            32, 0x28, // bpp, descriptor
        ];
        let header = TgaHeader::read_from_bytes(&bytes[..]).unwrap();

        assert_eq!(header.id_length, 3);
        assert_eq!(header.image_type(), Some(TgaImageType::RleTrueColor));
        assert_eq!(header.color_map_origin.get(), 1);
        assert_eq!(header.width(), 256);
        assert_eq!(header.height(), 128);
        assert_eq!(header.bytes_per_pixel(), 4);
        assert!(header.is_top_down());
        assert!(header.has_alpha());
        assert_eq!(header.color_map_size(), 24 * 4 * 3);
    }

    #[test]
    fn test_unknown_image_type() {
        assert_eq!(TgaImageType::from_code(42), None);
        assert!(TgaImageType::RleBlackWhite.is_rle());
        assert!(!TgaImageType::UncompressedTrueColor.is_rle());
    }
}
