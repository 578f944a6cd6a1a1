//! Binary reader for bounds-checked parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type over a byte
//! slice that reports every out-of-bounds read as [`Error::UnexpectedEof`]
//! instead of panicking.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader over a borrowed byte slice.
///
/// # Example
///
/// ```
/// use optmap_common::BinaryReader;
///
/// let data = [0x02, 0x00, 0xFE, 0xFF, 0x18];
/// let mut reader = BinaryReader::new(&data);
///
/// reader.skip(2).unwrap();
/// assert_eq!(reader.read_bytes(2).unwrap(), &[0xFE, 0xFF]);
/// assert_eq!(reader.read_u8().unwrap(), 24);
/// assert_eq!(reader.remaining(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Skip a number of bytes, failing if fewer remain.
    #[inline]
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if available < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available,
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zerocopy::byteorder::{LittleEndian, U16};
    use zerocopy::{Immutable, KnownLayout, Unaligned};

    #[derive(FromBytes, Immutable, KnownLayout, Unaligned)]
    #[repr(C)]
    struct Pair {
        tag: u8,
        value: U16<LittleEndian>,
    }

    #[test]
    fn test_read_struct_then_bytes() {
        let data = [0x07u8, 0x34, 0x12, 0xAA, 0xBB];
        let mut reader = BinaryReader::new(&data);

        let pair: Pair = reader.read_struct().unwrap();
        assert_eq!(pair.tag, 7);
        assert_eq!(pair.value.get(), 0x1234);
        assert_eq!(reader.read_bytes(2).unwrap(), &[0xAA, 0xBB]);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_skip_past_end_fails() {
        let data = [0u8; 4];
        let mut reader = BinaryReader::new(&data);

        assert!(reader.skip(2).is_ok());
        assert_eq!(reader.remaining(), 2);
        let err = reader.skip(3).unwrap_err();
        assert!(err.is_eof());
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        match reader.read_struct::<Pair>().map(|_| ()) {
            Err(Error::UnexpectedEof { needed, available }) => {
                assert_eq!(needed, 3);
                assert_eq!(available, 2);
            }
            other => panic!("expected EOF, got {:?}", other),
        }
    }
}
