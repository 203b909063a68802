use crate::{GridError, Result};

use voxel_medium_core::Extent3i;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Write};

/// Size in bytes of the header that starts every binary grid.
pub const HEADER_SIZE: usize = 16;

/// The dimensions that lead a binary grid: four little-endian `u32`s, `width, height, depth, 0`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GridHeader {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl GridHeader {
    pub fn from_extent(extent: &Extent3i) -> Self {
        let (width, height, depth) = extent.dimensions();

        Self {
            width,
            height,
            depth,
        }
    }

    pub fn write(&self, mut writer: impl Write) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.width)?;
        writer.write_u32::<LittleEndian>(self.height)?;
        writer.write_u32::<LittleEndian>(self.depth)?;
        writer.write_u32::<LittleEndian>(0)
    }

    /// Parses the header at the start of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(GridError::TruncatedStream {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        let mut header = &bytes[..HEADER_SIZE];
        let width = header.read_u32::<LittleEndian>()?;
        let height = header.read_u32::<LittleEndian>()?;
        let depth = header.read_u32::<LittleEndian>()?;
        let reserved = header.read_u32::<LittleEndian>()?;

        if reserved != 0 {
            return Err(GridError::HeaderInvalid(format!(
                "reserved field is {}, must be 0",
                reserved
            )));
        }

        let header = Self {
            width,
            height,
            depth,
        };
        header.extent()?;

        Ok(header)
    }

    /// Parses the header and checks that `bytes` holds exactly the body it declares, with `record_size` bytes per cell.
    pub fn read_stream(bytes: &[u8], record_size: usize) -> Result<(Self, Extent3i)> {
        let header = Self::read(bytes)?;
        let extent = header.extent()?;
        let expected = header.stream_len(record_size)?;

        if bytes.len() < expected {
            return Err(GridError::TruncatedStream {
                expected,
                actual: bytes.len(),
            });
        }
        if bytes.len() > expected {
            return Err(GridError::DimensionMismatch {
                what: "binary stream length".into(),
                expected,
                actual: bytes.len(),
            });
        }

        Ok((header, extent))
    }

    /// The grid extent declared by this header.
    pub fn extent(&self) -> Result<Extent3i> {
        Extent3i::from_u32_dimensions(self.width, self.height, self.depth).ok_or_else(|| {
            GridError::HeaderInvalid(format!(
                "dimensions ({}, {}, {}) must be positive and at most {}",
                self.width,
                self.height,
                self.depth,
                i32::MAX
            ))
        })
    }

    /// Total stream length for a body of `record_size`-byte records, one per cell.
    pub fn stream_len(&self, record_size: usize) -> Result<usize> {
        [self.width, self.height, self.depth]
            .iter()
            .try_fold(record_size, |acc, d| acc.checked_mul(*d as usize))
            .and_then(|body| body.checked_add(HEADER_SIZE))
            .ok_or_else(|| {
                GridError::HeaderInvalid(format!(
                    "dimensions ({}, {}, {}) overflow the addressable size",
                    self.width, self.height, self.depth
                ))
            })
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn header_layout_is_little_endian_with_zero_padding() {
        let mut bytes = Vec::new();
        GridHeader {
            width: 1,
            height: 0x0102,
            depth: 3,
        }
        .write(&mut bytes)
        .unwrap();

        assert_eq!(bytes, vec![1, 0, 0, 0, 2, 1, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn zero_dimension_is_invalid() {
        let bytes = [4, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0];

        assert!(matches!(
            GridHeader::read(&bytes),
            Err(GridError::HeaderInvalid(_))
        ));
    }

    #[test]
    fn negative_dimension_is_invalid() {
        // -1 as a two's complement i32.
        let bytes = [0xff, 0xff, 0xff, 0xff, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0];

        assert!(matches!(
            GridHeader::read(&bytes),
            Err(GridError::HeaderInvalid(_))
        ));
    }

    #[test]
    fn nonzero_reserved_is_invalid() {
        let bytes = [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 9, 0, 0, 0];

        assert!(matches!(
            GridHeader::read(&bytes),
            Err(GridError::HeaderInvalid(_))
        ));
    }

    #[test]
    fn short_header_is_truncated() {
        assert!(matches!(
            GridHeader::read(&[1, 0, 0]),
            Err(GridError::TruncatedStream {
                expected: 16,
                actual: 3
            })
        ));
    }
}
