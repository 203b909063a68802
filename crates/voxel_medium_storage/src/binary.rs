//! The fixed-layout binary form of medium grids and majorant grids, which a renderer maps into memory and indexes directly.
//!
//! Both formats share one layout. All values are little-endian.
//!
//! ```text
//! offset 0:  u32 width, u32 height, u32 depth, u32 reserved (= 0)
//! offset 16: width * height * depth records, in canonical order (x fastest, then y, then z)
//! ```
//!
//! A voxel grid record is three padded vectors, `sigma_a`, `sigma_s`, and `emission`, each `f32 x, y, z, 0`, for 48 bytes. A
//! majorant grid record is one padded vector holding the per-channel majorant of a block, for 16 bytes. The header of a
//! majorant grid declares the reduced (block) dimensions.
//!
//! ```
//! use voxel_medium_core::prelude::*;
//! use voxel_medium_storage::prelude::*;
//!
//! let grid = VoxelGrid::zeroed(1, 1, 1).unwrap();
//! let bytes = encode_voxel_grid(&grid);
//! assert_eq!(bytes.len(), 16 + 48);
//! assert_eq!(decode_voxel_grid(&bytes).unwrap(), grid);
//! ```
//!
//! Padding floats are written as zero and ignored when read.

mod header;
mod record;
mod view;

pub use header::{GridHeader, HEADER_SIZE};
pub use record::{BinaryRecord, VECTOR_RECORD_SIZE, VOXEL_RECORD_SIZE};
pub use view::{GridView, MajorantView, VoxelGridView};

use crate::{Array3, Result, SupervoxelGrid, VoxelGrid};

use voxel_medium_core::Rgb;

use std::io::{Read, Write};

/// Writes the header and body of `array`.
pub fn write_grid<R: BinaryRecord>(array: &Array3<R>, mut writer: impl Write) -> Result<()> {
    GridHeader::from_extent(array.extent()).write(&mut writer)?;
    for record in array.values_slice() {
        record.write_record(&mut writer)?;
    }

    Ok(())
}

/// Encodes `array` into a new buffer.
pub fn encode_grid<R: BinaryRecord>(array: &Array3<R>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE + array.values_slice().len() * R::SIZE);
    write_grid(array, &mut bytes).expect("writing to a Vec can't fail");

    bytes
}

/// Decodes a whole binary grid. The stream must hold exactly the header and the body it declares.
pub fn decode_grid<R: BinaryRecord>(bytes: &[u8]) -> Result<Array3<R>> {
    let (header, extent) = GridHeader::read_stream(bytes, R::SIZE)?;

    let mut body = &bytes[HEADER_SIZE..];
    let mut values = Vec::with_capacity(extent.num_points());
    for _ in 0..extent.num_points() {
        values.push(R::read_record(&mut body)?);
    }

    tracing::debug!(
        width = header.width,
        height = header.height,
        depth = header.depth,
        bytes = bytes.len(),
        "decoded binary grid"
    );

    Array3::from_values(extent, values)
}

/// Reads a whole binary grid from `reader`. All bytes are read before any are decoded.
pub fn read_grid<R: BinaryRecord>(mut reader: impl Read) -> Result<Array3<R>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    decode_grid(&bytes)
}

pub fn write_voxel_grid(grid: &VoxelGrid, writer: impl Write) -> Result<()> {
    write_grid(grid, writer)
}

pub fn encode_voxel_grid(grid: &VoxelGrid) -> Vec<u8> {
    encode_grid(grid)
}

pub fn decode_voxel_grid(bytes: &[u8]) -> Result<VoxelGrid> {
    decode_grid(bytes)
}

pub fn write_majorant(majorant: &SupervoxelGrid, writer: impl Write) -> Result<()> {
    write_grid(majorant.majorants(), writer)
}

pub fn encode_majorant(majorant: &SupervoxelGrid) -> Vec<u8> {
    encode_grid(majorant.majorants())
}

/// Decodes a majorant grid. The block size isn't part of the format; pair the result with the block size it was built with
/// via `SupervoxelGrid::new` when voxel-space lookups are needed.
pub fn decode_majorant(bytes: &[u8]) -> Result<Array3<Rgb>> {
    decode_grid(bytes)
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
    use crate::{build_majorant, GridError};

    use voxel_medium_core::prelude::*;

    use byteorder::{ByteOrder, LittleEndian};
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_grid(extent: Extent3i, seed: u64) -> VoxelGrid {
        let mut rng = StdRng::seed_from_u64(seed);
        VoxelGrid::fill_with(extent, |_| Voxel {
            sigma_a: Rgb::new(rng.gen(), rng.gen(), rng.gen()),
            sigma_s: Rgb::new(rng.gen(), rng.gen(), rng.gen()),
            emission: Rgb::new(rng.gen(), -rng.gen::<f32>(), 0.0),
        })
    }

    #[test]
    fn single_voxel_is_64_bytes() {
        let v = Voxel::new(Rgb::new(1.0, 2.0, 3.0), Rgb::new(4.0, 5.0, 6.0))
            .with_emission(Rgb::new(7.0, 8.0, 9.0));
        let grid = VoxelGrid::fill(Extent3i::from_dimensions(1, 1, 1), v);

        let bytes = encode_voxel_grid(&grid);

        assert_eq!(bytes.len(), 64);
        let mut floats = [0.0; 12];
        LittleEndian::read_f32_into(&bytes[16..], &mut floats);
        assert_eq!(
            floats,
            [1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0, 9.0, 0.0]
        );
    }

    #[test]
    fn body_follows_canonical_order() {
        let grid = VoxelGrid::fill_with(Extent3i::from_dimensions(2, 3, 2), |p| {
            Voxel::new(Rgb::new(p.x() as f32, p.y() as f32, p.z() as f32), Rgb::ZERO)
        });

        let bytes = encode_voxel_grid(&grid);

        assert_eq!(bytes.len(), HEADER_SIZE + 12 * VOXEL_RECORD_SIZE);
        for (i, p) in grid.extent().iter_points().enumerate() {
            let offset = HEADER_SIZE + i * VOXEL_RECORD_SIZE;
            let mut sigma_a = [0.0; 3];
            LittleEndian::read_f32_into(&bytes[offset..offset + 12], &mut sigma_a);
            assert_eq!(sigma_a, [p.x() as f32, p.y() as f32, p.z() as f32]);
        }
    }

    #[test]
    fn voxel_grid_round_trip() {
        let grid = random_grid(Extent3i::from_dimensions(5, 3, 7), 1);

        let bytes = encode_voxel_grid(&grid);
        assert_eq!(bytes.len(), HEADER_SIZE + 5 * 3 * 7 * VOXEL_RECORD_SIZE);

        assert_eq!(decode_voxel_grid(&bytes).unwrap(), grid);

        let mut written = Vec::new();
        write_voxel_grid(&grid, &mut written).unwrap();
        assert_eq!(written, bytes);
        assert_eq!(read_grid::<Voxel>(written.as_slice()).unwrap(), grid);
    }

    #[test]
    fn majorant_round_trip() {
        let grid = random_grid(Extent3i::from_dimensions(4, 4, 8), 2);
        let majorant = build_majorant(&grid, 2).unwrap();

        let bytes = encode_majorant(&majorant);

        assert_eq!(bytes.len(), HEADER_SIZE + 2 * 2 * 4 * VECTOR_RECORD_SIZE);
        assert_eq!(&bytes[..HEADER_SIZE], &[2, 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&decode_majorant(&bytes).unwrap(), majorant.majorants());
    }

    #[test]
    fn truncated_body_is_rejected() {
        let bytes = encode_voxel_grid(&random_grid(Extent3i::from_dimensions(2, 2, 2), 3));

        for len in [0, 15, 16, 17, bytes.len() - 1] {
            let result = decode_voxel_grid(&bytes[..len]);
            assert!(
                matches!(result, Err(GridError::TruncatedStream { .. })),
                "length {}",
                len
            );
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode_voxel_grid(&random_grid(Extent3i::from_dimensions(1, 2, 1), 4));
        bytes.push(0);

        assert!(matches!(
            decode_voxel_grid(&bytes),
            Err(GridError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn zero_dimension_header_is_invalid() {
        let mut bytes = encode_voxel_grid(&random_grid(Extent3i::from_dimensions(1, 1, 1), 5));
        LittleEndian::write_u32(&mut bytes[4..8], 0);

        assert!(matches!(
            decode_voxel_grid(&bytes),
            Err(GridError::HeaderInvalid(_))
        ));
    }

    #[test]
    fn huge_header_is_rejected_without_allocating() {
        let mut bytes = vec![0; HEADER_SIZE];
        for i in 0..3 {
            LittleEndian::write_u32(&mut bytes[4 * i..4 * i + 4], i32::MAX as u32);
        }

        let result = decode_voxel_grid(&bytes);

        assert!(matches!(
            result,
            Err(GridError::HeaderInvalid(_)) | Err(GridError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn nonzero_padding_is_ignored() {
        let grid = random_grid(Extent3i::from_dimensions(1, 1, 1), 6);
        let mut bytes = encode_voxel_grid(&grid);
        LittleEndian::write_f32(&mut bytes[HEADER_SIZE + 12..HEADER_SIZE + 16], 42.0);

        assert_eq!(decode_voxel_grid(&bytes).unwrap(), grid);
    }
}
