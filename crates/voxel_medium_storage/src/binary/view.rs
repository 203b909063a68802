use super::{BinaryRecord, GridHeader, HEADER_SIZE};
use crate::{GridError, Indexer3, Result};

use voxel_medium_core::prelude::*;

use std::marker::PhantomData;

/// Reads records from an encoded binary grid in place, without decoding the whole body.
///
/// The header and stream length are validated once by `new`. After that, each lookup computes the record offset from the
/// canonical linearization and decodes only that record, which is how a renderer samples a memory-mapped grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a, R> {
    bytes: &'a [u8],
    header: GridHeader,
    extent: Extent3i,
    marker: PhantomData<R>,
}

pub type VoxelGridView<'a> = GridView<'a, Voxel>;
pub type MajorantView<'a> = GridView<'a, Rgb>;

impl<'a, R: BinaryRecord> GridView<'a, R> {
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let (header, extent) = GridHeader::read_stream(bytes, R::SIZE)?;

        Ok(Self {
            bytes,
            header,
            extent,
            marker: PhantomData,
        })
    }

    #[inline]
    pub fn header(&self) -> &GridHeader {
        &self.header
    }

    #[inline]
    pub fn extent(&self) -> &Extent3i {
        &self.extent
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32, u32) {
        self.extent.dimensions()
    }

    /// Decodes the record at `p`.
    pub fn get(&self, p: Point3i) -> Result<R> {
        if !self.extent.contains(p) {
            return Err(GridError::OutOfBounds {
                point: p,
                dims: self.dimensions(),
            });
        }

        let stride = Indexer3::stride_from_local_point(self.extent.shape, p - self.extent.minimum);
        let start = HEADER_SIZE + stride.0 * R::SIZE;

        Ok(R::read_record(&self.bytes[start..start + R::SIZE])?)
    }
}

impl<'a> VoxelGridView<'a> {
    #[inline]
    pub fn voxel(&self, p: Point3i) -> Result<Voxel> {
        self.get(p)
    }
}

impl<'a> MajorantView<'a> {
    /// The majorant of block `p`. Note that `p` is in block coordinates, not voxel coordinates.
    #[inline]
    pub fn majorant(&self, p: Point3i) -> Result<Rgb> {
        self.get(p)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
