//! Dense 3-dimensional arrays, the in-memory model of a medium grid.
//!
//! An `Array3<T>` holds exactly one value for each point of its `Extent3i`, stored in a flat `Vec<T>`. The storage order is
//! the canonical linearization documented on [`Indexer3`]: X varies fastest, then Y, then Z. Every codec in this crate reads
//! and writes values in this same order, so an array's `values_slice()` *is* the body order of the binary formats.
//!
//! ```
//! use voxel_medium_core::prelude::*;
//! use voxel_medium_storage::prelude::*;
//!
//! let mut grid = VoxelGrid::zeroed(4, 4, 4).unwrap();
//!
//! let v = Voxel::new(Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.0, 1.0, 0.0));
//! grid.set(Point3i([1, 2, 3]), v).unwrap();
//!
//! assert_eq!(grid.get(Point3i([1, 2, 3])).unwrap(), &v);
//! assert!(grid.get(Point3i([4, 0, 0])).is_err());
//! assert_eq!(grid.dimensions(), (4, 4, 4));
//! ```
//!
//! # Checked and unchecked access
//!
//! `get`, `get_mut`, and `set` take global points and return `GridError::OutOfBounds` for points outside the extent. When
//! iterating over a whole region, prefer `for_each`, which visits only the in-bounds part of the region and computes strides
//! incrementally instead of multiplying per point.

mod indexer;

pub use indexer::{Indexer3, Stride};

use crate::{GridError, Result};

use voxel_medium_core::prelude::*;

use core::ops::{Index, IndexMut};

/// A map from lattice location `Point3i` to data `T`, stored as a flat array on the heap.
#[derive(Clone, Debug, PartialEq)]
pub struct Array3<T> {
    values: Vec<T>,
    extent: Extent3i,
}

/// A grid of per-voxel optical properties.
pub type VoxelGrid = Array3<Voxel>;

impl<T> Array3<T> {
    /// Create a new `Array3` directly from the extent and values. Fails with `DimensionMismatch` unless the number of points
    /// in the extent matches the length of the values `Vec`.
    pub fn from_values(extent: Extent3i, values: Vec<T>) -> Result<Self> {
        if extent.num_points() != values.len() {
            return Err(GridError::DimensionMismatch {
                what: "voxel records".into(),
                expected: extent.num_points(),
                actual: values.len(),
            });
        }

        Ok(Self { values, extent })
    }

    /// Creates a map that fills the entire `extent` with the same `value`.
    pub fn fill(extent: Extent3i, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            values: vec![value; extent.num_points()],
            extent,
        }
    }

    /// Create a new array for `extent` where each point's value is determined by the `filler` function.
    pub fn fill_with(extent: Extent3i, filler: impl FnMut(Point3i) -> T) -> Self {
        Self {
            values: extent.iter_points().map(filler).collect(),
            extent,
        }
    }

    #[inline]
    pub fn extent(&self) -> &Extent3i {
        &self.extent
    }

    /// `(width, height, depth)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32, u32) {
        self.extent.dimensions()
    }

    /// Returns the entire slice of values in canonical order.
    #[inline]
    pub fn values_slice(&self) -> &[T] {
        &self.values
    }

    /// Returns the entire slice of values in canonical order.
    #[inline]
    pub fn values_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Returns `true` iff this map contains point `p`.
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        self.extent.contains(p)
    }

    /// The stride of global point `p`, or `None` if `p` is out of bounds.
    #[inline]
    pub fn stride(&self, p: Point3i) -> Option<Stride> {
        self.contains(p)
            .then(|| Indexer3::stride_from_local_point(self.extent.shape, p - self.extent.minimum))
    }

    fn checked_stride(&self, p: Point3i) -> Result<Stride> {
        self.stride(p).ok_or(GridError::OutOfBounds {
            point: p,
            dims: self.dimensions(),
        })
    }

    #[inline]
    pub fn get(&self, p: Point3i) -> Result<&T> {
        let s = self.checked_stride(p)?;

        Ok(&self.values[s.0])
    }

    #[inline]
    pub fn get_mut(&mut self, p: Point3i) -> Result<&mut T> {
        let s = self.checked_stride(p)?;

        Ok(&mut self.values[s.0])
    }

    #[inline]
    pub fn set(&mut self, p: Point3i, value: T) -> Result<()> {
        *self.get_mut(p)? = value;

        Ok(())
    }

    /// Visits every point of `extent` that's also in bounds of the array, in canonical order.
    pub fn for_each(&self, extent: &Extent3i, mut f: impl FnMut(Point3i, &T)) {
        let in_bounds = extent.intersection(&self.extent);
        Indexer3::for_each_point_and_stride_unchecked(&self.extent, &in_bounds, |p, s| {
            f(p, &self.values[s.0])
        });
    }

    /// Like `for_each`, but with mutable access.
    pub fn for_each_mut(&mut self, extent: &Extent3i, mut f: impl FnMut(Point3i, &mut T)) {
        let in_bounds = extent.intersection(&self.extent);
        let values = &mut self.values;
        Indexer3::for_each_point_and_stride_unchecked(&self.extent, &in_bounds, |p, s| {
            f(p, &mut values[s.0])
        });
    }

    /// Iterates over all points and values in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Point3i, &T)> {
        self.extent.iter_points().zip(self.values.iter())
    }

    /// Returns a new array over the same extent with `f` applied to each value.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Array3<U> {
        Array3 {
            values: self.values.iter().map(f).collect(),
            extent: self.extent,
        }
    }
}

impl VoxelGrid {
    /// A grid of empty voxels anchored at the origin. Fails with `InvalidSize` if any dimension is zero, or if the grid is
    /// too large to address in memory.
    pub fn zeroed(width: u32, height: u32, depth: u32) -> Result<Self> {
        let dims = [width, height, depth];
        // The offending dimension if there is one, otherwise the largest.
        let invalid_size = || {
            let bad = dims
                .into_iter()
                .find(|d| i32::try_from(*d).map_or(true, |d| d <= 0))
                .unwrap_or_else(|| dims.into_iter().max().unwrap_or_default());

            GridError::InvalidSize(bad)
        };

        let extent = Extent3i::from_u32_dimensions(width, height, depth).ok_or_else(invalid_size)?;
        extent
            .num_points()
            .checked_mul(std::mem::size_of::<Voxel>())
            .filter(|bytes| *bytes <= isize::MAX as usize)
            .ok_or_else(invalid_size)?;

        Ok(Self::fill(extent, Voxel::EMPTY))
    }

    /// The largest extinction coefficient in the whole grid, per channel. This is the single majorant a renderer uses when it
    /// doesn't have a supervoxel grid.
    pub fn max_extinction(&self) -> Rgb {
        self.values
            .iter()
            .fold(Rgb::NEG_INFINITY, |m, v| m.max(v.sigma_t()))
    }
}

impl<T> Index<Stride> for Array3<T> {
    type Output = T;

    #[inline]
    fn index(&self, stride: Stride) -> &T {
        &self.values[stride.0]
    }
}

impl<T> IndexMut<Stride> for Array3<T> {
    #[inline]
    fn index_mut(&mut self, stride: Stride) -> &mut T {
        &mut self.values[stride.0]
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
