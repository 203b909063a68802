//! Supervoxel majorant grids.
//!
//! A delta-tracking renderer needs an upper bound on the extinction coefficient `sigma_t = sigma_a + sigma_s` along each ray
//! segment. A single global bound is valid but loose in sparse media, so the grid is partitioned into cubic blocks of edge `S`
//! (supervoxels) and each block stores the per-channel maximum of `sigma_t` over its `S^3` voxels.
//!
//! The majorant grid has dimensions `(width / S, height / S, depth / S)` and is stored in the same canonical order as a voxel
//! grid. Every dimension must be divisible by `S`.
//!
//! ```
//! use voxel_medium_core::prelude::*;
//! use voxel_medium_storage::prelude::*;
//!
//! let mut grid = VoxelGrid::zeroed(4, 4, 4).unwrap();
//! grid.set(Point3i([3, 0, 0]), Voxel::new(Rgb::new(2.0, 0.0, 0.0), Rgb::ZERO)).unwrap();
//!
//! let majorant = build_majorant(&grid, 2).unwrap();
//! assert_eq!(majorant.dimensions(), (2, 2, 2));
//! assert_eq!(majorant.majorant_at_voxel(Point3i([2, 1, 1])).unwrap(), Rgb::new(2.0, 0.0, 0.0));
//! assert_eq!(majorant.majorant_at_voxel(Point3i([0, 0, 0])).unwrap(), Rgb::ZERO);
//! ```

use crate::{Array3, GridError, Result, VoxelGrid};

use voxel_medium_core::prelude::*;

use rayon::prelude::*;

/// Per-block extinction majorants, along with the block size they were computed for.
#[derive(Clone, Debug, PartialEq)]
pub struct SupervoxelGrid {
    block_size: u32,
    majorants: Array3<Rgb>,
}

impl SupervoxelGrid {
    /// Pairs a majorant array with the block size it was built with, e.g. after `decode_majorant`.
    pub fn new(block_size: u32, majorants: Array3<Rgb>) -> Self {
        Self {
            block_size,
            majorants,
        }
    }

    #[inline]
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// The majorant of each block, indexed by block coordinates.
    #[inline]
    pub fn majorants(&self) -> &Array3<Rgb> {
        &self.majorants
    }

    /// Dimensions in blocks.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32, u32) {
        self.majorants.dimensions()
    }

    /// The extent of the voxel grid this majorant grid covers.
    pub fn voxel_extent(&self) -> Extent3i {
        let s = self.block_size as i32;
        let blocks = self.majorants.extent();

        Extent3i::from_min_and_shape(blocks.minimum * s, blocks.shape * s)
    }

    /// The voxels covered by `block`.
    pub fn block_extent(&self, block: Point3i) -> Extent3i {
        let s = self.block_size as i32;

        Extent3i::from_min_and_shape(block * s, Point3i::fill(s))
    }

    /// The majorant of the block that contains voxel `p`.
    pub fn majorant_at_voxel(&self, p: Point3i) -> Result<Rgb> {
        let voxel_extent = self.voxel_extent();
        if !voxel_extent.contains(p) {
            return Err(GridError::OutOfBounds {
                point: p,
                dims: voxel_extent.dimensions(),
            });
        }

        self.majorants.get(p / self.block_size as i32).copied()
    }

    /// The majorant of the whole grid.
    pub fn global_majorant(&self) -> Rgb {
        self.majorants
            .values_slice()
            .iter()
            .fold(Rgb::NEG_INFINITY, |m, b| m.max(*b))
    }
}

/// Computes the majorant of every `block_size`-cubed block of `grid`.
///
/// Fails with `IndivisibleDimension` naming the first axis that `block_size` doesn't divide. A block size of zero divides
/// nothing.
pub fn build_majorant(grid: &VoxelGrid, block_size: u32) -> Result<SupervoxelGrid> {
    let (width, height, depth) = grid.dimensions();
    let s = i32::try_from(block_size).unwrap_or(0);

    if let Some(axis) = grid.extent().untileable_axis(s) {
        let size = [width, height, depth][axis.index()];

        return Err(GridError::IndivisibleDimension {
            axis,
            size,
            block_size,
        });
    }

    let span = tracing::info_span!("build_majorant", width, height, depth, block_size);
    let _enter = span.enter();

    let grid_extent = *grid.extent();
    let block_shape = grid_extent.shape / s;
    let blocks = Extent3i::from_min_and_shape(grid_extent.minimum / s, block_shape);
    let slice_len = block_shape.x() as usize * block_shape.y() as usize;

    let mut values = vec![Rgb::NEG_INFINITY; blocks.num_points()];
    // Each z-slice of blocks is independent.
    values
        .par_chunks_mut(slice_len)
        .enumerate()
        .for_each(|(bz, slice)| {
            for (i, out) in slice.iter_mut().enumerate() {
                let local = Point3i([
                    (i % block_shape.x() as usize) as i32,
                    (i / block_shape.x() as usize) as i32,
                    bz as i32,
                ]);
                let block_min = (blocks.minimum + local) * s;
                *out = block_majorant(grid, &Extent3i::from_min_and_shape(block_min, Point3i::fill(s)));
            }
        });

    let majorants = Array3::from_values(blocks, values)?;
    let result = SupervoxelGrid::new(block_size, majorants);

    tracing::info!(
        blocks = blocks.num_points(),
        global_majorant = ?result.global_majorant(),
        "built supervoxel majorants"
    );

    Ok(result)
}

/// The per-channel maximum of `sigma_t` over the voxels of `grid` in `block`.
pub fn block_majorant(grid: &VoxelGrid, block: &Extent3i) -> Rgb {
    let mut majorant = Rgb::NEG_INFINITY;
    grid.for_each(block, |_p, v| majorant = majorant.max(v.sigma_t()));

    majorant
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
    use crate::{encode_majorant, HEADER_SIZE, VECTOR_RECORD_SIZE};

    use utilities::data_sets::{random_voxel_fn, single_voxel_fn};

    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    #[test]
    fn single_hot_voxel_sets_its_block() {
        let grid = VoxelGrid::fill_with(
            Extent3i::from_dimensions(2, 2, 2),
            single_voxel_fn(Point3i::ZERO, Voxel::new(Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.0, 1.0, 0.0))),
        );

        let majorant = build_majorant(&grid, 2).unwrap();

        assert_eq!(majorant.dimensions(), (1, 1, 1));
        assert_eq!(majorant.majorants().values_slice(), &[Rgb::new(1.0, 1.0, 0.0)]);
        assert_eq!(encode_majorant(&majorant).len(), 32);
    }

    #[test]
    fn majorants_are_sound_and_tight() {
        let grid = VoxelGrid::fill_with(Extent3i::from_dimensions(8, 12, 4), random_voxel_fn(7));

        let majorant = build_majorant(&grid, 4).unwrap();
        assert_eq!(majorant.dimensions(), (2, 3, 1));

        for (block, m) in majorant.majorants().iter() {
            let extent = majorant.block_extent(block);
            let mut hit = [false; 3];
            grid.for_each(&extent, |_p, v| {
                let t = v.sigma_t();
                for c in 0..3 {
                    assert!(t[c] <= m[c]);
                    hit[c] |= t[c] == m[c];
                }
            });
            assert_eq!(hit, [true; 3]);
        }
    }

    #[test]
    fn block_size_one_is_the_extinction_grid() {
        let grid = VoxelGrid::fill_with(Extent3i::from_dimensions(3, 2, 5), random_voxel_fn(8));

        let majorant = build_majorant(&grid, 1).unwrap();

        assert_eq!(majorant.majorants(), &grid.map(|v| v.sigma_t()));
    }

    #[test]
    fn whole_grid_block_is_the_global_majorant() {
        let grid = VoxelGrid::fill_with(Extent3i::from_dimensions(6, 6, 6), random_voxel_fn(9));

        let majorant = build_majorant(&grid, 6).unwrap();

        assert_eq!(majorant.dimensions(), (1, 1, 1));
        assert_eq!(majorant.global_majorant(), grid.max_extinction());
    }

    #[test]
    fn build_is_deterministic() {
        let grid = VoxelGrid::fill_with(Extent3i::from_dimensions(16, 16, 16), random_voxel_fn(10));

        let first = encode_majorant(&build_majorant(&grid, 4).unwrap());
        let second = encode_majorant(&build_majorant(&grid, 4).unwrap());

        assert_eq!(first.len(), HEADER_SIZE + 64 * VECTOR_RECORD_SIZE);
        assert_eq!(first, second);
    }

    #[test]
    fn block_reduction_ignores_visit_order() {
        let grid = VoxelGrid::fill_with(Extent3i::from_dimensions(4, 4, 4), random_voxel_fn(12));
        let block = Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::fill(4));
        let in_order = block_majorant(&grid, &block);

        let mut rng = StdRng::seed_from_u64(13);
        let mut points: Vec<_> = block.iter_points().collect();
        for _ in 0..8 {
            points.shuffle(&mut rng);
            let shuffled = points
                .iter()
                .fold(Rgb::NEG_INFINITY, |m, p| m.max(grid.get(*p).unwrap().sigma_t()));

            assert_eq!(shuffled, in_order);
        }
    }

    #[test]
    fn majorant_at_voxel_uses_containing_block() {
        let grid = VoxelGrid::fill_with(Extent3i::from_dimensions(4, 4, 4), random_voxel_fn(11));
        let majorant = build_majorant(&grid, 2).unwrap();

        for (p, v) in grid.iter() {
            let m = majorant.majorant_at_voxel(p).unwrap();
            assert!(m.dominates(&v.sigma_t()));
            assert_eq!(m, *majorant.majorants().get(p / 2).unwrap());
        }

        assert!(matches!(
            majorant.majorant_at_voxel(Point3i([-1, 0, 0])),
            Err(GridError::OutOfBounds { dims: (4, 4, 4), .. })
        ));
        assert!(majorant.majorant_at_voxel(Point3i([0, 4, 0])).is_err());
    }

    #[test]
    fn indivisible_dimension_names_the_axis() {
        let grid = VoxelGrid::zeroed(4, 4, 6).unwrap();

        let err = build_majorant(&grid, 4).unwrap_err();

        assert!(matches!(
            err,
            GridError::IndivisibleDimension {
                axis: Axis3::Z,
                size: 6,
                block_size: 4
            }
        ));
        assert_eq!(err.to_string(), "depth 6 is not divisible by supervoxel size 4");
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let grid = VoxelGrid::zeroed(2, 2, 2).unwrap();

        assert!(matches!(
            build_majorant(&grid, 0),
            Err(GridError::IndivisibleDimension { block_size: 0, .. })
        ));
    }

    #[test]
    fn block_larger_than_grid_is_rejected() {
        let grid = VoxelGrid::zeroed(2, 2, 2).unwrap();

        assert!(matches!(
            build_majorant(&grid, 4),
            Err(GridError::IndivisibleDimension { axis: Axis3::X, .. })
        ));
    }
}
