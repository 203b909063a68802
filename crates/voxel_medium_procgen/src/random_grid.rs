use voxel_medium_core::prelude::*;
use voxel_medium_storage::{Result, VoxelGrid};

use rand::Rng;

/// A `size`-cubed grid of uniformly random coefficients, using the thread RNG.
pub fn random_grid(size: u32) -> Result<VoxelGrid> {
    random_grid_with_rng(size, &mut rand::thread_rng())
}

/// A `size`-cubed grid of uniformly random coefficients. Pass a seeded `rng` for reproducible grids.
///
/// Each component of `sigma_a` and `sigma_s` is drawn from `[0, 1)` and emission is zero. Voxels are drawn in canonical order.
pub fn random_grid_with_rng(size: u32, rng: &mut impl Rng) -> Result<VoxelGrid> {
    random_grid_with_shape((size, size, size), rng)
}

/// Like `random_grid_with_rng`, for grids that aren't cubes. Fails with `InvalidSize` if any dimension is zero.
pub fn random_grid_with_shape(dimensions: (u32, u32, u32), rng: &mut impl Rng) -> Result<VoxelGrid> {
    let (width, height, depth) = dimensions;
    let mut grid = VoxelGrid::zeroed(width, height, depth)?;

    for v in grid.values_mut_slice() {
        let sigma_a = Rgb::new(rng.gen(), rng.gen(), rng.gen());
        let sigma_s = Rgb::new(rng.gen(), rng.gen(), rng.gen());
        *v = Voxel::new(sigma_a, sigma_s);
    }

    tracing::debug!(width, height, depth, "generated random grid");

    Ok(grid)
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
