//! Voxel fill functions shared by tests and benches. Pass them to `Array3::fill_with`.

use voxel_medium_core::prelude::*;

use rand::{rngs::StdRng, Rng, SeedableRng};

// These return fill functions instead of grids because the storage crate depends on this one for its tests, and a grid type
// from here would be a different type than the one under test: https://github.com/rust-lang/cargo/issues/6765

/// `hot` at point `p`, empty everywhere else.
pub fn single_voxel_fn(p: Point3i, hot: Voxel) -> impl FnMut(Point3i) -> Voxel {
    move |q| if q == p { hot } else { Voxel::EMPTY }
}

/// Uniformly random coefficients in `[0, 1)` and emission in `[0, 1)`, reproducible from `seed`.
pub fn random_voxel_fn(seed: u64) -> impl FnMut(Point3i) -> Voxel {
    let mut rng = StdRng::seed_from_u64(seed);

    move |_| {
        let mut rgb = || Rgb::new(rng.gen(), rng.gen(), rng.gen());
        let sigma_a = rgb();
        let sigma_s = rgb();
        let emission = rgb();

        Voxel::new(sigma_a, sigma_s).with_emission(emission)
    }
}

/// A ball of `inner` with the given `radius` centered at `center`, surrounded by empty space. This looks like a sparse
/// medium, where most supervoxel blocks have zero majorant.
pub fn sphere_voxel_fn(center: Point3i, radius: i32, inner: Voxel) -> impl Fn(Point3i) -> Voxel {
    move |p| {
        let d = p - center;
        let dist_sq = d.x() * d.x() + d.y() * d.y() + d.z() * d.z();

        if dist_sq < radius * radius {
            inner
        } else {
            Voxel::EMPTY
        }
    }
}
