//! Dense participating-medium voxel grids, for renderers that sample absorption, scattering, and emission per voxel.
//!
//! This library is organized into several crates:
//! - **core**: lattice points, extents, and the per-voxel `Rgb` coefficients
//! - **storage**: the dense grid, its structured (JSON) and binary codecs, supervoxel majorants, and file conversion
//! - **procgen**: synthetic grids for tests and benchmarks
//!
//! The `voxel_medium` binary exposes the file conversions on the command line.

pub use voxel_medium_core as core;
pub use voxel_medium_procgen as procgen;
pub use voxel_medium_storage as storage;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::procgen::{random_grid, random_grid_with_rng};
    pub use super::storage::prelude::*;
}
