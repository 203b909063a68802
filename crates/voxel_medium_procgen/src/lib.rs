//! Procedural generation of medium grids.

mod random_grid;

pub use random_grid::*;
