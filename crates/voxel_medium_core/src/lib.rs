//! The core data types for describing a dense participating medium:
//! - `Point3i`: a point on the 3D integer lattice
//! - `Extent3i`: an axis-aligned box of lattice points
//! - `Rgb`: a 3-channel spectral coefficient (absorption, scattering, or emission)
//! - `Voxel`: the optical properties of a single lattice cell

pub mod axis;
pub mod extent3;
pub mod point3;
pub mod rgb;
pub mod voxel;

pub use axis::Axis3;
pub use extent3::{Extent3PointIter, Extent3i};
pub use point3::Point3i;
pub use rgb::Rgb;
pub use voxel::Voxel;

pub mod prelude {
    pub use super::{Axis3, Extent3i, Point3i, Rgb, Voxel};
}
