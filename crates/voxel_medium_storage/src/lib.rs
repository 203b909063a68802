//! Storage and conversion for participating-medium voxel grids.
//!
//! The core types are:
//!   - `VoxelGrid`: a dense `Array3` of per-voxel absorption, scattering, and emission
//!   - `SupervoxelGrid`: per-block majorants of the extinction coefficient, for delta tracking
//!
//! A grid has two serialized forms. The structured form is a self-describing JSON document, convenient for authoring and
//! inspection (see `structured`). The binary form is a fixed little-endian layout meant to be memory-mapped by a renderer
//! (see `binary`). Both store voxels in the same canonical order, X fastest, then Y, then Z.
//!
//! The `conversion` module ties these together into file-to-file conversions that never leave partial output behind.

pub mod array;
pub mod binary;
pub mod conversion;
pub mod error;
pub mod majorant;
pub mod structured;

pub use array::*;
pub use binary::*;
pub use conversion::*;
pub use error::*;
pub use majorant::*;
pub use structured::*;

pub mod prelude {
    pub use super::{
        build_majorant, convert_to_binary, convert_to_majorant, decode_majorant, decode_structured,
        decode_structured_str, decode_voxel_grid, encode_majorant, encode_structured,
        encode_structured_string, encode_voxel_grid, write_structured_file, Array3,
        ConversionConfig, GridError, MajorantView, StructuredOptions, Stride, SupervoxelGrid,
        VoxelGrid, VoxelGridView,
    };
}
