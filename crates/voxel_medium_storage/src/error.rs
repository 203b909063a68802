//! Error types for grid conversions.

use voxel_medium_core::{Axis3, Point3i};

use std::path::PathBuf;
use thiserror::Error;

/// Every way a conversion can fail. None of these are retried; the input must be fixed first.
#[derive(Error, Debug)]
pub enum GridError {
    /// The structured document is missing a required field or has a malformed value.
    #[error("schema error: {0}")]
    Schema(String),

    /// The number of voxel records doesn't match the declared dimensions.
    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// The supervoxel block size doesn't evenly tile the grid.
    #[error("{axis} {size} is not divisible by supervoxel size {block_size}")]
    IndivisibleDimension {
        axis: Axis3,
        size: u32,
        block_size: u32,
    },

    /// A voxel coordinate lies outside of the grid.
    #[error("voxel {point} is out of bounds for grid of dimensions {dims:?}")]
    OutOfBounds { point: Point3i, dims: (u32, u32, u32) },

    /// The binary header declares impossible dimensions.
    #[error("invalid binary header: {0}")]
    HeaderInvalid(String),

    /// The binary stream ends before the declared body does.
    #[error("truncated stream: expected {expected} bytes, got {actual}")]
    TruncatedStream { expected: usize, actual: usize },

    /// A synthetic grid was requested with a non-positive size.
    #[error("invalid grid size {0}, must be positive")]
    InvalidSize(u32),

    /// A file path doesn't have the extension its format requires.
    #[error("{path:?} is not a .{expected} file")]
    UnsupportedExtension { path: PathBuf, expected: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    /// Exit code for usage errors, as reported by the command line parser. No `GridError` maps to it.
    pub const USAGE_EXIT_CODE: i32 = 2;

    /// A distinct process exit code for each kind of failure, starting above `USAGE_EXIT_CODE`.
    pub fn exit_code(&self) -> i32 {
        match self {
            GridError::Schema(_) => 3,
            GridError::DimensionMismatch { .. } => 4,
            GridError::IndivisibleDimension { .. } => 5,
            GridError::OutOfBounds { .. } => 6,
            GridError::HeaderInvalid(_) => 7,
            GridError::TruncatedStream { .. } => 8,
            GridError::InvalidSize(_) => 9,
            GridError::UnsupportedExtension { .. } => 10,
            GridError::Io(_) => 11,
        }
    }
}

/// A specialized Result type for grid conversions.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let errors = [
            GridError::Schema(String::new()),
            GridError::DimensionMismatch {
                what: String::new(),
                expected: 1,
                actual: 0,
            },
            GridError::IndivisibleDimension {
                axis: Axis3::X,
                size: 3,
                block_size: 2,
            },
            GridError::OutOfBounds {
                point: Point3i::ZERO,
                dims: (0, 0, 0),
            },
            GridError::HeaderInvalid(String::new()),
            GridError::TruncatedStream {
                expected: 1,
                actual: 0,
            },
            GridError::InvalidSize(0),
            GridError::UnsupportedExtension {
                path: PathBuf::new(),
                expected: "json",
            },
            GridError::Io(std::io::ErrorKind::Other.into()),
        ];

        let mut codes: Vec<_> = errors.iter().map(GridError::exit_code).collect();
        assert!(codes.iter().all(|c| *c > GridError::USAGE_EXIT_CODE));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn indivisible_message_names_dimension() {
        let e = GridError::IndivisibleDimension {
            axis: Axis3::Y,
            size: 10,
            block_size: 4,
        };

        assert_eq!(e.to_string(), "height 10 is not divisible by supervoxel size 4");
    }
}
