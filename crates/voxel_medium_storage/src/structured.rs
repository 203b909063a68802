//! The human-editable JSON form of a medium grid.
//!
//! ```json
//! {
//!     "width": 2, "height": 1, "depth": 1,
//!     "grid": [
//!         [
//!             [
//!                 [[0.1, 0.1, 0.1], [0.5, 0.5, 0.5]],
//!                 [[0.2, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]
//!             ]
//!         ]
//!     ]
//! }
//! ```
//!
//! `grid` is nested as `grid[z][y][x]`: one list per depth plane, one list per row in each plane, one record per voxel in each
//! row. This is the canonical storage order of [`Array3`](crate::Array3), so flattening the nesting yields the values in the
//! same order as the binary body.
//!
//! Each voxel record is a list of two or three `[r, g, b]` triples: `sigma_a`, `sigma_s`, and an optional `emission`. Missing
//! emission reads as zero, and the encoder omits emission when it is exactly `+0.0` in all channels.
//!
//! Floats are written in their shortest round-trip representation, so decoding an encoded grid reproduces every coefficient
//! bit for bit. JSON can't represent NaN or infinity, so encoding a grid containing them fails.

use crate::{GridError, Result, VoxelGrid};

use voxel_medium_core::prelude::*;

use core::fmt;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};
use serde_json::ser::PrettyFormatter;
use std::io::{BufReader, Read, Write};

/// Formatting of encoded documents.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StructuredOptions {
    /// Write one value per line instead of a single line.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty`.
    pub indent: usize,
}

impl Default for StructuredOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: 4,
        }
    }
}

impl StructuredOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Default::default()
        }
    }
}

/// Reads a grid from a JSON document. The whole document is parsed and validated before a grid is returned.
pub fn decode_structured(reader: impl Read) -> Result<VoxelGrid> {
    let document: StructuredDocument =
        serde_json::from_reader(BufReader::new(reader)).map_err(json_error)?;

    document.into_grid()
}

/// Reads a grid from a JSON document held in memory.
pub fn decode_structured_str(json: &str) -> Result<VoxelGrid> {
    let document: StructuredDocument = serde_json::from_str(json).map_err(json_error)?;

    document.into_grid()
}

/// Writes `grid` as a JSON document.
pub fn encode_structured(
    grid: &VoxelGrid,
    writer: impl Write,
    options: &StructuredOptions,
) -> Result<()> {
    check_representable(grid)?;

    let document = DocumentSer(grid);
    if options.pretty {
        let indent = vec![b' '; options.indent];
        let mut serializer =
            serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(&indent));
        document.serialize(&mut serializer).map_err(json_error)
    } else {
        serde_json::to_writer(writer, &document).map_err(json_error)
    }
}

/// Writes `grid` as a JSON string.
pub fn encode_structured_string(grid: &VoxelGrid, options: &StructuredOptions) -> Result<String> {
    let mut bytes = Vec::new();
    encode_structured(grid, &mut bytes, options)?;

    // serde_json only emits UTF-8.
    String::from_utf8(bytes).map_err(|e| GridError::Schema(e.to_string()))
}

fn json_error(e: serde_json::Error) -> GridError {
    if e.is_io() {
        GridError::Io(e.into())
    } else {
        GridError::Schema(e.to_string())
    }
}

fn check_representable(grid: &VoxelGrid) -> Result<()> {
    for (p, v) in grid.iter() {
        let mut channels = v.sigma_a.0.iter().chain(&v.sigma_s.0).chain(&v.emission.0);
        if channels.any(|c| !c.is_finite()) {
            return Err(GridError::Schema(format!(
                "voxel {} has a non-finite coefficient, which JSON cannot represent",
                p
            )));
        }
    }

    Ok(())
}

// ██████╗ ███████╗ ██████╗ ██████╗ ██████╗ ███████╗
// ██╔══██╗██╔════╝██╔════╝██╔═══██╗██╔══██╗██╔════╝
// ██║  ██║█████╗  ██║     ██║   ██║██║  ██║█████╗
// ██║  ██║██╔══╝  ██║     ██║   ██║██║  ██║██╔══╝
// ██████╔╝███████╗╚██████╗╚██████╔╝██████╔╝███████╗
// ╚═════╝ ╚══════╝ ╚═════╝ ╚═════╝ ╚═════╝ ╚══════╝

#[derive(serde::Deserialize)]
struct StructuredDocument {
    width: u32,
    height: u32,
    depth: u32,
    grid: Vec<Vec<Vec<VoxelRecord>>>,
}

impl StructuredDocument {
    fn into_grid(self) -> Result<VoxelGrid> {
        let Self {
            width,
            height,
            depth,
            grid,
        } = self;

        let extent = Extent3i::from_u32_dimensions(width, height, depth).ok_or_else(|| {
            GridError::Schema(format!(
                "dimensions ({}, {}, {}) must be positive, at most {}, and addressable in memory",
                width,
                height,
                depth,
                i32::MAX
            ))
        })?;

        let num_records: usize = grid.iter().flatten().map(Vec::len).sum();
        if num_records != extent.num_points() {
            return Err(GridError::DimensionMismatch {
                what: "voxel records".into(),
                expected: extent.num_points(),
                actual: num_records,
            });
        }

        // The total can match while the nesting is ragged, which would scramble the voxel order.
        check_len("depth planes", depth, grid.len())?;
        for plane in grid.iter() {
            check_len("rows per plane", height, plane.len())?;
            for row in plane.iter() {
                check_len("voxels per row", width, row.len())?;
            }
        }

        let values = extent
            .iter_points()
            .zip(grid.into_iter().flatten().flatten())
            .map(|(p, record)| record.into_voxel(p))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(width, height, depth, "decoded structured grid");

        VoxelGrid::from_values(extent, values)
    }
}

fn check_len(what: &str, expected: u32, actual: usize) -> Result<()> {
    if expected as usize != actual {
        return Err(GridError::DimensionMismatch {
            what: what.into(),
            expected: expected as usize,
            actual,
        });
    }

    Ok(())
}

/// A voxel record: `[sigma_a, sigma_s]` or `[sigma_a, sigma_s, emission]`.
///
/// Components are read at full JSON precision so values outside the `f32` range are reported instead of becoming infinite.
struct VoxelRecord {
    sigma_a: [f64; 3],
    sigma_s: [f64; 3],
    emission: [f64; 3],
}

impl VoxelRecord {
    fn into_voxel(self, p: Point3i) -> Result<Voxel> {
        let channel = |name: &str, raw: [f64; 3]| -> Result<Rgb> {
            let rgb = Rgb(raw.map(|c| c as f32));
            if let Some(c) = raw.iter().zip(rgb.0).find(|(_, narrow)| !narrow.is_finite()) {
                return Err(GridError::Schema(format!(
                    "voxel {} has {} component {} outside the f32 range",
                    p, name, c.0
                )));
            }

            Ok(rgb)
        };

        Ok(Voxel {
            sigma_a: channel("sigma_a", self.sigma_a)?,
            sigma_s: channel("sigma_s", self.sigma_s)?,
            emission: channel("emission", self.emission)?,
        })
    }
}

impl<'de> Deserialize<'de> for VoxelRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(VoxelRecordVisitor)
    }
}

struct VoxelRecordVisitor;

impl<'de> Visitor<'de> for VoxelRecordVisitor {
    type Value = VoxelRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a voxel record of 2 or 3 [r, g, b] triples")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let sigma_a: [f64; 3] = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let sigma_s: [f64; 3] = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let emission: Option<[f64; 3]> = seq.next_element()?;

        if emission.is_some() && seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(4, &self));
        }

        Ok(VoxelRecord {
            sigma_a,
            sigma_s,
            emission: emission.unwrap_or([0.0; 3]),
        })
    }
}

// ███████╗███╗   ██╗ ██████╗ ██████╗ ██████╗ ███████╗
// ██╔════╝████╗  ██║██╔════╝██╔═══██╗██╔══██╗██╔════╝
// █████╗  ██╔██╗ ██║██║     ██║   ██║██║  ██║█████╗
// ██╔══╝  ██║╚██╗██║██║     ██║   ██║██║  ██║██╔══╝
// ███████╗██║ ╚████║╚██████╗╚██████╔╝██████╔╝███████╗
// ╚══════╝╚═╝  ╚═══╝ ╚═════╝ ╚═════╝ ╚═════╝ ╚══════╝

struct DocumentSer<'a>(&'a VoxelGrid);

impl Serialize for DocumentSer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let (width, height, depth) = self.0.dimensions();

        let mut doc = serializer.serialize_struct("StructuredDocument", 4)?;
        doc.serialize_field("width", &width)?;
        doc.serialize_field("height", &height)?;
        doc.serialize_field("depth", &depth)?;
        doc.serialize_field(
            "grid",
            &PlanesSer {
                values: self.0.values_slice(),
                width: width as usize,
                height: height as usize,
            },
        )?;
        doc.end()
    }
}

struct PlanesSer<'a> {
    values: &'a [Voxel],
    width: usize,
    height: usize,
}

impl Serialize for PlanesSer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let planes = self.values.chunks(self.width * self.height);
        let mut seq = serializer.serialize_seq(Some(planes.len()))?;
        for plane in planes {
            seq.serialize_element(&PlaneSer {
                values: plane,
                width: self.width,
            })?;
        }
        seq.end()
    }
}

struct PlaneSer<'a> {
    values: &'a [Voxel],
    width: usize,
}

impl Serialize for PlaneSer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values.chunks(self.width).map(RowSer))
    }
}

struct RowSer<'a>(&'a [Voxel]);

impl Serialize for RowSer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(RecordSer))
    }
}

struct RecordSer<'a>(&'a Voxel);

impl Serialize for RecordSer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let v = self.0;
        let has_emission = !v.emission.is_positive_zero();

        let mut seq = serializer.serialize_seq(Some(if has_emission { 3 } else { 2 }))?;
        seq.serialize_element(&v.sigma_a)?;
        seq.serialize_element(&v.sigma_s)?;
        if has_emission {
            seq.serialize_element(&v.emission)?;
        }
        seq.end()
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
