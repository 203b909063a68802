//! File-to-file conversions between the structured and binary forms.
//!
//! Every conversion reads its whole input before writing anything, and writes through a temporary file in the destination
//! directory that is renamed into place only once the output is complete. A failed conversion leaves no partial output.

use crate::{
    build_majorant, decode_structured, encode_structured, write_majorant, write_voxel_grid, GridError, Result,
    StructuredOptions, VoxelGrid,
};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const STRUCTURED_EXTENSION: &str = "json";
const BINARY_EXTENSION: &str = "bin";
const MAJORANT_SUFFIX: &str = "_majorant";

/// Which binary file a conversion produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputKind {
    VoxelGrid,
    Majorant,
}

/// Where a conversion reads from and writes to.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConversionConfig {
    /// A structured `.json` grid.
    pub input: PathBuf,
    /// Defaults to a path next to the input, see `output_path`.
    pub output: Option<PathBuf>,
}

impl ConversionConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());

        self
    }

    /// The explicit output if there is one. Otherwise `x.json` becomes `x.bin` for a voxel grid or `x_majorant.bin` for a
    /// majorant grid, in the same directory.
    pub fn output_path(&self, kind: OutputKind) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }

        let stem = self.input.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = match kind {
            OutputKind::VoxelGrid => format!("{}.{}", stem, BINARY_EXTENSION),
            OutputKind::Majorant => format!("{}{}.{}", stem, MAJORANT_SUFFIX, BINARY_EXTENSION),
        };

        self.input.with_file_name(file_name)
    }
}

/// Converts a structured grid into a binary voxel grid. Returns the path written.
pub fn convert_to_binary(config: &ConversionConfig) -> Result<PathBuf> {
    let grid = read_structured_file(&config.input)?;
    let output = config.output_path(OutputKind::VoxelGrid);

    write_atomically(&output, |writer| write_voxel_grid(&grid, writer))?;
    tracing::info!(input = ?config.input, output = ?output, "wrote binary voxel grid");

    Ok(output)
}

/// Converts a structured grid into a binary majorant grid with blocks of edge `block_size`. Returns the path written.
pub fn convert_to_majorant(config: &ConversionConfig, block_size: u32) -> Result<PathBuf> {
    let grid = read_structured_file(&config.input)?;
    let majorant = build_majorant(&grid, block_size)?;
    let output = config.output_path(OutputKind::Majorant);

    write_atomically(&output, |writer| write_majorant(&majorant, writer))?;
    tracing::info!(
        input = ?config.input,
        output = ?output,
        block_size,
        "wrote binary majorant grid"
    );

    Ok(output)
}

/// Reads a whole structured grid from a `.json` file.
pub fn read_structured_file(path: &Path) -> Result<VoxelGrid> {
    check_extension(path, STRUCTURED_EXTENSION)?;

    let grid = decode_structured(File::open(path)?)?;
    tracing::info!(path = ?path, dimensions = ?grid.dimensions(), "read structured grid");

    Ok(grid)
}

/// Writes `grid` as a structured `.json` file.
pub fn write_structured_file(grid: &VoxelGrid, path: &Path, options: &StructuredOptions) -> Result<()> {
    check_extension(path, STRUCTURED_EXTENSION)?;

    write_atomically(path, |writer| encode_structured(grid, writer, options))?;
    tracing::info!(path = ?path, dimensions = ?grid.dimensions(), "wrote structured grid");

    Ok(())
}

fn check_extension(path: &Path, expected: &'static str) -> Result<()> {
    if path.extension().map_or(false, |e| e == expected) {
        Ok(())
    } else {
        Err(GridError::UnsupportedExtension {
            path: path.to_owned(),
            expected,
        })
    }
}

/// Runs `write` against a temporary file next to `path` and renames it over `path` if everything succeeds. On failure the
/// temporary file is removed when it drops.
fn write_atomically(path: &Path, write: impl FnOnce(&mut BufWriter<&mut File>) -> Result<()>) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = ?path, "persisted output");

    Ok(())
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
