use voxel_medium::storage::{
    convert_to_binary, convert_to_majorant, write_structured_file, ConversionConfig, GridError,
    StructuredOptions,
};
use voxel_medium::procgen::random_grid;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Converts participating-medium grids between their structured and binary forms.
#[derive(Parser, Debug)]
#[command(name = "voxel_medium", version, long_about = None)]
struct Args {
    /// Log each conversion step.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log everything, including per-stream details. Overrides `--verbose`.
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a structured .json grid to a binary voxel grid.
    ToBin {
        input: PathBuf,
        /// Defaults to the input path with a .bin extension.
        output: Option<PathBuf>,
    },
    /// Build a binary majorant grid from a structured .json grid.
    Majorant {
        input: PathBuf,
        /// Edge length of each cubic block. Must divide every grid dimension.
        supervoxel_size: u32,
        /// Defaults to the input path with a _majorant.bin suffix.
        output: Option<PathBuf>,
    },
    /// Write a cube of uniformly random coefficients as a structured .json grid.
    Generate { output: PathBuf, size: u32 },
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(e) = run(args.command) {
        let exit_code = e.exit_code();
        tracing::debug!(error = ?e, exit_code, "conversion failed");
        eprintln!("error: {}", e);
        std::process::exit(exit_code);
    }
}

fn run(command: Command) -> Result<(), GridError> {
    match command {
        Command::ToBin { input, output } => {
            let output = convert_to_binary(&ConversionConfig { input, output })?;
            println!("wrote {}", output.display());
        }
        Command::Majorant {
            input,
            supervoxel_size,
            output,
        } => {
            let output = convert_to_majorant(&ConversionConfig { input, output }, supervoxel_size)?;
            println!("wrote {}", output.display());
        }
        Command::Generate { output, size } => {
            tracing::info!(size, output = ?output, "generating random grid");
            let grid = random_grid(size)?;
            write_structured_file(&grid, &output, &StructuredOptions::default())?;
            println!("wrote {}", output.display());
        }
    }

    Ok(())
}

fn init_logging(args: &Args) {
    let level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_keep_their_own_exit_code() {
        let err = Args::try_parse_from(["voxel_medium", "majorant", "cloud.json", "four"]).unwrap_err();

        assert_eq!(err.exit_code(), GridError::USAGE_EXIT_CODE);
    }

    #[test]
    fn failed_conversion_reports_grid_error_code() {
        let args = Args::try_parse_from(["voxel_medium", "-d", "to-bin", "absent/cloud.json"]).unwrap();
        assert!(args.debug);

        let err = run(args.command).unwrap_err();

        assert!(matches!(err, GridError::Io(_)));
        assert!(err.exit_code() > GridError::USAGE_EXIT_CODE);
    }
}
