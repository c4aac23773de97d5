use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slicer")]
#[command(version, about = "Sprite-sheet slicer", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cut frames out of sprite sheets and key out their background
    Slice(SliceArgs),
    /// Write the built-in sheet table as an editable config file
    Init(InitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SliceArgs {
    /// Sheet table to use instead of the built-in one
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory sheet and output paths are relative to [default: config file directory, or .]
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Only slice sheets whose path matches this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub only: Vec<String>,

    /// Per-channel background tolerance, 0-255 [default: 25]
    #[arg(short, long)]
    pub tolerance: Option<u8>,

    /// Worker threads, 0 for one per core [default: 0]
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Write a JSON manifest of the frames next to each sheet's output
    #[arg(long)]
    pub manifest: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Config file to create
    #[arg(default_value = "slicer.json")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
