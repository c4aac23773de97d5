use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlicerError {
    #[error("Failed to decode sprite sheet '{path}': {source}")]
    SheetDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error(
        "Frame {frame_index} of '{sheet}' spans x {x_start}..{x_end}, y {y_start}..{y_end}, \
         outside the {sheet_width}x{sheet_height} sheet"
    )]
    OutOfBounds {
        sheet: PathBuf,
        frame_index: usize,
        x_start: i64,
        x_end: i64,
        y_start: i64,
        y_end: i64,
        sheet_width: u32,
        sheet_height: u32,
    },

    #[error("Sheet '{sheet}' declares {frame_count} frames but lists {offset_count} offsets")]
    ConfigMismatch {
        sheet: PathBuf,
        frame_count: usize,
        offset_count: usize,
    },

    #[error("Invalid frame size {width}x{height}")]
    InvalidFrame { width: u32, height: u32 },

    #[error("Failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode frame {frame_index} as '{path}': {source}")]
    FrameEncode {
        path: PathBuf,
        frame_index: usize,
        source: image::ImageError,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest '{path}': {source}")]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Coarse classification used by batch summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SheetDecode,
    OutOfBounds,
    ConfigMismatch,
    InvalidFrame,
    Write,
}

impl SlicerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SlicerError::SheetDecode { .. } => ErrorKind::SheetDecode,
            SlicerError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            SlicerError::ConfigMismatch { .. } => ErrorKind::ConfigMismatch,
            SlicerError::InvalidFrame { .. } => ErrorKind::InvalidFrame,
            SlicerError::OutputDir { .. }
            | SlicerError::FrameEncode { .. }
            | SlicerError::PngCompress { .. }
            | SlicerError::OutputWrite { .. }
            | SlicerError::Manifest { .. } => ErrorKind::Write,
        }
    }
}
