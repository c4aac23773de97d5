use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::cli::CompressionLevel;
use crate::error::SlicerError;

const FALLBACK_BASENAME: &str = "sheet";

/// File name of a sheet up to its first dot ("Untitled 4.png" -> "Untitled 4").
///
/// Paths with no usable stem (".png", "/") name their frames `sheet_N`.
pub fn sheet_basename(sheet: &Path) -> String {
    sheet
        .file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| FALLBACK_BASENAME.to_string())
}

/// Output format for frames cut from `sheet`.
///
/// Frames keep the sheet's format when it can be written with an alpha
/// channel and fall back to PNG otherwise.
pub fn output_format(sheet: &Path) -> ImageFormat {
    match ImageFormat::from_path(sheet) {
        Ok(format @ (ImageFormat::Png | ImageFormat::WebP | ImageFormat::Tga | ImageFormat::Tiff)) => {
            format
        }
        _ => ImageFormat::Png,
    }
}

/// `{basename}_{index + 1}.{ext}`
pub fn frame_filename(basename: &str, index: usize, format: ImageFormat) -> String {
    let ext = format.extensions_str().first().copied().unwrap_or("png");
    format!("{}_{}.{}", basename, index + 1, ext)
}

/// Encode a keyed frame and write it, optionally compressing PNG output
pub fn write_frame(
    frame: &RgbaImage,
    path: &Path,
    frame_index: usize,
    format: ImageFormat,
    compress: Option<CompressionLevel>,
) -> Result<(), SlicerError> {
    let mut encoded = Cursor::new(Vec::new());
    frame
        .write_to(&mut encoded, format)
        .map_err(|e| SlicerError::FrameEncode {
            path: path.to_path_buf(),
            frame_index,
            source: e,
        })?;

    let output_data = match compress {
        Some(level) if format == ImageFormat::Png => {
            let opts = match level {
                CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
                CompressionLevel::Max => oxipng::Options::max_compression(),
            };
            oxipng::optimize_from_memory(&encoded.into_inner(), &opts).map_err(|e| {
                SlicerError::PngCompress {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?
        }
        _ => encoded.into_inner(),
    };

    fs::write(path, output_data).map_err(|e| SlicerError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
