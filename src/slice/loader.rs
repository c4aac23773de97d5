use std::path::Path;

use image::ImageReader;
use log::debug;

use super::SpriteSheet;
use crate::error::SlicerError;

/// Decode a sprite sheet into RGBA pixels
pub fn load_sheet(path: &Path) -> Result<SpriteSheet, SlicerError> {
    let image = ImageReader::open(path)
        .map_err(|e| SlicerError::SheetDecode {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| SlicerError::SheetDecode {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    debug!(
        "Decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    Ok(SpriteSheet {
        path: path.to_path_buf(),
        image,
    })
}
