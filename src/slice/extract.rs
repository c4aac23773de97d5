use std::path::Path;

use image::{RgbaImage, imageops};

use super::{FrameBox, FrameSpec, SpriteSheet};
use crate::error::SlicerError;

/// Explicit offsets must list exactly one entry per frame
pub fn check_offsets(spec: &FrameSpec, sheet: &Path) -> Result<(), SlicerError> {
    match &spec.offsets {
        Some(offsets) if offsets.len() != spec.frame_count => Err(SlicerError::ConfigMismatch {
            sheet: sheet.to_path_buf(),
            frame_count: spec.frame_count,
            offset_count: offsets.len(),
        }),
        _ => Ok(()),
    }
}

/// Reject degenerate frame sizes before any decoding happens
pub fn check_frame_size(spec: &FrameSpec) -> Result<(), SlicerError> {
    if spec.frame_width == 0 || spec.frame_height == 0 {
        return Err(SlicerError::InvalidFrame {
            width: spec.frame_width,
            height: spec.frame_height,
        });
    }
    Ok(())
}

/// Compute and bounds-check every frame window of a sheet.
///
/// Windows are produced one index at a time. The first one that leaves the
/// sheet ends the walk.
pub fn frame_boxes(
    spec: &FrameSpec,
    sheet: &Path,
    sheet_width: u32,
    sheet_height: u32,
) -> Result<Vec<FrameBox>, SlicerError> {
    check_offsets(spec, sheet)?;
    check_frame_size(spec)?;

    let width = i64::from(spec.frame_width);
    let y_start = i64::from(spec.y_offset);
    let y_end = y_start + i64::from(spec.frame_height);

    (0..spec.frame_count)
        .map(|index| {
            let offset = spec.offset_at(index);
            let x_start = i64::try_from(index)
                .unwrap_or(i64::MAX)
                .saturating_mul(width)
                .saturating_add(i64::from(offset));
            let x_end = x_start.saturating_add(width);

            let in_bounds = x_start >= 0
                && x_end <= i64::from(sheet_width)
                && y_end <= i64::from(sheet_height);

            match u32::try_from(x_start) {
                Ok(x) if in_bounds => Ok(FrameBox {
                    index,
                    offset,
                    x,
                    y: spec.y_offset,
                    width: spec.frame_width,
                    height: spec.frame_height,
                }),
                _ => Err(SlicerError::OutOfBounds {
                    sheet: sheet.to_path_buf(),
                    frame_index: index,
                    x_start,
                    x_end,
                    y_start,
                    y_end,
                    sheet_width,
                    sheet_height,
                }),
            }
        })
        .collect()
}

/// Copy one validated window out of the sheet
pub fn extract_frame(sheet: &SpriteSheet, frame: &FrameBox) -> RgbaImage {
    imageops::crop_imm(&sheet.image, frame.x, frame.y, frame.width, frame.height).to_image()
}

/// Extract every frame of a sheet in index order
pub fn extract_frames(sheet: &SpriteSheet, spec: &FrameSpec) -> Result<Vec<RgbaImage>, SlicerError> {
    let boxes = frame_boxes(spec, &sheet.path, sheet.width(), sheet.height())?;

    Ok(boxes.iter().map(|b| extract_frame(sheet, b)).collect())
}
