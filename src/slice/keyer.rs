use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::error::SlicerError;

/// Per-channel distance below which a pixel counts as background
pub const DEFAULT_TOLERANCE: u8 = 25;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Candidate background colours sampled from a frame's corners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundColorSet {
    colors: Vec<Rgba<u8>>,
}

impl BackgroundColorSet {
    /// Sample top-left, top-right, bottom-left and bottom-right.
    ///
    /// Fully transparent corners are skipped: they carry no colour, and
    /// skipping them keeps keying idempotent on already keyed frames.
    pub fn from_corners(frame: &RgbaImage) -> Result<Self, SlicerError> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(SlicerError::InvalidFrame { width, height });
        }

        let corners = [
            (0, 0),
            (width - 1, 0),
            (0, height - 1),
            (width - 1, height - 1),
        ];

        let colors = corners
            .iter()
            .map(|&(x, y)| *frame.get_pixel(x, y))
            .filter(|pixel| pixel[3] > 0)
            .collect();

        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Rgba<u8>] {
        &self.colors
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// True if every RGB channel is within `tolerance` of any candidate
    pub fn matches(&self, pixel: [u8; 4], tolerance: u8) -> bool {
        self.colors.iter().any(|bg| {
            pixel[0].abs_diff(bg[0]) < tolerance
                && pixel[1].abs_diff(bg[1]) < tolerance
                && pixel[2].abs_diff(bg[2]) < tolerance
        })
    }
}

/// Key a single RGBA pixel against the candidate set
pub fn key_pixel(pixel: [u8; 4], background: &BackgroundColorSet, tolerance: u8) -> [u8; 4] {
    if background.matches(pixel, tolerance) {
        TRANSPARENT
    } else {
        pixel
    }
}

/// Replace every background pixel of a frame with full transparency
pub fn key_background(frame: &RgbaImage, tolerance: u8) -> Result<RgbaImage, SlicerError> {
    let background = BackgroundColorSet::from_corners(frame)?;
    let mut keyed = frame.clone();

    if background.is_empty() {
        return Ok(keyed);
    }

    keyed.par_chunks_exact_mut(4).for_each(|p| {
        let out = key_pixel([p[0], p[1], p[2], p[3]], &background, tolerance);
        p.copy_from_slice(&out);
    });

    Ok(keyed)
}
