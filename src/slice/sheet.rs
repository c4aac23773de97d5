use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A decoded sprite sheet
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    /// Original file path
    pub path: PathBuf,
    /// Decoded RGBA pixels
    pub image: RgbaImage,
}

impl SpriteSheet {
    /// Width of the sheet in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height of the sheet in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Layout of one animation clip inside a sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSpec {
    /// Nominal frame width
    pub frame_width: u32,
    /// Nominal frame height
    pub frame_height: u32,
    /// Number of frames laid out left to right
    pub frame_count: usize,
    /// Horizontal shift applied to every frame when `offsets` is absent
    pub x_offset: i32,
    /// Explicit per-frame horizontal shifts, one per frame
    pub offsets: Option<Vec<i32>>,
    /// First row of every frame window
    pub y_offset: u32,
}

impl FrameSpec {
    /// A spec with no offsets at all
    pub fn new(frame_width: u32, frame_height: u32, frame_count: usize) -> Self {
        Self {
            frame_width,
            frame_height,
            frame_count,
            x_offset: 0,
            offsets: None,
            y_offset: 0,
        }
    }

    pub fn x_offset(mut self, x_offset: i32) -> Self {
        self.x_offset = x_offset;
        self
    }

    pub fn offsets(mut self, offsets: Vec<i32>) -> Self {
        self.offsets = Some(offsets);
        self
    }

    pub fn y_offset(mut self, y_offset: u32) -> Self {
        self.y_offset = y_offset;
        self
    }

    /// Horizontal shift of one frame: its explicit entry, or the default shift
    pub fn offset_at(&self, index: usize) -> i32 {
        self.offsets
            .as_ref()
            .and_then(|offsets| offsets.get(index).copied())
            .unwrap_or(self.x_offset)
    }
}

/// Window of a single frame inside its sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBox {
    /// Zero-based frame index
    pub index: usize,
    /// Horizontal shift that produced this window
    pub offset: i32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
