use serde::{Deserialize, Serialize};

use crate::slice::{DEFAULT_TOLERANCE, FrameSpec};

/// One sheet entry of a slicer config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Sprite sheet path, relative to the config file
    pub sheet: String,
    /// Directory receiving the frames, relative to the config file
    pub output_dir: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: usize,
    /// Shift applied to every frame when `offsets` is absent
    #[serde(default)]
    pub x_offset: i32,
    /// Per-frame horizontal shifts, one per frame
    #[serde(default)]
    pub offsets: Option<Vec<i32>>,
    /// Rows skipped above every frame
    #[serde(default)]
    pub y_offset: u32,
}

impl SheetConfig {
    pub fn frame_spec(&self) -> FrameSpec {
        FrameSpec {
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            frame_count: self.frame_count,
            x_offset: self.x_offset,
            offsets: self.offsets.clone(),
            y_offset: self.y_offset,
        }
    }
}

/// Slicer configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicerConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Per-channel background tolerance (0-255)
    pub tolerance: u8,
    /// Sheets to slice, in order
    pub sheets: Vec<SheetConfig>,
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            tolerance: DEFAULT_TOLERANCE,
            sheets: Vec::new(),
        }
    }
}
