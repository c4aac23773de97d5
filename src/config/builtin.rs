//! Sheet table for the Gojo and Jin-Woo fighting-game sprites.
//!
//! The offsets were tuned by eye, frame by frame, against the hand-drawn
//! sheets. They follow no formula and must be kept value for value.

use super::types::{SheetConfig, SlicerConfig};
use crate::slice::DEFAULT_TOLERANCE;

/// A built-in sheet record
#[derive(Debug, Clone, Copy)]
pub struct BuiltinSheet {
    pub sheet: &'static str,
    pub output_dir: &'static str,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: usize,
    pub x_offset: i32,
    pub offsets: Option<&'static [i32]>,
    pub y_offset: u32,
}

impl BuiltinSheet {
    const fn plain(
        sheet: &'static str,
        output_dir: &'static str,
        frame_width: u32,
        frame_count: usize,
    ) -> Self {
        Self {
            sheet,
            output_dir,
            frame_width,
            frame_height: 68,
            frame_count,
            x_offset: 0,
            offsets: None,
            y_offset: 0,
        }
    }

    const fn with_offsets(mut self, offsets: &'static [i32]) -> Self {
        self.offsets = Some(offsets);
        self
    }

    const fn with_x_offset(mut self, x_offset: i32) -> Self {
        self.x_offset = x_offset;
        self
    }

    const fn with_y_offset(mut self, y_offset: u32) -> Self {
        self.y_offset = y_offset;
        self
    }

    pub fn to_config(self) -> SheetConfig {
        SheetConfig {
            sheet: self.sheet.to_string(),
            output_dir: self.output_dir.to_string(),
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            frame_count: self.frame_count,
            x_offset: self.x_offset,
            offsets: self.offsets.map(<[i32]>::to_vec),
            y_offset: self.y_offset,
        }
    }
}

pub const BUILTIN_SHEETS: &[BuiltinSheet] = &[
    // Gojo
    BuiltinSheet::plain("gojo_frames/stand/gojo-stand.png", "output_stand", 33, 4),
    BuiltinSheet::plain("gojo_frames/walk/gojo-walk.png", "output_walk", 35, 8),
    BuiltinSheet::plain("gojo_frames/stance-2/stance-2.png", "output_stance_2", 40, 1),
    BuiltinSheet::plain("gojo_frames/intro/intro.png", "output_intro", 40, 8)
        .with_offsets(&[-5, -10, 10, 15, 0, 0, 0, 0]),
    BuiltinSheet::plain("gojo_frames/kick/kick.png", "output_kick", 40, 6),
    BuiltinSheet::plain(
        "gojo_frames/heavy-attack/heavy_attack.png",
        "output_heavy_attack",
        45,
        5,
    )
    .with_offsets(&[-10, -10, 0, 20, 25]),
    BuiltinSheet::plain(
        "gojo_frames/light-attack/light_attack.png",
        "output_light_attack",
        40,
        6,
    )
    .with_offsets(&[0, 0, 0, 10, 20, 20]),
    // Default shift of 5 is superseded by the per-frame table
    BuiltinSheet::plain("gojo_frames/jump/jump.png", "output_jump", 40, 4)
        .with_x_offset(5)
        .with_offsets(&[5, 5, 18, 18]),
    BuiltinSheet::plain("gojo_frames/crouch/gojo-crouch.png", "output_crouch", 40, 4),
    BuiltinSheet::plain("gojo_frames/dash/gojo-dash.png", "output_dash", 40, 3),
    // Jin-Woo
    // Vertical crops are the intended ones. Frames cut before this table existed
    // carried the y offset over between sheets (stand at 0, heavy attack at 10),
    // so regenerated stand and heavy attack frames differ from those files.
    BuiltinSheet::plain("jin-woo_frames/stand/Untitled 4.png", "output_jinwoo_stand", 35, 4)
        .with_offsets(&[8, 15, 20, 30])
        .with_y_offset(5),
    BuiltinSheet::plain("jin-woo_frames/run/run.png", "output_jinwoo_run", 53, 8)
        .with_offsets(&[8, 37, 60, 95, 120, 145, 170, 207]),
    BuiltinSheet::plain("jin-woo_frames/jump/jump.png", "output_jinwoo_jump", 60, 4)
        .with_offsets(&[10, 15, 35, 0]),
    BuiltinSheet::plain(
        "jin-woo_frames/light-attack/light-attack.png",
        "output_jinwoo_light_attack",
        70,
        6,
    )
    .with_offsets(&[5, 10, 15, 20, 0, 0])
    .with_y_offset(10),
    BuiltinSheet::plain(
        "jin-woo_frames/heavy-attack/heavy_attack.png",
        "output_jinwoo_heavy_attack",
        45,
        5,
    ),
];

/// The built-in table as a regular config
pub fn builtin_config() -> SlicerConfig {
    SlicerConfig {
        version: 1,
        tolerance: DEFAULT_TOLERANCE,
        sheets: BUILTIN_SHEETS.iter().map(|s| s.to_config()).collect(),
    }
}
