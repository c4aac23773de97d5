mod extract;
mod keyer;
mod loader;
mod sheet;
mod writer;

pub use extract::{check_frame_size, check_offsets, extract_frame, extract_frames, frame_boxes};
pub use keyer::{BackgroundColorSet, DEFAULT_TOLERANCE, key_background, key_pixel};
pub use loader::load_sheet;
pub use sheet::{FrameBox, FrameSpec, SpriteSheet};
pub use writer::{frame_filename, output_format, sheet_basename, write_frame};
