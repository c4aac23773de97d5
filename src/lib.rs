pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod slice;

pub use cli::{CliArgs, Command, CompressionLevel};
pub use error::{ErrorKind, SlicerError};
pub use pipeline::{BatchSummary, SliceOptions, WorkItem, run_batch};
pub use slice::{FrameSpec, SpriteSheet};
