mod driver;
mod manifest;
mod types;

pub use driver::{process_sheet, run_batch};
pub use manifest::write_manifest;
pub use types::{BatchSummary, SheetReport, SliceOptions, WorkItem, WrittenFrame};
