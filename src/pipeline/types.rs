use std::path::{Path, PathBuf};

use log::{error, info};

use crate::cli::CompressionLevel;
use crate::error::{ErrorKind, SlicerError};
use crate::slice::{DEFAULT_TOLERANCE, FrameBox, FrameSpec};

/// One sheet to slice and where its frames go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub sheet: PathBuf,
    pub output_dir: PathBuf,
    pub spec: FrameSpec,
}

impl WorkItem {
    pub fn new(sheet: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, spec: FrameSpec) -> Self {
        Self {
            sheet: sheet.into(),
            output_dir: output_dir.into(),
            spec,
        }
    }
}

/// Settings shared by every sheet of a batch
#[derive(Debug, Clone, Copy)]
pub struct SliceOptions {
    /// Per-channel background tolerance
    pub tolerance: u8,
    /// Worker threads, 0 for one per core
    pub jobs: usize,
    /// Recompress PNG frames with oxipng
    pub compress: Option<CompressionLevel>,
    /// Write a JSON manifest next to the frames
    pub manifest: bool,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            jobs: 0,
            compress: None,
            manifest: false,
        }
    }
}

/// A frame that made it to disk
#[derive(Debug, Clone)]
pub struct WrittenFrame {
    pub frame: FrameBox,
    pub path: PathBuf,
}

/// Outcome of slicing one sheet
#[derive(Debug)]
pub struct SheetReport {
    pub sheet: PathBuf,
    pub output_dir: PathBuf,
    /// Frames written, in index order
    pub frames: Vec<WrittenFrame>,
    pub manifest: Option<PathBuf>,
    pub errors: Vec<SlicerError>,
}

impl SheetReport {
    pub fn new(item: &WorkItem) -> Self {
        Self {
            sheet: item.sheet.clone(),
            output_dir: item.output_dir.clone(),
            frames: Vec::new(),
            manifest: None,
            errors: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Reports of a whole batch, in input order
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<SheetReport>,
}

impl BatchSummary {
    pub fn frames_written(&self) -> usize {
        self.reports.iter().map(|r| r.frames.len()).sum()
    }

    /// Every error paired with the sheet it belongs to
    pub fn errors(&self) -> impl Iterator<Item = (&Path, &SlicerError)> {
        self.reports
            .iter()
            .flat_map(|r| r.errors.iter().map(move |e| (r.sheet.as_path(), e)))
    }

    pub fn error_count(&self, kind: ErrorKind) -> usize {
        self.errors().filter(|(_, e)| e.kind() == kind).count()
    }

    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(|r| !r.is_success())
    }

    /// Log the end-of-run summary
    pub fn log(&self) {
        let failed = self.reports.iter().filter(|r| !r.is_success()).count();

        info!(
            "Wrote {} frames from {} sheet(s), {} sheet(s) with errors",
            self.frames_written(),
            self.reports.len(),
            failed
        );

        for (sheet, err) in self.errors() {
            error!("{}: {}", sheet.display(), err);
        }
    }
}
