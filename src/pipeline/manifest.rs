use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::WrittenFrame;
use crate::error::SlicerError;

#[derive(Serialize)]
struct Manifest {
    meta: Meta,
    sheet: String,
    size: Size,
    frames: Vec<ManifestFrame>,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
    format: &'static str,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct ManifestFrame {
    file: String,
    index: usize,
    offset: i32,
    source: Rect,
}

#[derive(Serialize)]
struct Rect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// Write `{basename}.json` describing where each written frame came from
pub fn write_manifest(
    output_dir: &Path,
    basename: &str,
    sheet: &Path,
    sheet_size: (u32, u32),
    frames: &[WrittenFrame],
) -> Result<PathBuf, SlicerError> {
    let manifest = Manifest {
        meta: Meta {
            app: "slicer",
            version: env!("CARGO_PKG_VERSION"),
            format: "rgba8888",
        },
        sheet: sheet.to_string_lossy().into_owned(),
        size: Size {
            w: sheet_size.0,
            h: sheet_size.1,
        },
        frames: frames.iter().map(frame_to_json).collect(),
    };

    let path = output_dir.join(format!("{}.json", basename));
    let content = serde_json::to_string_pretty(&manifest).map_err(|e| SlicerError::Manifest {
        path: path.clone(),
        source: e,
    })?;

    fs::write(&path, content).map_err(|e| SlicerError::OutputWrite {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

fn frame_to_json(written: &WrittenFrame) -> ManifestFrame {
    let frame = &written.frame;

    ManifestFrame {
        file: written
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        index: frame.index,
        offset: frame.offset,
        source: Rect {
            x: frame.x,
            y: frame.y,
            w: frame.width,
            h: frame.height,
        },
    }
}
