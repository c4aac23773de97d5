use std::fs;

use anyhow::{Context, Result};
use image::ImageFormat;
use log::{debug, info, warn};
use rayon::prelude::*;

use super::manifest::write_manifest;
use super::{BatchSummary, SheetReport, SliceOptions, WorkItem, WrittenFrame};
use crate::error::SlicerError;
use crate::slice::{
    FrameBox, SpriteSheet, check_frame_size, check_offsets, extract_frame, frame_boxes,
    frame_filename, key_background, load_sheet, output_format, sheet_basename, write_frame,
};

/// Slice every work item on a bounded worker pool.
///
/// Each sheet is isolated: its failures end up in its own report and never
/// stop the rest of the batch. Reports come back in input order.
pub fn run_batch(items: &[WorkItem], options: &SliceOptions) -> Result<BatchSummary> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .context("failed to build worker pool")?;

    let reports: Vec<SheetReport> = pool.install(|| {
        info!(
            "Slicing {} sheet(s) on {} thread(s)",
            items.len(),
            rayon::current_num_threads()
        );

        items
            .par_iter()
            .map(|item| process_sheet(item, options))
            .collect()
    });

    Ok(BatchSummary { reports })
}

/// Slice a single sheet, collecting every failure into its report
pub fn process_sheet(item: &WorkItem, options: &SliceOptions) -> SheetReport {
    let mut report = SheetReport::new(item);

    if let Err(e) = slice_sheet(item, options, &mut report) {
        warn!("Skipping {}: {}", item.sheet.display(), e);
        report.errors.push(e);
    }

    report
}

fn slice_sheet(
    item: &WorkItem,
    options: &SliceOptions,
    report: &mut SheetReport,
) -> Result<(), SlicerError> {
    // Configuration problems fail before the filesystem is touched
    check_offsets(&item.spec, &item.sheet)?;
    check_frame_size(&item.spec)?;

    fs::create_dir_all(&item.output_dir).map_err(|e| SlicerError::OutputDir {
        path: item.output_dir.clone(),
        source: e,
    })?;

    let sheet = load_sheet(&item.sheet)?;

    // All windows are validated up front so an out-of-bounds frame leaves no partial output
    let boxes = frame_boxes(&item.spec, &sheet.path, sheet.width(), sheet.height())?;

    info!(
        "Slicing {} into {} frame(s) of {}x{}",
        item.sheet.display(),
        boxes.len(),
        item.spec.frame_width,
        item.spec.frame_height
    );

    let basename = sheet_basename(&item.sheet);
    let format = output_format(&item.sheet);

    let results: Vec<Result<WrittenFrame, SlicerError>> = boxes
        .par_iter()
        .map(|frame| slice_frame(&sheet, frame, item, &basename, format, options))
        .collect();

    for result in results {
        match result {
            Ok(written) => report.frames.push(written),
            Err(e) => {
                warn!("{}: {}", item.sheet.display(), e);
                report.errors.push(e);
            }
        }
    }

    if options.manifest {
        match write_manifest(
            &item.output_dir,
            &basename,
            &item.sheet,
            (sheet.width(), sheet.height()),
            &report.frames,
        ) {
            Ok(path) => report.manifest = Some(path),
            Err(e) => report.errors.push(e),
        }
    }

    Ok(())
}

fn slice_frame(
    sheet: &SpriteSheet,
    frame: &FrameBox,
    item: &WorkItem,
    basename: &str,
    format: ImageFormat,
    options: &SliceOptions,
) -> Result<WrittenFrame, SlicerError> {
    let pixels = extract_frame(sheet, frame);
    let keyed = key_background(&pixels, options.tolerance)?;

    let path = item
        .output_dir
        .join(frame_filename(basename, frame.index, format));
    write_frame(&keyed, &path, frame.index, format, options.compress)?;

    debug!("Saved {}", path.display());

    Ok(WrittenFrame {
        frame: *frame,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::slice::FrameSpec;
    use image::{Rgba, RgbaImage};
    use std::path::Path;

    const BACKGROUND: Rgba<u8> = Rgba([255, 0, 255, 255]);
    const INK: Rgba<u8> = Rgba([20, 20, 20, 255]);

    /// Magenta strip of `count` frames, each with one dark pixel in its middle
    fn write_strip(path: &Path, frame_width: u32, frame_height: u32, count: u32) {
        let mut img = RgbaImage::from_pixel(frame_width * count, frame_height, BACKGROUND);
        for i in 0..count {
            img.put_pixel(i * frame_width + frame_width / 2, frame_height / 2, INK);
        }
        img.save(path).unwrap();
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_frames_written_with_stable_names() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("gojo-stand.png");
        let out = dir.path().join("output_stand");
        write_strip(&sheet, 33, 68, 4);

        let items = vec![WorkItem::new(&sheet, &out, FrameSpec::new(33, 68, 4))];
        let options = SliceOptions {
            jobs: 4,
            ..SliceOptions::default()
        };
        let summary = run_batch(&items, &options).unwrap();

        assert!(!summary.has_errors());
        assert_eq!(summary.frames_written(), 4);
        assert_eq!(
            file_names(&out),
            vec![
                "gojo-stand_1.png",
                "gojo-stand_2.png",
                "gojo-stand_3.png",
                "gojo-stand_4.png"
            ]
        );

        let indices: Vec<usize> = summary.reports[0]
            .frames
            .iter()
            .map(|f| f.frame.index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_written_frames_are_keyed() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("walk.png");
        let out = dir.path().join("out");
        write_strip(&sheet, 10, 10, 2);

        let items = vec![WorkItem::new(&sheet, &out, FrameSpec::new(10, 10, 2))];
        run_batch(&items, &SliceOptions::default()).unwrap();

        let frame = image::open(out.join("walk_2.png")).unwrap().into_rgba8();
        assert_eq!(frame.dimensions(), (10, 10));
        assert_eq!(frame.get_pixel(5, 5), &INK);
        assert_eq!(frame.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(
            frame.pixels().filter(|p| p[3] != 0).count(),
            1,
            "only the ink pixel should stay opaque"
        );
    }

    #[test]
    fn test_corrupt_sheet_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let corrupt = dir.path().join("broken.png");
        std::fs::write(&corrupt, b"\x89PNG garbage").unwrap();
        let good = dir.path().join("run.png");
        write_strip(&good, 12, 8, 3);

        let items = vec![
            WorkItem::new(&corrupt, dir.path().join("out_broken"), FrameSpec::new(12, 8, 3)),
            WorkItem::new(&good, dir.path().join("out_run"), FrameSpec::new(12, 8, 3)),
        ];
        let summary = run_batch(&items, &SliceOptions::default()).unwrap();

        assert_eq!(summary.error_count(ErrorKind::SheetDecode), 1);
        assert_eq!(summary.errors().count(), 1);
        assert!(!summary.reports[0].is_success());
        assert!(summary.reports[1].is_success());
        assert_eq!(
            file_names(&dir.path().join("out_run")),
            vec!["run_1.png", "run_2.png", "run_3.png"]
        );
    }

    #[test]
    fn test_out_of_bounds_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("heavy_attack.png");
        let out = dir.path().join("out");
        write_strip(&sheet, 10, 10, 3);

        // Last window ends at 31 on a 30 pixel sheet
        let spec = FrameSpec::new(10, 10, 3).offsets(vec![0, 0, 1]);
        let summary = run_batch(&[WorkItem::new(&sheet, &out, spec)], &SliceOptions::default())
            .unwrap();

        assert_eq!(summary.error_count(ErrorKind::OutOfBounds), 1);
        assert_eq!(summary.frames_written(), 0);
        assert!(file_names(&out).is_empty());
    }

    #[test]
    fn test_config_mismatch_fails_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never_created");
        let spec = FrameSpec::new(10, 10, 3).offsets(vec![0, 5]);

        // The sheet does not exist, so reaching the decoder would report SheetDecode instead
        let item = WorkItem::new(dir.path().join("missing.png"), &out, spec);
        let report = process_sheet(&item, &SliceOptions::default());

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind(), ErrorKind::ConfigMismatch);
        assert!(!out.exists());
    }

    #[test]
    fn test_existing_output_dir_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("dash.png");
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        write_strip(&sheet, 10, 10, 1);

        let items = vec![WorkItem::new(&sheet, &out, FrameSpec::new(10, 10, 1))];
        let first = run_batch(&items, &SliceOptions::default()).unwrap();
        let second = run_batch(&items, &SliceOptions::default()).unwrap();

        assert!(!first.has_errors());
        assert!(!second.has_errors());
        assert_eq!(file_names(&out), vec!["dash_1.png"]);
    }

    #[test]
    fn test_uncreatable_output_dir_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("kick.png");
        write_strip(&sheet, 10, 10, 1);
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file in the way").unwrap();

        let items = vec![WorkItem::new(&sheet, &blocker, FrameSpec::new(10, 10, 1))];
        let summary = run_batch(&items, &SliceOptions::default()).unwrap();

        assert_eq!(summary.error_count(ErrorKind::Write), 1);
    }

    #[test]
    fn test_blocked_frame_keeps_its_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("run.png");
        let out = dir.path().join("out");
        write_strip(&sheet, 10, 10, 3);
        // A directory where the second frame should go
        std::fs::create_dir_all(out.join("run_2.png")).unwrap();

        let items = vec![WorkItem::new(&sheet, &out, FrameSpec::new(10, 10, 3))];
        let summary = run_batch(&items, &SliceOptions::default()).unwrap();

        assert_eq!(summary.frames_written(), 2);
        assert_eq!(summary.error_count(ErrorKind::Write), 1);
        assert!(out.join("run_1.png").is_file());
        assert!(out.join("run_3.png").is_file());

        let written: Vec<usize> = summary.reports[0]
            .frames
            .iter()
            .map(|f| f.frame.index)
            .collect();
        assert_eq!(written, vec![0, 2]);
    }

    #[test]
    fn test_absurd_frame_count_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let huge = dir.path().join("huge.png");
        let good = dir.path().join("stand.png");
        write_strip(&huge, 10, 10, 3);
        write_strip(&good, 10, 10, 3);

        let items = vec![
            WorkItem::new(&huge, dir.path().join("out_huge"), FrameSpec::new(10, 10, usize::MAX)),
            WorkItem::new(&good, dir.path().join("out_stand"), FrameSpec::new(10, 10, 3)),
        ];
        let summary = run_batch(&items, &SliceOptions::default()).unwrap();

        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.error_count(ErrorKind::OutOfBounds), 1);
        assert!(file_names(&dir.path().join("out_huge")).is_empty());
        assert!(summary.reports[1].is_success());
        assert_eq!(
            file_names(&dir.path().join("out_stand")),
            vec!["stand_1.png", "stand_2.png", "stand_3.png"]
        );
    }

    #[test]
    fn test_manifest_written_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("jump.png");
        let out = dir.path().join("out");
        write_strip(&sheet, 10, 10, 2);

        let options = SliceOptions {
            manifest: true,
            ..SliceOptions::default()
        };
        let items = vec![WorkItem::new(&sheet, &out, FrameSpec::new(10, 10, 2))];
        let summary = run_batch(&items, &options).unwrap();

        assert_eq!(summary.reports[0].manifest, Some(out.join("jump.json")));
        assert_eq!(file_names(&out), vec!["jump.json", "jump_1.png", "jump_2.png"]);
    }
}
