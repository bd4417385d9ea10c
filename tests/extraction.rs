//! Extraction loop tests over synthetic sources.

mod common;

use common::{RecordingProgress, SyntheticSource, expected_names, file_names, grey_level};
use stillframe::{ExtractError, ExtractionConfig, FrameSelection};

fn scratch_config(directory: &tempfile::TempDir) -> ExtractionConfig {
    ExtractionConfig::new("unused.mp4", directory.path().join("frames"))
}

// ── Naming ─────────────────────────────────────────────────────────

#[test]
fn every_frame_is_written_with_dense_names() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory);
    let mut source = SyntheticSource::new(7, 24.0);

    let summary = stillframe::extract_from(&mut source, &config).expect("Extraction failed");

    assert_eq!(summary.saved_frames, 7);
    assert_eq!(summary.decoded_frames, 7);
    assert_eq!(summary.interval, 1);
    assert!(!summary.capped);
    assert_eq!(file_names(&directory.path().join("frames")), expected_names(7));
}

#[test]
fn output_directory_is_created_with_parents() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let nested = directory.path().join("public").join("images").join("intro");
    let config = ExtractionConfig::new("unused.mp4", &nested);

    let summary =
        stillframe::extract_from(&mut SyntheticSource::new(2, 30.0), &config).expect("Extraction failed");

    assert_eq!(summary.output_directory, nested);
    assert_eq!(file_names(&nested), expected_names(2));
}

#[test]
fn existing_output_directory_is_reused() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory);
    std::fs::create_dir_all(config.output_directory()).expect("Failed to pre-create directory");

    let summary =
        stillframe::extract_from(&mut SyntheticSource::new(3, 30.0), &config).expect("Extraction failed");
    assert_eq!(summary.saved_frames, 3);
}

#[test]
fn empty_source_writes_nothing() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory);

    let summary =
        stillframe::extract_from(&mut SyntheticSource::new(0, 30.0), &config).expect("Extraction failed");

    assert_eq!(summary.saved_frames, 0);
    assert!(file_names(config.output_directory()).is_empty());
}

// ── Interval policy ────────────────────────────────────────────────

#[test]
fn sixty_to_thirty_keeps_even_decode_indices() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory).with_selection(FrameSelection::TargetFrameRate(30.0));
    let mut source = SyntheticSource::new(9, 60.0);

    let summary = stillframe::extract_from(&mut source, &config).expect("Extraction failed");

    assert_eq!(summary.interval, 2);
    assert_eq!(summary.decoded_frames, 9);
    // ceil(9 / 2)
    assert_eq!(summary.saved_frames, 5);
    assert_eq!(file_names(config.output_directory()), expected_names(5));

    // frame_0003.jpg must hold decode index 6.
    let image = image::open(config.output_directory().join("frame_0003.jpg"))
        .expect("Failed to read output frame")
        .to_rgb8();
    let level = image.get_pixel(4, 4)[0] as i32;
    assert!(
        (level - grey_level(6) as i32).abs() <= 3,
        "expected grey level near {}, got {level}",
        grey_level(6)
    );
}

#[test]
fn every_nth_selection() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory).with_selection(FrameSelection::EveryNth(3));

    let summary =
        stillframe::extract_from(&mut SyntheticSource::new(10, 30.0), &config).expect("Extraction failed");

    // Decode indices 0, 3, 6, 9.
    assert_eq!(summary.saved_frames, 4);
    assert_eq!(file_names(config.output_directory()), expected_names(4));
}

#[test]
fn unknown_source_rate_keeps_every_frame() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory).with_selection(FrameSelection::TargetFrameRate(30.0));

    let summary =
        stillframe::extract_from(&mut SyntheticSource::new(5, 0.0), &config).expect("Extraction failed");

    assert_eq!(summary.interval, 1);
    assert_eq!(summary.saved_frames, 5);
}

// ── Cap policy ─────────────────────────────────────────────────────

#[test]
fn cap_stops_decoding_after_last_write() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let progress = RecordingProgress::new();
    let config = scratch_config(&directory)
        .with_max_output_frames(5)
        .with_progress_every(1)
        .with_progress(progress.clone());
    let mut source = SyntheticSource::new(20, 30.0);

    let summary = stillframe::extract_from(&mut source, &config).expect("Extraction failed");

    assert_eq!(summary.saved_frames, 5);
    assert!(summary.capped);
    assert_eq!(source.next_frame_calls, 5, "no decode after the capped write");
    assert_eq!(file_names(config.output_directory()), expected_names(5));
    assert_eq!(progress.saved_counts(), vec![1, 2, 3, 4]);
}

#[test]
fn cap_with_interval_counts_saved_frames() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory)
        .with_selection(FrameSelection::EveryNth(2))
        .with_max_output_frames(3);
    let mut source = SyntheticSource::new(20, 30.0);

    let summary = stillframe::extract_from(&mut source, &config).expect("Extraction failed");

    assert_eq!(summary.saved_frames, 3);
    // Decode indices 0, 2, 4 were saved; nothing after index 4 was decoded.
    assert_eq!(source.next_frame_calls, 5);
}

#[test]
fn cap_larger_than_source() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory).with_max_output_frames(10);

    let summary =
        stillframe::extract_from(&mut SyntheticSource::new(3, 30.0), &config).expect("Extraction failed");

    assert_eq!(summary.saved_frames, 3);
    assert!(!summary.capped);
}

#[test]
fn zero_cap_decodes_nothing() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory).with_max_output_frames(0);
    let mut source = SyntheticSource::new(3, 30.0);

    let summary = stillframe::extract_from(&mut source, &config).expect("Extraction failed");

    assert_eq!(summary.saved_frames, 0);
    assert_eq!(source.next_frame_calls, 0);
}

// ── Resize policy ──────────────────────────────────────────────────

#[test]
fn tall_frames_are_capped_at_max_height() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory).with_max_output_height(1080);
    let mut source = SyntheticSource::with_size(1, 30.0, 1000, 2000);

    stillframe::extract_from(&mut source, &config).expect("Extraction failed");

    let dimensions = image::image_dimensions(config.output_directory().join("frame_0000.jpg"))
        .expect("Failed to read output frame");
    assert_eq!(dimensions, (540, 1080));
}

#[test]
fn frames_within_limit_keep_their_size() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory).with_max_output_height(1080);
    let mut source = SyntheticSource::with_size(1, 30.0, 64, 36);

    stillframe::extract_from(&mut source, &config).expect("Extraction failed");

    let dimensions = image::image_dimensions(config.output_directory().join("frame_0000.jpg"))
        .expect("Failed to read output frame");
    assert_eq!(dimensions, (64, 36));
}

// ── Progress ───────────────────────────────────────────────────────

#[test]
fn progress_fires_every_n_saved_frames() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let progress = RecordingProgress::new();
    let config = scratch_config(&directory)
        .with_progress_every(10)
        .with_progress(progress.clone());

    stillframe::extract_from(&mut SyntheticSource::new(25, 30.0), &config)
        .expect("Extraction failed");

    let infos = progress.infos.lock().unwrap();
    let saved: Vec<u64> = infos.iter().map(|info| info.saved).collect();
    assert_eq!(saved, vec![10, 20]);
    assert!(infos.iter().all(|info| info.total == Some(25)));
    assert!(infos.iter().all(|info| info.percentage.is_some()));
}

#[test]
fn progress_counts_saved_not_decoded_frames() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let progress = RecordingProgress::new();
    let config = scratch_config(&directory)
        .with_selection(FrameSelection::EveryNth(2))
        .with_progress_every(2)
        .with_progress(progress.clone());

    stillframe::extract_from(&mut SyntheticSource::new(8, 30.0).without_frame_count(), &config)
        .expect("Extraction failed");

    let infos = progress.infos.lock().unwrap();
    assert_eq!(infos.len(), 2);
    assert_eq!((infos[0].saved, infos[0].decoded), (2, 3));
    assert_eq!((infos[1].saved, infos[1].decoded), (4, 7));
    assert!(infos.iter().all(|info| info.total.is_none()));
}

// ── Output errors ──────────────────────────────────────────────────

#[test]
fn invalid_quality_is_rejected_before_touching_disk() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let config = scratch_config(&directory).with_quality(0);

    let result = stillframe::extract_from(&mut SyntheticSource::new(3, 30.0), &config);

    assert!(matches!(result, Err(ExtractError::InvalidQuality(0))));
    assert!(!config.output_directory().exists());
}

#[test]
fn shared_progress_callback_across_runs() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let progress = RecordingProgress::new();
    let first = ExtractionConfig::new("a.mp4", directory.path().join("a"))
        .with_progress_every(1)
        .with_progress(progress.clone());
    let second = ExtractionConfig::new("b.mp4", directory.path().join("b"))
        .with_progress_every(1)
        .with_progress(progress.clone());

    stillframe::extract_from(&mut SyntheticSource::new(2, 30.0), &first).expect("Extraction failed");
    stillframe::extract_from(&mut SyntheticSource::new(1, 30.0), &second).expect("Extraction failed");

    // Each run counts from zero.
    assert_eq!(progress.saved_counts(), vec![1, 2, 1]);
}
