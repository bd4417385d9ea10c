//! The frame-extraction loop.
//!
//! One call decodes a single source front to back, keeps the frames the
//! selection policy asks for, caps their height, and writes them as
//! `frame_0000.jpg`, `frame_0001.jpg`, … into the output directory.
//!
//! [`extract`] is the forgiving entry point: a missing or unopenable source is
//! logged and counts as zero frames. [`try_extract`] surfaces every error and
//! returns the full [`ExtractionSummary`]. [`extract_from`] runs the loop on a
//! source that is already open, which is how the loop is tested without
//! FFmpeg.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use crate::{
    config::ExtractionConfig,
    error::ExtractError,
    progress::ProgressTracker,
    resize,
    source::FrameSource,
    video_file::VideoFile,
    writer::FrameWriter,
};

/// What one extraction run produced.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ExtractionSummary {
    /// Frames written. Files are `frame_0000.jpg` up to
    /// `frame_{saved_frames - 1}.jpg`.
    pub saved_frames: u64,
    /// Frames pulled from the source, including skipped ones.
    pub decoded_frames: u64,
    /// The resolved selection interval.
    pub interval: u64,
    /// `true` if the run stopped because the output cap was reached.
    pub capped: bool,
    /// Directory the frames were written to.
    pub output_directory: PathBuf,
    /// Wall-clock time spent in the loop.
    pub elapsed: Duration,
}

/// Extract frames according to `config` and return how many were written.
///
/// A source that does not exist or cannot be opened is logged at error level
/// and yields `Ok(0)`. A missing source leaves the filesystem untouched.
///
/// # Errors
///
/// Everything other than the two source errors propagates: an invalid
/// quality, I/O failures, and JPEG encoding failures.
///
/// # Example
///
/// ```no_run
/// use stillframe::ExtractionConfig;
///
/// let config = ExtractionConfig::new("public/video/karma1.mp4", "public/images/karma")
///     .with_max_output_height(1080);
/// let count = stillframe::extract(&config)?;
/// println!("DONE! Extracted {count} frames.");
/// # Ok::<(), stillframe::ExtractError>(())
/// ```
pub fn extract(config: &ExtractionConfig) -> Result<u64, ExtractError> {
    match try_extract(config) {
        Ok(summary) => Ok(summary.saved_frames),
        Err(error) if error.is_source_error() => {
            log::error!("{error}");
            Ok(0)
        }
        Err(error) => Err(error),
    }
}

/// Extract frames according to `config`, surfacing every error.
///
/// The source's existence is checked before anything touches the output
/// directory. The output directory is then created (with parents) and the
/// video opened. The decoder is released before this function returns, on
/// every path.
///
/// # Errors
///
/// - [`ExtractError::SourceNotFound`] / [`ExtractError::SourceUnopenable`]
///   for an unusable source.
/// - [`ExtractError::InvalidQuality`], [`ExtractError::IoError`],
///   [`ExtractError::ImageError`] from the output side.
pub fn try_extract(config: &ExtractionConfig) -> Result<ExtractionSummary, ExtractError> {
    let source_path = config.source();
    if !source_path.exists() {
        return Err(ExtractError::SourceNotFound {
            path: source_path.to_path_buf(),
        });
    }

    let writer = FrameWriter::create(config.output_directory(), config.quality())?;
    let mut video = VideoFile::open(source_path)?;

    log::info!("Processing {}...", source_path.display());
    let summary = run_loop(&mut video, config, writer)?;
    log::info!(
        "Finished {}. Extracted {} frames.",
        source_path.display(),
        summary.saved_frames
    );
    Ok(summary)
}

/// Run the extraction loop over an already-open source.
///
/// `config.source()` is ignored; frames come from `source`. The output
/// directory is created if needed.
///
/// # Errors
///
/// [`ExtractError::InvalidQuality`], [`ExtractError::IoError`] and
/// [`ExtractError::ImageError`] from the output side.
pub fn extract_from<S: FrameSource + ?Sized>(
    source: &mut S,
    config: &ExtractionConfig,
) -> Result<ExtractionSummary, ExtractError> {
    let writer = FrameWriter::create(config.output_directory(), config.quality())?;
    run_loop(source, config, writer)
}

fn run_loop<S: FrameSource + ?Sized>(
    source: &mut S,
    config: &ExtractionConfig,
    mut writer: FrameWriter,
) -> Result<ExtractionSummary, ExtractError> {
    let start_time = Instant::now();
    let metadata = source.metadata();
    let total = metadata.known_frame_count();
    let selector = config.selection().resolve(metadata.frames_per_second);

    log::info!(
        "Video FPS: {:.2}, total frames: {}, keeping every {} frame(s)",
        metadata.frames_per_second,
        total.map_or_else(|| "unknown".to_string(), |count| count.to_string()),
        selector.interval(),
    );

    let tracker = ProgressTracker::new(config.progress.clone(), total, config.progress_every());
    let max_frames = config.max_output_frames();

    let mut decoded = 0_u64;
    let mut capped = max_frames == Some(0);

    while !capped {
        let Some(frame) = source.next_frame() else {
            break;
        };
        let decode_index = decoded;
        decoded += 1;

        if !selector.keeps(decode_index) {
            continue;
        }

        let frame = match config.max_output_height() {
            Some(max_height) => resize::cap_height(frame, max_height),
            None => frame,
        };
        writer.write(&frame)?;

        let saved = writer.saved();
        capped = max_frames.is_some_and(|max| saved >= max);
        if capped {
            break;
        }

        if let Some(info) = tracker.observe(saved, decoded) {
            match info.total {
                Some(total) => log::info!("Extracted {saved}/{total}"),
                None => log::info!("Extracted {saved} frames..."),
            }
        }
    }

    Ok(ExtractionSummary {
        saved_frames: writer.saved(),
        decoded_frames: decoded,
        interval: selector.interval(),
        capped,
        output_directory: writer.output_directory().to_path_buf(),
        elapsed: start_time.elapsed(),
    })
}
