//! Extraction configuration.
//!
//! [`ExtractionConfig`] carries everything one extraction run needs: where to
//! read, where to write, which frames to keep, how to size and encode them,
//! and how often to report progress.
//!
//! # Example
//!
//! ```no_run
//! use stillframe::{ExtractionConfig, FrameSelection};
//!
//! // Every frame at quality 95, capped at 1080 px tall.
//! let config = ExtractionConfig::new("public/intro.mp4", "public/images/intro")
//!     .with_quality(95)
//!     .with_max_output_height(1080)
//!     .with_progress_every(50);
//!
//! // Roughly 30 fps out of whatever the source runs at.
//! let config = ExtractionConfig::new("public/video/car1.mp4", "public/images/divine")
//!     .with_selection(FrameSelection::TargetFrameRate(30.0))
//!     .with_quality(90)
//!     .with_progress_every(10);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::progress::{NoOpProgress, ProgressCallback};
use crate::selection::FrameSelection;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 95;

/// Default progress cadence, in saved frames.
pub const DEFAULT_PROGRESS_EVERY: u64 = 50;

/// Configuration for one extraction run.
#[derive(Clone)]
pub struct ExtractionConfig {
    pub(crate) source: PathBuf,
    pub(crate) output_directory: PathBuf,
    pub(crate) selection: FrameSelection,
    pub(crate) max_output_frames: Option<u64>,
    pub(crate) max_output_height: Option<u32>,
    pub(crate) quality: u8,
    pub(crate) progress_every: u64,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for ExtractionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractionConfig")
            .field("source", &self.source)
            .field("output_directory", &self.output_directory)
            .field("selection", &self.selection)
            .field("max_output_frames", &self.max_output_frames)
            .field("max_output_height", &self.max_output_height)
            .field("quality", &self.quality)
            .field("progress_every", &self.progress_every)
            .finish_non_exhaustive()
    }
}

impl ExtractionConfig {
    /// Create a configuration with default settings.
    ///
    /// Defaults: every frame, no cap, no height limit, quality 95, progress
    /// every 50 saved frames, no progress callback.
    pub fn new<S: AsRef<Path>, O: AsRef<Path>>(source: S, output_directory: O) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            output_directory: output_directory.as_ref().to_path_buf(),
            selection: FrameSelection::All,
            max_output_frames: None,
            max_output_height: None,
            quality: DEFAULT_QUALITY,
            progress_every: DEFAULT_PROGRESS_EVERY,
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Choose which decoded frames are written.
    #[must_use]
    pub fn with_selection(mut self, selection: FrameSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Stop once this many frames have been written.
    #[must_use]
    pub fn with_max_output_frames(mut self, max_frames: u64) -> Self {
        self.max_output_frames = Some(max_frames);
        self
    }

    /// Downscale frames taller than `max_height`, keeping the aspect ratio.
    /// Clamped to a minimum of 1.
    #[must_use]
    pub fn with_max_output_height(mut self, max_height: u32) -> Self {
        self.max_output_height = Some(max_height.max(1));
        self
    }

    /// JPEG quality, `1..=100`. Out-of-range values are rejected when the
    /// extraction starts.
    #[must_use]
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Report progress every `every` saved frames. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_progress_every(mut self, every: u64) -> Self {
        self.progress_every = every.max(1);
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Path of the source video.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory frames are written to.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// The configured selection policy.
    pub fn selection(&self) -> FrameSelection {
        self.selection
    }

    /// The configured output cap, if any.
    pub fn max_output_frames(&self) -> Option<u64> {
        self.max_output_frames
    }

    /// The configured height limit, if any.
    pub fn max_output_height(&self) -> Option<u32> {
        self.max_output_height
    }

    /// The configured JPEG quality.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// The configured progress cadence.
    pub fn progress_every(&self) -> u64 {
        self.progress_every
    }
}
