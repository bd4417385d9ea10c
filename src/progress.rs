//! Progress reporting.
//!
//! The extraction loop emits a [`ProgressInfo`] snapshot every N saved
//! frames (see [`ExtractionConfig::with_progress_every`]). Observers
//! implement [`ProgressCallback`]; they see the run but cannot alter it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use stillframe::{ExtractionConfig, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         match info.total {
//!             Some(total) => println!("Extracted {}/{total}", info.saved),
//!             None => println!("Extracted {} frames...", info.saved),
//!         }
//!     }
//! }
//!
//! let config = ExtractionConfig::new("public/intro.mp4", "public/images/intro")
//!     .with_progress_every(50)
//!     .with_progress(Arc::new(PrintProgress));
//! ```
//!
//! [`ExtractionConfig::with_progress_every`]: crate::ExtractionConfig::with_progress_every

use std::sync::Arc;
use std::time::{Duration, Instant};

/// A snapshot of extraction progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames written so far.
    pub saved: u64,
    /// Frames decoded so far, including skipped ones.
    pub decoded: u64,
    /// Total frames in the source, if the container reports or implies it.
    pub total: Option<u64>,
    /// Decode completion (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time since the loop started.
    pub elapsed: Duration,
}

/// Trait for receiving progress updates during extraction.
///
/// Implementations must be [`Send`] and [`Sync`] so a configuration can be
/// shared freely. Callbacks are infallible.
pub trait ProgressCallback: Send + Sync {
    /// Called every N saved frames.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. The default callback.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Counts saved frames and fires the callback on the configured cadence.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total: Option<u64>,
    every: u64,
    start_time: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(callback: Arc<dyn ProgressCallback>, total: Option<u64>, every: u64) -> Self {
        Self {
            callback,
            total,
            every: every.max(1),
            start_time: Instant::now(),
        }
    }

    /// Report if `saved` lands on the cadence. Returns the snapshot that was
    /// delivered, if any.
    pub(crate) fn observe(&self, saved: u64, decoded: u64) -> Option<ProgressInfo> {
        if saved == 0 || saved % self.every != 0 {
            return None;
        }

        let percentage = self
            .total
            .filter(|&total| total > 0)
            .map(|total| (decoded as f32 / total as f32 * 100.0).min(100.0));

        let info = ProgressInfo {
            saved,
            decoded,
            total: self.total,
            percentage,
            elapsed: self.start_time.elapsed(),
        };
        self.callback.on_progress(&info);
        Some(info)
    }
}
