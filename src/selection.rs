//! Frame selection policy.
//!
//! [`FrameSelection`] decides which decode indices are written. Interval
//! policies are resolved against the source frame rate once, before the
//! decode loop, into a [`FrameSelector`].

/// Which decoded frames to keep.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FrameSelection {
    /// Keep every decoded frame. Combine with
    /// [`with_max_output_frames`](crate::ExtractionConfig::with_max_output_frames)
    /// for the cap policy.
    #[default]
    All,
    /// Keep frames whose decode index is a multiple of `n`. Zero is treated
    /// as one.
    EveryNth(u64),
    /// Keep frames at roughly this rate: the interval is
    /// `floor(source_fps / target_fps)`, at least one.
    TargetFrameRate(f64),
}

impl FrameSelection {
    /// Resolve this selection against the source frame rate.
    pub fn resolve(self, source_frames_per_second: f64) -> FrameSelector {
        let interval = match self {
            FrameSelection::All => 1,
            FrameSelection::EveryNth(n) => n.max(1),
            FrameSelection::TargetFrameRate(target) => {
                resolve_interval(source_frames_per_second, target)
            }
        };
        FrameSelector { interval }
    }
}

/// Compute the decode-index interval for a target frame rate.
///
/// Returns `floor(source / target)`. A source or target rate that is zero,
/// negative, NaN or infinite, or a ratio below one, yields `1`: every frame
/// is kept.
///
/// ```
/// use stillframe::selection::resolve_interval;
///
/// assert_eq!(resolve_interval(60.0, 30.0), 2);
/// assert_eq!(resolve_interval(29.97, 30.0), 1);
/// assert_eq!(resolve_interval(0.0, 30.0), 1);
/// ```
pub fn resolve_interval(source_frames_per_second: f64, target_frames_per_second: f64) -> u64 {
    let usable = |rate: f64| rate.is_finite() && rate > 0.0;
    if !usable(source_frames_per_second) || !usable(target_frames_per_second) {
        log::warn!(
            "Cannot derive a frame interval from source {source_frames_per_second} fps and \
             target {target_frames_per_second} fps; keeping every frame"
        );
        return 1;
    }

    let interval = (source_frames_per_second / target_frames_per_second).floor();
    if interval < 1.0 {
        log::warn!(
            "Target {target_frames_per_second} fps exceeds source {source_frames_per_second} fps; \
             keeping every frame"
        );
        return 1;
    }
    interval as u64
}

/// A resolved selection rule: keep decode indices divisible by `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSelector {
    interval: u64,
}

impl FrameSelector {
    /// The resolved interval (always at least one).
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Whether the frame at `decode_index` should be written.
    pub fn keeps(&self, decode_index: u64) -> bool {
        decode_index % self.interval == 0
    }
}
