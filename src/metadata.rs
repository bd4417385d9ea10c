//! Source metadata.
//!
//! [`VideoMetadata`] is read once when a [`VideoFile`](crate::VideoFile) is
//! opened and cached for the lifetime of the source. The extractor uses the
//! frame rate to resolve interval selection and reports the estimated frame
//! count in its progress output.

/// Metadata for the video stream of a source.
///
/// # Example
///
/// ```no_run
/// use stillframe::{FrameSource, VideoFile};
///
/// let source = VideoFile::open("public/intro.mp4")?;
/// let metadata = source.metadata();
/// println!("{}x{} @ {:.2} fps", metadata.width, metadata.height, metadata.frames_per_second);
/// # Ok::<(), stillframe::ExtractError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second. `0.0` when the container does not report a rate.
    pub frames_per_second: f64,
    /// Total number of frames, reported by the container or estimated from
    /// duration and frame rate. `0` when unknown.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}

impl VideoMetadata {
    /// Returns the frame count if it is known.
    pub fn known_frame_count(&self) -> Option<u64> {
        (self.frame_count > 0).then_some(self.frame_count)
    }
}
