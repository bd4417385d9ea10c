//! Error types for the `stillframe` crate.
//!
//! [`ExtractError`] is the single error type returned by every fallible
//! operation. Two variants, [`SourceNotFound`](ExtractError::SourceNotFound)
//! and [`SourceUnopenable`](ExtractError::SourceUnopenable), are *source
//! errors*: [`extract`](crate::extract) and the job runner report them and
//! carry on with a zero count. Everything else propagates to the caller.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `stillframe` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// Nothing exists at the source path.
    #[error("Video file not found at {path}")]
    SourceNotFound {
        /// Path that was passed in the extraction config.
        path: PathBuf,
    },

    /// The source exists but FFmpeg could not open or decode-initialize it.
    #[error("Could not open video {path}: {reason}")]
    SourceUnopenable {
        /// Path that was passed in the extraction config.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The decoder rejected a packet, or a decoded frame could not be
    /// turned into an image. Returned by
    /// [`VideoFile::try_next_frame`](crate::VideoFile::try_next_frame).
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// JPEG quality outside `1..=100`.
    #[error("JPEG quality must be between 1 and 100, got {0}")]
    InvalidQuality(u8),

    /// An error originating from the FFmpeg libraries, such as a failed
    /// packet read or scaler run.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while creating directories or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while resizing or encoding a frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// The frame-count manifest could not be serialized.
    #[error("Manifest error: {0}")]
    ManifestError(String),
}

impl ExtractError {
    /// Returns `true` for the two errors that mean "no frames could be
    /// extracted from this source" rather than a failure of the run itself.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            ExtractError::SourceNotFound { .. } | ExtractError::SourceUnopenable { .. }
        )
    }
}

impl From<FfmpegError> for ExtractError {
    fn from(error: FfmpegError) -> Self {
        ExtractError::FfmpegError(error.to_string())
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(error: serde_json::Error) -> Self {
        ExtractError::ManifestError(error.to_string())
    }
}
