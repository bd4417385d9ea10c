//! The [`FrameSource`] abstraction consumed by the extraction loop.
//!
//! A source is an ordered, finite, forward-only sequence of decoded frames.
//! [`VideoFile`](crate::VideoFile) is the FFmpeg-backed implementation; any
//! other producer of [`DynamicImage`]s (a test fixture, an image sequence
//! already in memory) can implement the trait and run through
//! [`extract_from`](crate::extract_from) unchanged.

use image::DynamicImage;

use crate::metadata::VideoMetadata;

/// A forward-only sequence of decoded video frames.
///
/// Sources are not seekable. Each call to
/// [`next_frame`](FrameSource::next_frame) yields the frame at the next decode
/// index, starting from zero.
pub trait FrameSource {
    /// Metadata describing the stream (dimensions, frame rate, frame count).
    fn metadata(&self) -> &VideoMetadata;

    /// Decode and return the next frame in playback order.
    ///
    /// Returns `None` at end of stream. A decode failure part-way through the
    /// stream also returns `None`; callers cannot distinguish the two.
    fn next_frame(&mut self) -> Option<DynamicImage>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn metadata(&self) -> &VideoMetadata {
        (**self).metadata()
    }

    fn next_frame(&mut self) -> Option<DynamicImage> {
        (**self).next_frame()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn metadata(&self) -> &VideoMetadata {
        (**self).metadata()
    }

    fn next_frame(&mut self) -> Option<DynamicImage> {
        (**self).next_frame()
    }
}
