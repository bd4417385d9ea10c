//! Internal utility functions.
//!
//! Helpers for pixel-data copying and frame-rate arithmetic shared by the
//! FFmpeg-backed source.

use std::time::Duration;

use ffmpeg_next::{Rational, frame::Video as VideoFrame};
use image::RgbImage;

/// Pack the first plane of an RGB24 frame into an [`RgbImage`].
///
/// Rows are taken `stride` bytes apart and cut to `width * 3`, which drops
/// the alignment padding FFmpeg adds to each line. Returns `None` if the
/// plane is too short for the frame's dimensions.
pub fn frame_to_rgb_image(video_frame: &VideoFrame) -> Option<RgbImage> {
    let width = video_frame.width();
    let height = video_frame.height();
    let row_length = width as usize * 3;
    let stride = video_frame.stride(0);
    if stride == 0 || stride < row_length {
        return None;
    }

    let pixels: Vec<u8> = video_frame
        .data(0)
        .chunks(stride)
        .take(height as usize)
        .flat_map(|row| row.get(..row_length).unwrap_or_default())
        .copied()
        .collect();
    RgbImage::from_raw(width, height, pixels)
}

/// Convert a frame-rate rational to frames per second.
///
/// Returns `None` for a zero denominator or a non-positive rate.
pub fn rational_to_frames_per_second(rate: Rational) -> Option<f64> {
    if rate.denominator() == 0 {
        return None;
    }
    let frames_per_second = rate.numerator() as f64 / rate.denominator() as f64;
    (frames_per_second > 0.0).then_some(frames_per_second)
}

/// Estimate a frame count from the container duration and frame rate.
pub fn estimate_frame_count(duration: Duration, frames_per_second: f64) -> u64 {
    if frames_per_second > 0.0 {
        (duration.as_secs_f64() * frames_per_second) as u64
    } else {
        0
    }
}
