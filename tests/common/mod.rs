//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use ffmpeg_next::{
    Packet, Rational,
    codec::{Id, context::Context as CodecContext},
    encoder::video::Encoder as VideoEncoder,
    format::{Pixel, context::Output},
    frame::Video as VideoFrame,
};
use image::{DynamicImage, Rgb, RgbImage};
use stillframe::{FrameSource, ProgressCallback, ProgressInfo, VideoMetadata};

/// Encode a short MPEG-4 AVI clip at `path`.
///
/// Frame `i` has luma `grey_level(i)` and neutral chroma. B-frames are off,
/// so every encoded frame decodes back out in order.
pub fn write_clip(path: &Path, frames: u64, frames_per_second: i32, width: u32, height: u32) {
    ffmpeg_next::init().expect("Failed to initialize FFmpeg");

    let mut output = ffmpeg_next::format::output(path).expect("Failed to create clip");
    let codec = ffmpeg_next::encoder::find(Id::MPEG4).expect("MPEG-4 encoder not available");
    let time_base = Rational::new(1, frames_per_second);

    let mut stream = output.add_stream(codec).expect("Failed to add video stream");
    let stream_index = stream.index();

    let mut encoder = CodecContext::from_parameters(stream.parameters())
        .expect("Failed to create codec context")
        .encoder()
        .video()
        .expect("Failed to create video encoder");
    encoder.set_width(width);
    encoder.set_height(height);
    encoder.set_format(Pixel::YUV420P);
    encoder.set_time_base(time_base);
    encoder.set_frame_rate(Some(Rational::new(frames_per_second, 1)));
    encoder.set_max_b_frames(0);

    let mut encoder = encoder.open_as(codec).expect("Failed to open encoder");
    stream.set_parameters(&encoder);
    stream.set_time_base(time_base);
    output.write_header().expect("Failed to write header");

    for index in 0..frames {
        let mut frame = VideoFrame::new(Pixel::YUV420P, width, height);
        frame.data_mut(0).fill(grey_level(index));
        frame.data_mut(1).fill(128);
        frame.data_mut(2).fill(128);
        frame.set_pts(Some(index as i64));

        encoder.send_frame(&frame).expect("Failed to send frame");
        write_packets(&mut encoder, &mut output, stream_index, time_base);
    }

    encoder.send_eof().expect("Failed to flush encoder");
    write_packets(&mut encoder, &mut output, stream_index, time_base);
    output.write_trailer().expect("Failed to write trailer");
}

fn write_packets(
    encoder: &mut VideoEncoder,
    output: &mut Output,
    stream_index: usize,
    time_base: Rational,
) {
    let stream_time_base = output
        .stream(stream_index)
        .expect("Clip stream missing")
        .time_base();

    let mut packet = Packet::empty();
    while encoder.receive_packet(&mut packet).is_ok() {
        packet.set_stream(stream_index);
        packet.rescale_ts(time_base, stream_time_base);
        packet
            .write_interleaved(output)
            .expect("Failed to write packet");
    }
}

/// Write a clip into `directory` and return its path.
pub fn clip_in(directory: &Path, name: &str, frames: u64, frames_per_second: i32) -> PathBuf {
    let path = directory.join(name);
    write_clip(&path, frames, frames_per_second, 64, 48);
    path
}

/// In-memory source producing solid-colour frames.
///
/// Frame `i` is filled with grey level `(i * 20) % 256` so tests can tell
/// which decode index ended up in which output file.
pub struct SyntheticSource {
    metadata: VideoMetadata,
    total_frames: u64,
    width: u32,
    height: u32,
    pub next_frame_calls: u64,
}

impl SyntheticSource {
    pub fn new(total_frames: u64, frames_per_second: f64) -> Self {
        Self::with_size(total_frames, frames_per_second, 16, 12)
    }

    pub fn with_size(total_frames: u64, frames_per_second: f64, width: u32, height: u32) -> Self {
        Self {
            metadata: VideoMetadata {
                width,
                height,
                frames_per_second,
                frame_count: total_frames,
                codec: "synthetic".to_string(),
            },
            total_frames,
            width,
            height,
            next_frame_calls: 0,
        }
    }

    /// Hide the frame count, as a container without duration would.
    pub fn without_frame_count(mut self) -> Self {
        self.metadata.frame_count = 0;
        self
    }
}

pub fn grey_level(decode_index: u64) -> u8 {
    ((decode_index * 20) % 256) as u8
}

impl FrameSource for SyntheticSource {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn next_frame(&mut self) -> Option<DynamicImage> {
        let index = self.next_frame_calls;
        self.next_frame_calls += 1;
        if index >= self.total_frames {
            return None;
        }
        let level = grey_level(index);
        Some(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            self.width,
            self.height,
            Rgb([level, level, level]),
        )))
    }
}

/// Progress callback that keeps every snapshot it sees.
#[derive(Default)]
pub struct RecordingProgress {
    pub infos: Mutex<Vec<ProgressInfo>>,
}

impl RecordingProgress {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn saved_counts(&self) -> Vec<u64> {
        self.infos
            .lock()
            .unwrap()
            .iter()
            .map(|info| info.saved)
            .collect()
    }
}

impl ProgressCallback for RecordingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.infos.lock().unwrap().push(info.clone());
    }
}

/// Sorted file names in `directory`.
pub fn file_names(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(directory)
        .expect("Failed to read output directory")
        .map(|entry| {
            entry
                .expect("Failed to read directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// The names `frame_0000.jpg … frame_{count-1}.jpg`.
pub fn expected_names(count: u64) -> Vec<String> {
    (0..count).map(|index| format!("frame_{index:04}.jpg")).collect()
}
