//! FFmpeg-backed [`FrameSource`].
//!
//! [`VideoFile`] opens a container, picks the best video stream, and decodes
//! it sequentially. Each decoded frame is converted to RGB24 by FFmpeg's
//! software scaler and returned as an [`image::DynamicImage`]. The demuxer,
//! decoder and scaler are owned by the `VideoFile` and released when it is
//! dropped.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::DynamicImage;

use crate::{
    error::ExtractError, metadata::VideoMetadata, source::FrameSource, utilities,
};

/// An opened video file, decoded one frame at a time.
///
/// # Example
///
/// ```no_run
/// use stillframe::{FrameSource, VideoFile};
///
/// let mut source = VideoFile::open("public/video/karma1.mp4")?;
/// let mut decoded = 0;
/// while source.next_frame().is_some() {
///     decoded += 1;
/// }
/// println!("{decoded} frames");
/// # Ok::<(), stillframe::ExtractError>(())
/// ```
pub struct VideoFile {
    input_context: Input,
    decoder: VideoDecoder,
    /// Built from the first decoded frame; rebuilt if the frame geometry or
    /// pixel format changes mid-stream.
    scaler: Option<(ScalingContext, (Pixel, u32, u32))>,
    video_stream_index: usize,
    metadata: VideoMetadata,
    file_path: PathBuf,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    eof_sent: bool,
    done: bool,
}

impl Debug for VideoFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFile")
            .field("file_path", &self.file_path)
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl VideoFile {
    /// Open a video file for sequential decoding.
    ///
    /// Initializes FFmpeg (idempotent), opens the container, selects the best
    /// video stream and prepares a decoder for it.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::SourceNotFound`] if nothing exists at `path`.
    /// - [`ExtractError::SourceUnopenable`] if the container cannot be
    ///   opened, has no video stream, or its codec cannot be initialized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        if !path.exists() {
            return Err(ExtractError::SourceNotFound { path: file_path });
        }

        log::debug!("Opening video file: {}", file_path.display());

        let unopenable = |reason: String| ExtractError::SourceUnopenable {
            path: file_path.clone(),
            reason,
        };

        ffmpeg_next::init()
            .map_err(|error| unopenable(format!("FFmpeg initialisation failed: {error}")))?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| unopenable(error.to_string()))?;

        let (video_stream_index, decoder, frames_per_second, reported_frames) = {
            let stream = input_context
                .streams()
                .best(Type::Video)
                .ok_or_else(|| unopenable("No video stream found in file".to_string()))?;

            let frames_per_second = utilities::rational_to_frames_per_second(
                stream.avg_frame_rate(),
            )
            .or_else(|| utilities::rational_to_frames_per_second(stream.rate()))
            .unwrap_or(0.0);

            let decoder_context = CodecContext::from_parameters(stream.parameters())
                .map_err(|error| {
                    unopenable(format!("Failed to read video codec parameters: {error}"))
                })?;
            let decoder = decoder_context
                .decoder()
                .video()
                .map_err(|error| unopenable(format!("Failed to create video decoder: {error}")))?;

            (stream.index(), decoder, frames_per_second, stream.frames())
        };

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let frame_count = if reported_frames > 0 {
            reported_frames as u64
        } else {
            utilities::estimate_frame_count(duration, frames_per_second)
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            frame_count,
            codec,
        };

        log::debug!(
            "Video stream {video_stream_index}: {}x{} @ {:.3} fps, ~{} frames [{}]",
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.frame_count,
            metadata.codec,
        );

        Ok(Self {
            input_context,
            decoder,
            scaler: None,
            video_stream_index,
            metadata,
            file_path,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            eof_sent: false,
            done: false,
        })
    }

    /// Path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Scale the current `decoded_frame` to RGB24 and wrap it as an image.
    fn convert_current_frame(&mut self) -> Result<DynamicImage, ExtractError> {
        let width = self.decoded_frame.width();
        let height = self.decoded_frame.height();
        let geometry = (self.decoded_frame.format(), width, height);

        let scaler = match self.scaler.take() {
            Some((scaler, current)) if current == geometry => scaler,
            _ => ScalingContext::get(
                geometry.0,
                width,
                height,
                Pixel::RGB24,
                width,
                height,
                ScalingFlags::BILINEAR,
            )?,
        };
        let (scaler, _) = self.scaler.insert((scaler, geometry));
        scaler.run(&self.decoded_frame, &mut self.rgb_frame)?;

        let image = utilities::frame_to_rgb_image(&self.rgb_frame).ok_or_else(|| {
            ExtractError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })?;
        Ok(DynamicImage::ImageRgb8(image))
    }

    /// Decode the next frame, surfacing decode and read failures.
    ///
    /// Returns `Ok(None)` once the stream is drained. After an error the
    /// stream is finished and later calls return `Ok(None)`.
    /// [`FrameSource::next_frame`] logs the error and ends the stream
    /// instead.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::VideoDecodeError`] if the decoder rejects a packet
    ///   or a decoded frame cannot be converted.
    /// - [`ExtractError::FfmpegError`] if a packet cannot be read or the
    ///   scaler fails.
    pub fn try_next_frame(&mut self) -> Result<Option<DynamicImage>, ExtractError> {
        while !self.done {
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                return match self.convert_current_frame() {
                    Ok(image) => Ok(Some(image)),
                    Err(error) => {
                        self.done = true;
                        Err(error)
                    }
                };
            }

            if self.eof_sent {
                self.done = true;
                break;
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    if packet.stream() != self.video_stream_index {
                        continue;
                    }
                    if let Err(error) = self.decoder.send_packet(&packet) {
                        self.done = true;
                        return Err(ExtractError::VideoDecodeError(format!(
                            "Decoder rejected packet: {error}"
                        )));
                    }
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.decoder.send_eof() {
                        log::debug!("Failed to flush decoder: {error}");
                        self.done = true;
                    }
                    self.eof_sent = true;
                }
                Err(error) => {
                    self.done = true;
                    return Err(error.into());
                }
            }
        }
        Ok(None)
    }
}

impl FrameSource for VideoFile {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn next_frame(&mut self) -> Option<DynamicImage> {
        match self.try_next_frame() {
            Ok(frame) => frame,
            Err(error) => {
                log::warn!(
                    "Stopping decode of {}, treating as end of stream: {error}",
                    self.file_path.display()
                );
                None
            }
        }
    }
}

impl Drop for VideoFile {
    fn drop(&mut self) {
        log::debug!("Released video file: {}", self.file_path.display());
    }
}
