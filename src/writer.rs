//! Numbered JPEG output.
//!
//! [`FrameWriter`] owns the output directory and the saved-index counter.
//! File names depend only on how many frames have been written so far, never
//! on the decode index, so the sequence `frame_0000.jpg`, `frame_0001.jpg`, …
//! has no gaps.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use image::{DynamicImage, codecs::jpeg::JpegEncoder};

use crate::error::ExtractError;

/// File name for the frame with the given saved index.
///
/// ```
/// assert_eq!(stillframe::writer::frame_file_name(7), "frame_0007.jpg");
/// assert_eq!(stillframe::writer::frame_file_name(12345), "frame_12345.jpg");
/// ```
pub fn frame_file_name(saved_index: u64) -> String {
    format!("frame_{saved_index:04}.jpg")
}

/// Writes frames as sequentially numbered JPEG files.
#[derive(Debug)]
pub struct FrameWriter {
    output_directory: PathBuf,
    quality: u8,
    saved: u64,
}

impl FrameWriter {
    /// Create the output directory (and parents) and prepare a writer.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::InvalidQuality`] if `quality` is not in `1..=100`.
    /// - [`ExtractError::IoError`] if the directory cannot be created.
    pub fn create<P: AsRef<Path>>(output_directory: P, quality: u8) -> Result<Self, ExtractError> {
        if !(1..=100).contains(&quality) {
            return Err(ExtractError::InvalidQuality(quality));
        }
        let output_directory = output_directory.as_ref().to_path_buf();
        fs::create_dir_all(&output_directory)?;

        Ok(Self {
            output_directory,
            quality,
            saved: 0,
        })
    }

    /// Number of frames written so far. Also the next saved index.
    pub fn saved(&self) -> u64 {
        self.saved
    }

    /// Directory the frames are written into.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Full path of the frame with the given saved index.
    pub fn frame_path(&self, saved_index: u64) -> PathBuf {
        self.output_directory.join(frame_file_name(saved_index))
    }

    /// Encode `image` as JPEG under the next saved index.
    ///
    /// Images that are neither RGB8 nor grayscale are converted to RGB8
    /// first. Returns the path that was written.
    pub fn write(&mut self, image: &DynamicImage) -> Result<PathBuf, ExtractError> {
        let path = self.frame_path(self.saved);

        let converted;
        let image = match image {
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image,
            other => {
                converted = DynamicImage::ImageRgb8(other.to_rgb8());
                &converted
            }
        };

        let mut output = BufWriter::new(File::create(&path)?);
        image.write_with_encoder(JpegEncoder::new_with_quality(&mut output, self.quality))?;
        output.flush()?;

        self.saved += 1;
        Ok(path)
    }
}
