//! # stillframe
//!
//! Turn videos into numbered JPEG image sequences for scroll-driven
//! front-ends.
//!
//! `stillframe` decodes a video front to back with FFmpeg (via
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)), keeps every frame
//! or one frame in N, caps the height of oversized frames, and writes the
//! result as `frame_0000.jpg`, `frame_0001.jpg`, … with no gaps. A small
//! manifest records how many frames each scene produced so the front-end knows
//! how many images to load.
//!
//! ## Quick Start
//!
//! ### Extract every frame
//!
//! ```no_run
//! use stillframe::ExtractionConfig;
//!
//! let config = ExtractionConfig::new("public/intro.mp4", "public/images/intro")
//!     .with_max_output_height(1080)
//!     .with_quality(95);
//! let count = stillframe::extract(&config)?;
//! # Ok::<(), stillframe::ExtractError>(())
//! ```
//!
//! ### Sample down to a target frame rate
//!
//! ```no_run
//! use stillframe::{ExtractionConfig, FrameSelection};
//!
//! let config = ExtractionConfig::new("public/video/car1.mp4", "public/images/divine")
//!     .with_selection(FrameSelection::TargetFrameRate(30.0))
//!     .with_quality(90);
//! let summary = stillframe::try_extract(&config)?;
//! println!("kept every {} frame(s)", summary.interval);
//! # Ok::<(), stillframe::ExtractError>(())
//! ```
//!
//! ### Several scenes and a manifest
//!
//! ```no_run
//! use stillframe::{FrameManifest, ManifestFormat, Preset};
//!
//! let jobs = Preset::Scenes.jobs(".");
//! let mut manifest = FrameManifest::new();
//! stillframe::run_jobs(&jobs, &mut manifest)?;
//! manifest.write("src/frame_manifest.js", ManifestFormat::JsModule)?;
//! # Ok::<(), stillframe::ExtractError>(())
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod config;
pub mod error;
pub mod extractor;
pub mod ffmpeg;
pub mod jobs;
pub mod manifest;
pub mod metadata;
pub mod preset;
pub mod progress;
pub mod resize;
pub mod selection;
pub mod source;
mod utilities;
pub mod video_file;
pub mod writer;

pub use config::ExtractionConfig;
pub use error::ExtractError;
pub use extractor::{ExtractionSummary, extract, extract_from, try_extract};
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use jobs::{ExtractionJob, JobOutcome, run_jobs};
pub use manifest::{FrameManifest, ManifestFormat, ManifestSink};
pub use metadata::VideoMetadata;
pub use preset::Preset;
pub use progress::{ProgressCallback, ProgressInfo};
pub use selection::{FrameSelection, FrameSelector};
pub use source::FrameSource;
pub use video_file::VideoFile;
pub use writer::FrameWriter;
