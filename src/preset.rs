//! Named job lists for the site's image sequences.
//!
//! Each [`Preset`] reproduces one fixed extraction setup, with paths laid out
//! relative to a project base directory:
//!
//! | preset   | input                      | output                 | policy |
//! |----------|----------------------------|------------------------|--------|
//! | `divine` | `public/video/car1.mp4`    | `public/images/divine` | ~30 fps, q90 |
//! | `karma`  | `public/video/karma1.mp4`  | `public/images/karma`  | all frames, q95, ≤1080p |
//! | `scenes` | `public/intro.mp4`, `public/chap1.mp4` | `public/images/{intro,chap1}` | all frames, q95, ≤1080p, manifest |

use std::path::{Path, PathBuf};

use crate::{config::ExtractionConfig, jobs::ExtractionJob, selection::FrameSelection};

/// Height limit used by the full-sequence presets.
pub const MAX_OUTPUT_HEIGHT: u32 = 1080;

/// A fixed extraction setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// One video sampled down to about 30 fps at quality 90.
    Divine,
    /// One video, every frame, quality 95, capped at 1080 px tall.
    Karma,
    /// Intro and chapter one, every frame, with a frame-count manifest.
    Scenes,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Preset; 3] = [Preset::Divine, Preset::Karma, Preset::Scenes];

    /// Lowercase preset name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Divine => "divine",
            Preset::Karma => "karma",
            Preset::Scenes => "scenes",
        }
    }

    /// Look a preset up by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }

    /// Build this preset's jobs relative to `base_directory`.
    pub fn jobs<P: AsRef<Path>>(self, base_directory: P) -> Vec<ExtractionJob> {
        let base = base_directory.as_ref();
        let public = base.join("public");
        let images = public.join("images");

        match self {
            Preset::Divine => vec![ExtractionJob::new(
                "divine",
                ExtractionConfig::new(public.join("video").join("car1.mp4"), images.join("divine"))
                    .with_selection(FrameSelection::TargetFrameRate(30.0))
                    .with_quality(90)
                    .with_progress_every(10),
            )],
            Preset::Karma => vec![ExtractionJob::new(
                "karma",
                full_sequence(public.join("video").join("karma1.mp4"), images.join("karma")),
            )],
            Preset::Scenes => ["intro", "chap1"]
                .into_iter()
                .map(|scene| {
                    ExtractionJob::new(
                        scene,
                        full_sequence(public.join(format!("{scene}.mp4")), images.join(scene)),
                    )
                })
                .collect(),
        }
    }

    /// Where this preset writes its manifest, if it writes one.
    pub fn manifest_path<P: AsRef<Path>>(self, base_directory: P) -> Option<PathBuf> {
        match self {
            Preset::Scenes => Some(base_directory.as_ref().join("src").join("frame_manifest.js")),
            Preset::Divine | Preset::Karma => None,
        }
    }
}

fn full_sequence(source: PathBuf, output_directory: PathBuf) -> ExtractionConfig {
    ExtractionConfig::new(source, output_directory)
        .with_quality(95)
        .with_max_output_height(MAX_OUTPUT_HEIGHT)
        .with_progress_every(50)
}
