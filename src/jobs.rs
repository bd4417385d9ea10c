//! Sequential multi-source runs.
//!
//! An [`ExtractionJob`] pairs a scene name with its [`ExtractionConfig`].
//! [`run_jobs`] processes a list of jobs strictly one after another and
//! records every job's count into a [`ManifestSink`]. A job whose source is
//! missing or unopenable records zero and the run moves on.

use crate::{
    config::ExtractionConfig,
    error::ExtractError,
    extractor::{ExtractionSummary, try_extract},
    manifest::ManifestSink,
};

/// A named extraction.
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    /// Scene name recorded in the manifest (e.g. `"intro"`).
    pub name: String,
    /// How to extract this scene.
    pub config: ExtractionConfig,
}

impl ExtractionJob {
    /// Create a job.
    pub fn new<N: Into<String>>(name: N, config: ExtractionConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Result of one job in a [`run_jobs`] batch.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// The job's scene name.
    pub name: String,
    /// Frames written (zero when the source was unusable).
    pub saved_frames: u64,
    /// Full summary when the extraction ran.
    pub summary: Option<ExtractionSummary>,
    /// The reported source error, when the extraction could not start.
    pub error: Option<String>,
}

/// Run `jobs` in order and record each count into `sink`.
///
/// # Errors
///
/// Stops at the first error that is not a source error (see
/// [`ExtractError::is_source_error`]); counts already recorded stay in the
/// sink.
pub fn run_jobs(
    jobs: &[ExtractionJob],
    sink: &mut dyn ManifestSink,
) -> Result<Vec<JobOutcome>, ExtractError> {
    let mut outcomes = Vec::with_capacity(jobs.len());

    for job in jobs {
        log::info!("--- Extracting {} frames ---", job.name);

        let outcome = match try_extract(&job.config) {
            Ok(summary) => JobOutcome {
                name: job.name.clone(),
                saved_frames: summary.saved_frames,
                summary: Some(summary),
                error: None,
            },
            Err(error) if error.is_source_error() => {
                log::error!("{error}");
                JobOutcome {
                    name: job.name.clone(),
                    saved_frames: 0,
                    summary: None,
                    error: Some(error.to_string()),
                }
            }
            Err(error) => return Err(error),
        };

        sink.record(&outcome.name, outcome.saved_frames);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
