use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use stillframe::{
    ExtractionConfig, ExtractionJob, FfmpegLogLevel, FrameManifest, FrameSelection, JobOutcome,
    ManifestFormat, Preset, ProgressCallback, ProgressInfo,
};
use tracing_subscriber::filter::LevelFilter;

const CLI_AFTER_HELP: &str = "Examples:\n  stillframe extract clip.mp4 --out frames --fps 30 --quality 90\n  stillframe extract clip.mp4 --out frames --max-frames 120 --max-height 1080\n  stillframe preset scenes --base-dir site\n  stillframe completions zsh > _stillframe";

#[derive(Debug, Parser)]
#[command(
    name = "stillframe",
    version,
    about = "Extract numbered JPEG image sequences from video files",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show debug logging.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar instead of progress log lines.
    #[arg(long)]
    progress: bool,

    /// FFmpeg log level (quiet, fatal, error, warning, info, verbose, debug).
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract frames from one video into a directory.
    #[command(
        about = "Extract frames from one video",
        after_help = "Examples:\n  stillframe extract input.mp4 --out frames\n  stillframe extract input.mp4 --out frames --every 2 --quality 90"
    )]
    Extract {
        /// Input video path.
        input: PathBuf,
        /// Output directory for frame_NNNN.jpg files.
        #[arg(long)]
        out: PathBuf,
        /// Keep roughly this many frames per second of video.
        #[arg(long, conflicts_with = "every")]
        fps: Option<f64>,
        /// Keep every Nth decoded frame.
        #[arg(long)]
        every: Option<u64>,
        /// Stop after writing this many frames.
        #[arg(long)]
        max_frames: Option<u64>,
        /// Downscale frames taller than this many pixels.
        #[arg(long)]
        max_height: Option<u32>,
        /// JPEG quality (1-100).
        #[arg(long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: u8,
        /// Report progress every N saved frames.
        #[arg(long, default_value_t = 50)]
        progress_every: u64,
    },

    /// Run one of the site's fixed extraction setups.
    #[command(
        about = "Run a named extraction preset (divine, karma, scenes)",
        after_help = "Examples:\n  stillframe preset scenes\n  stillframe preset scenes --base-dir site --json\n  stillframe preset karma --max-frames 10"
    )]
    Preset {
        /// Preset name: divine | karma | scenes.
        #[arg(value_parser = parse_preset)]
        name: Preset,
        /// Project directory containing public/ and src/.
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
        /// Override the manifest path (scenes only).
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Write the manifest as JSON instead of an ES module.
        #[arg(long)]
        json: bool,
        /// Stop each video after this many frames.
        #[arg(long)]
        max_frames: Option<u64>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn parse_preset(value: &str) -> Result<Preset, String> {
    Preset::from_name(value).ok_or_else(|| {
        let names: Vec<&str> = Preset::ALL.iter().map(|preset| preset.name()).collect();
        format!("unknown preset '{value}' (expected one of: {})", names.join(", "))
    })
}

fn job_name_for(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string())
}

/// Resolve where and how the manifest is written for a preset run.
fn manifest_target(
    default_path: Option<PathBuf>,
    override_path: Option<PathBuf>,
    json: bool,
) -> Option<(PathBuf, ManifestFormat)> {
    let format = if json {
        ManifestFormat::Json
    } else {
        ManifestFormat::JsModule
    };
    match (override_path, default_path) {
        (Some(path), _) => Some((path, format)),
        (None, Some(path)) if json => Some((path.with_extension("json"), format)),
        (None, Some(path)) => Some((path, format)),
        (None, None) => None,
    }
}

/// Console log level. A progress bar replaces the per-frame info lines.
fn log_level_for(global: &GlobalOptions) -> LevelFilter {
    match (global.verbose, global.progress) {
        (true, _) => LevelFilter::DEBUG,
        (false, true) => LevelFilter::WARN,
        (false, false) => LevelFilter::INFO,
    }
}

fn init_logging(global: &GlobalOptions) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(log_level_for(global))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(level) = &global.log_level {
        let parsed: FfmpegLogLevel = level.parse()?;
        stillframe::set_ffmpeg_log_level(parsed);
    }
    Ok(())
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new(name: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.green} {prefix:.bold} {bar:40.cyan/blue} {pos}/{len} {msg}",
        )?;
        bar.set_style(style.progress_chars("##-"));
        bar.set_prefix(name.to_string());
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            self.bar.set_length(total);
        }
        self.bar.set_position(info.decoded);
        self.bar.set_message(format!("{} saved", info.saved));
    }
}

fn run_with_output(
    jobs: Vec<ExtractionJob>,
    global: &GlobalOptions,
) -> Result<(Vec<JobOutcome>, FrameManifest), Box<dyn std::error::Error>> {
    let mut manifest = FrameManifest::new();
    let mut outcomes = Vec::with_capacity(jobs.len());

    for mut job in jobs {
        let bar = if global.progress {
            let progress = Arc::new(TerminalProgress::new(&job.name)?);
            let bar = progress.bar.clone();
            job.config = job.config.with_progress(progress);
            Some(bar)
        } else {
            None
        };

        let result = stillframe::run_jobs(std::slice::from_ref(&job), &mut manifest);
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
        outcomes.extend(result?);
    }

    for outcome in &outcomes {
        match (&outcome.summary, &outcome.error) {
            (Some(summary), _) => println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Extracted {} frame(s) to {}",
                    summary.saved_frames,
                    summary.output_directory.display()
                )
                .green()
            ),
            (None, Some(error)) => eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("{}: {error} (0 frames)", outcome.name).yellow()
            ),
            (None, None) => {}
        }
    }

    Ok((outcomes, manifest))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            out,
            fps,
            every,
            max_frames,
            max_height,
            quality,
            progress_every,
        } => {
            init_logging(&cli.global)?;

            let selection = match (fps, every) {
                (Some(fps), _) => FrameSelection::TargetFrameRate(fps),
                (None, Some(0)) => return Err("--every must be greater than 0".into()),
                (None, Some(every)) => FrameSelection::EveryNth(every),
                (None, None) => FrameSelection::All,
            };

            let mut config = ExtractionConfig::new(&input, &out)
                .with_selection(selection)
                .with_quality(quality)
                .with_progress_every(progress_every);
            if let Some(max_frames) = max_frames {
                config = config.with_max_output_frames(max_frames);
            }
            if let Some(max_height) = max_height {
                config = config.with_max_output_height(max_height);
            }

            let job = ExtractionJob::new(job_name_for(&input), config);
            run_with_output(vec![job], &cli.global)?;
        }
        Commands::Preset {
            name,
            base_dir,
            manifest,
            json,
            max_frames,
        } => {
            init_logging(&cli.global)?;

            let mut jobs = name.jobs(&base_dir);
            if let Some(max_frames) = max_frames {
                for job in &mut jobs {
                    job.config = job.config.clone().with_max_output_frames(max_frames);
                }
            }

            let (_, frame_manifest) = run_with_output(jobs, &cli.global)?;

            if let Some((path, format)) =
                manifest_target(name.manifest_path(&base_dir), manifest, json)
            {
                frame_manifest.write(&path, format)?;
                println!("{} {}", "saved".green().bold(), path.display());
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "stillframe", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
