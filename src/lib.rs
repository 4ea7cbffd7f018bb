//! Scenewalk: lazy, resumable filtering of labeled image datasets.
//!
//! A dataset is a folder of scenes. Each scene is either a CVAT XML export
//! (`*.xml` + `images/`) or a per-frame JSON layout (`ann/` + `img/`).
//! [`traverse`] walks the scenes in name order and yields, one at a time,
//! the decoded frames whose annotation satisfies a [`Predicate`], without
//! reading the rest of the dataset ahead of the consumer.
//!
//! # Modules
//!
//! - [`annotation`]: Scene layout detection and annotation readers
//! - [`predicate`]: Record predicates (person count, night tag)
//! - [`walker`]: The resumable traversal
//! - [`loader`]: Image decoding for matched records
//! - [`generators`]: Fibonacci and white-noise sequences
//! - [`preview`]: Sinks that consume produced frames
//! - [`error`]: Error types for scenewalk operations
//!
//! # Example
//!
//! ```no_run
//! use scenewalk::{traverse, Predicate};
//!
//! for frame in traverse("datasets/crowd", Predicate::CountMatches(2)) {
//!     let frame = frame?;
//!     println!("{} ({}x{})", frame.source.display(), frame.width(), frame.height());
//! }
//! # Ok::<(), scenewalk::ScenewalkError>(())
//! ```

pub mod annotation;
pub mod error;
pub mod generators;
pub mod loader;
pub mod predicate;
pub mod preview;
pub mod walker;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use image::DynamicImage;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use error::ScenewalkError;
pub use loader::{Frame, ImageFileLoader, ImageLoader};
pub use predicate::Predicate;
pub use walker::{traverse, DatasetWalker, WalkStats};

use generators::{Fibonacci, PictureSize, WhiteNoise};
use preview::{preview_frames, FrameSink};

/// The scenewalk CLI application.
#[derive(Parser)]
#[command(name = "scenewalk")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log every skipped record and scene transition.
    #[arg(short, long, global = true, env = "SCENEWALK_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List frames with exactly COUNT non-ignored persons (CVAT XML scenes).
    Persons(PersonsArgs),
    /// List frames tagged time=night (per-frame JSON scenes).
    Night(NightArgs),
    /// Produce white-noise frames.
    Noise(NoiseArgs),
    /// Print Fibonacci numbers.
    Fibonacci(FibonacciArgs),
}

/// Output options shared by the frame-producing subcommands.
#[derive(clap::Args)]
struct OutputArgs {
    /// Save each produced frame as a PNG into this directory.
    #[arg(long, env = "SCENEWALK_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long)]
    limit: Option<usize>,
}

/// Arguments for the persons subcommand.
#[derive(clap::Args)]
struct PersonsArgs {
    /// Dataset root containing one folder per scene.
    dataset: PathBuf,

    /// Required number of non-ignored persons per frame.
    count: usize,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the night subcommand.
#[derive(clap::Args)]
struct NightArgs {
    /// Dataset root containing one folder per scene.
    dataset: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the noise subcommand.
#[derive(clap::Args)]
struct NoiseArgs {
    /// Frame size as WIDTHxHEIGHT.
    #[arg(long, default_value = "100x100")]
    picture_size: PictureSize,

    /// Number of frames to produce.
    #[arg(long, default_value_t = 1)]
    frames: usize,

    /// Seed for reproducible noise.
    #[arg(long)]
    seed: Option<u64>,

    /// Save each frame as a PNG into this directory.
    #[arg(long, env = "SCENEWALK_OUT_DIR")]
    out_dir: Option<PathBuf>,
}

/// Arguments for the fibonacci subcommand.
#[derive(clap::Args)]
struct FibonacciArgs {
    /// Number of terms to print (all terms that fit in 64 bits if omitted).
    #[arg(long)]
    count: Option<usize>,
}

/// Run the scenewalk CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ScenewalkError> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Some(Commands::Persons(args)) => run_walk(
            &args.dataset,
            Predicate::CountMatches(args.count),
            args.output,
        ),
        Some(Commands::Night(args)) => run_walk(&args.dataset, Predicate::HasNightTag, args.output),
        Some(Commands::Noise(args)) => run_noise(args),
        Some(Commands::Fibonacci(args)) => run_fibonacci(args),
        None => {
            println!("scenewalk {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Lazy, resumable filtering of labeled image datasets.");
            println!();
            println!("Run 'scenewalk --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) -> Result<(), ScenewalkError> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init()
        .map_err(|e| ScenewalkError::Logging(e.to_string()))
}

/// Execute a dataset traversal subcommand.
fn run_walk(dataset: &Path, predicate: Predicate, output: OutputArgs) -> Result<(), ScenewalkError> {
    if !dataset.is_dir() {
        return Err(ScenewalkError::NotADirectory(dataset.to_path_buf()));
    }

    info!(dataset = %dataset.display(), %predicate, "starting traversal");
    let mut walker = traverse(dataset, predicate);
    let stdout = io::stdout();
    let mut sink = FrameSink::new(stdout.lock(), output.out_dir);

    let result = preview_frames(walker.by_ref(), &mut sink, output.limit);
    let stats = walker.stats();
    info!(
        scenes = stats.scenes,
        records = stats.records,
        skipped = stats.skipped,
        emitted = stats.emitted,
        "traversal finished"
    );
    sink.into_inner().flush()?;
    result.map(|_| ())
}

/// Execute the noise subcommand.
fn run_noise(args: NoiseArgs) -> Result<(), ScenewalkError> {
    info!(size = %args.picture_size, frames = args.frames, "generating white noise");
    let stdout = io::stdout();
    let mut sink = FrameSink::new(stdout.lock(), args.out_dir);

    for frame in WhiteNoise::new(args.picture_size, args.seed).take(args.frames) {
        sink.accept("white-noise", &DynamicImage::ImageLuma8(frame))?;
    }
    sink.into_inner().flush()?;
    Ok(())
}

/// Execute the fibonacci subcommand.
fn run_fibonacci(args: FibonacciArgs) -> Result<(), ScenewalkError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for term in Fibonacci::new().take(args.count.unwrap_or(usize::MAX)) {
        writeln!(out, "{term}")?;
    }
    out.flush()?;
    Ok(())
}
