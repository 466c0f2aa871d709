//! `tile-parity` CLI - compare reference and optimized tiling on a directory of images.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tile_parity::{collect_image_paths, CheckConfig, ParityCheck, TileParams, TOLERANCE};

/// Compare reference and optimized tiling preprocessing on real images.
#[derive(Parser, Debug)]
#[command(name = "tile-parity")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory searched recursively for .jpg images.
    #[arg(value_name = "IMAGE_DIR")]
    image_dir: Option<PathBuf>,

    /// Side length of each square tile in pixels.
    #[arg(long, default_value = "512", value_name = "INT")]
    image_size: u32,

    /// Minimum number of tiles per image.
    #[arg(long, default_value = "1", value_name = "INT")]
    min_tiles: u32,

    /// Maximum number of tiles per image.
    #[arg(long, default_value = "12", value_name = "INT")]
    max_tiles: u32,

    /// Append a whole-image thumbnail tile to multi-tile outputs.
    #[arg(long)]
    thumbnail: bool,

    /// Maximum absolute difference (exclusive) for an image to pass.
    #[arg(long, default_value_t = TOLERANCE, value_name = "FLOAT")]
    tolerance: f64,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(image_dir) = args.image_dir.as_deref() else {
        println!("Usage: tile-parity /path/to/images");
        return ExitCode::FAILURE;
    };

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tile_parity={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    if let Err(err) = run(&args, image_dir) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args, image_dir: &Path) -> Result<()> {
    let config = CheckConfig {
        params: TileParams {
            image_size: args.image_size,
            min_tiles: args.min_tiles,
            max_tiles: args.max_tiles,
            use_thumbnail: args.thumbnail,
        },
        tolerance: args.tolerance,
        show_progress: !args.no_progress,
    };

    let check = ParityCheck::new(config).context("Invalid configuration")?;

    println!("Testing images in directory: {}", image_dir.display());
    let paths = collect_image_paths(image_dir).context("Failed to collect images")?;
    println!("Found {} images in {}\n", paths.len(), image_dir.display());

    let mut stdout = io::stdout().lock();
    check
        .report(&paths, &mut stdout)
        .context("Failed to compare images")?;

    Ok(())
}
