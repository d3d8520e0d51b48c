use anyhow::{bail, Result};
use clap::Parser;
use formscan_core::Command;
use formscan_cv::traits::FrameSource;
use std::path::PathBuf;
use tracing::{info, warn};

mod config;
mod overlay;
mod session;
mod source;

use crate::config::AppConfig;
use crate::session::Session;
use crate::source::{ImageDirSource, SyntheticSource};

#[derive(Parser)]
#[command(name = "formscan")]
#[command(about = "Shape and color classification inside a sampling window")]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "formscan.toml")]
    config: PathBuf,

    /// Directory of frames to classify
    #[arg(short, long)]
    frames: Option<PathBuf>,

    /// Number of generated frames to classify instead of a directory
    #[arg(long)]
    synthetic: Option<usize>,

    /// Seed for generated frames
    #[arg(long)]
    seed: Option<u64>,

    /// Key presses, one per frame: w/a/s/d move, 1 shrinks, 2 grows, 4 quits, '.' skips
    #[arg(short = 'k', long, default_value = "")]
    controls: String,

    /// Initial window size
    #[arg(long)]
    rect_size: Option<u32>,

    /// Do not mirror directory frames
    #[arg(long)]
    no_flip: bool,

    /// Write frames with the window outline into this directory
    #[arg(long)]
    annotate: Option<PathBuf>,

    /// Export per-frame reports as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(format!("formscan={0},formscan_cv={0}", log_level))
        .try_init();

    let mut config = AppConfig::load(&args.config)?;
    info!("Configuration loaded from {:?}", args.config);
    apply_overrides(&mut config, &args);

    let controls = Command::parse_script(&args.controls)?;
    let mut source = open_source(&config)?;
    info!("Reading frames from {}", source.name());

    let mut session = Session::new(
        config.classifier.clone(),
        config.window.clone(),
        controls,
        config.output.clone(),
    )?;
    let records = session.run(source.as_mut())?;

    let recognized = records
        .iter()
        .filter(|r| r.report.result.is_recognized())
        .count();
    info!(
        "Classified {} frame(s), {} with a recognized shape",
        records.len(),
        recognized
    );
    let window = session.window();
    info!(
        "Final window: size {} at ({}, {})",
        window.rect_size, window.pos_x, window.pos_y
    );
    Ok(())
}

fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(dir) = &args.frames {
        config.source.frames_dir = Some(dir.clone());
    }
    if let Some(frames) = args.synthetic {
        config.source.synthetic_frames = frames;
    }
    if args.seed.is_some() {
        config.source.seed = args.seed;
    }
    if let Some(rect_size) = args.rect_size {
        config.window.rect_size = rect_size;
    }
    if args.no_flip {
        config.source.flip_horizontal = false;
    }
    if let Some(dir) = &args.annotate {
        config.output.annotate_dir = Some(dir.clone());
    }
    if let Some(path) = &args.json {
        config.output.json_path = Some(path.clone());
    }
}

fn open_source(config: &AppConfig) -> Result<Box<dyn FrameSource>> {
    if let Some(dir) = &config.source.frames_dir {
        let source = ImageDirSource::open(dir, config.source.flip_horizontal)?;
        if source.is_empty() {
            warn!("No frames found in {:?}", dir);
        } else {
            info!("Found {} frame(s) in {:?}", source.len(), dir);
        }
        return Ok(Box::new(source));
    }

    if config.source.synthetic_frames > 0 {
        let (width, height) = config.source.synthetic_size;
        return Ok(Box::new(SyntheticSource::new(
            width,
            height,
            config.source.synthetic_frames,
            config.source.seed,
        )));
    }

    bail!("No frame source: pass --frames <dir> or --synthetic <count>")
}
