use bounds::Mode;
use clap::Parser;
use cli::Settings;
use color_eyre::eyre::Result;
use playback::{
    Driver, FFmpegDriver, FileSource, FrameSource, Source, StopReason, StreamDriver, VideoMetadata,
    WindowPresenter,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Track the bright region of every frame of a video", long_about = None)]
struct Cli {
    /// Path to the input video file
    video_path: PathBuf,
    /// Brightness threshold (0-255, out of range values are clamped)
    #[arg(allow_negative_numbers = true)]
    threshold: Option<i64>,
    /// Minimum contour area used in contour analysis mode
    min_area: Option<f64>,
    /// TOML or JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Initial display mode
    #[arg(short, long)]
    mode: Option<Mode>,
    /// Path to the ffmpeg executable
    #[arg(long)]
    ffmpeg: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    }
    .with_overrides(cli.threshold, cli.min_area, cli.mode);

    let source = FileSource::new(&cli.video_path);
    if let Err(e) = source.validate() {
        error!("{}", e);
        std::process::exit(-1);
    }

    let driver = match &cli.ffmpeg {
        Some(path) => FFmpegDriver::with_path(path.clone())?,
        None => FFmpegDriver::new()?,
    };

    let frames = match driver.open(&source) {
        Ok(frames) => frames,
        Err(e) => {
            error!("Could not open {}: {}", source.description(), e);
            std::process::exit(-1);
        }
    };

    let metadata = frames.metadata().clone();
    report_startup(&metadata, &settings);

    let presenter = WindowPresenter::new(metadata.width, metadata.height)?;
    let summary = StreamDriver::new(
        frames,
        presenter,
        settings.playback_state(),
        settings.driver_settings(),
    )
    .run()?;

    if summary.stop == StopReason::UserQuit {
        info!("Stopped after {} frames", summary.frames);
    }

    Ok(())
}

fn report_startup(metadata: &VideoMetadata, settings: &Settings) {
    info!("Video properties:");
    info!("  Resolution: {}x{}", metadata.width, metadata.height);
    info!("  FPS: {:.2}", metadata.fps);
    info!("  Total frames: {}", metadata.frame_count);
    info!("  Codec: {}", metadata.codec);
    if metadata.rotation != 0 {
        info!("  Rotation: {} degrees (frames are analyzed unrotated)", metadata.rotation);
    }
    info!("Brightness threshold: {}", settings.clamped_threshold());
    info!("Minimum contour area: {}", settings.min_contour_area);
    info!("Mode: {}", settings.mode.description());
    info!("Controls:");
    info!("  '+' / '-'  adjust threshold by {}", settings.threshold_step);
    info!("  'm'        cycle mode (binary only, contour analysis, direct bounds)");
    info!("  'p'        pause / resume");
    info!("  'q' / ESC  quit");
}
