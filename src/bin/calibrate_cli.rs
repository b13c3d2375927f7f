use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::GrayImage;
use pupil_calibration::calibration::{
    select_best, sweep_thresholds, CalibrationProgress, ThresholdTrial,
};
use pupil_calibration::{
    init_logging, AppConfig, CalibratedThresholds, CalibrationError, CalibrationSession,
    EyeFrameBinarizer, EyeSide,
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "calibrate_cli",
    about = "Offline pupil threshold calibration over cropped eye images"
)]
struct Cli {
    /// JSON config file (defaults are used when absent or invalid)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the per-candidate iris ratios for one eye crop
    Sweep {
        #[arg(long)]
        image: PathBuf,
    },
    /// Run a full calibration over two directories of eye crops
    Calibrate {
        #[arg(long)]
        left: PathBuf,
        #[arg(long)]
        right: PathBuf,
    },
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .map(AppConfig::load_from_file)
        .unwrap_or_default();

    match cli.command {
        Commands::Sweep { image } => run_sweep(&config, &image),
        Commands::Calibrate { left, right } => run_calibrate(&config, &left, &right),
    }
}

fn run_sweep(config: &AppConfig, path: &Path) -> Result<ExitCode> {
    let binarizer = EyeFrameBinarizer::from_config(&config.processing);
    let frame = load_frame(path)?;
    let trials = sweep_thresholds(&frame, &binarizer)
        .with_context(|| format!("sweeping {}", path.display()))?;
    let best = select_best(&trials).map(|t| t.threshold);

    let report = SweepReport {
        image: path,
        best_threshold: best,
        trials: &trials,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::from(0))
}

fn run_calibrate(config: &AppConfig, left_dir: &Path, right_dir: &Path) -> Result<ExitCode> {
    let binarizer = EyeFrameBinarizer::from_config(&config.processing);
    let mut session = CalibrationSession::new(binarizer, config.calibration.samples_per_side);
    let log_every = config.calibration.log_every_n_frames.max(1);

    let mut evaluated: u64 = 0;
    for (side, dir) in [(EyeSide::Left, left_dir), (EyeSide::Right, right_dir)] {
        for path in list_images(dir)? {
            let frame = load_frame(&path)?;
            match session.evaluate(&frame, side) {
                Ok(_) => {}
                Err(err @ CalibrationError::EmptyMeasurementRegion { .. }) => {
                    warn!("skipping {}: {}", path.display(), err);
                    continue;
                }
                Err(err) => {
                    return Err(anyhow::Error::new(err)
                        .context(format!("evaluating {}", path.display())));
                }
            }

            evaluated += 1;
            if evaluated % log_every == 0 {
                let progress = session.progress(side);
                info!(
                    side = %side,
                    collected = progress.samples_collected,
                    needed = progress.samples_needed,
                    "calibration progress"
                );
            }
        }
    }

    let complete = session.is_complete();
    let thresholds = if complete {
        let thresholds = session.finalize()?;
        for side in EyeSide::ALL {
            info!(side = %side, threshold = thresholds.for_side(side), "calibrated");
        }
        Some(thresholds)
    } else {
        None
    };
    let report = CalibrationReport {
        complete,
        thresholds,
        progress: EyeSide::ALL.iter().map(|&s| session.progress(s)).collect(),
        left_samples: session.samples(EyeSide::Left),
        right_samples: session.samples(EyeSide::Right),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.complete {
        Ok(ExitCode::from(0))
    } else {
        Ok(ExitCode::from(2))
    }
}

fn load_frame(path: &Path) -> Result<GrayImage> {
    let img = image::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(img.to_luma8())
}

/// Image files in `dir`, sorted by file name
fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                matches!(
                    ext.to_ascii_lowercase().as_str(),
                    "png" | "jpg" | "jpeg" | "bmp" | "pgm" | "tif" | "tiff"
                )
            })
            .unwrap_or(false);
        if path.is_file() && is_image {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[derive(Serialize)]
struct SweepReport<'a> {
    image: &'a Path,
    best_threshold: Option<u8>,
    trials: &'a [ThresholdTrial],
}

#[derive(Serialize)]
struct CalibrationReport<'a> {
    complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    thresholds: Option<CalibratedThresholds>,
    progress: Vec<CalibrationProgress>,
    left_samples: &'a [u8],
    right_samples: &'a [u8],
}
