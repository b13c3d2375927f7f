// Pupil Calibration Core
// Per-eye binarization threshold search and sample averaging

// Module declarations
pub mod calibration;
pub mod config;
pub mod error;
pub mod processing;
pub mod testing;

// Re-exports for convenience
pub use calibration::{
    find_best_threshold, iris_area, Binarizer, CalibratedThresholds, CalibrationSession, EyeSide,
};
pub use config::AppConfig;
pub use error::{CalibrationError, ErrorCode};
pub use processing::EyeFrameBinarizer;

use tracing_subscriber::EnvFilter;

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG` (default `info`)
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
