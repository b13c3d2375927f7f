// Calibration module - per-eye binarization threshold calibration
//
// This module provides three layers:
// 1. iris_area: fraction of iris pixels in a binarized eye crop
// 2. find_best_threshold: candidate sweep picking the threshold closest to the target ratio
// 3. CalibrationSession: collects one threshold per frame and eye, then averages
//
// The calibration workflow:
// 1. Create a CalibrationSession with a Binarizer
// 2. Evaluate eye crops for both eyes until is_complete()
// 3. Read threshold(side) or finalize() and switch the pipeline to tracking

pub mod iris;
pub mod procedure;
pub mod progress;
pub mod search;
pub mod side;
pub mod state;

pub use iris::{iris_area, BORDER_MARGIN};
pub use procedure::{CalibrationSession, DEFAULT_SAMPLES_PER_SIDE};
pub use progress::{CalibrationPhase, CalibrationProgress};
pub use search::{
    find_best_threshold, score_threshold, select_best, sweep_thresholds, Binarizer, ThresholdTrial,
    CANDIDATE_THRESHOLDS, TARGET_IRIS_RATIO,
};
pub use side::EyeSide;
pub use state::{mean_threshold, CalibratedThresholds};
