// Threshold search
//
// Sweeps the fixed candidate thresholds over one eye crop, scores each
// binarization with the iris area metric and picks the candidate whose
// ratio lands closest to the expected iris coverage.

use image::GrayImage;
use tracing::debug;

use crate::calibration::iris::iris_area;
use crate::error::CalibrationError;

/// Candidate binarization thresholds, ascending (5..=95 step 5)
pub const CANDIDATE_THRESHOLDS: [u8; 19] = [
    5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75, 80, 85, 90, 95,
];

/// Expected fraction of a correctly segmented eye crop covered by the iris
pub const TARGET_IRIS_RATIO: f64 = 0.48;

/// Turns a grayscale eye crop into a binary frame at a given cutoff
///
/// Implementations must be pure and return a frame with the same
/// dimensions as the input, using 0 for iris pixels and any non-zero
/// value for background.
pub trait Binarizer {
    fn binarize(&self, frame: &GrayImage, threshold: u8) -> GrayImage;
}

impl<F> Binarizer for F
where
    F: Fn(&GrayImage, u8) -> GrayImage,
{
    fn binarize(&self, frame: &GrayImage, threshold: u8) -> GrayImage {
        self(frame, threshold)
    }
}

/// Score of one candidate threshold
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ThresholdTrial {
    pub threshold: u8,
    /// Iris area ratio of the binarized frame
    pub iris_ratio: f64,
    /// Distance from [`TARGET_IRIS_RATIO`]
    pub deviation: f64,
}

/// Binarize and measure the frame at one threshold
///
/// # Errors
/// * `FrameSizeMismatch` - The binarizer changed the frame shape
/// * `EmptyMeasurementRegion` - The frame is too small to measure
pub fn score_threshold<B>(
    eye_frame: &GrayImage,
    binarizer: &B,
    threshold: u8,
) -> Result<ThresholdTrial, CalibrationError>
where
    B: Binarizer + ?Sized,
{
    let binary = binarizer.binarize(eye_frame, threshold);
    let expected = eye_frame.dimensions();
    let actual = binary.dimensions();
    if actual != expected {
        return Err(CalibrationError::FrameSizeMismatch { expected, actual });
    }

    let iris_ratio = iris_area(&binary)?;
    Ok(ThresholdTrial {
        threshold,
        iris_ratio,
        deviation: (iris_ratio - TARGET_IRIS_RATIO).abs(),
    })
}

/// Binarize and measure the frame at every candidate threshold
///
/// Trials are returned in ascending threshold order.
pub fn sweep_thresholds<B>(
    eye_frame: &GrayImage,
    binarizer: &B,
) -> Result<Vec<ThresholdTrial>, CalibrationError>
where
    B: Binarizer + ?Sized,
{
    CANDIDATE_THRESHOLDS
        .iter()
        .map(|&threshold| score_threshold(eye_frame, binarizer, threshold))
        .collect()
}

/// Keep `best` unless `trial` is strictly closer to the target
fn closer<'a>(best: &'a ThresholdTrial, trial: &'a ThresholdTrial) -> &'a ThresholdTrial {
    if trial.deviation < best.deviation {
        trial
    } else {
        best
    }
}

/// Pick the trial with the smallest deviation
///
/// Exact ties go to the trial that comes first, which for a sweep is the
/// lower threshold. `None` only for an empty slice.
pub fn select_best(trials: &[ThresholdTrial]) -> Option<&ThresholdTrial> {
    let (first, rest) = trials.split_first()?;
    Some(rest.iter().fold(first, closer))
}

/// Find the candidate threshold that best isolates the iris in `eye_frame`
///
/// Pure with respect to its inputs; calls the binarizer once per candidate.
pub fn find_best_threshold<B>(
    eye_frame: &GrayImage,
    binarizer: &B,
) -> Result<u8, CalibrationError>
where
    B: Binarizer + ?Sized,
{
    let [first, rest @ ..] = &CANDIDATE_THRESHOLDS;
    let mut best = score_threshold(eye_frame, binarizer, *first)?;
    for &threshold in rest {
        let trial = score_threshold(eye_frame, binarizer, threshold)?;
        best = *closer(&best, &trial);
    }

    debug!(
        threshold = best.threshold,
        iris_ratio = best.iris_ratio,
        deviation = best.deviation,
        "threshold sweep complete"
    );

    Ok(best.threshold)
}
