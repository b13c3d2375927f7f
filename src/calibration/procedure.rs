// CalibrationSession - per-eye threshold sample collection
//
// One session is created when the tracking loop enters calibration mode.
// Every evaluated eye crop adds one threshold sample to its side; once both
// sides hold enough samples the loop reads the per-side mean and switches
// to tracking mode.

use image::GrayImage;
use tracing::{debug, info, warn};

use crate::calibration::progress::{CalibrationPhase, CalibrationProgress};
use crate::calibration::search::{find_best_threshold, Binarizer};
use crate::calibration::side::EyeSide;
use crate::calibration::state::{mean_threshold, CalibratedThresholds};
use crate::error::{log_calibration_error, CalibrationError};

/// Samples each side needs before calibration is complete
pub const DEFAULT_SAMPLES_PER_SIDE: usize = 20;

/// Owns the threshold samples collected for both eyes
///
/// Not meant for concurrent `evaluate` calls; callers that process eyes on
/// several threads must serialize access or merge separate sessions.
pub struct CalibrationSession<B> {
    binarizer: B,
    /// Thresholds collected for the left eye, in evaluation order
    left_samples: Vec<u8>,
    /// Thresholds collected for the right eye, in evaluation order
    right_samples: Vec<u8>,
    samples_per_side: usize,
}

impl<B: Binarizer> CalibrationSession<B> {
    /// Create a session requiring `samples_per_side` samples for each eye
    pub fn new(binarizer: B, samples_per_side: usize) -> Self {
        Self {
            binarizer,
            left_samples: Vec::with_capacity(samples_per_side),
            right_samples: Vec::with_capacity(samples_per_side),
            samples_per_side,
        }
    }

    /// Create with default configuration (20 samples per side)
    pub fn new_default(binarizer: B) -> Self {
        Self::new(binarizer, DEFAULT_SAMPLES_PER_SIDE)
    }

    /// Find the best threshold for `eye_frame` and record it for `side`
    ///
    /// # Returns
    /// * `Ok(threshold)` - The sample that was appended
    /// * `Err(CalibrationError)` - Frame could not be measured; nothing recorded
    ///
    /// # Note
    /// Samples past the target are still recorded and take part in the mean.
    pub fn evaluate(
        &mut self,
        eye_frame: &GrayImage,
        side: EyeSide,
    ) -> Result<u8, CalibrationError> {
        let threshold = find_best_threshold(eye_frame, &self.binarizer).inspect_err(|err| {
            log_calibration_error(err, "evaluate");
        })?;

        let was_complete = self.is_complete();
        let needed = self.samples_per_side;
        let samples = self.samples_mut(side);
        if samples.len() >= needed {
            warn!(
                side = %side,
                collected = samples.len(),
                needed,
                "sample recorded past target"
            );
        }
        samples.push(threshold);
        debug!(side = %side, threshold, collected = samples.len(), "calibration sample recorded");

        if !was_complete && self.is_complete() {
            info!(
                left = ?self.threshold(EyeSide::Left).ok(),
                right = ?self.threshold(EyeSide::Right).ok(),
                "calibration complete"
            );
        }

        Ok(threshold)
    }

    /// Same as [`evaluate`](Self::evaluate) for a raw side tag (0 = left, 1 = right)
    pub fn evaluate_tagged(
        &mut self,
        eye_frame: &GrayImage,
        side: i32,
    ) -> Result<u8, CalibrationError> {
        let side = tagged_side(side, "evaluate")?;
        self.evaluate(eye_frame, side)
    }
}

impl<B> CalibrationSession<B> {
    /// Check if both sides have reached the target sample count
    pub fn is_complete(&self) -> bool {
        self.left_samples.len() >= self.samples_per_side
            && self.right_samples.len() >= self.samples_per_side
    }

    /// Current phase of the session
    pub fn phase(&self) -> CalibrationPhase {
        if self.is_complete() {
            CalibrationPhase::Ready
        } else {
            CalibrationPhase::Collecting
        }
    }

    /// Truncating mean of the samples collected for `side`
    ///
    /// # Errors
    /// * `InsufficientSamples` - No samples for this side yet
    pub fn threshold(&self, side: EyeSide) -> Result<u8, CalibrationError> {
        mean_threshold(side, self.samples(side))
    }

    /// Same as [`threshold`](Self::threshold) for callers holding a raw side tag
    pub fn threshold_tagged(&self, side: i32) -> Result<u8, CalibrationError> {
        self.threshold(tagged_side(side, "threshold")?)
    }

    /// Samples recorded for `side`, in evaluation order
    pub fn samples(&self, side: EyeSide) -> &[u8] {
        match side {
            EyeSide::Left => &self.left_samples,
            EyeSide::Right => &self.right_samples,
        }
    }

    /// Progress for one side
    pub fn progress(&self, side: EyeSide) -> CalibrationProgress {
        CalibrationProgress::new(side, self.samples(side).len(), self.samples_per_side)
    }

    pub fn samples_per_side(&self) -> usize {
        self.samples_per_side
    }

    /// Finalize calibration
    ///
    /// # Returns
    /// * `Ok(CalibratedThresholds)` - Both sides complete
    /// * `Err(CalibrationError::InsufficientSamples)` - A side is still short
    pub fn finalize(&self) -> Result<CalibratedThresholds, CalibrationError> {
        CalibratedThresholds::from_samples(
            &self.left_samples,
            &self.right_samples,
            self.samples_per_side,
        )
        .inspect_err(|err| {
            log_calibration_error(err, "finalize");
        })
    }

    /// Discard all samples and start collecting again
    pub fn reset(&mut self) {
        self.left_samples.clear();
        self.right_samples.clear();
    }

    fn samples_mut(&mut self, side: EyeSide) -> &mut Vec<u8> {
        match side {
            EyeSide::Left => &mut self.left_samples,
            EyeSide::Right => &mut self.right_samples,
        }
    }
}

/// Convert a raw side tag, logging the rejection like any other session error
fn tagged_side(side: i32, context: &str) -> Result<EyeSide, CalibrationError> {
    EyeSide::try_from(side).inspect_err(|err| {
        log_calibration_error(err, context);
    })
}
