// CalibratedThresholds - result of a completed calibration session
//
// Holds the per-eye binarization thresholds the tracking pipeline uses once
// it leaves calibration mode. Serializable for reports; not persisted.

use crate::calibration::side::EyeSide;
use crate::error::CalibrationError;

/// Per-eye thresholds derived from calibration samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalibratedThresholds {
    /// Mean threshold for the left eye
    pub left: u8,
    /// Mean threshold for the right eye
    pub right: u8,
}

impl CalibratedThresholds {
    /// Compute thresholds from collected samples
    ///
    /// # Arguments
    /// * `left_samples` - Thresholds recorded for the left eye
    /// * `right_samples` - Thresholds recorded for the right eye
    /// * `samples_per_side` - Samples each side must have
    ///
    /// # Returns
    /// * `Ok(CalibratedThresholds)` - Both sides have enough samples
    /// * `Err(CalibrationError::InsufficientSamples)` - A side is short
    pub fn from_samples(
        left_samples: &[u8],
        right_samples: &[u8],
        samples_per_side: usize,
    ) -> Result<Self, CalibrationError> {
        for (side, samples) in [(EyeSide::Left, left_samples), (EyeSide::Right, right_samples)] {
            if samples.len() < samples_per_side.max(1) {
                return Err(CalibrationError::InsufficientSamples {
                    side,
                    required: samples_per_side.max(1),
                    collected: samples.len(),
                });
            }
        }

        Ok(Self {
            left: mean_threshold(EyeSide::Left, left_samples)?,
            right: mean_threshold(EyeSide::Right, right_samples)?,
        })
    }

    /// Threshold for one eye
    pub fn for_side(&self, side: EyeSide) -> u8 {
        match side {
            EyeSide::Left => self.left,
            EyeSide::Right => self.right,
        }
    }
}

/// Truncating integer mean of a side's samples
///
/// # Errors
/// * `InsufficientSamples` with `required: 1` when `samples` is empty
pub fn mean_threshold(side: EyeSide, samples: &[u8]) -> Result<u8, CalibrationError> {
    if samples.is_empty() {
        return Err(CalibrationError::InsufficientSamples {
            side,
            required: 1,
            collected: 0,
        });
    }

    let sum: u64 = samples.iter().map(|&t| t as u64).sum();
    // Mean of u8 values always fits in u8
    Ok((sum / samples.len() as u64) as u8)
}
