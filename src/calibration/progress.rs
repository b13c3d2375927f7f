// Progress tracking for calibration workflow
//
// This module provides types for reporting how far a calibration session
// has come, per eye and overall.

use crate::calibration::side::EyeSide;

/// Session phase
///
/// The only transition is Collecting -> Ready, driven by `evaluate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CalibrationPhase {
    /// At least one side is below the target sample count
    Collecting,
    /// Both sides have reached the target sample count
    Ready,
}

/// Progress information for one eye
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationProgress {
    pub side: EyeSide,
    /// Number of samples collected for this side
    pub samples_collected: usize,
    /// Samples required before the side counts as complete
    pub samples_needed: usize,
}

impl CalibrationProgress {
    pub fn new(side: EyeSide, samples_collected: usize, samples_needed: usize) -> Self {
        Self {
            side,
            samples_collected,
            samples_needed,
        }
    }

    /// Check if this side has enough samples
    pub fn is_side_complete(&self) -> bool {
        self.samples_collected >= self.samples_needed
    }

    /// Get progress percentage (0-100), saturating once complete
    pub fn percentage(&self) -> u8 {
        if self.samples_needed == 0 {
            return 100;
        }
        let pct = (self.samples_collected * 100) / self.samples_needed;
        pct.min(100) as u8
    }
}
