// Calibration error types and constants

use crate::calibration::EyeSide;
use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Calibration error code constants
///
/// Error code range: 2001-2004
pub struct CalibrationErrorCodes {}

impl CalibrationErrorCodes {
    /// Border-cropped frame has no pixels left to measure
    pub const EMPTY_MEASUREMENT_REGION: i32 = 2001;

    /// Not enough samples collected for the requested side
    pub const INSUFFICIENT_SAMPLES: i32 = 2002;

    /// Side tag is neither left nor right
    pub const INVALID_SIDE: i32 = 2003;

    /// Binarizer returned a frame with a different shape than its input
    pub const FRAME_SIZE_MISMATCH: i32 = 2004;
}

/// Log a calibration error with structured context
///
/// This function logs calibration errors with structured fields including:
/// - error_code: Numeric error code for programmatic handling
/// - component: The component where the error occurred
/// - message: Human-readable error message
/// - context: Additional contextual information
pub fn log_calibration_error(err: &CalibrationError, context: &str) {
    error!(
        "Calibration error in {}: code={}, component=CalibrationSession, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Calibration-related errors
///
/// All variants are scoped to a single `evaluate` / `threshold` call and
/// are recoverable by the caller: skip the frame, or stay in calibration
/// mode until the session is complete.
///
/// Error code range: 2001-2004
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Frame is too small to survive the border crop (dimensions of the input frame)
    EmptyMeasurementRegion { width: u32, height: u32 },

    /// Not enough samples collected for a side
    InsufficientSamples {
        side: EyeSide,
        required: usize,
        collected: usize,
    },

    /// Raw side tag outside {left, right}
    InvalidSide { value: String },

    /// Binarizer output shape differs from the eye frame, as (width, height)
    FrameSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

impl ErrorCode for CalibrationError {
    fn code(&self) -> i32 {
        match self {
            CalibrationError::EmptyMeasurementRegion { .. } => {
                CalibrationErrorCodes::EMPTY_MEASUREMENT_REGION
            }
            CalibrationError::InsufficientSamples { .. } => {
                CalibrationErrorCodes::INSUFFICIENT_SAMPLES
            }
            CalibrationError::InvalidSide { .. } => CalibrationErrorCodes::INVALID_SIDE,
            CalibrationError::FrameSizeMismatch { .. } => {
                CalibrationErrorCodes::FRAME_SIZE_MISMATCH
            }
        }
    }

    fn message(&self) -> String {
        match self {
            CalibrationError::EmptyMeasurementRegion { width, height } => {
                format!(
                    "Empty measurement region: {}x{} frame has no pixels inside the border margin",
                    width, height
                )
            }
            CalibrationError::InsufficientSamples {
                side,
                required,
                collected,
            } => {
                format!(
                    "Insufficient samples for {} eye: need {}, got {}",
                    side.display_name(),
                    required,
                    collected
                )
            }
            CalibrationError::InvalidSide { value } => {
                format!("Invalid eye side: {} (expected left/0 or right/1)", value)
            }
            CalibrationError::FrameSizeMismatch { expected, actual } => {
                format!(
                    "Binarized frame is {}x{}, expected {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
        }
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CalibrationError {}
