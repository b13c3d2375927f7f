// Error types for pupil threshold calibration
//
// This module defines custom error types for the calibration core,
// providing structured error handling with numeric codes so a tracking
// loop can decide whether to skip a frame or stay in calibration mode.

mod calibration;

pub use calibration::{log_calibration_error, CalibrationError, CalibrationErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling for
/// callers that report errors outside of Rust.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
