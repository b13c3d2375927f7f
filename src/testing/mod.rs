//! Synthetic rasters and deterministic binarizers for tests and harnesses.
//!
//! Lets the threshold search and the calibration session be exercised
//! without real eye crops: the iris ratio produced at each candidate is a
//! known function of the threshold.

use image::{GrayImage, Luma};

use crate::calibration::iris::BORDER_MARGIN;
use crate::calibration::search::{Binarizer, TARGET_IRIS_RATIO};

/// Frame filled with a single gray value
pub fn uniform_frame(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([value]))
}

/// Binary frame whose measured iris ratio is `fraction`, rounded to the pixel grid
///
/// The border margin stays background; inside it, the first
/// `round(fraction * interior)` pixels in raster order are set to 0.
/// Frames without an interior come back all background.
pub fn frame_with_dark_fraction(width: u32, height: u32, fraction: f64) -> GrayImage {
    let mut frame = uniform_frame(width, height, 255);
    if width <= 2 * BORDER_MARGIN || height <= 2 * BORDER_MARGIN {
        return frame;
    }

    let inner_w = width - 2 * BORDER_MARGIN;
    let inner_h = height - 2 * BORDER_MARGIN;
    let interior = inner_w as u64 * inner_h as u64;
    let dark = (fraction.clamp(0.0, 1.0) * interior as f64).round() as u64;

    for i in 0..dark {
        let x = BORDER_MARGIN + (i % inner_w as u64) as u32;
        let y = BORDER_MARGIN + (i / inner_w as u64) as u32;
        frame.put_pixel(x, y, Luma([0]));
    }
    frame
}

/// Binarizer whose output ignores the frame content
///
/// Produces exactly [`TARGET_IRIS_RATIO`] at `target`, and moves the ratio
/// by `step` per 5 threshold units away from it (more iris at higher
/// thresholds, as a real eye crop behaves). Exactness at the target holds
/// whenever `0.48 * interior` is a whole number of pixels, e.g. for a
/// 30x30 frame.
#[derive(Debug, Clone, Copy)]
pub struct StepBinarizer {
    pub target: u8,
    pub step: f64,
}

impl StepBinarizer {
    pub fn with_target(target: u8) -> Self {
        Self { target, step: 0.01 }
    }

    /// Iris ratio this binarizer aims for at `threshold`
    pub fn ratio_at(&self, threshold: u8) -> f64 {
        let offset = (threshold as f64 - self.target as f64) / 5.0;
        (TARGET_IRIS_RATIO + offset * self.step).clamp(0.0, 1.0)
    }
}

impl Binarizer for StepBinarizer {
    fn binarize(&self, frame: &GrayImage, threshold: u8) -> GrayImage {
        frame_with_dark_fraction(frame.width(), frame.height(), self.ratio_at(threshold))
    }
}
