//! Reference eye-frame binarizer.
//!
//! Smooths the crop with an edge-preserving bilateral filter, thresholds it
//! and then grows the dark region so eyelashes and specular highlights
//! inside the pupil stop fragmenting the iris blob. Callers with their own
//! pipeline can plug any other [`Binarizer`] into the calibration session
//! instead.

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::filter::bilateral_filter;
use imageproc::morphology::erode;

use crate::calibration::Binarizer;
use crate::config::ProcessingConfig;

/// Bilateral smoothing, threshold, then erosion of the bright background
#[derive(Debug, Clone)]
pub struct EyeFrameBinarizer {
    bilateral_window: u32,
    sigma_color: f32,
    sigma_spatial: f32,
    erode_iterations: u8,
}

impl EyeFrameBinarizer {
    /// Create a binarizer
    ///
    /// # Arguments
    /// * `bilateral_window` - Bilateral filter window in pixels; 0 disables smoothing
    /// * `sigma_color` - Gray-level standard deviation of the filter
    /// * `sigma_spatial` - Spatial standard deviation of the filter
    /// * `erode_iterations` - Passes of a 3x3 erosion applied to the bright background
    pub fn new(
        bilateral_window: u32,
        sigma_color: f32,
        sigma_spatial: f32,
        erode_iterations: u8,
    ) -> Self {
        Self {
            bilateral_window,
            sigma_color,
            sigma_spatial,
            erode_iterations,
        }
    }

    /// Threshold and erosion only, no smoothing
    pub fn unsmoothed(erode_iterations: u8) -> Self {
        let defaults = ProcessingConfig::default();
        Self::new(0, defaults.sigma_color, defaults.sigma_spatial, erode_iterations)
    }

    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self::new(
            config.bilateral_window,
            config.sigma_color,
            config.sigma_spatial,
            config.erode_iterations,
        )
    }

    fn smooth(&self, frame: &GrayImage) -> GrayImage {
        // bilateral_filter panics on an empty raster
        if self.bilateral_window == 0 || frame.width() == 0 || frame.height() == 0 {
            return frame.clone();
        }
        bilateral_filter(
            frame,
            self.bilateral_window,
            self.sigma_color,
            self.sigma_spatial,
        )
    }
}

impl Default for EyeFrameBinarizer {
    fn default() -> Self {
        Self::from_config(&ProcessingConfig::default())
    }
}

impl Binarizer for EyeFrameBinarizer {
    fn binarize(&self, frame: &GrayImage, threshold: u8) -> GrayImage {
        let smoothed = self.smooth(frame);

        // Pixels at or below the cutoff are iris (0), the rest background (255)
        let binary = GrayImage::from_fn(smoothed.width(), smoothed.height(), |x, y| {
            if smoothed.get_pixel(x, y).0[0] > threshold {
                Luma([255])
            } else {
                Luma([0])
            }
        });

        if self.erode_iterations == 0 {
            return binary;
        }
        // n passes of a 3x3 square kernel reach everything within L-inf distance n
        erode(&binary, Norm::LInf, self.erode_iterations)
    }
}
