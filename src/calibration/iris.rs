// Iris area metric
//
// Fraction of the binarized eye crop covered by the iris/pupil. A fixed
// border is ignored because eyelids and lighting artifacts cluster at the
// edges of the crop.

use image::GrayImage;

use crate::error::CalibrationError;

/// Pixels cropped from each edge before measuring
pub const BORDER_MARGIN: u32 = 5;

/// Fraction of foreground (zero-valued) pixels inside the border margin
///
/// # Arguments
/// * `binary_frame` - Binarized eye crop, 0 = iris, non-zero = background
///
/// # Returns
/// * `Ok(ratio)` - Value in [0.0, 1.0]
/// * `Err(CalibrationError::EmptyMeasurementRegion)` - Frame is 10 pixels or less on either axis
pub fn iris_area(binary_frame: &GrayImage) -> Result<f64, CalibrationError> {
    let (width, height) = binary_frame.dimensions();
    if width <= 2 * BORDER_MARGIN || height <= 2 * BORDER_MARGIN {
        return Err(CalibrationError::EmptyMeasurementRegion { width, height });
    }

    let x_range = BORDER_MARGIN..width - BORDER_MARGIN;
    let y_range = BORDER_MARGIN..height - BORDER_MARGIN;
    let total = x_range.len() as u64 * y_range.len() as u64;

    let dark = binary_frame
        .enumerate_pixels()
        .filter(|(x, y, px)| x_range.contains(x) && y_range.contains(y) && px.0[0] == 0)
        .count() as u64;

    Ok(dark as f64 / total as f64)
}
