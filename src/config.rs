//! Configuration loading
//!
//! Initialization-time settings for a calibration run, read from a JSON
//! file. The candidate thresholds and the target iris ratio are constants
//! in [`crate::calibration::search`] and intentionally absent here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::calibration::DEFAULT_SAMPLES_PER_SIDE;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub calibration: CalibrationConfig,
    pub processing: ProcessingConfig,
}

/// Calibration session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Number of threshold samples to collect per eye
    pub samples_per_side: usize,
    /// Log progress every N evaluated frames
    pub log_every_n_frames: u64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            samples_per_side: DEFAULT_SAMPLES_PER_SIDE,
            log_every_n_frames: 10,
        }
    }
}

/// Reference binarizer parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Bilateral filter window in pixels (0 disables smoothing)
    pub bilateral_window: u32,
    /// Gray-level standard deviation of the bilateral filter
    pub sigma_color: f32,
    /// Spatial standard deviation of the bilateral filter
    pub sigma_spatial: f32,
    /// 3x3 erosion passes applied after thresholding
    pub erode_iterations: u8,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            bilateral_window: 10,
            sigma_color: 15.0,
            sigma_spatial: 15.0,
            erode_iterations: 3,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or defaults when the file is missing or
    /// invalid. Missing fields fall back to their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.calibration.samples_per_side, 20);
        assert_eq!(config.calibration.log_every_n_frames, 10);
        assert_eq!(config.processing.bilateral_window, 10);
        assert_eq!(config.processing.sigma_color, 15.0);
        assert_eq!(config.processing.sigma_spatial, 15.0);
        assert_eq!(config.processing.erode_iterations, 3);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.calibration.samples_per_side,
            config.calibration.samples_per_side
        );
        assert_eq!(
            parsed.processing.erode_iterations,
            config.processing.erode_iterations
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"calibration": {"samples_per_side": 5}}"#).unwrap();
        assert_eq!(parsed.calibration.samples_per_side, 5);
        assert_eq!(parsed.calibration.log_every_n_frames, 10);
        assert_eq!(parsed.processing.erode_iterations, 3);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_file("/nonexistent/pupil_calibration.json");
        assert_eq!(config.calibration.samples_per_side, 20);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "pupil_calibration_config_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"processing": {"bilateral_window": 0, "erode_iterations": 1}}"#)
            .unwrap();

        let config = AppConfig::load_from_file(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(config.processing.bilateral_window, 0);
        assert_eq!(config.processing.sigma_color, 15.0);
        assert_eq!(config.processing.erode_iterations, 1);
        assert_eq!(config.calibration.samples_per_side, 20);
    }
}
