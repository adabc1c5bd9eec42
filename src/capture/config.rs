//! Camera capture configuration.
//!
//! Maps the front/back sources onto concrete device indices and fixes
//! the still-image resolution requested from the camera.

use super::CameraSource;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

/// Configuration for the camera collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Device index of the world-facing camera.
    pub back_device: u32,
    /// Device index of the user-facing camera.
    pub front_device: u32,
    /// Still image width in pixels.
    pub width: u32,
    /// Still image height in pixels.
    pub height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            back_device: 0,
            front_device: 1,
            width: 640,
            height: 480,
        }
    }
}

impl CaptureConfig {
    /// Creates a new configuration with the specified dimensions.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Returns the device index backing the given source.
    pub fn device_for(&self, source: CameraSource) -> u32 {
        match source {
            CameraSource::Back => self.back_device,
            CameraSource::Front => self.front_device,
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0
            || self.height == 0
            || self.width > MAX_DIMENSION
            || self.height > MAX_DIMENSION
        {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
