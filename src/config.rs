//! Configuration file loading and validation errors.

use crate::capture::CaptureConfig;
use crate::session::SessionConfiguration;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Capture limit below one.
    #[error("invalid capture limit {0} (must be at least 1)")]
    InvalidCaptureLimit(u32),
    /// Still dimensions of zero or above [`MAX_DIMENSION`](crate::capture::MAX_DIMENSION).
    #[error("invalid capture dimensions {width}x{height} (each must be 1-8192)")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The config file is not valid TOML or failed session validation.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
///
/// ```toml
/// [session]
/// confirmation_required = true
/// capture_limit = 3
///
/// [capture]
/// back_device = 0
/// front_device = 1
/// width = 1280
/// height = 720
///
/// [output]
/// print_metrics = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Session policy.
    #[serde(default)]
    pub session: SessionConfiguration,
    /// Camera devices and still resolution.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Demo binary output options.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration for the demo binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print session metrics in Prometheus text format when the session ends.
    pub print_metrics: bool,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// The session section is validated during deserialization; the
    /// capture section is validated afterwards.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.capture.validate()?;
        Ok(config)
    }
}
