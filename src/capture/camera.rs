//! Camera abstraction for still capture.
//!
//! The session never talks to hardware. A `Camera` implementation turns
//! a shutter press into a [`CapturedImage`], which the host then hands to
//! the state machine.

use super::{CameraSource, CaptureConfig, CapturedImage};
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use thiserror::Error;

/// Errors that can occur during camera operations.
#[derive(Debug, Error)]
pub enum CameraError {
    /// No device matches the requested index.
    #[error("camera device not found: {0}")]
    DeviceNotFound(String),
    /// The device exists but could not be opened.
    #[error("failed to open camera: {0}")]
    OpenFailed(String),
    /// The capture configuration was rejected.
    #[error("failed to configure camera: {0}")]
    ConfigFailed(String),
    /// Grabbing or decoding a frame failed.
    #[error("failed to capture image: {0}")]
    CaptureFailed(String),
    /// `capture` was called before `open`.
    #[error("camera not initialized")]
    NotInitialized,
}

/// Trait for camera implementations.
///
/// This abstraction allows swapping between real camera hardware
/// and mock implementations for testing.
pub trait Camera {
    /// Opens and initializes the camera with the given configuration.
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError>;

    /// Captures a single still image from the given sensor.
    fn capture(&mut self, source: CameraSource) -> Result<CapturedImage, CameraError>;

    /// Checks if the camera is currently open.
    fn is_open(&self) -> bool;

    /// Closes the camera and releases resources.
    fn close(&mut self);
}

/// Mock camera that synthesizes images from a seeded noise generator.
///
/// Output is deterministic per seed, so tests can rely on two mocks with
/// the same seed producing identical image sequences.
#[derive(Debug)]
pub struct MockCamera {
    config: Option<CaptureConfig>,
    rng: ChaCha8Rng,
    sequence: u64,
}

impl MockCamera {
    /// Creates a mock camera with seed zero.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Creates a mock camera whose noise stream starts from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            sequence: 0,
        }
    }
}

impl Default for MockCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for MockCamera {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
        config
            .validate()
            .map_err(|e| CameraError::ConfigFailed(e.to_string()))?;
        self.config = Some(config.clone());
        self.sequence = 0;
        tracing::info!("MockCamera opened with config: {:?}", config);
        Ok(())
    }

    fn capture(&mut self, source: CameraSource) -> Result<CapturedImage, CameraError> {
        let config = self.config.as_ref().ok_or(CameraError::NotInitialized)?;

        let mut data = vec![0u8; (config.width as usize) * (config.height as usize)];
        self.rng.fill_bytes(&mut data);

        self.sequence += 1;
        tracing::trace!(
            sequence = self.sequence,
            device = config.device_for(source),
            %source,
            "Synthesized mock capture"
        );
        Ok(CapturedImage::new(
            data,
            config.width,
            config.height,
            self.sequence,
            source,
        ))
    }

    fn is_open(&self) -> bool {
        self.config.is_some()
    }

    fn close(&mut self) {
        self.config = None;
        tracing::info!("MockCamera closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_camera_lifecycle() {
        let mut camera = MockCamera::new();
        let config = CaptureConfig::with_dimensions(8, 8);

        assert!(!camera.is_open());

        camera.open(&config).unwrap();
        assert!(camera.is_open());

        let image = camera.capture(CameraSource::Back).unwrap();
        assert_eq!(image.data().len(), 64);
        assert_eq!(image.sequence(), 1);
        assert_eq!(image.source(), CameraSource::Back);

        let image2 = camera.capture(CameraSource::Front).unwrap();
        assert_eq!(image2.sequence(), 2);
        assert_eq!(image2.source(), CameraSource::Front);
        assert_ne!(image.fingerprint(), image2.fingerprint());

        camera.close();
        assert!(!camera.is_open());
    }

    #[test]
    fn test_capture_without_open() {
        let mut camera = MockCamera::new();
        assert!(matches!(
            camera.capture(CameraSource::Back),
            Err(CameraError::NotInitialized)
        ));
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let mut camera = MockCamera::new();
        let config = CaptureConfig::with_dimensions(0, 0);
        assert!(matches!(
            camera.open(&config),
            Err(CameraError::ConfigFailed(_))
        ));
        assert!(!camera.is_open());

        let oversized = CaptureConfig::with_dimensions(100_000, 100_000);
        assert!(matches!(
            camera.open(&oversized),
            Err(CameraError::ConfigFailed(_))
        ));
        assert!(!camera.is_open());
    }

    #[test]
    fn test_same_seed_same_images() {
        let config = CaptureConfig::with_dimensions(4, 4);
        let mut a = MockCamera::with_seed(42);
        let mut b = MockCamera::with_seed(42);
        a.open(&config).unwrap();
        b.open(&config).unwrap();

        let ia = a.capture(CameraSource::Back).unwrap();
        let ib = b.capture(CameraSource::Back).unwrap();
        assert_eq!(ia.fingerprint(), ib.fingerprint());
    }
}
