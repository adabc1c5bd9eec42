//! Hardware camera backed by `nokhwa`.

use super::{Camera, CameraError, CameraSource, CaptureConfig, CapturedImage};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType, Resolution};

/// Camera that captures RGB stills from native devices.
///
/// Only one sensor streams at a time. Capturing from the other source
/// stops the current stream and opens the matching device.
pub struct DeviceCamera {
    config: Option<CaptureConfig>,
    active: Option<(CameraSource, nokhwa::Camera)>,
    sequence: u64,
}

impl DeviceCamera {
    /// Creates a camera with no device open yet.
    pub fn new() -> Self {
        Self {
            config: None,
            active: None,
            sequence: 0,
        }
    }

    fn stream_for(
        &mut self,
        source: CameraSource,
    ) -> Result<&mut nokhwa::Camera, CameraError> {
        let config = self.config.as_ref().ok_or(CameraError::NotInitialized)?;

        let reuse = matches!(&self.active, Some((active, _)) if *active == source);
        if !reuse {
            if let Some((previous, mut stream)) = self.active.take() {
                if let Err(e) = stream.stop_stream() {
                    tracing::warn!(source = %previous, error = %e, "Failed to stop camera stream");
                }
            }

            let device = config.device_for(source);
            let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::HighestResolution(
                Resolution::new(config.width, config.height),
            ));
            let mut stream = nokhwa::Camera::new(CameraIndex::Index(device), requested)
                .map_err(|e| CameraError::DeviceNotFound(format!("device {}: {}", device, e)))?;
            stream
                .open_stream()
                .map_err(|e| CameraError::OpenFailed(e.to_string()))?;

            tracing::info!(device, %source, "Camera stream opened");
            self.active = Some((source, stream));
        }

        match self.active.as_mut() {
            Some((_, stream)) => Ok(stream),
            None => Err(CameraError::NotInitialized),
        }
    }
}

impl Default for DeviceCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for DeviceCamera {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
        config
            .validate()
            .map_err(|e| CameraError::ConfigFailed(e.to_string()))?;
        self.close();
        self.config = Some(config.clone());
        self.sequence = 0;
        Ok(())
    }

    fn capture(&mut self, source: CameraSource) -> Result<CapturedImage, CameraError> {
        let stream = self.stream_for(source)?;
        let buffer = stream
            .frame()
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        self.sequence += 1;
        Ok(CapturedImage::new(
            decoded.into_raw(),
            width,
            height,
            self.sequence,
            source,
        ))
    }

    fn is_open(&self) -> bool {
        self.config.is_some()
    }

    fn close(&mut self) {
        if let Some((source, mut stream)) = self.active.take() {
            if let Err(e) = stream.stop_stream() {
                tracing::warn!(%source, error = %e, "Failed to stop camera stream");
            }
        }
        if self.config.take().is_some() {
            tracing::info!("DeviceCamera closed");
        }
    }
}
