//! Camera input and captured images.
//!
//! This module provides the collaborators that sit outside the session
//! state machine: the camera that produces stills, the image handle the
//! session accumulates, and the front/back source selection.

mod camera;
mod config;
#[cfg(feature = "camera")]
mod device;
mod image;
mod source;

pub use camera::{Camera, CameraError, MockCamera};
pub use config::{CaptureConfig, MAX_DIMENSION};
#[cfg(feature = "camera")]
pub use device::DeviceCamera;
pub use image::CapturedImage;
pub use source::CameraSource;
