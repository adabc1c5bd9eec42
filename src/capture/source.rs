//! Which physical sensor the viewfinder shows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Camera sensor selection.
///
/// Purely presentational: the source never influences when a session
/// completes or which images it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraSource {
    /// User-facing camera.
    Front,
    /// World-facing camera. Sessions start here.
    #[default]
    Back,
}

impl CameraSource {
    /// Returns the opposite sensor.
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            CameraSource::Front => CameraSource::Back,
            CameraSource::Back => CameraSource::Front,
        }
    }
}

impl fmt::Display for CameraSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraSource::Front => f.write_str("front"),
            CameraSource::Back => f.write_str("back"),
        }
    }
}
