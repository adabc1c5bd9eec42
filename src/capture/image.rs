//! Captured image handle with capture metadata.

use super::CameraSource;
use chrono::{DateTime, Utc};

/// A still image produced by the camera collaborator.
///
/// The pixel payload is opaque to the session: no encoding is assumed.
/// Metadata travels with the image so the host can order, label and
/// deduplicate results after the session hands them over.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// Encoded or raw image bytes, as delivered by the camera.
    data: Vec<u8>,
    /// Image width in pixels.
    width: u32,
    /// Image height in pixels.
    height: u32,
    /// Monotonic capture sequence number assigned by the camera.
    sequence: u64,
    /// Sensor the image was taken with.
    source: CameraSource,
    /// Wall-clock capture time.
    captured_at: DateTime<Utc>,
}

impl CapturedImage {
    /// Creates a new image stamped with the current time.
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        sequence: u64,
        source: CameraSource,
    ) -> Self {
        Self {
            data,
            width,
            height,
            sequence,
            source,
            captured_at: Utc::now(),
        }
    }

    /// Returns a reference to the image bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the sequence number.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the sensor the image came from.
    #[inline]
    pub fn source(&self) -> CameraSource {
        self.source
    }

    /// Returns the capture timestamp.
    #[inline]
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// BLAKE3 digest of the image bytes.
    pub fn fingerprint(&self) -> blake3::Hash {
        blake3::hash(&self.data)
    }

    /// First eight hex characters of the fingerprint, for log lines.
    pub fn short_fingerprint(&self) -> String {
        let hex = self.fingerprint().to_hex();
        hex.as_str()[..8].to_string()
    }
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("sequence", &self.sequence)
            .field("source", &self.source)
            .field("bytes", &self.data.len())
            .field("fingerprint", &self.short_fingerprint())
            .finish()
    }
}
