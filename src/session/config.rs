//! Session policy.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Immutable policy for one capture session.
///
/// Fields are private so that every value in circulation has passed
/// validation, including values deserialized from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionConfiguration", into = "RawSessionConfiguration")]
pub struct SessionConfiguration {
    confirmation_required: bool,
    capture_limit: u32,
}

impl SessionConfiguration {
    /// Creates a validated configuration.
    ///
    /// Fails with [`ConfigError::InvalidCaptureLimit`] when `capture_limit`
    /// is zero, whatever the confirmation setting.
    pub fn new(confirmation_required: bool, capture_limit: u32) -> Result<Self, ConfigError> {
        if capture_limit < 1 {
            return Err(ConfigError::InvalidCaptureLimit(capture_limit));
        }
        Ok(Self {
            confirmation_required,
            capture_limit,
        })
    }

    /// One image, accepted as soon as it is taken.
    pub fn single() -> Self {
        Self {
            confirmation_required: false,
            capture_limit: 1,
        }
    }

    /// One image, kept only after the user confirms it.
    pub fn single_confirmed() -> Self {
        Self {
            confirmation_required: true,
            capture_limit: 1,
        }
    }

    /// Up to `limit` images without confirmation.
    pub fn multiple(limit: u32) -> Result<Self, ConfigError> {
        Self::new(false, limit)
    }

    /// Returns a copy with the confirmation requirement replaced.
    #[must_use]
    pub fn with_confirmation(self, confirmation_required: bool) -> Self {
        Self {
            confirmation_required,
            ..self
        }
    }

    /// Replaces the fields that are `Some`, revalidating the result.
    ///
    /// Either setting can be moved in both directions, so a file that
    /// requires confirmation can be overridden with `Some(false)`.
    pub fn with_overrides(
        self,
        confirmation_required: Option<bool>,
        capture_limit: Option<u32>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            confirmation_required.unwrap_or(self.confirmation_required),
            capture_limit.unwrap_or(self.capture_limit),
        )
    }

    /// Whether each capture must be confirmed before it is accepted.
    #[inline]
    pub fn confirmation_required(&self) -> bool {
        self.confirmation_required
    }

    /// Maximum number of images the session accepts.
    #[inline]
    pub fn capture_limit(&self) -> u32 {
        self.capture_limit
    }

    /// Whether more than one image can be collected.
    #[inline]
    pub fn allows_multiple_captures(&self) -> bool {
        self.capture_limit > 1
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self::single()
    }
}

/// Unvalidated on-disk form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct RawSessionConfiguration {
    confirmation_required: bool,
    capture_limit: u32,
}

impl Default for RawSessionConfiguration {
    fn default() -> Self {
        let config = SessionConfiguration::default();
        Self {
            confirmation_required: config.confirmation_required,
            capture_limit: config.capture_limit,
        }
    }
}

impl TryFrom<RawSessionConfiguration> for SessionConfiguration {
    type Error = ConfigError;

    fn try_from(raw: RawSessionConfiguration) -> Result<Self, Self::Error> {
        Self::new(raw.confirmation_required, raw.capture_limit)
    }
}

impl From<SessionConfiguration> for RawSessionConfiguration {
    fn from(config: SessionConfiguration) -> Self {
        Self {
            confirmation_required: config.confirmation_required,
            capture_limit: config.capture_limit,
        }
    }
}
