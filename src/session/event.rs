//! User-driven session events.

use crate::capture::CapturedImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An event delivered to the state machine as a value.
///
/// Hosts that route input generically can build these and pass them to
/// [`SessionStateMachine::handle`](super::SessionStateMachine::handle)
/// instead of calling the individual event methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Toggle between front and back sensors.
    FlipSource,
    /// The camera produced a still after a shutter press.
    Capture(CapturedImage),
    /// Discard the pending candidate.
    Retake,
    /// Keep the pending candidate.
    Confirm,
    /// End the session without returning images.
    Cancel,
}

impl SessionEvent {
    /// Returns the payload-free kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            SessionEvent::FlipSource => EventKind::FlipSource,
            SessionEvent::Capture(_) => EventKind::Capture,
            SessionEvent::Retake => EventKind::Retake,
            SessionEvent::Confirm => EventKind::Confirm,
            SessionEvent::Cancel => EventKind::Cancel,
        }
    }
}

/// Event identity without payload, used in errors, logs and scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// See [`SessionEvent::FlipSource`].
    FlipSource,
    /// See [`SessionEvent::Capture`].
    Capture,
    /// See [`SessionEvent::Retake`].
    Retake,
    /// See [`SessionEvent::Confirm`].
    Confirm,
    /// See [`SessionEvent::Cancel`].
    Cancel,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::FlipSource => "flip",
            EventKind::Capture => "capture",
            EventKind::Retake => "retake",
            EventKind::Confirm => "confirm",
            EventKind::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// Error returned when an event name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event: {0:?}")]
pub struct ParseEventError(String);

impl FromStr for EventKind {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flip" | "flip_source" => Ok(EventKind::FlipSource),
            "capture" | "shutter" => Ok(EventKind::Capture),
            "retake" => Ok(EventKind::Retake),
            "confirm" | "use" => Ok(EventKind::Confirm),
            "cancel" => Ok(EventKind::Cancel),
            _ => Err(ParseEventError(s.to_string())),
        }
    }
}
