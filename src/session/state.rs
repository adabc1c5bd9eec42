//! Session phase and the state aggregate owned by the state machine.

use crate::capture::{CameraSource, CapturedImage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Viewfinder live, waiting for the shutter.
    #[default]
    Capturing,
    /// A candidate image awaits confirm or retake.
    ConfirmingCandidate,
    /// Terminal. The completion handler has run.
    Finished,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Capturing => f.write_str("capturing"),
            SessionPhase::ConfirmingCandidate => f.write_str("confirming_candidate"),
            SessionPhase::Finished => f.write_str("finished"),
        }
    }
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The capture limit was reached.
    Completed,
    /// The user cancelled; no images were delivered.
    Cancelled,
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::Completed => f.write_str("completed"),
            SessionOutcome::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Mutable session state.
///
/// Only the state machine mutates it; hosts see it through shared
/// references passed to observers or returned by accessors.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) phase: SessionPhase,
    pub(crate) source: CameraSource,
    pub(crate) accepted_images: Vec<CapturedImage>,
    pub(crate) pending_candidate: Option<CapturedImage>,
}

impl SessionState {
    /// Current phase.
    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Sensor the viewfinder should show.
    #[inline]
    pub fn source(&self) -> CameraSource {
        self.source
    }

    /// Images accepted so far, in capture order.
    #[inline]
    pub fn accepted_images(&self) -> &[CapturedImage] {
        &self.accepted_images
    }

    /// Image awaiting confirmation, if any.
    #[inline]
    pub fn pending_candidate(&self) -> Option<&CapturedImage> {
        self.pending_candidate.as_ref()
    }

    /// Checks the candidate/phase coupling.
    pub(crate) fn is_consistent(&self) -> bool {
        self.pending_candidate.is_some() == (self.phase == SessionPhase::ConfirmingCandidate)
    }
}
