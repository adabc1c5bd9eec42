//! Which controls the host should present for a phase.

use super::SessionPhase;
use serde::Serialize;

/// Set of controls active in a phase.
///
/// The state machine does not render anything; hosts map its phase to a
/// control set and draw the matching toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ControlSet {
    /// Shutter button.
    pub capture: bool,
    /// Front/back toggle.
    pub flip: bool,
    /// Dismiss without keeping images.
    pub cancel: bool,
    /// Discard the candidate.
    pub retake: bool,
    /// Keep the candidate ("Use").
    pub confirm: bool,
}

impl ControlSet {
    /// Returns the controls for `phase`.
    pub const fn for_phase(phase: SessionPhase) -> Self {
        match phase {
            SessionPhase::Capturing => Self {
                capture: true,
                flip: true,
                cancel: true,
                retake: false,
                confirm: false,
            },
            SessionPhase::ConfirmingCandidate => Self {
                capture: false,
                flip: false,
                cancel: false,
                retake: true,
                confirm: true,
            },
            SessionPhase::Finished => Self {
                capture: false,
                flip: false,
                cancel: false,
                retake: false,
                confirm: false,
            },
        }
    }

    /// Whether no control is shown.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
