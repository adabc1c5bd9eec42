use super::{EventKind, SessionPhase};
use thiserror::Error;

/// Errors raised by the session state machine.
///
/// All of them are caller-contract violations. The machine leaves its
/// state untouched when it returns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The event is not accepted in the current phase.
    #[error("event `{event}` is not allowed while {phase}")]
    InvalidTransition {
        /// The rejected event.
        event: EventKind,
        /// Phase the machine was in, and still is.
        phase: SessionPhase,
    },
}
