//! Capture session policy and state machine.
//!
//! A session starts in `Capturing`, accumulates images according to its
//! [`SessionConfiguration`], and ends in `Finished` exactly once, handing
//! the final list (empty when cancelled) to the completion handler.

mod config;
mod controls;
mod error;
mod event;
mod machine;
mod observer;
mod state;

pub use config::SessionConfiguration;
pub use controls::ControlSet;
pub use error::SessionError;
pub use event::{EventKind, ParseEventError, SessionEvent};
pub use machine::{SessionStateMachine, SessionStats};
pub use observer::{CompletionHandler, SessionObserver};
pub use state::{SessionOutcome, SessionPhase, SessionState};
