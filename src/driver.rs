//! Event loop connecting host input to a session.
//!
//! Input arrives as [`HostInput`] values from a single channel, so user
//! events, interrupts and end-of-input all wake the same loop and are
//! applied on the thread that owns the session.

use crate::capture::Camera;
use crate::session::{EventKind, SessionEvent, SessionStateMachine};
use std::sync::mpsc::Sender;
use tracing::{info, warn};

/// One unit of host input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    /// A user event to forward to the session.
    Event(EventKind),
    /// The user interrupted the program (Ctrl-C).
    Interrupt,
    /// No more input will arrive.
    Closed,
}

/// Why [`drive`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveEnd {
    /// The session finished on its own (limit reached or user cancel).
    Finished,
    /// An interrupt cancelled the session.
    Interrupted,
    /// Input ended first and the session was dismissed.
    InputClosed,
}

/// Applies host input to `session` until it finishes.
///
/// Interrupts and end-of-input cancel the session, so it is always
/// finished when this returns.
pub fn drive<I>(session: &mut SessionStateMachine, camera: &mut dyn Camera, inputs: I) -> DriveEnd
where
    I: IntoIterator<Item = HostInput>,
{
    let mut end = DriveEnd::InputClosed;

    for input in inputs {
        let kind = match input {
            HostInput::Event(kind) => kind,
            HostInput::Interrupt => {
                info!("Interrupted, cancelling session");
                end = DriveEnd::Interrupted;
                break;
            }
            HostInput::Closed => break,
        };

        let event = match kind {
            EventKind::Capture => match camera.capture(session.source()) {
                Ok(image) => SessionEvent::Capture(image),
                Err(e) => {
                    warn!("Capture failed: {}", e);
                    continue;
                }
            },
            EventKind::FlipSource => SessionEvent::FlipSource,
            EventKind::Retake => SessionEvent::Retake,
            EventKind::Confirm => SessionEvent::Confirm,
            EventKind::Cancel => SessionEvent::Cancel,
        };

        if let Err(e) = session.handle(event) {
            warn!("{}", e);
        }
        if session.is_finished() {
            return DriveEnd::Finished;
        }
    }

    if !session.is_finished() {
        if end == DriveEnd::InputClosed {
            info!("No more events, dismissing session");
        }
        if let Err(e) = session.cancel_session() {
            warn!("Cancel failed: {}", e);
        }
    }
    end
}

/// Forwards event names read line by line to `inputs`, then sends
/// [`HostInput::Closed`]. Blank lines are skipped and unknown names logged.
///
/// Meant to run on its own thread so a blocking read never delays an
/// interrupt.
pub fn forward_lines<R>(reader: R, inputs: Sender<HostInput>)
where
    R: std::io::BufRead,
{
    for line in reader.lines().map_while(Result::ok) {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<EventKind>() {
            Ok(kind) => {
                if inputs.send(HostInput::Event(kind)).is_err() {
                    return;
                }
            }
            Err(e) => warn!("{}", e),
        }
    }
    let _ = inputs.send(HostInput::Closed);
}
