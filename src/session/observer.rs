//! Host notification hooks.

use super::SessionState;
use crate::capture::CapturedImage;

/// Receives a notification whenever the phase, source or pending
/// candidate changes, so the host can redraw.
///
/// Closures taking `&SessionState` implement this trait directly.
pub trait SessionObserver {
    /// Called after the state has changed.
    fn state_changed(&mut self, state: &SessionState);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionState),
{
    fn state_changed(&mut self, state: &SessionState) {
        self(state)
    }
}

/// Completion handler receiving the final image list.
///
/// `FnOnce` makes the single hand-off a property of the type: once the
/// handler has been called it no longer exists.
pub type CompletionHandler = Box<dyn FnOnce(Vec<CapturedImage>)>;
