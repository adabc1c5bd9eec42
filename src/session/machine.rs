//! The capture session state machine.
//!
//! ```text
//! Capturing            --capture (confirmation)-->   ConfirmingCandidate
//! Capturing            --capture (below limit)-->    Capturing
//! ConfirmingCandidate  --retake-->                   Capturing
//! ConfirmingCandidate  --confirm (below limit)-->    Capturing
//! any but Finished     --limit reached | cancel-->   Finished
//! ```

use super::{
    CompletionHandler, EventKind, SessionConfiguration, SessionError, SessionEvent,
    SessionObserver, SessionOutcome, SessionPhase, SessionState,
};
use crate::capture::{CameraSource, CapturedImage};

/// Counters describing what happened during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Captures handed in while capturing.
    pub captures_requested: u64,
    /// Images appended to the accepted list.
    pub images_accepted: u64,
    /// Candidates discarded by retake.
    pub retakes: u64,
    /// Source flips that took effect.
    pub flips: u64,
    /// Events rejected with `InvalidTransition`.
    pub rejected_events: u64,
}

/// Controller for one capture session.
///
/// The machine is driven synchronously from a single thread. Every event
/// method runs to completion before returning, and the completion
/// handler is invoked at most once, from inside the event that finished
/// the session.
pub struct SessionStateMachine {
    config: SessionConfiguration,
    state: SessionState,
    on_session_end: Option<CompletionHandler>,
    observers: Vec<Box<dyn SessionObserver>>,
    outcome: Option<SessionOutcome>,
    revision: u64,
    stats: SessionStats,
}

impl SessionStateMachine {
    /// Starts a session in `Capturing` with the back camera selected.
    pub fn new<F>(config: SessionConfiguration, on_session_end: F) -> Self
    where
        F: FnOnce(Vec<CapturedImage>) + 'static,
    {
        tracing::debug!(
            capture_limit = config.capture_limit(),
            confirmation_required = config.confirmation_required(),
            "Capture session started"
        );
        Self {
            config,
            state: SessionState::default(),
            on_session_end: Some(Box::new(on_session_end)),
            observers: Vec::new(),
            outcome: None,
            revision: 0,
            stats: SessionStats::default(),
        }
    }

    /// Registers an observer notified after every state change.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: SessionObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Builder form of [`subscribe`](Self::subscribe).
    #[must_use]
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: SessionObserver + 'static,
    {
        self.subscribe(observer);
        self
    }

    /// Policy the session was started with.
    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    /// Current observable state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Currently selected camera.
    pub fn source(&self) -> CameraSource {
        self.state.source
    }

    /// Image awaiting confirm or retake, if any.
    pub fn pending_candidate(&self) -> Option<&CapturedImage> {
        self.state.pending_candidate.as_ref()
    }

    /// Number of images currently held in the accepted list.
    ///
    /// Drops to zero once the list has been handed to the completion
    /// handler.
    pub fn accepted_count(&self) -> usize {
        self.state.accepted_images.len()
    }

    /// How many more images the session will accept.
    pub fn remaining_captures(&self) -> u32 {
        if self.is_finished() {
            return 0;
        }
        let accepted = u32::try_from(self.accepted_count()).unwrap_or(u32::MAX);
        self.config.capture_limit().saturating_sub(accepted)
    }

    /// Whether the session has reached `Finished`.
    pub fn is_finished(&self) -> bool {
        self.state.phase == SessionPhase::Finished
    }

    /// How the session ended, once it has.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Increases by one on every state change, for hosts that poll.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Dispatches an event value to the matching method.
    pub fn handle(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::FlipSource => {
                self.flip_source();
                Ok(())
            }
            SessionEvent::Capture(image) => self.request_capture(image),
            SessionEvent::Retake => self.retake_candidate(),
            SessionEvent::Confirm => self.confirm_candidate(),
            SessionEvent::Cancel => self.cancel_session(),
        }
    }

    /// Toggles the camera source. Ignored outside `Capturing`.
    pub fn flip_source(&mut self) {
        if self.state.phase != SessionPhase::Capturing {
            tracing::trace!(phase = %self.state.phase, "Ignoring flip outside capturing");
            return;
        }
        self.state.source = self.state.source.flipped();
        self.stats.flips += 1;
        tracing::debug!(source = %self.state.source, "Camera source flipped");
        self.changed();
    }

    /// Hands a freshly captured image to the session.
    ///
    /// Accepted immediately when no confirmation is required, otherwise
    /// held as the pending candidate. The image is dropped if the event
    /// is rejected.
    pub fn request_capture(&mut self, image: CapturedImage) -> Result<(), SessionError> {
        if self.state.phase != SessionPhase::Capturing {
            return Err(self.reject(EventKind::Capture));
        }
        self.stats.captures_requested += 1;

        if self.config.confirmation_required() {
            tracing::debug!(
                sequence = image.sequence(),
                fingerprint = %image.short_fingerprint(),
                "Capture awaiting confirmation"
            );
            self.state.pending_candidate = Some(image);
            self.state.phase = SessionPhase::ConfirmingCandidate;
            self.changed();
        } else {
            self.accept(image);
        }
        Ok(())
    }

    /// Discards the pending candidate and returns to `Capturing`.
    pub fn retake_candidate(&mut self) -> Result<(), SessionError> {
        if self.state.phase != SessionPhase::ConfirmingCandidate {
            return Err(self.reject(EventKind::Retake));
        }
        if let Some(discarded) = self.state.pending_candidate.take() {
            tracing::debug!(sequence = discarded.sequence(), "Candidate discarded");
        }
        self.stats.retakes += 1;
        self.state.phase = SessionPhase::Capturing;
        self.changed();
        Ok(())
    }

    /// Accepts the pending candidate.
    pub fn confirm_candidate(&mut self) -> Result<(), SessionError> {
        if self.state.phase != SessionPhase::ConfirmingCandidate {
            return Err(self.reject(EventKind::Confirm));
        }
        let Some(candidate) = self.state.pending_candidate.take() else {
            return Err(self.reject(EventKind::Confirm));
        };
        self.accept(candidate);
        Ok(())
    }

    /// Ends the session and delivers an empty list, discarding anything
    /// accepted so far.
    pub fn cancel_session(&mut self) -> Result<(), SessionError> {
        if self.state.phase == SessionPhase::Finished {
            return Err(self.reject(EventKind::Cancel));
        }
        let discarded = self.state.accepted_images.len();
        self.state.accepted_images.clear();
        self.state.pending_candidate = None;
        tracing::debug!(discarded, "Capture session cancelled");
        self.finish(SessionOutcome::Cancelled, Vec::new());
        Ok(())
    }

    fn accept(&mut self, image: CapturedImage) {
        tracing::debug!(
            sequence = image.sequence(),
            fingerprint = %image.short_fingerprint(),
            accepted = self.state.accepted_images.len() + 1,
            limit = self.config.capture_limit(),
            "Image accepted"
        );
        self.state.accepted_images.push(image);
        self.stats.images_accepted += 1;
        self.evaluate_completion();
    }

    fn evaluate_completion(&mut self) {
        let limit = self.config.capture_limit() as usize;
        if self.state.accepted_images.len() >= limit {
            let images = std::mem::take(&mut self.state.accepted_images);
            self.finish(SessionOutcome::Completed, images);
        } else {
            self.state.phase = SessionPhase::Capturing;
            self.changed();
        }
    }

    fn finish(&mut self, outcome: SessionOutcome, images: Vec<CapturedImage>) {
        self.state.phase = SessionPhase::Finished;
        self.outcome = Some(outcome);
        self.changed();

        tracing::info!(%outcome, images = images.len(), "Capture session finished");
        if let Some(on_session_end) = self.on_session_end.take() {
            on_session_end(images);
        }
    }

    fn reject(&mut self, event: EventKind) -> SessionError {
        self.stats.rejected_events += 1;
        tracing::warn!(%event, phase = %self.state.phase, "Rejected session event");
        SessionError::InvalidTransition {
            event,
            phase: self.state.phase,
        }
    }

    fn changed(&mut self) {
        debug_assert!(self.state.is_consistent());
        self.revision += 1;
        for observer in &mut self.observers {
            observer.state_changed(&self.state);
        }
    }
}

impl std::fmt::Debug for SessionStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStateMachine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("outcome", &self.outcome)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .field("delivered", &self.on_session_end.is_none())
            .finish()
    }
}
