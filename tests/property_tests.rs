//! Property-based tests for the session state machine.
//!
//! Uses proptest to drive sessions with arbitrary event sequences and
//! verify the delivery and capacity invariants.

use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use capture_session::{
    CameraSource, CapturedImage, EventKind, SessionConfiguration, SessionEvent, SessionOutcome,
    SessionPhase, SessionStateMachine,
};

fn event_kind() -> impl Strategy<Value = EventKind> {
    prop_oneof![
        4 => Just(EventKind::Capture),
        3 => Just(EventKind::Confirm),
        2 => Just(EventKind::Retake),
        2 => Just(EventKind::FlipSource),
        1 => Just(EventKind::Cancel),
    ]
}

fn session_config() -> impl Strategy<Value = SessionConfiguration> {
    (any::<bool>(), 1u32..6)
        .prop_map(|(confirm, limit)| SessionConfiguration::new(confirm, limit).unwrap())
}

struct Run {
    session: SessionStateMachine,
    calls: Rc<RefCell<Vec<Vec<u64>>>>,
    next_sequence: u64,
}

impl Run {
    fn new(config: SessionConfiguration) -> Self {
        let calls: Rc<RefCell<Vec<Vec<u64>>>> = Rc::default();
        let sink = Rc::clone(&calls);
        let session = SessionStateMachine::new(config, move |images| {
            sink.borrow_mut()
                .push(images.iter().map(CapturedImage::sequence).collect());
        });
        Self {
            session,
            calls,
            next_sequence: 0,
        }
    }

    fn apply(&mut self, kind: EventKind) -> bool {
        let event = match kind {
            EventKind::Capture => {
                self.next_sequence += 1;
                SessionEvent::Capture(CapturedImage::new(
                    self.next_sequence.to_le_bytes().to_vec(),
                    8,
                    1,
                    self.next_sequence,
                    self.session.source(),
                ))
            }
            EventKind::FlipSource => SessionEvent::FlipSource,
            EventKind::Retake => SessionEvent::Retake,
            EventKind::Confirm => SessionEvent::Confirm,
            EventKind::Cancel => SessionEvent::Cancel,
        };
        self.session.handle(event).is_ok()
    }
}

proptest! {
    /// The completion handler runs at most once, and exactly once when finished.
    #[test]
    fn completion_is_delivered_at_most_once(
        config in session_config(),
        events in prop::collection::vec(event_kind(), 0..60),
    ) {
        let mut run = Run::new(config);
        for kind in events {
            run.apply(kind);
        }

        let calls = run.calls.borrow().len();
        prop_assert!(calls <= 1);
        prop_assert_eq!(calls == 1, run.session.is_finished());
    }

    /// Accepted images never exceed the limit, and a candidate exists only while confirming.
    #[test]
    fn state_invariants_hold_after_every_event(
        config in session_config(),
        events in prop::collection::vec(event_kind(), 0..60),
    ) {
        let mut run = Run::new(config);
        for kind in events {
            run.apply(kind);

            let state = run.session.state();
            prop_assert!(state.accepted_images().len() <= config.capture_limit() as usize);
            prop_assert_eq!(
                state.pending_candidate().is_some(),
                state.phase() == SessionPhase::ConfirmingCandidate
            );
            if !config.confirmation_required() {
                prop_assert_ne!(state.phase(), SessionPhase::ConfirmingCandidate);
            }
        }
    }

    /// Completed sessions deliver exactly `limit` images in capture order;
    /// cancelled sessions deliver none.
    #[test]
    fn delivered_list_matches_outcome(
        config in session_config(),
        events in prop::collection::vec(event_kind(), 0..60),
    ) {
        let mut run = Run::new(config);
        for kind in events {
            run.apply(kind);
        }

        let calls = run.calls.borrow();
        match run.session.outcome() {
            Some(SessionOutcome::Completed) => {
                let images = &calls[0];
                prop_assert_eq!(images.len(), config.capture_limit() as usize);
                prop_assert!(images.windows(2).all(|pair| pair[0] < pair[1]));
            }
            Some(SessionOutcome::Cancelled) => prop_assert!(calls[0].is_empty()),
            None => prop_assert!(calls.is_empty()),
        }
    }

    /// Every event after the session finished is rejected.
    #[test]
    fn finished_rejects_all_but_flip(
        events in prop::collection::vec(event_kind(), 1..20),
    ) {
        let mut run = Run::new(SessionConfiguration::single());
        prop_assert!(run.apply(EventKind::Cancel));

        let revision = run.session.revision();
        for kind in events {
            let accepted = run.apply(kind);
            prop_assert_eq!(accepted, kind == EventKind::FlipSource);
        }
        prop_assert_eq!(run.session.revision(), revision);
        prop_assert_eq!(run.session.source(), CameraSource::Back);
        prop_assert_eq!(run.calls.borrow().len(), 1);
    }
}
