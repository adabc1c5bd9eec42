//! End-to-end capture flows driven through the public API with a mock camera.

use std::cell::RefCell;
use std::rc::Rc;

use capture_session::{
    Camera, CameraSource, CaptureConfig, CapturedImage, ConfigError, ControlSet, EventKind,
    FileConfig, MockCamera, SessionConfiguration, SessionError, SessionOutcome, SessionPhase,
    SessionStateMachine,
};

struct Harness {
    camera: MockCamera,
    session: SessionStateMachine,
    calls: Rc<RefCell<Vec<Vec<CapturedImage>>>>,
}

impl Harness {
    fn new(confirmation_required: bool, limit: u32) -> Self {
        let config = SessionConfiguration::new(confirmation_required, limit).unwrap();
        Self::with_config(config)
    }

    fn with_config(config: SessionConfiguration) -> Self {
        let mut camera = MockCamera::with_seed(7);
        camera.open(&CaptureConfig::with_dimensions(16, 12)).unwrap();

        let calls: Rc<RefCell<Vec<Vec<CapturedImage>>>> = Rc::default();
        let sink = Rc::clone(&calls);
        let session = SessionStateMachine::new(config, move |images| sink.borrow_mut().push(images));

        Self {
            camera,
            session,
            calls,
        }
    }

    /// Takes a picture and hands it to the session, returning its sequence.
    fn shoot(&mut self) -> Result<u64, SessionError> {
        let image = self.camera.capture(self.session.source()).unwrap();
        let sequence = image.sequence();
        self.session.request_capture(image).map(|()| sequence)
    }

    fn delivered_sequences(&self) -> Vec<Vec<u64>> {
        self.calls
            .borrow()
            .iter()
            .map(|images| images.iter().map(CapturedImage::sequence).collect())
            .collect()
    }
}

#[test]
fn single_capture_without_confirmation_finishes_immediately() {
    let mut h = Harness::with_config(SessionConfiguration::single());

    let a = h.shoot().unwrap();

    assert_eq!(h.session.phase(), SessionPhase::Finished);
    assert_eq!(h.delivered_sequences(), vec![vec![a]]);
}

#[test]
fn single_capture_with_confirmation_supports_retake() {
    let mut h = Harness::with_config(SessionConfiguration::single_confirmed());

    h.shoot().unwrap();
    assert_eq!(h.session.phase(), SessionPhase::ConfirmingCandidate);

    h.session.retake_candidate().unwrap();
    assert_eq!(h.session.phase(), SessionPhase::Capturing);
    assert_eq!(h.session.accepted_count(), 0);

    let b = h.shoot().unwrap();
    assert_eq!(h.session.phase(), SessionPhase::ConfirmingCandidate);

    h.session.confirm_candidate().unwrap();
    assert_eq!(h.session.phase(), SessionPhase::Finished);
    assert_eq!(h.delivered_sequences(), vec![vec![b]]);
}

#[test]
fn multi_capture_delivers_in_capture_order() {
    let mut h = Harness::new(false, 3);

    let first = h.shoot().unwrap();
    assert_eq!(h.session.phase(), SessionPhase::Capturing);
    let second = h.shoot().unwrap();
    assert_eq!(h.session.phase(), SessionPhase::Capturing);
    let third = h.shoot().unwrap();

    assert_eq!(h.session.phase(), SessionPhase::Finished);
    assert_eq!(h.delivered_sequences(), vec![vec![first, second, third]]);
}

#[test]
fn delivered_images_carry_their_source() {
    let mut h = Harness::new(false, 2);

    h.shoot().unwrap();
    h.session.flip_source();
    h.shoot().unwrap();

    let calls = h.calls.borrow();
    let sources: Vec<CameraSource> = calls[0].iter().map(CapturedImage::source).collect();
    assert_eq!(sources, vec![CameraSource::Back, CameraSource::Front]);
}

#[test]
fn cancel_discards_accepted_images() {
    let mut h = Harness::new(false, 3);

    h.shoot().unwrap();
    h.shoot().unwrap();
    h.session.cancel_session().unwrap();

    assert_eq!(h.session.outcome(), Some(SessionOutcome::Cancelled));
    assert_eq!(h.delivered_sequences(), vec![Vec::<u64>::new()]);
}

#[test]
fn finished_session_rejects_everything_and_never_redelivers() {
    let mut h = Harness::new(true, 1);
    h.shoot().unwrap();
    h.session.confirm_candidate().unwrap();

    for (result, event) in [
        (h.shoot().map(|_| ()), EventKind::Capture),
        (h.session.confirm_candidate(), EventKind::Confirm),
        (h.session.cancel_session(), EventKind::Cancel),
    ] {
        assert_eq!(
            result,
            Err(SessionError::InvalidTransition {
                event,
                phase: SessionPhase::Finished,
            })
        );
    }

    assert_eq!(h.calls.borrow().len(), 1);
    assert!(ControlSet::for_phase(h.session.phase()).is_empty());
}

#[test]
fn flip_during_confirmation_is_ignored() {
    let mut h = Harness::new(true, 2);

    h.shoot().unwrap();
    h.session.flip_source();

    assert_eq!(h.session.source(), CameraSource::Back);
    assert_eq!(h.session.phase(), SessionPhase::ConfirmingCandidate);
}

#[test]
fn zero_limit_is_rejected_for_any_confirmation_setting() {
    for confirmation_required in [false, true] {
        assert_eq!(
            SessionConfiguration::new(confirmation_required, 0),
            Err(ConfigError::InvalidCaptureLimit(0))
        );
    }
}

#[test]
fn session_from_file_config() {
    let file = FileConfig::from_toml(
        "[session]\nconfirmation_required = true\ncapture_limit = 2\n",
    )
    .unwrap();
    let mut h = Harness::with_config(file.session);

    let a = h.shoot().unwrap();
    h.session.confirm_candidate().unwrap();
    assert_eq!(h.session.remaining_captures(), 1);
    let b = h.shoot().unwrap();
    h.session.confirm_candidate().unwrap();

    assert_eq!(h.delivered_sequences(), vec![vec![a, b]]);
}
