//! Capture Session Library
//!
//! The state machine behind a full-screen "take one or more photos" flow.
//! A host presents the camera, forwards user input as events, and gets
//! the collected images back exactly once when the session ends.
//!
//! # Architecture
//!
//! ```text
//! camera ──image──▶ session state machine ──images (once)──▶ completion handler
//!                        │
//!                        └──state changed──▶ observers (host redraw, metrics)
//! ```
//!
//! # Design Principles
//!
//! - **At-most-once delivery**: the completion handler is an `FnOnce`
//!   and is consumed by the event that finishes the session
//! - **Cancel discards everything**: a cancelled session delivers an
//!   empty list even if images were already accepted
//! - **Rendering stays outside**: the machine reports state; hosts pick
//!   controls with [`ControlSet::for_phase`]
//! - **Synchronous and single-threaded**: no background work or timers
//!
//! # Example
//!
//! ```no_run
//! use capture_session::{
//!     capture::{Camera, CaptureConfig, MockCamera},
//!     session::{SessionConfiguration, SessionStateMachine},
//! };
//!
//! let mut camera = MockCamera::new();
//! camera.open(&CaptureConfig::default()).unwrap();
//!
//! let config = SessionConfiguration::new(true, 2).unwrap();
//! let mut session = SessionStateMachine::new(config, |images| {
//!     println!("session returned {} images", images.len());
//! });
//!
//! for _ in 0..2 {
//!     let image = camera.capture(session.source()).unwrap();
//!     session.request_capture(image).unwrap();
//!     session.confirm_candidate().unwrap();
//! }
//!
//! assert!(session.is_finished());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capture;
pub mod config;
pub mod driver;
pub mod metrics;
pub mod session;

// Re-export commonly used types at crate root
pub use capture::{Camera, CameraError, CameraSource, CaptureConfig, CapturedImage, MockCamera};
pub use config::{ConfigError, FileConfig};
pub use session::{
    ControlSet, EventKind, SessionConfiguration, SessionError, SessionEvent, SessionObserver,
    SessionOutcome, SessionPhase, SessionState, SessionStateMachine,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
