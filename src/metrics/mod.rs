//! Prometheus metrics for capture sessions.
//!
//! # Metrics Exposed
//!
//! ## Live Session
//! - `capture_session_phase` - Current phase (0=capturing, 1=confirming_candidate, 2=finished)
//! - `capture_session_front_source` - Selected source (1=front, 0=back)
//! - `capture_session_accepted_images` - Images currently accepted
//! - `capture_session_remaining_captures` - Images still accepted before auto-finish
//!
//! ## Totals
//! - `capture_session_completed_total` / `capture_session_cancelled_total` - Finished sessions by outcome
//! - `capture_session_captures_requested_total` - Captures handed in while capturing
//! - `capture_session_images_accepted_total` - Images accepted
//! - `capture_session_retakes_total` - Candidates discarded
//! - `capture_session_flips_total` - Source flips
//! - `capture_session_rejected_events_total` - Invalid transitions
//!
//! # Example
//!
//! ```no_run
//! use capture_session::metrics::{MetricsRegistry, MetricsSnapshot};
//! use capture_session::session::{SessionConfiguration, SessionStateMachine};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! let session = SessionStateMachine::new(SessionConfiguration::single(), |_images| {});
//!
//! registry.update(&MetricsSnapshot::from_session(&session));
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
