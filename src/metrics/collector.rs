//! Metrics collection and registry.

use crate::capture::CameraSource;
use crate::session::{SessionOutcome, SessionPhase, SessionStateMachine, SessionStats};
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registration or encoding failed.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// A snapshot of the live session for gauge updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Current phase.
    pub phase: SessionPhase,
    /// Current camera source.
    pub source: CameraSource,
    /// Images currently held by the session.
    pub accepted_images: usize,
    /// Images the session will still accept.
    pub remaining_captures: u32,
}

impl MetricsSnapshot {
    /// Creates a snapshot from the current state of a session.
    pub fn from_session(session: &SessionStateMachine) -> Self {
        Self {
            phase: session.phase(),
            source: session.source(),
            accepted_images: session.accepted_count(),
            remaining_captures: session.remaining_captures(),
        }
    }
}

/// Prometheus metrics registry for capture sessions.
pub struct MetricsRegistry {
    registry: Registry,

    // Live session gauges
    phase: IntGauge,
    front_source: IntGauge,
    accepted_images: IntGauge,
    remaining_captures: IntGauge,

    // Session totals
    sessions_completed: IntCounter,
    sessions_cancelled: IntCounter,

    // Event totals
    captures_requested: IntCounter,
    images_accepted: IntCounter,
    retakes: IntCounter,
    flips: IntCounter,
    rejected_events: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all session metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let phase = IntGauge::new(
            "capture_session_phase",
            "Current phase (0=capturing, 1=confirming_candidate, 2=finished)",
        )?;
        let front_source = IntGauge::new(
            "capture_session_front_source",
            "Selected camera source (1=front, 0=back)",
        )?;
        let accepted_images = IntGauge::new(
            "capture_session_accepted_images",
            "Images currently accepted by the live session",
        )?;
        let remaining_captures = IntGauge::new(
            "capture_session_remaining_captures",
            "Images the live session will still accept",
        )?;

        let sessions_completed = IntCounter::new(
            "capture_session_completed_total",
            "Sessions that finished by reaching their capture limit",
        )?;
        let sessions_cancelled = IntCounter::new(
            "capture_session_cancelled_total",
            "Sessions that finished by cancellation",
        )?;

        let captures_requested = IntCounter::new(
            "capture_session_captures_requested_total",
            "Captures handed to sessions while capturing",
        )?;
        let images_accepted = IntCounter::new(
            "capture_session_images_accepted_total",
            "Images appended to accepted lists",
        )?;
        let retakes = IntCounter::new(
            "capture_session_retakes_total",
            "Candidates discarded by retake",
        )?;
        let flips = IntCounter::new(
            "capture_session_flips_total",
            "Camera source flips that took effect",
        )?;
        let rejected_events = IntCounter::new(
            "capture_session_rejected_events_total",
            "Events rejected as invalid transitions",
        )?;

        registry.register(Box::new(phase.clone()))?;
        registry.register(Box::new(front_source.clone()))?;
        registry.register(Box::new(accepted_images.clone()))?;
        registry.register(Box::new(remaining_captures.clone()))?;
        registry.register(Box::new(sessions_completed.clone()))?;
        registry.register(Box::new(sessions_cancelled.clone()))?;
        registry.register(Box::new(captures_requested.clone()))?;
        registry.register(Box::new(images_accepted.clone()))?;
        registry.register(Box::new(retakes.clone()))?;
        registry.register(Box::new(flips.clone()))?;
        registry.register(Box::new(rejected_events.clone()))?;

        Ok(Self {
            registry,
            phase,
            front_source,
            accepted_images,
            remaining_captures,
            sessions_completed,
            sessions_cancelled,
            captures_requested,
            images_accepted,
            retakes,
            flips,
            rejected_events,
        })
    }

    /// Updates the live gauges from a snapshot.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        self.phase.set(match snapshot.phase {
            SessionPhase::Capturing => 0,
            SessionPhase::ConfirmingCandidate => 1,
            SessionPhase::Finished => 2,
        });
        self.front_source
            .set(if snapshot.source == CameraSource::Front { 1 } else { 0 });
        self.accepted_images.set(snapshot.accepted_images as i64);
        self.remaining_captures.set(i64::from(snapshot.remaining_captures));
    }

    /// Folds a finished session's counters into the totals.
    pub fn record_session(&self, outcome: SessionOutcome, stats: &SessionStats) {
        match outcome {
            SessionOutcome::Completed => self.sessions_completed.inc(),
            SessionOutcome::Cancelled => self.sessions_cancelled.inc(),
        }
        self.captures_requested.inc_by(stats.captures_requested);
        self.images_accepted.inc_by(stats.images_accepted);
        self.retakes.inc_by(stats.retakes);
        self.flips.inc_by(stats.flips);
        self.rejected_events.inc_by(stats.rejected_events);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
