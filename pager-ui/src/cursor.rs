//! Cursor events and gesture velocity tracking.
//!
//! Events carry timestamps from a synthetic monotonic clock (a [`Duration`]
//! since mount) instead of wall time, so gesture velocities are fully
//! deterministic under synthesized input.

use std::time::Duration;

use smallvec::SmallVec;

use crate::px::PxPosition;

/// Samples older than this relative to the newest one are discarded when
/// computing a release velocity.
const VELOCITY_SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// The cursor button involved in a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKeyEventType {
    /// The primary button, or a touch contact.
    Left,
    /// The secondary button.
    Right,
    /// The middle button.
    Middle,
}

/// The kind of a cursor event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEventContent {
    /// A button or touch contact went down.
    Pressed(PressKeyEventType),
    /// The cursor moved while tracked.
    Moved,
    /// A button or touch contact was lifted.
    Released(PressKeyEventType),
}

/// A single cursor event with position and timing information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorEvent {
    /// Time of the event on the synthetic clock.
    pub timestamp: Duration,
    /// Cursor position when the event occurred, relative to the mount root.
    pub position: PxPosition,
    /// What happened.
    pub content: CursorEventContent,
}

/// Rolling single-axis velocity estimator for drag gestures.
///
/// Collects per-move velocity samples and averages the ones recorded within
/// the last [`VELOCITY_SAMPLE_WINDOW`], mirroring how touch velocity is
/// usually derived from the tail of a gesture rather than its whole span.
#[derive(Debug, Default, Clone)]
pub struct VelocityTracker {
    samples: SmallVec<[(Duration, f32); 16]>,
}

impl VelocityTracker {
    /// Records a velocity sample in pixels per second.
    pub fn push(&mut self, timestamp: Duration, velocity: f32) {
        self.samples.push((timestamp, velocity));
        let cutoff = timestamp.saturating_sub(VELOCITY_SAMPLE_WINDOW);
        self.samples.retain(|&mut (at, _)| at >= cutoff);
    }

    /// Average velocity of the samples still inside the window.
    ///
    /// Returns `None` when no movement was recorded.
    pub fn average(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f32 = self.samples.iter().map(|&(_, v)| v).sum();
        Some(sum / self.samples.len() as f32)
    }
}
