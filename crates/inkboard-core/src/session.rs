//! Local pointer gesture state machine.
//!
//! Converts a continuous pointer gesture into a `line` creation message
//! followed by a throttled stream of `child` point messages. Samples that
//! land inside the throttle window are dropped, not queued: visual
//! smoothness is reconstructed by the smoothing step from sparse samples
//! rather than by transmitting every raw one.

use crate::protocol::{LineSpec, WireMessage, generate_stroke_id};
use crate::stroke::StrokeStyle;
use kurbo::Point;
use std::time::Duration;

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Minimum interval between two emitted points of the same gesture.
pub const POINT_INTERVAL: Duration = Duration::from_millis(70);

/// Per-gesture drawing state.
///
/// One session per pointer. The id of the line being drawn doubles as the
/// idle flag; aborting a gesture is just never calling [`stop_line`] — the
/// stroke drawn so far is already valid shared state.
///
/// [`stop_line`]: LocalStrokeSession::stop_line
#[derive(Debug, Default)]
pub struct LocalStrokeSession {
    /// Id of the line currently being drawn; `None` while idle.
    active: Option<String>,
    /// When the last point was emitted for this gesture.
    last_emit: Option<Instant>,
}

impl LocalStrokeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the stroke being drawn, if any.
    pub fn active_stroke(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Begin a gesture: allocate a stroke id and emit its `line` message
    /// plus the first point, so the stroke is visible with no delay.
    ///
    /// Attributes are captured once at stroke start and not updated
    /// mid-stroke.
    pub fn start_line(&mut self, style: &StrokeStyle, p: Point) -> Vec<WireMessage> {
        self.start_line_at(style, p, Instant::now())
    }

    /// [`start_line`](Self::start_line) with an explicit clock reading.
    pub fn start_line_at(
        &mut self,
        style: &StrokeStyle,
        p: Point,
        now: Instant,
    ) -> Vec<WireMessage> {
        let id = generate_stroke_id();
        let line = WireMessage::Line(LineSpec {
            id: id.clone(),
            color: Some(style.color.clone()),
            size: Some(style.size),
            opacity: Some(style.opacity),
        });
        self.active = Some(id);

        let mut messages = vec![line];
        messages.extend(self.emit_point(p, now));
        messages
    }

    /// Record one gesture sample. Returns the point message to send, or
    /// `None` when idle or inside the throttle window (the sample is
    /// dropped, not queued).
    pub fn continue_line(&mut self, p: Point) -> Option<WireMessage> {
        self.continue_line_at(p, Instant::now())
    }

    /// [`continue_line`](Self::continue_line) with an explicit clock reading.
    pub fn continue_line_at(&mut self, p: Point, now: Instant) -> Option<WireMessage> {
        self.active.as_ref()?;
        if let Some(last) = self.last_emit {
            if now.duration_since(last) < POINT_INTERVAL {
                return None;
            }
        }
        self.emit_point(p, now)
    }

    /// End the gesture: force one final point (the last chance to record the
    /// terminal position, so it bypasses the throttle) and go idle. No
    /// end-of-stroke message is sent; no receiver depends on termination.
    pub fn stop_line(&mut self, p: Point) -> Option<WireMessage> {
        self.stop_line_at(p, Instant::now())
    }

    /// [`stop_line`](Self::stop_line) with an explicit clock reading.
    pub fn stop_line_at(&mut self, p: Point, now: Instant) -> Option<WireMessage> {
        let msg = self.emit_point(p, now);
        self.active = None;
        self.last_emit = None;
        msg
    }

    fn emit_point(&mut self, p: Point, now: Instant) -> Option<WireMessage> {
        let parent = self.active.clone()?;
        self.last_emit = Some(now);
        Some(WireMessage::Child { parent, x: p.x, y: p.y })
    }
}
