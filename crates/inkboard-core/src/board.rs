//! The per-surface drawing context.
//!
//! One [`DrawingBoard`] per drawing surface (or per connected client). It
//! owns the registry, the path cache, the dispatcher and the local session,
//! so no state leaks across sessions. Locally drawn messages are applied
//! through the same dispatch path as remote ones and queued for the
//! transport, which keeps every participant's view identical.

use crate::cache::PathDataCache;
use crate::diag::{Diagnostic, DiagnosticSink, LogSink};
use crate::dispatch::MessageDispatcher;
use crate::path::StrokePath;
use crate::protocol::WireMessage;
use crate::session::LocalStrokeSession;
use crate::stroke::{StrokeRegistry, StrokeStyle};
use crate::surface::{MemorySurface, RenderSurface};
use kurbo::Point;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Everything one shared drawing surface needs on one participant.
pub struct DrawingBoard<S: RenderSurface> {
    surface: S,
    registry: StrokeRegistry,
    cache: PathDataCache,
    dispatcher: MessageDispatcher,
    session: LocalStrokeSession,
    /// Current tool attributes, read once at stroke start.
    pub tool_style: StrokeStyle,
    sink: Box<dyn DiagnosticSink>,
    /// Messages waiting for the transport.
    outgoing: Vec<WireMessage>,
}

impl DrawingBoard<MemorySurface> {
    /// Headless board over an in-memory surface, logging diagnostics.
    pub fn new() -> Self {
        Self::with_surface(MemorySurface::new())
    }
}

impl Default for DrawingBoard<MemorySurface> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RenderSurface> DrawingBoard<S> {
    /// Board over a host-provided rendering surface.
    pub fn with_surface(surface: S) -> Self {
        Self {
            surface,
            registry: StrokeRegistry::new(),
            cache: PathDataCache::new(),
            dispatcher: MessageDispatcher::new(),
            session: LocalStrokeSession::new(),
            tool_style: StrokeStyle::default(),
            sink: Box::new(LogSink),
            outgoing: Vec::new(),
        }
    }

    /// Replace the diagnostic sink.
    pub fn set_sink(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    // --- Local gesture ---

    /// Begin a local gesture at `p` with the current tool attributes.
    pub fn start_line(&mut self, p: Point) {
        self.start_line_at(p, Instant::now());
    }

    /// [`start_line`](Self::start_line) with an explicit clock reading.
    pub fn start_line_at(&mut self, p: Point, now: Instant) {
        for msg in self.session.start_line_at(&self.tool_style, p, now) {
            self.draw_and_send(msg);
        }
    }

    /// Record one local gesture sample (throttled).
    pub fn continue_line(&mut self, p: Point) {
        self.continue_line_at(p, Instant::now());
    }

    /// [`continue_line`](Self::continue_line) with an explicit clock reading.
    pub fn continue_line_at(&mut self, p: Point, now: Instant) {
        if let Some(msg) = self.session.continue_line_at(p, now) {
            self.draw_and_send(msg);
        }
    }

    /// End the local gesture with one forced final point.
    pub fn stop_line(&mut self, p: Point) {
        self.stop_line_at(p, Instant::now());
    }

    /// [`stop_line`](Self::stop_line) with an explicit clock reading.
    pub fn stop_line_at(&mut self, p: Point, now: Instant) {
        if let Some(msg) = self.session.stop_line_at(p, now) {
            self.draw_and_send(msg);
        }
    }

    /// Apply a message locally, then queue it for the transport.
    fn draw_and_send(&mut self, msg: WireMessage) {
        self.dispatch(&msg);
        self.outgoing.push(msg);
    }

    // --- Inbound delivery ---

    /// Apply one message from the transport (including the sender's own
    /// echo; the local application above makes re-application idempotent for
    /// duplicate points and stroke declarations).
    pub fn dispatch(&mut self, msg: &WireMessage) {
        self.dispatcher.dispatch(
            msg,
            &mut self.registry,
            &mut self.cache,
            &mut self.surface,
            &mut *self.sink,
        );
    }

    /// Decode and apply one raw message. Unrecognized `type` tags are
    /// reported and mutate nothing.
    pub fn dispatch_json(&mut self, json: &str) {
        match serde_json::from_str::<WireMessage>(json) {
            Ok(msg) => self.dispatch(&msg),
            Err(err) => self.sink.report(Diagnostic::UnknownMessage(err.to_string())),
        }
    }

    // --- Transport side ---

    /// Drain the messages queued for the transport's `send`.
    pub fn take_outgoing(&mut self) -> Vec<WireMessage> {
        std::mem::take(&mut self.outgoing)
    }

    /// Check if there are messages waiting for the transport.
    pub fn has_outgoing(&self) -> bool {
        !self.outgoing.is_empty()
    }

    // --- Accessors ---

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn registry(&self) -> &StrokeRegistry {
        &self.registry
    }

    pub fn session(&self) -> &LocalStrokeSession {
        &self.session
    }

    /// Decoded command list of a stroke, if any point has been processed.
    pub fn stroke_path(&self, id: &str) -> Option<&StrokePath> {
        self.cache.get(id)
    }
}
