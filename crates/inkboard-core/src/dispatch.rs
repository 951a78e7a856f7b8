//! Inbound message routing.

use crate::cache::PathDataCache;
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::protocol::WireMessage;
use crate::smoothing::{self, AppendOutcome};
use crate::stroke::StrokeRegistry;
use crate::surface::RenderSurface;
use kurbo::Point;

/// Routes messages from peers (and the local echo) to the registry and the
/// smoothing step.
///
/// Keeps the most recently touched stroke id so consecutive points of the
/// same stroke skip the registry lookup. The fast path is re-evaluated on
/// every call, so interleaved messages for different strokes stay correct.
#[derive(Debug, Default)]
pub struct MessageDispatcher {
    last_touched: Option<String>,
}

impl MessageDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one message. Side effects are confined to the registry, the
    /// path cache/surface pair, and the diagnostic sink.
    pub fn dispatch<S: RenderSurface>(
        &mut self,
        msg: &WireMessage,
        registry: &mut StrokeRegistry,
        cache: &mut PathDataCache,
        surface: &mut S,
        sink: &mut dyn DiagnosticSink,
    ) {
        match msg {
            WireMessage::Line(spec) => {
                registry.create_or_update(spec, surface, cache);
                self.last_touched = Some(spec.id.clone());
            }
            WireMessage::Child { parent, x, y } => {
                if self.last_touched.as_deref() != Some(parent.as_str()) {
                    if !registry.contains(parent) {
                        // Out-of-order arrival: fabricate a stub so the
                        // point is not lost.
                        sink.report(Diagnostic::OrphanPoint(parent.clone()));
                    }
                    registry.get_or_create(parent, surface);
                    self.last_touched = Some(parent.clone());
                }

                let outcome =
                    smoothing::append_point(cache.commands_mut(parent, surface), Point::new(*x, *y));
                match outcome {
                    AppendOutcome::Appended => cache.flush(parent, surface),
                    AppendOutcome::DegenerateFallback => {
                        sink.report(Diagnostic::NumericInstability(parent.clone()));
                        cache.flush(parent, surface);
                    }
                    AppendOutcome::DuplicateDropped => {}
                }
            }
            WireMessage::Endline => {}
        }
    }
}
