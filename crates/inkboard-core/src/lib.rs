//! InkBoard Core
//!
//! Freehand-stroke smoothing and point-synchronization engine for a shared
//! drawing surface. A sparse, network-delivered sequence of raw pointer
//! samples becomes a smooth, incrementally renderable curve, shared
//! consistently across local and remote participants.

pub mod board;
pub mod cache;
pub mod diag;
pub mod dispatch;
pub mod path;
pub mod protocol;
pub mod session;
pub mod smoothing;
pub mod stroke;
pub mod surface;

pub use board::DrawingBoard;
pub use cache::PathDataCache;
pub use diag::{Diagnostic, DiagnosticSink, LogSink, MemorySink};
pub use dispatch::MessageDispatcher;
pub use path::{PathCommand, StrokePath};
pub use protocol::{LineSpec, WireMessage, generate_stroke_id};
pub use session::{LocalStrokeSession, POINT_INTERVAL};
pub use smoothing::{ANGULARITY, AppendOutcome, append_point};
pub use stroke::{Stroke, StrokeRegistry, StrokeStyle};
pub use surface::{MemorySurface, RenderSurface};
