//! Wire message shapes shared by all participants.
//!
//! Three message kinds, tagged by a `type` field. No ordering or delivery
//! guarantee is assumed between a `line` and its `child` messages, nor
//! between `child` messages of different strokes interleaved on the wire;
//! the dispatcher tolerates arbitrary interleaving.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a new stroke and its static visual attributes.
///
/// Every field but the id is optional on the wire; defaults are applied when
/// the stroke is created ([`crate::stroke::StrokeStyle::from_spec`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// A drawing instruction exchanged between participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireMessage {
    /// Declare a new stroke and its attributes.
    Line(LineSpec),
    /// Append one sample to the stroke named `parent`.
    Child { parent: String, x: f64, y: f64 },
    /// Reserved. A no-op on receipt; never produced.
    Endline,
}

/// Allocate a fresh stroke id, tagged with a leading `l` for line.
///
/// Collision-free within a session (and across sessions, which keeps ids
/// usable as global keys on every participant).
pub fn generate_stroke_id() -> String {
    format!("l{}", Uuid::new_v4().simple())
}
