//! Stroke geometry: the append-only path command model.

use kurbo::{BezPath, PathEl, Point};
use serde::{Deserialize, Serialize};

/// One drawing instruction in a stroke's path.
///
/// A stroke always starts with a single `MoveTo`; every subsequent command is
/// a cubic `CurveTo`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Start of the stroke.
    MoveTo(Point),
    /// Cubic segment: first control point, second control point, endpoint.
    CurveTo { c1: Point, c2: Point, to: Point },
}

impl PathCommand {
    /// Endpoint of this command.
    pub fn endpoint(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) => p,
            PathCommand::CurveTo { to, .. } => to,
        }
    }

    /// Decode a kurbo path element back into a stroke command.
    ///
    /// Strokes only ever contain move and cubic elements; anything else is
    /// not ours and yields `None`.
    pub fn from_el(el: &PathEl) -> Option<Self> {
        match *el {
            PathEl::MoveTo(p) => Some(PathCommand::MoveTo(p)),
            PathEl::CurveTo(c1, c2, to) => Some(PathCommand::CurveTo { c1, c2, to }),
            _ => None,
        }
    }
}

/// The geometric representation of one stroke.
///
/// Commands are append-only: none is ever removed or reordered once pushed.
/// The single permitted retroactive mutation is amending the trailing control
/// point of the last command, because the tangent at a point is only knowable
/// once the point after it arrives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokePath {
    commands: Vec<PathCommand>,
}

impl StrokePath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commands in the path.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The commands in order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Endpoint of the last command, if any.
    pub fn last_endpoint(&self) -> Option<Point> {
        self.commands.last().map(PathCommand::endpoint)
    }

    /// Endpoint of the second-to-last command, if any.
    pub fn ante_endpoint(&self) -> Option<Point> {
        let n = self.commands.len();
        self.commands.get(n.checked_sub(2)?).map(PathCommand::endpoint)
    }

    /// Append a command.
    pub fn push(&mut self, cmd: PathCommand) {
        debug_assert!(
            self.commands.is_empty() == matches!(cmd, PathCommand::MoveTo(_)),
            "a stroke starts with exactly one MoveTo"
        );
        self.commands.push(cmd);
    }

    /// Amend the trailing control point of the last command.
    ///
    /// A `MoveTo` tail is left untouched; only a `CurveTo`'s second control
    /// point may be rewritten.
    pub fn amend_tail_control(&mut self, c: Point) {
        if let Some(PathCommand::CurveTo { c2, .. }) = self.commands.last_mut() {
            *c2 = c;
        }
    }

    /// Build the kurbo path for the rendering substrate.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => path.move_to(p),
                PathCommand::CurveTo { c1, c2, to } => path.curve_to(c1, c2, to),
            }
        }
        path
    }

    /// Rebuild a command list from a substrate-held path.
    pub fn from_bez_path(path: &BezPath) -> Self {
        Self {
            commands: path.elements().iter().filter_map(PathCommand::from_el).collect(),
        }
    }
}
