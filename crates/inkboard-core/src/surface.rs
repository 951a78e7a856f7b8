//! Rendering substrate interface.
//!
//! The engine does not render. It talks to a path store through exactly four
//! operations: create a path object, check for one by id, read its current
//! command list, and replace it. A GUI host backs this with its actual scene
//! graph; [`MemorySurface`] is the in-memory implementation used headless and
//! in tests.

use crate::stroke::StrokeStyle;
use kurbo::BezPath;
use std::collections::HashMap;

/// The path store a drawing surface exposes to the engine.
pub trait RenderSurface {
    /// Create an empty path object under `id`, attached to the drawing
    /// container, carrying the stroke's visual attributes. If `id` already
    /// exists, the attributes are replaced and the path data is left alone.
    fn create_path(&mut self, id: &str, style: &StrokeStyle);

    /// Whether a path object exists under `id`.
    fn contains_path(&self, id: &str) -> bool;

    /// Current command list of the path under `id`.
    fn read_path(&self, id: &str) -> Option<BezPath>;

    /// Replace the command list of the path under `id`.
    fn replace_path(&mut self, id: &str, path: &BezPath);
}

#[derive(Debug, Clone)]
struct SurfacePath {
    style: StrokeStyle,
    path: BezPath,
}

/// In-memory path store.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    paths: HashMap<String, SurfacePath>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visual attributes currently applied to a path.
    pub fn style(&self, id: &str) -> Option<&StrokeStyle> {
        self.paths.get(id).map(|p| &p.style)
    }

    /// Number of path objects on the surface.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }
}

impl RenderSurface for MemorySurface {
    fn create_path(&mut self, id: &str, style: &StrokeStyle) {
        self.paths
            .entry(id.to_string())
            .and_modify(|p| p.style = style.clone())
            .or_insert_with(|| SurfacePath {
                style: style.clone(),
                path: BezPath::new(),
            });
    }

    fn contains_path(&self, id: &str) -> bool {
        self.paths.contains_key(id)
    }

    fn read_path(&self, id: &str) -> Option<BezPath> {
        self.paths.get(id).map(|p| p.path.clone())
    }

    fn replace_path(&mut self, id: &str, path: &BezPath) {
        if let Some(entry) = self.paths.get_mut(id) {
            entry.path = path.clone();
        }
    }
}
