//! Strokes, their visual attributes, and the registry that owns them.

use crate::cache::PathDataCache;
use crate::protocol::LineSpec;
use crate::surface::RenderSurface;
use kurbo::BezPath;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static visual attributes of a stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    pub size: f64,
    pub opacity: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            size: 10.0,
            opacity: 1.0,
        }
    }
}

impl StrokeStyle {
    /// Build attributes from a wire spec, defaulting each field
    /// independently: missing or empty color falls back to black, missing or
    /// non-positive size to 10, opacity is clamped to `[0.1, 1]` with
    /// non-finite or absent values falling back to 1.
    pub fn from_spec(spec: &LineSpec) -> Self {
        let color = match &spec.color {
            Some(c) if !c.is_empty() => c.clone(),
            _ => "black".to_string(),
        };
        let size = match spec.size {
            Some(s) if s > 0.0 => s,
            _ => 10.0,
        };
        let opacity = match spec.opacity {
            Some(o) if o.is_finite() => o.clamp(0.1, 1.0),
            _ => 1.0,
        };
        Self { color, size, opacity }
    }
}

/// One stroke: identity plus static visual attributes.
///
/// The geometry lives behind the path cache and the rendering surface, keyed
/// by the same id.
#[derive(Debug, Clone)]
pub struct Stroke {
    pub id: String,
    pub style: StrokeStyle,
    /// Fabricated for an orphan point, attributes not yet confirmed by a
    /// `line` message.
    pub stub: bool,
}

/// Creates and looks up strokes by id.
#[derive(Debug, Default)]
pub struct StrokeRegistry {
    strokes: HashMap<String, Stroke>,
}

impl StrokeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stroke by id.
    pub fn get(&self, id: &str) -> Option<&Stroke> {
        self.strokes.get(id)
    }

    /// Whether a stroke exists under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.strokes.contains_key(id)
    }

    /// Number of strokes in the registry.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Look up a stroke, fabricating a stub with default attributes when the
    /// id is unknown (a point arrived before its `line` message).
    pub fn get_or_create<S: RenderSurface>(&mut self, id: &str, surface: &mut S) -> &Stroke {
        self.strokes.entry(id.to_string()).or_insert_with(|| {
            let stroke = Stroke {
                id: id.to_string(),
                style: StrokeStyle::default(),
                stub: true,
            };
            surface.create_path(id, &stroke.style);
            stroke
        })
    }

    /// Create a stroke from a `line` message, or re-initialize an existing
    /// one.
    ///
    /// Creation is idempotent on id. Re-creating a stroke that was properly
    /// declared before deliberately resets its command list: a replayed
    /// `line` (late join, resync) starts the stroke over rather than
    /// appending to stale geometry. A late `line` arriving for a stub keeps
    /// the points the stub already collected and only upgrades its
    /// attributes.
    pub fn create_or_update<S: RenderSurface>(
        &mut self,
        spec: &LineSpec,
        surface: &mut S,
        cache: &mut PathDataCache,
    ) -> &Stroke {
        let style = StrokeStyle::from_spec(spec);
        surface.create_path(&spec.id, &style);

        if matches!(self.strokes.get(&spec.id), Some(s) if !s.stub) {
            cache.reset(&spec.id);
            surface.replace_path(&spec.id, &BezPath::new());
        }

        let stroke = Stroke {
            id: spec.id.clone(),
            style,
            stub: false,
        };
        self.strokes.insert(spec.id.clone(), stroke);
        &self.strokes[&spec.id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoothing::append_point;
    use crate::surface::MemorySurface;
    use kurbo::Point;

    fn spec(id: &str) -> LineSpec {
        LineSpec {
            id: id.to_string(),
            color: Some("#00ff00".to_string()),
            size: Some(4.0),
            opacity: Some(0.8),
        }
    }

    #[test]
    fn test_style_defaults() {
        let style = StrokeStyle::from_spec(&LineSpec {
            id: "l1".to_string(),
            color: None,
            size: None,
            opacity: None,
        });
        assert_eq!(style, StrokeStyle::default());
        assert_eq!(style.color, "black");
        assert_eq!(style.size, 10.0);
        assert_eq!(style.opacity, 1.0);
    }

    #[test]
    fn test_style_each_field_defaulted_independently() {
        let style = StrokeStyle::from_spec(&LineSpec {
            id: "l1".to_string(),
            color: Some(String::new()),
            size: Some(0.0),
            opacity: Some(f64::NAN),
        });
        assert_eq!(style.color, "black");
        assert_eq!(style.size, 10.0);
        assert_eq!(style.opacity, 1.0);
    }

    #[test]
    fn test_opacity_clamped() {
        let mut s = spec("l1");
        s.opacity = Some(0.01);
        assert_eq!(StrokeStyle::from_spec(&s).opacity, 0.1);
        s.opacity = Some(7.0);
        assert_eq!(StrokeStyle::from_spec(&s).opacity, 1.0);
        s.opacity = Some(0.4);
        assert_eq!(StrokeStyle::from_spec(&s).opacity, 0.4);
    }

    #[test]
    fn test_stub_creation() {
        let mut registry = StrokeRegistry::new();
        let mut surface = MemorySurface::new();

        let stroke = registry.get_or_create("l999", &mut surface);
        assert!(stroke.stub);
        assert_eq!(stroke.style, StrokeStyle::default());
        assert!(surface.contains_path("l999"));
    }

    #[test]
    fn test_create_or_update_idempotent_lookup() {
        let mut registry = StrokeRegistry::new();
        let mut surface = MemorySurface::new();
        let mut cache = PathDataCache::new();

        registry.create_or_update(&spec("l1"), &mut surface, &mut cache);
        let stroke = registry.get_or_create("l1", &mut surface);
        assert!(!stroke.stub);
        assert_eq!(stroke.style.color, "#00ff00");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_replayed_line_resets_commands() {
        let mut registry = StrokeRegistry::new();
        let mut surface = MemorySurface::new();
        let mut cache = PathDataCache::new();

        registry.create_or_update(&spec("l1"), &mut surface, &mut cache);
        append_point(cache.commands_mut("l1", &surface), Point::new(0.0, 0.0));
        append_point(cache.commands_mut("l1", &surface), Point::new(5.0, 5.0));
        cache.flush("l1", &mut surface);

        registry.create_or_update(&spec("l1"), &mut surface, &mut cache);
        assert!(cache.commands_mut("l1", &surface).is_empty());
        assert!(surface.read_path("l1").unwrap().elements().is_empty());
    }

    #[test]
    fn test_late_line_upgrades_stub_and_keeps_points() {
        let mut registry = StrokeRegistry::new();
        let mut surface = MemorySurface::new();
        let mut cache = PathDataCache::new();

        registry.get_or_create("l1", &mut surface);
        append_point(cache.commands_mut("l1", &surface), Point::new(5.0, 5.0));
        cache.flush("l1", &mut surface);

        let stroke = registry.create_or_update(&spec("l1"), &mut surface, &mut cache);
        assert!(!stroke.stub);
        assert_eq!(stroke.style.size, 4.0);
        assert_eq!(cache.commands_mut("l1", &surface).len(), 1);
    }
}
