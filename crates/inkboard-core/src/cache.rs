//! Memoized path command lists.
//!
//! Decoding a surface-held path on every append would re-parse the whole
//! command list per point. The cache keeps the decoded [`StrokePath`] per
//! stroke id instead; once an entry is primed, the cache is the single
//! writer of that stroke's commands. Every mutation goes through it and is
//! pushed back to the surface with [`PathDataCache::flush`].

use crate::path::StrokePath;
use crate::surface::RenderSurface;
use std::collections::HashMap;

/// Per-stroke decoded command lists.
#[derive(Debug, Default)]
pub struct PathDataCache {
    entries: HashMap<String, StrokePath>,
}

impl PathDataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded command list for `id`, primed from the surface on first
    /// access.
    pub fn commands_mut<S: RenderSurface>(&mut self, id: &str, surface: &S) -> &mut StrokePath {
        self.entries.entry(id.to_string()).or_insert_with(|| {
            surface
                .read_path(id)
                .map(|p| StrokePath::from_bez_path(&p))
                .unwrap_or_default()
        })
    }

    /// Cached command list for `id`, if primed.
    pub fn get(&self, id: &str) -> Option<&StrokePath> {
        self.entries.get(id)
    }

    /// Push the cached commands for `id` back to the surface.
    pub fn flush<S: RenderSurface>(&self, id: &str, surface: &mut S) {
        if let Some(path) = self.entries.get(id) {
            surface.replace_path(id, &path.to_bez_path());
        }
    }

    /// Start the entry for `id` over empty (the stroke was re-created).
    pub fn reset(&mut self, id: &str) {
        self.entries.insert(id.to_string(), StrokePath::new());
    }

    /// Number of primed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entry has been primed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
