/// Central framebuffer registry
///
/// Stores named framebuffers (map view, minimap, UI layers, ...) and
/// answers which of them are due for a redraw.

use std::collections::hash_map::Entry;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::engine_bail;
use crate::framebuffer::{Framebuffer, RenderContext, RepaintConfig};

pub struct TargetManager {
    framebuffers: FxHashMap<String, Framebuffer>,
}

impl TargetManager {
    /// Create a new empty target manager
    pub fn new() -> Self {
        Self {
            framebuffers: FxHashMap::default(),
        }
    }

    /// Create a named framebuffer with the default repaint configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a framebuffer with the same name already exists.
    pub fn create_framebuffer(&mut self, ctx: &mut RenderContext, name: &str) -> Result<&mut Framebuffer> {
        self.create_framebuffer_with_config(ctx, name, RepaintConfig::default())
    }

    /// Create a named framebuffer with an explicit repaint configuration
    pub fn create_framebuffer_with_config(
        &mut self,
        ctx: &mut RenderContext,
        name: &str,
        config: RepaintConfig,
    ) -> Result<&mut Framebuffer> {
        match self.framebuffers.entry(name.to_string()) {
            Entry::Occupied(_) => {
                engine_bail!("offscreen::TargetManager", "Framebuffer '{}' already exists", name);
            }
            Entry::Vacant(slot) => Ok(slot.insert(Framebuffer::with_config(ctx, config))),
        }
    }

    /// Get a framebuffer by name
    pub fn framebuffer(&self, name: &str) -> Option<&Framebuffer> {
        self.framebuffers.get(name)
    }

    /// Get a mutable framebuffer by name
    pub fn framebuffer_mut(&mut self, name: &str) -> Option<&mut Framebuffer> {
        self.framebuffers.get_mut(name)
    }

    /// Remove and destroy a framebuffer
    ///
    /// Returns false if no framebuffer has this name.
    pub fn remove_framebuffer(&mut self, ctx: &mut RenderContext, name: &str) -> bool {
        match self.framebuffers.remove(name) {
            Some(framebuffer) => {
                framebuffer.destroy(ctx);
                true
            }
            None => false,
        }
    }

    /// Get the number of framebuffers
    pub fn framebuffer_count(&self) -> usize {
        self.framebuffers.len()
    }

    /// Get all framebuffer names, sorted
    pub fn framebuffer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.framebuffers.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Names of the framebuffers due for a redraw, sorted
    pub fn due_framebuffers(&self, ctx: &RenderContext) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .framebuffers
            .iter()
            .filter(|(_, framebuffer)| framebuffer.can_update(ctx))
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Destroy all framebuffers
    pub fn clear(&mut self, ctx: &mut RenderContext) {
        for (_, framebuffer) in self.framebuffers.drain() {
            framebuffer.destroy(ctx);
        }
    }
}

impl Default for TargetManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;
