/// WindowSize trait - current window extent
///
/// Capture-based framebuffers render into the real backbuffer, so their
/// usable size is clamped to the window.

use glam::UVec2;

pub trait WindowSize {
    /// Current drawable size in physical pixels
    fn window_size(&self) -> UVec2;
}

impl WindowSize for winit::window::Window {
    fn window_size(&self) -> UVec2 {
        let size = self.inner_size();
        UVec2::new(size.width, size.height)
    }
}

/// Fixed window size, for headless rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWindowSize(pub UVec2);

impl WindowSize for FixedWindowSize {
    fn window_size(&self) -> UVec2 {
        self.0
    }
}
