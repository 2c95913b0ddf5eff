/// Graphics module - narrow traits over the external graphics collaborators
///
/// Framebuffers never talk to a graphics API directly. They go through:
/// - `GraphicsDevice`: framebuffer objects, texture creation, blending
/// - `Painter`: render state save/restore and textured quads
/// - `Texture`: pixel storage with backbuffer capture
/// - `WindowSize`: current window extent

// Module declarations
pub mod geometry;
pub mod texture;
pub mod graphics_device;
pub mod painter;
pub mod window;

// Re-export everything
pub use geometry::*;
pub use texture::*;
pub use graphics_device::*;
pub use painter::*;
pub use window::*;

// Mock graphics backend for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics;
