/// GraphicsDevice trait - framebuffer objects, textures and blend state

use std::fmt;
use crate::error::Result;
use super::texture::{Texture, TextureDesc};

/// Handle of a hardware framebuffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferId(pub u32);

impl fmt::Display for FramebufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fbo#{}", self.0)
    }
}

/// Completeness of a framebuffer object after attachment changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    /// Backend-specific reason (e.g. "incomplete attachment")
    Incomplete(String),
}

/// Graphics device trait
///
/// Implemented by the backend that owns the graphics API context.
/// All calls happen on the render thread.
pub trait GraphicsDevice {
    /// Whether offscreen framebuffer objects are available
    ///
    /// Queried once per framebuffer at construction; the answer must not
    /// change during the device's lifetime.
    fn supports_framebuffers(&self) -> bool;

    /// Allocate a framebuffer object
    fn create_framebuffer(&mut self) -> Result<FramebufferId>;

    /// Free a framebuffer object
    fn destroy_framebuffer(&mut self, id: FramebufferId);

    /// Make `id` the draw destination; `None` selects the window backbuffer
    fn bind_framebuffer(&mut self, id: Option<FramebufferId>);

    /// Attach `texture` as color attachment 0 of the bound framebuffer `id`
    fn attach_color_texture(&mut self, id: FramebufferId, texture: &dyn Texture);

    /// Check completeness of `id` (must be bound)
    fn framebuffer_status(&self, id: FramebufferId) -> FramebufferStatus;

    /// Allocate a texture
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Box<dyn Texture>>;

    /// Enable or disable alpha blending
    fn set_blending(&mut self, enabled: bool);
}
