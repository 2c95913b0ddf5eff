/// Texture trait and texture descriptor
///
/// A texture is the pixel storage behind a framebuffer: the visible image
/// of a target, or the backup of the real backbuffer for capture targets.

use bitflags::bitflags;
use glam::UVec2;
use super::geometry::Rect2D;

/// Backend-assigned texture identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

bitflags! {
    /// Sampling and orientation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureFlags: u32 {
        /// Linear filtering when sampled
        const SMOOTH = 1 << 0;
        /// Rows are stored bottom-up (backbuffer convention)
        const UPSIDE_DOWN = 1 << 1;
    }
}

/// Descriptor for creating a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Initial flags
    pub flags: TextureFlags,
}

impl TextureDesc {
    pub fn new(size: UVec2, flags: TextureFlags) -> Self {
        Self {
            width: size.x,
            height: size.y,
            flags,
        }
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }
}

/// Texture resource trait
///
/// Implemented by backend-specific texture types. Released when dropped.
pub trait Texture {
    /// Unique id; a new allocation always yields a new id
    fn id(&self) -> TextureId;

    /// Size in pixels
    fn size(&self) -> UVec2;

    /// Current flags
    fn flags(&self) -> TextureFlags;

    /// Toggle linear filtering
    fn set_smooth(&mut self, smooth: bool);

    /// Copy `rect` of the currently visible backbuffer into this texture
    fn copy_from_screen(&mut self, rect: Rect2D);

    fn width(&self) -> u32 {
        self.size().x
    }

    fn height(&self) -> u32 {
        self.size().y
    }
}
