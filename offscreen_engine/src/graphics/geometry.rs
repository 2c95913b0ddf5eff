/// 2D geometry shared by framebuffers and painters

use glam::{IVec2, UVec2};

/// 2D rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect2D {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle anchored at the origin covering `size`
    pub fn from_size(size: UVec2) -> Self {
        Self::new(0, 0, size.x, size.y)
    }

    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A size is valid when neither dimension is degenerate
pub fn is_valid_size(size: UVec2) -> bool {
    size.x > 0 && size.y > 0
}
