/// Painter trait - the render state consumed by framebuffers

use glam::UVec2;
use super::geometry::Rect2D;
use super::texture::Texture;

/// Draw-call front end
///
/// `save_and_reset_state` / `restore_saved_state` are stack-like and must
/// nest with framebuffer bind/release.
pub trait Painter {
    /// Push the current render state and reset to defaults
    fn save_and_reset_state(&mut self);

    /// Pop the state pushed by the matching `save_and_reset_state`
    fn restore_saved_state(&mut self);

    /// Set the output resolution (projection) in pixels
    fn set_resolution(&mut self, resolution: UVec2);

    /// Draw `src` of `texture` into `dest`
    fn draw_textured_rect(&mut self, dest: Rect2D, texture: &dyn Texture, src: Rect2D);

    /// Reset color modulation to opaque white
    fn reset_color(&mut self);
}
