/// Framebuffer - an off-screen render target
///
/// Two backends behind one interface, chosen once at construction:
///
/// - **Hardware**: a framebuffer object with the target texture as color
///   attachment. Bind/release push and pop it on the context's `BindStack`.
/// - **Capture**: no framebuffer objects available. Drawing goes to the
///   window backbuffer; `release` copies the result into the texture and,
///   when backuping is on, restores the backbuffer content saved by `bind`.
///
/// Every framebuffer also owns a `RepaintScheduler` deciding when the
/// render loop should redraw it.

use glam::UVec2;

use crate::error::Result;
use crate::graphics::{
    is_valid_size, FramebufferId, FramebufferStatus, Rect2D, Texture, TextureDesc, TextureFlags,
};
use crate::{engine_debug, engine_fatal, engine_trace, engine_warn};
use super::render_context::RenderContext;
use super::repaint_config::RepaintConfig;
use super::repaint_scheduler::RepaintScheduler;

const SOURCE: &str = "offscreen::Framebuffer";

enum Backend {
    Hardware { fbo: FramebufferId },
    Capture { backup: Option<Box<dyn Texture>> },
}

pub struct Framebuffer {
    texture: Option<Box<dyn Texture>>,
    backend: Backend,
    smooth: bool,
    drawable: bool,
    backuping: bool,
    scheduler: RepaintScheduler,
    destroyed: bool,
}

impl Framebuffer {
    /// Create a framebuffer with the default repaint configuration
    ///
    /// # Panics
    ///
    /// If the device supports framebuffer objects but fails to allocate one.
    pub fn new(ctx: &mut RenderContext) -> Self {
        Self::with_config(ctx, RepaintConfig::default())
    }

    /// Create a framebuffer with an explicit repaint configuration
    pub fn with_config(ctx: &mut RenderContext, config: RepaintConfig) -> Self {
        let backend = if ctx.device().supports_framebuffers() {
            match ctx.device_mut().create_framebuffer() {
                Ok(fbo) => {
                    engine_debug!(SOURCE, "Created framebuffer object {}", fbo);
                    Backend::Hardware { fbo }
                }
                Err(err) => engine_fatal!(SOURCE, "Unable to create framebuffer object: {}", err),
            }
        } else {
            engine_debug!(SOURCE, "Framebuffer objects unavailable, using screen capture");
            Backend::Capture { backup: None }
        };

        Self {
            texture: None,
            backend,
            smooth: true,
            drawable: true,
            backuping: true,
            scheduler: RepaintScheduler::new(config, ctx.now_millis()),
            destroyed: false,
        }
    }

    /// Reallocate the texture for `size`; no-op when the size is unchanged
    ///
    /// # Errors
    ///
    /// Propagates texture allocation failures; the previous texture and
    /// backup are both kept.
    ///
    /// # Panics
    ///
    /// If a hardware framebuffer is incomplete after attaching the texture.
    pub fn resize(&mut self, ctx: &mut RenderContext, size: UVec2) -> Result<()> {
        debug_assert!(is_valid_size(size), "invalid framebuffer size {}x{}", size.x, size.y);

        let wants_backup = self.backuping && matches!(self.backend, Backend::Capture { .. });
        let stale_backup = wants_backup && !self.backup_texture().is_some_and(|backup| backup.size() == size);
        let same_size = self.texture.as_ref().is_some_and(|texture| texture.size() == size);
        if same_size && !stale_backup {
            return Ok(());
        }

        // allocate everything before touching state
        let texture = if same_size {
            None
        } else {
            let mut flags = TextureFlags::UPSIDE_DOWN;
            flags.set(TextureFlags::SMOOTH, self.smooth);
            Some(ctx.device_mut().create_texture(TextureDesc::new(size, flags))?)
        };
        let backup = if wants_backup {
            let desc = TextureDesc::new(size, TextureFlags::UPSIDE_DOWN);
            Some(ctx.device_mut().create_texture(desc)?)
        } else {
            None
        };

        if let Some(texture) = texture {
            if let Backend::Hardware { fbo } = self.backend {
                ctx.bind_framebuffer(fbo);
                ctx.device_mut().attach_color_texture(fbo, texture.as_ref());
                if let FramebufferStatus::Incomplete(reason) = ctx.device().framebuffer_status(fbo) {
                    engine_fatal!(SOURCE, "Unable to setup framebuffer object {}: {}", fbo, reason);
                }
                ctx.unbind_framebuffer(fbo);
            }
            self.texture = Some(texture);
            engine_debug!(SOURCE, "Resized to {}x{}", size.x, size.y);
        }

        if let (Backend::Capture { backup: slot }, Some(backup)) = (&mut self.backend, backup) {
            *slot = Some(backup);
        }
        Ok(())
    }

    /// Redirect subsequent draw calls into this framebuffer
    ///
    /// Saves the painter state; must be paired with `release`.
    pub fn bind(&mut self, ctx: &mut RenderContext) {
        let screen_rect = Rect2D::from_size(self.size(ctx));
        ctx.painter_mut().save_and_reset_state();

        match &mut self.backend {
            Backend::Hardware { fbo } => ctx.bind_framebuffer(*fbo),
            Backend::Capture { backup } => {
                if self.backuping {
                    if let Some(backup) = backup.as_mut() {
                        backup.copy_from_screen(screen_rect);
                    }
                }
            }
        }

        let resolution = self.texture.as_ref().map_or(UVec2::ZERO, |texture| texture.size());
        ctx.painter_mut().set_resolution(resolution);
        engine_trace!(SOURCE, "Bound ({}x{})", resolution.x, resolution.y);
    }

    /// Finish drawing: restore the previous destination and painter state,
    /// and reset the repaint scheduler
    pub fn release(&mut self, ctx: &mut RenderContext) {
        let screen_rect = Rect2D::from_size(self.size(ctx));

        match &mut self.backend {
            Backend::Hardware { fbo } => ctx.unbind_framebuffer(*fbo),
            Backend::Capture { backup } => {
                if let Some(texture) = self.texture.as_mut() {
                    texture.copy_from_screen(screen_rect);
                }

                if self.backuping {
                    if let Some(backup) = backup.as_deref() {
                        // the restore is an opaque overwrite
                        ctx.device_mut().set_blending(false);
                        ctx.painter_mut().reset_color();
                        ctx.painter_mut().draw_textured_rect(screen_rect, backup, screen_rect);
                        ctx.device_mut().set_blending(true);
                    }
                }
            }
        }

        ctx.painter_mut().restore_saved_state();
        self.scheduler.restart(ctx.now_millis());
        engine_trace!(SOURCE, "Released");
    }

    /// Draw the whole framebuffer at the origin
    pub fn draw(&self, ctx: &mut RenderContext) {
        let rect = Rect2D::from_size(self.size(ctx));
        self.draw_rect(ctx, rect, rect);
    }

    /// Draw the whole framebuffer into `dest`
    pub fn draw_to(&self, ctx: &mut RenderContext, dest: Rect2D) {
        let src = Rect2D::from_size(self.size(ctx));
        self.draw_rect(ctx, dest, src);
    }

    /// Draw `src` of the framebuffer into `dest`
    pub fn draw_rect(&self, ctx: &mut RenderContext, dest: Rect2D, src: Rect2D) {
        if !self.drawable {
            return;
        }
        if let Some(texture) = self.texture.as_deref() {
            ctx.painter_mut().draw_textured_rect(dest, texture, src);
        }
    }

    /// Bind, draw with `paint` and release, if a redraw is due
    ///
    /// Returns whether `paint` ran.
    pub fn render_if_due<F>(&mut self, ctx: &mut RenderContext, paint: F) -> bool
    where
        F: FnOnce(&mut RenderContext),
    {
        if !self.can_update(ctx) {
            return false;
        }
        self.bind(ctx);
        paint(ctx);
        self.release(ctx);
        true
    }

    /// Effective size in pixels
    ///
    /// Capture framebuffers cannot exceed the window. Zero before the first
    /// `resize`.
    pub fn size(&self, ctx: &RenderContext) -> UVec2 {
        let Some(texture) = self.texture.as_ref() else {
            return UVec2::ZERO;
        };
        match self.backend {
            Backend::Hardware { .. } => texture.size(),
            Backend::Capture { .. } => texture.size().min(ctx.window_size()),
        }
    }

    /// Free the hardware attachment
    pub fn destroy(mut self, ctx: &mut RenderContext) {
        if let Backend::Hardware { fbo } = self.backend {
            debug_assert!(!ctx.bind_stack().is_bound(fbo), "destroying bound {}", fbo);
            ctx.device_mut().destroy_framebuffer(fbo);
            engine_debug!(SOURCE, "Destroyed framebuffer object {}", fbo);
        }
        self.destroyed = true;
    }

    // ===== REPAINT SCHEDULING =====

    /// Whether a redraw is due now
    pub fn can_update(&self, ctx: &RenderContext) -> bool {
        self.scheduler.can_update(ctx.now_millis())
    }

    /// Register one pending repaint request
    pub fn update(&mut self) {
        self.scheduler.update();
    }

    /// Current flush interval in milliseconds
    pub fn flush_time(&self) -> u16 {
        self.scheduler.flush_time()
    }

    /// Ask for a repaint every `delay` milliseconds
    pub fn schedule_painting(&mut self, ctx: &RenderContext, delay: u16) {
        self.scheduler.schedule_painting(ctx.dispatcher(), delay);
    }

    /// Withdraw one `schedule_painting(delay)` interest
    pub fn remove_rendering_time(&mut self, delay: u16) {
        self.scheduler.remove_rendering_time(delay);
    }

    /// Get the repaint scheduler
    pub fn scheduler(&self) -> &RepaintScheduler {
        &self.scheduler
    }

    /// Get the mutable repaint scheduler
    pub fn scheduler_mut(&mut self) -> &mut RepaintScheduler {
        &mut self.scheduler
    }

    // ===== ACCESSORS =====

    /// Whether this framebuffer uses a framebuffer object
    pub fn is_hardware(&self) -> bool {
        matches!(self.backend, Backend::Hardware { .. })
    }

    /// Framebuffer object id, `None` on the capture backend
    pub fn framebuffer_id(&self) -> Option<FramebufferId> {
        match self.backend {
            Backend::Hardware { fbo } => Some(fbo),
            Backend::Capture { .. } => None,
        }
    }

    /// Target texture, `None` before the first `resize`
    pub fn texture(&self) -> Option<&dyn Texture> {
        self.texture.as_deref()
    }

    /// Saved backbuffer of capture framebuffers
    pub fn backup_texture(&self) -> Option<&dyn Texture> {
        match &self.backend {
            Backend::Capture { backup } => backup.as_deref(),
            Backend::Hardware { .. } => None,
        }
    }

    /// Linear filtering; applies to the current texture immediately
    pub fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
        if let Some(texture) = self.texture.as_mut() {
            texture.set_smooth(smooth);
        }
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    pub fn set_drawable(&mut self, drawable: bool) {
        self.drawable = drawable;
    }

    pub fn is_drawable(&self) -> bool {
        self.drawable
    }

    /// Save/restore the backbuffer around capture cycles
    ///
    /// Takes effect at the next `resize` for the backup allocation.
    pub fn set_backuping(&mut self, backuping: bool) {
        self.backuping = backuping;
    }

    pub fn is_backuping(&self) -> bool {
        self.backuping
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        if let (Backend::Hardware { fbo }, false) = (&self.backend, self.destroyed) {
            engine_warn!(SOURCE, "{} dropped without destroy(), attachment leaked", fbo);
        }
    }
}

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
