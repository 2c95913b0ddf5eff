#![allow(dead_code)]
//! Headless test utilities - a stub graphics backend for integration tests
//!
//! Textures carry no pixels; the device and painter only count calls.
//! Enough to drive framebuffers and the repaint scheduler through the
//! public API without a GPU or a window.

use std::cell::RefCell;
use std::rc::Rc;

use offscreen_engine::glam::UVec2;
use offscreen_engine::offscreen::graphics::{
    FixedWindowSize, FramebufferId, FramebufferStatus, GraphicsDevice, Painter, Rect2D, Texture,
    TextureDesc, TextureFlags, TextureId,
};
use offscreen_engine::offscreen::time::{ManualClock, TimerDispatcher};
use offscreen_engine::offscreen::{RenderContext, Result};

#[derive(Debug, Default)]
pub struct Counters {
    pub framebuffers_created: u32,
    pub framebuffers_destroyed: u32,
    pub textures_created: u32,
    pub binds: Vec<Option<FramebufferId>>,
    pub draws: u32,
    pub screen_copies: u32,
}

pub type SharedCounters = Rc<RefCell<Counters>>;

pub struct StubTexture {
    id: TextureId,
    size: UVec2,
    flags: TextureFlags,
    counters: SharedCounters,
}

impl Texture for StubTexture {
    fn id(&self) -> TextureId {
        self.id
    }

    fn size(&self) -> UVec2 {
        self.size
    }

    fn flags(&self) -> TextureFlags {
        self.flags
    }

    fn set_smooth(&mut self, smooth: bool) {
        self.flags.set(TextureFlags::SMOOTH, smooth);
    }

    fn copy_from_screen(&mut self, _rect: Rect2D) {
        self.counters.borrow_mut().screen_copies += 1;
    }
}

pub struct StubDevice {
    hardware: bool,
    counters: SharedCounters,
}

impl GraphicsDevice for StubDevice {
    fn supports_framebuffers(&self) -> bool {
        self.hardware
    }

    fn create_framebuffer(&mut self) -> Result<FramebufferId> {
        let mut counters = self.counters.borrow_mut();
        counters.framebuffers_created += 1;
        Ok(FramebufferId(counters.framebuffers_created))
    }

    fn destroy_framebuffer(&mut self, _id: FramebufferId) {
        self.counters.borrow_mut().framebuffers_destroyed += 1;
    }

    fn bind_framebuffer(&mut self, id: Option<FramebufferId>) {
        self.counters.borrow_mut().binds.push(id);
    }

    fn attach_color_texture(&mut self, _id: FramebufferId, _texture: &dyn Texture) {}

    fn framebuffer_status(&self, _id: FramebufferId) -> FramebufferStatus {
        FramebufferStatus::Complete
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Box<dyn Texture>> {
        let mut counters = self.counters.borrow_mut();
        counters.textures_created += 1;
        Ok(Box::new(StubTexture {
            id: TextureId(counters.textures_created),
            size: desc.size(),
            flags: desc.flags,
            counters: self.counters.clone(),
        }))
    }

    fn set_blending(&mut self, _enabled: bool) {}
}

pub struct StubPainter {
    counters: SharedCounters,
}

impl Painter for StubPainter {
    fn save_and_reset_state(&mut self) {}

    fn restore_saved_state(&mut self) {}

    fn set_resolution(&mut self, _resolution: UVec2) {}

    fn draw_textured_rect(&mut self, _dest: Rect2D, _texture: &dyn Texture, _src: Rect2D) {
        self.counters.borrow_mut().draws += 1;
    }

    fn reset_color(&mut self) {}
}

pub struct Headless {
    pub ctx: RenderContext,
    pub clock: Rc<ManualClock>,
    pub dispatcher: Rc<TimerDispatcher>,
    pub counters: SharedCounters,
}

/// Headless context with an 800x600 window
pub fn headless(hardware: bool) -> Headless {
    let counters: SharedCounters = Rc::new(RefCell::new(Counters::default()));
    let clock = Rc::new(ManualClock::new(0));
    let dispatcher = Rc::new(TimerDispatcher::new(clock.clone()));
    let ctx = RenderContext::new(
        Box::new(StubDevice { hardware, counters: counters.clone() }),
        Box::new(StubPainter { counters: counters.clone() }),
        Box::new(FixedWindowSize(UVec2::new(800, 600))),
        dispatcher.clone(),
        clock.clone(),
    );
    Headless { ctx, clock, dispatcher, counters }
}
