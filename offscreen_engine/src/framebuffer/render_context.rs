/// Render context - the collaborators a framebuffer works against
///
/// Owns the graphics device, painter, window-size provider, dispatcher and
/// clock, plus the `BindStack` tracking which hardware framebuffer is
/// current. Framebuffer operations take `&mut RenderContext`, so only one
/// of them can touch the bound framebuffer at a time.

use std::rc::Rc;
use glam::UVec2;

use crate::graphics::{FramebufferId, GraphicsDevice, Painter, WindowSize};
use crate::time::{Clock, EventDispatcher};
use super::bind_stack::BindStack;

pub struct RenderContext {
    device: Box<dyn GraphicsDevice>,
    painter: Box<dyn Painter>,
    window: Box<dyn WindowSize>,
    dispatcher: Rc<dyn EventDispatcher>,
    clock: Rc<dyn Clock>,
    bind_stack: BindStack,
}

impl RenderContext {
    pub fn new(
        device: Box<dyn GraphicsDevice>,
        painter: Box<dyn Painter>,
        window: Box<dyn WindowSize>,
        dispatcher: Rc<dyn EventDispatcher>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            device,
            painter,
            window,
            dispatcher,
            clock,
            bind_stack: BindStack::new(),
        }
    }

    pub fn device(&self) -> &dyn GraphicsDevice {
        self.device.as_ref()
    }

    pub fn device_mut(&mut self) -> &mut dyn GraphicsDevice {
        self.device.as_mut()
    }

    pub fn painter_mut(&mut self) -> &mut dyn Painter {
        self.painter.as_mut()
    }

    pub fn dispatcher(&self) -> &dyn EventDispatcher {
        self.dispatcher.as_ref()
    }

    pub fn window_size(&self) -> UVec2 {
        self.window.window_size()
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    pub fn bind_stack(&self) -> &BindStack {
        &self.bind_stack
    }

    /// Push `id` and make it the draw destination
    pub(crate) fn bind_framebuffer(&mut self, id: FramebufferId) {
        self.bind_stack.push(id);
        self.device.bind_framebuffer(Some(id));
    }

    /// Pop `id` and rebind whatever was current before it
    pub(crate) fn unbind_framebuffer(&mut self, id: FramebufferId) {
        let previous = self.bind_stack.pop(id);
        self.device.bind_framebuffer(previous);
    }
}
