/// Stack of bound hardware framebuffers
///
/// The top is the framebuffer currently receiving draw calls; an empty
/// stack means the window backbuffer. Binding pushes, releasing pops and
/// hands back the framebuffer to restore, so nested bind/release pairs
/// unwind correctly.

use crate::graphics::FramebufferId;

#[derive(Debug, Default)]
pub struct BindStack {
    stack: Vec<FramebufferId>,
}

impl BindStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Framebuffer currently bound, `None` for the backbuffer
    pub fn current(&self) -> Option<FramebufferId> {
        self.stack.last().copied()
    }

    /// Bind `id` on top of the current framebuffer; returns the previous one
    ///
    /// Binding the framebuffer that is already current is a programming
    /// error (checked in debug builds).
    pub fn push(&mut self, id: FramebufferId) -> Option<FramebufferId> {
        let previous = self.current();
        debug_assert_ne!(previous, Some(id), "{} is already bound", id);
        self.stack.push(id);
        previous
    }

    /// Release `id`; returns the framebuffer to rebind
    ///
    /// `id` must be current (checked in debug builds).
    pub fn pop(&mut self, id: FramebufferId) -> Option<FramebufferId> {
        debug_assert_eq!(self.current(), Some(id), "releasing {} which is not bound", id);
        self.stack.pop();
        self.current()
    }

    pub fn is_bound(&self, id: FramebufferId) -> bool {
        self.stack.contains(&id)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
#[path = "bind_stack_tests.rs"]
mod tests;
