/// Framebuffer module - off-screen render targets and repaint scheduling

mod bind_stack;
mod framebuffer;
mod render_context;
mod repaint_config;
mod repaint_scheduler;

pub use bind_stack::BindStack;
pub use framebuffer::Framebuffer;
pub use render_context::RenderContext;
pub use repaint_config::{
    FlushControl, RepaintConfig, SchedulePolicy, TimerAction, DEFAULT_FLUSH_AMOUNT,
    DEFAULT_FORCE_UPDATE_DELAY, DEFAULT_MAX_TIME_UPDATE, DEFAULT_MIN_TIME_UPDATE,
};
pub use repaint_scheduler::RepaintScheduler;

#[cfg(test)]
pub(crate) mod test_support;
