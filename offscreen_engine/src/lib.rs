/*!
# Offscreen Engine

Off-screen render targets with throttled repainting.

A `Framebuffer` is a texture that can be bound as a draw destination and
later drawn like any other image. Platforms with framebuffer objects get a
hardware attachment; others fall back to rendering into the window
backbuffer and capturing the result, saving and restoring the real
backbuffer around the capture.

Each framebuffer carries a `RepaintScheduler` that coalesces redraw
requests per delay into shared timers and tells the render loop when a
redraw is due.

## Architecture

- **RenderContext**: graphics device, painter, window, dispatcher, clock and the bind stack
- **Framebuffer**: bind/release/draw/resize over the hardware or capture backend
- **RepaintScheduler**: request coalescing and flush-interval computation
- **TimerDispatcher**: poll-driven delayed and cyclic callbacks
- **TargetManager**: named framebuffers

Graphics backends implement the `GraphicsDevice`, `Painter` and `Texture`
traits.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics;
pub mod time;
pub mod framebuffer;
pub mod target;

// Main offscreen namespace module
pub mod offscreen {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Framebuffers and scheduling
    pub use crate::framebuffer::{
        BindStack, FlushControl, Framebuffer, RenderContext, RepaintConfig, RepaintScheduler,
        SchedulePolicy, TimerAction,
    };

    // Named targets
    pub use crate::target::TargetManager;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{format_entry, DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    // Graphics collaborator traits
    pub mod graphics {
        pub use crate::graphics::*;
    }

    // Clocks and dispatchers
    pub mod time {
        pub use crate::time::*;
    }
}

// Re-export math library at crate root
pub use glam;
