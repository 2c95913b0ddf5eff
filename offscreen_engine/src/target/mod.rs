//! Render target management module
//!
//! Named framebuffers owned by the render loop: created against a
//! `RenderContext`, looked up by name, destroyed on removal.

mod target_manager;

pub use target_manager::TargetManager;
