/// Shared fixtures for framebuffer and target tests

use std::rc::Rc;
use glam::UVec2;

use crate::graphics::mock_graphics::{mock_state, MockDevice, MockPainter, MockWindow, SharedMockState};
use crate::time::{ManualClock, TimerDispatcher};
use super::RenderContext;

pub(crate) struct Fixture {
    pub ctx: RenderContext,
    pub state: SharedMockState,
    pub clock: Rc<ManualClock>,
    pub dispatcher: Rc<TimerDispatcher>,
}

/// Context over the mock backend; `hardware` selects framebuffer object support
pub(crate) fn fixture(window: UVec2, hardware: bool) -> Fixture {
    let state = mock_state(window, hardware);
    let clock = Rc::new(ManualClock::new(0));
    let dispatcher = Rc::new(TimerDispatcher::new(clock.clone()));
    let ctx = RenderContext::new(
        Box::new(MockDevice { state: state.clone() }),
        Box::new(MockPainter { state: state.clone() }),
        Box::new(MockWindow { state: state.clone() }),
        dispatcher.clone(),
        clock.clone(),
    );
    Fixture { ctx, state, clock, dispatcher }
}
