/// Time module - clocks and the delayed-callback dispatcher

mod clock;
mod dispatcher;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dispatcher::{EventCallback, EventDispatcher, EventHandle, TimerDispatcher};
