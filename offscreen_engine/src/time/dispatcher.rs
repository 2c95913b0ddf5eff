/// Delayed-callback dispatcher
///
/// `EventDispatcher` is the contract framebuffers use to arm repaint timers.
/// `TimerDispatcher` is a single-threaded implementation driven by explicit
/// `poll()` calls from the event loop: callbacks never run preemptively,
/// only from inside `poll()`, on the polling thread.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use slotmap::{DefaultKey, SlotMap};

use crate::engine_trace;
use super::clock::Clock;

/// Callback of a cyclic event
pub type EventCallback = Box<dyn FnMut()>;

/// Cancelable handle to a scheduled event
///
/// Clones share the same cancellation flag. Canceling is idempotent and
/// takes effect immediately: a canceled event never fires again.
#[derive(Clone, Default)]
pub struct EventHandle {
    canceled: Rc<Cell<bool>>,
}

impl EventHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.canceled.set(true);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.get()
    }
}

impl fmt::Debug for EventHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandle")
            .field("canceled", &self.is_canceled())
            .finish()
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    /// Run `callback` once, `delay` milliseconds from now
    fn schedule_event(&self, delay: u64, callback: Box<dyn FnOnce()>) -> EventHandle;

    /// Run `callback` every `delay` milliseconds until canceled
    fn cycle_event(&self, delay: u64, callback: EventCallback) -> EventHandle;
}

enum Callback {
    Once(Box<dyn FnOnce()>),
    Cycle(EventCallback),
}

struct ScheduledEvent {
    deadline: u64,
    period: Option<u64>,
    /// Taken out while the callback runs
    callback: Option<Callback>,
    handle: EventHandle,
}

/// Poll-driven timer queue
pub struct TimerDispatcher {
    clock: Rc<dyn Clock>,
    events: RefCell<SlotMap<DefaultKey, ScheduledEvent>>,
}

impl TimerDispatcher {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            events: RefCell::new(SlotMap::new()),
        }
    }

    fn insert(&self, delay: u64, period: Option<u64>, callback: Callback) -> EventHandle {
        let handle = EventHandle::new();
        let deadline = self.clock.now_millis() + delay;
        self.events.borrow_mut().insert(ScheduledEvent {
            deadline,
            period,
            callback: Some(callback),
            handle: handle.clone(),
        });
        handle
    }

    /// Fire every event whose deadline has passed, in deadline order
    ///
    /// Cyclic events fire at most once per poll and are re-armed one period
    /// later. Callbacks may schedule or cancel events. Returns the number of
    /// callbacks run.
    pub fn poll(&self) -> usize {
        let now = self.clock.now_millis();

        let mut due: Vec<(u64, DefaultKey)> = self
            .events
            .borrow()
            .iter()
            .filter(|(_, event)| !event.handle.is_canceled() && event.deadline <= now)
            .map(|(key, event)| (event.deadline, key))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        let mut fired = 0;
        for (_, key) in due {
            let callback = match self.events.borrow_mut().get_mut(key) {
                Some(event) if !event.handle.is_canceled() => event.callback.take(),
                _ => None,
            };

            match callback {
                Some(Callback::Once(callback)) => {
                    self.events.borrow_mut().remove(key);
                    callback();
                }
                Some(Callback::Cycle(mut callback)) => {
                    callback();
                    if let Some(event) = self.events.borrow_mut().get_mut(key) {
                        let period = event.period.unwrap_or(0).max(1);
                        event.deadline += period;
                        if event.deadline <= now {
                            event.deadline = now + period;
                        }
                        event.callback = Some(Callback::Cycle(callback));
                    }
                }
                None => continue,
            }
            fired += 1;
        }

        self.purge_canceled();
        if fired > 0 {
            engine_trace!("offscreen::TimerDispatcher", "Fired {} event(s) at {} ms", fired, now);
        }
        fired
    }

    /// Number of live (not canceled) events
    pub fn pending_count(&self) -> usize {
        self.events
            .borrow()
            .values()
            .filter(|event| !event.handle.is_canceled())
            .count()
    }

    /// Earliest deadline among live events
    pub fn next_deadline(&self) -> Option<u64> {
        self.events
            .borrow()
            .values()
            .filter(|event| !event.handle.is_canceled())
            .map(|event| event.deadline)
            .min()
    }

    /// Cancel and drop every event
    pub fn clear(&self) {
        for (_, event) in self.events.borrow_mut().drain() {
            event.handle.cancel();
        }
    }

    fn purge_canceled(&self) {
        self.events
            .borrow_mut()
            .retain(|_, event| !event.handle.is_canceled());
    }
}

impl EventDispatcher for TimerDispatcher {
    fn schedule_event(&self, delay: u64, callback: Box<dyn FnOnce()>) -> EventHandle {
        self.insert(delay, None, Callback::Once(callback))
    }

    fn cycle_event(&self, delay: u64, callback: EventCallback) -> EventHandle {
        self.insert(delay, Some(delay), Callback::Cycle(callback))
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
