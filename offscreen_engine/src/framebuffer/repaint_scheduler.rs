/// Repaint scheduler - decides when a framebuffer is due for a redraw
///
/// Callers ask for repaints with `schedule_painting(delay)`. Requests that
/// share the exact same delay share one cyclic timer (a *bucket*); each
/// caller later withdraws with `remove_rendering_time(delay)` and the timer
/// is canceled when the last interest goes away.
///
/// The render loop polls `can_update(now)`. Under the coalescing policy a
/// redraw is due when requests are pending and at least `flush_time()`
/// milliseconds passed since the last release; the flush interval grows
/// with request pressure so bursts get batched.

use std::cell::Cell;
use std::rc::{Rc, Weak};
use rustc_hash::FxHashMap;

use crate::{engine_debug, engine_trace};
use crate::time::{EventDispatcher, EventHandle};
use super::repaint_config::{FlushControl, RepaintConfig, SchedulePolicy, TimerAction};

const SOURCE: &str = "offscreen::RepaintScheduler";

/// State reachable from armed timer callbacks
#[derive(Debug, Default)]
struct RepaintState {
    force_update: Cell<bool>,
    request_amount: Cell<u32>,
}

impl RepaintState {
    fn update(&self, policy: SchedulePolicy) {
        if policy == SchedulePolicy::Coalescing {
            self.request_amount.set(self.request_amount.get().saturating_add(1));
        }
    }

    fn apply(&self, action: TimerAction, policy: SchedulePolicy) {
        match action {
            TimerAction::Force => self.force_update.set(true),
            TimerAction::Update => self.update(policy),
        }
    }
}

/// Per-delay timer bucket
///
/// `Armed` always holds a live handle and a non-zero count. `Idle` buckets
/// only exist transiently while arming; withdrawn buckets leave the map.
#[derive(Debug, Default)]
enum TimerBucket {
    #[default]
    Idle,
    Armed { count: u32, handle: EventHandle },
}

pub struct RepaintScheduler {
    config: RepaintConfig,
    state: Rc<RepaintState>,
    last_rendered_time: u64,
    buckets: FxHashMap<u16, TimerBucket>,
}

impl RepaintScheduler {
    /// Create an idle scheduler whose redraw timer starts at `now`
    pub fn new(config: RepaintConfig, now: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid repaint config: {:?}", config);
        Self {
            config,
            state: Rc::new(RepaintState::default()),
            last_rendered_time: now,
            buckets: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &RepaintConfig {
        &self.config
    }

    /// Whether a redraw is due at `now`
    pub fn can_update(&self, now: u64) -> bool {
        if self.state.force_update.get() {
            return true;
        }
        let elapsed = now.saturating_sub(self.last_rendered_time);
        let flushed = elapsed >= u64::from(self.flush_time());
        match self.config.policy {
            SchedulePolicy::Coalescing => self.state.request_amount.get() > 0 && flushed,
            SchedulePolicy::Simple => flushed,
        }
    }

    /// Register one pending repaint request (coalescing policy only)
    pub fn update(&mut self) {
        self.state.update(self.config.policy);
    }

    /// Current flush interval in milliseconds
    pub fn flush_time(&self) -> u16 {
        Self::flush_time_for(&self.config, self.state.request_amount.get())
    }

    /// Flush interval for `request_amount` pending requests
    ///
    /// `min(MIN + request_amount / FLUSH_AMOUNT, MAX)` with dynamic flush
    /// control, `MIN` otherwise.
    pub fn flush_time_for(config: &RepaintConfig, request_amount: u32) -> u16 {
        match config.flush_control {
            FlushControl::Fixed => config.min_time_update,
            FlushControl::Dynamic => {
                let divisor = u32::from(config.flush_amount.max(1));
                let grown = u32::from(config.min_time_update) + request_amount / divisor;
                grown.min(u32::from(config.max_time_update)) as u16
            }
        }
    }

    /// Ask for a repaint `delay` milliseconds from now, and every `delay`
    /// milliseconds after that until `remove_rendering_time(delay)`
    ///
    /// - `0`, or scheduling disabled: ignored
    /// - `force_update_delay`: next poll is due
    /// - `<= min_time_update`: one immediate request
    /// - otherwise: joins (or arms) the timer bucket for exactly `delay`
    pub fn schedule_painting(&mut self, dispatcher: &dyn EventDispatcher, delay: u16) {
        if !self.config.scheduling_enabled() || delay == 0 {
            return;
        }

        if delay == self.config.force_update_delay {
            self.state.force_update.set(true);
            return;
        }

        if delay <= self.config.min_time_update {
            self.update();
            return;
        }

        let bucket = self.buckets.entry(delay).or_default();
        match bucket {
            TimerBucket::Armed { count, .. } => *count += 1,
            TimerBucket::Idle => {
                let handle = Self::arm(&self.state, &self.config, dispatcher, delay);
                *bucket = TimerBucket::Armed { count: 1, handle };
                engine_debug!(SOURCE, "Armed repaint timer every {} ms", delay);
            }
        }
    }

    /// The action is captured now; later config changes do not affect armed timers
    fn arm(
        state: &Rc<RepaintState>,
        config: &RepaintConfig,
        dispatcher: &dyn EventDispatcher,
        delay: u16,
    ) -> EventHandle {
        let weak: Weak<RepaintState> = Rc::downgrade(state);
        let action = config.timer_action;
        let policy = config.policy;
        dispatcher.cycle_event(
            u64::from(delay),
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    engine_trace!(SOURCE, "Repaint timer fired ({} ms)", delay);
                    state.apply(action, policy);
                }
            }),
        )
    }

    /// Withdraw one interest in the `delay` bucket
    ///
    /// The timer is canceled when the last interest is withdrawn. Extra
    /// calls are ignored.
    pub fn remove_rendering_time(&mut self, delay: u16) {
        let Some(TimerBucket::Armed { count, handle }) = self.buckets.get_mut(&delay) else {
            return;
        };
        *count -= 1;
        if *count == 0 {
            handle.cancel();
            self.buckets.remove(&delay);
            engine_debug!(SOURCE, "Canceled repaint timer every {} ms", delay);
        }
    }

    /// Back to idle: no force flag, no pending requests, timer restarted at `now`
    pub fn restart(&mut self, now: u64) {
        self.state.force_update.set(false);
        self.state.request_amount.set(0);
        self.last_rendered_time = now;
    }

    pub fn is_force_update(&self) -> bool {
        self.state.force_update.get()
    }

    pub fn request_amount(&self) -> u32 {
        self.state.request_amount.get()
    }

    pub fn last_rendered_time(&self) -> u64 {
        self.last_rendered_time
    }

    /// Number of callers sharing the `delay` bucket
    pub fn bucket_count(&self, delay: u16) -> u32 {
        match self.buckets.get(&delay) {
            Some(TimerBucket::Armed { count, .. }) => *count,
            _ => 0,
        }
    }

    /// Number of live timers owned by this scheduler
    pub fn armed_timer_count(&self) -> usize {
        self.buckets
            .values()
            .filter(|bucket| matches!(bucket, TimerBucket::Armed { .. }))
            .count()
    }
}

impl Drop for RepaintScheduler {
    fn drop(&mut self) {
        for bucket in self.buckets.values() {
            if let TimerBucket::Armed { handle, .. } = bucket {
                handle.cancel();
            }
        }
    }
}

#[cfg(test)]
#[path = "repaint_scheduler_tests.rs"]
mod tests;
