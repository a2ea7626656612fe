//! Host environment contract
//!
//! Everything a provider needs from the outside world: the viewport size,
//! resize notifications, and delayed callbacks. Hosts implement
//! [`Environment`] over their windowing and timer services; frame-loop hosts
//! and tests can use [`ManualEnvironment`], which runs on a virtual clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};
use unveil_animation::{TimerCallback, TimerId, TimerScheduler};

use crate::geometry::ViewportSize;

new_key_type! {
    /// Handle to a resize subscription
    pub struct ListenerId;
}

/// Called after the viewport changed size
pub type ResizeListener = Rc<dyn Fn()>;

/// Services a reveal provider consumes from its host.
///
/// All calls happen on the UI thread. `schedule` must never run the
/// callback synchronously.
pub trait Environment {
    /// Current viewport dimensions
    fn viewport_size(&self) -> ViewportSize;

    fn subscribe_resize(&self, listener: ResizeListener) -> ListenerId;

    fn unsubscribe_resize(&self, id: ListenerId);

    /// Run `callback` once, `delay_ms` from now
    fn schedule(&self, delay_ms: u32, callback: TimerCallback) -> TimerId;

    /// Cancel a scheduled callback; unknown or fired ids are ignored
    fn cancel(&self, id: TimerId);
}

/// Environment on a virtual clock, advanced explicitly by the host.
pub struct ManualEnvironment {
    viewport: Cell<ViewportSize>,
    timers: RefCell<TimerScheduler>,
    listeners: RefCell<SlotMap<ListenerId, ResizeListener>>,
}

impl ManualEnvironment {
    pub fn new() -> Self {
        Self::with_viewport(0.0, 0.0)
    }

    pub fn with_viewport(width: f32, height: f32) -> Self {
        Self {
            viewport: Cell::new(ViewportSize::new(width, height)),
            timers: RefCell::new(TimerScheduler::new()),
            listeners: RefCell::new(SlotMap::with_key()),
        }
    }

    /// Change the viewport size and notify every resize listener
    pub fn resize(&self, width: f32, height: f32) {
        self.viewport.set(ViewportSize::new(width, height));

        let listeners: Vec<ResizeListener> = self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener();
        }
    }

    /// Advance the clock by `dt_ms`, firing due timers in order.
    pub fn advance(&self, dt_ms: f64) {
        let until = self.now_ms() + dt_ms.max(0.0);
        loop {
            // The scheduler borrow ends before the callback runs.
            let due = self.timers.borrow_mut().pop_due(until);
            match due {
                Some((_, callback)) => callback(),
                None => break,
            }
        }
        self.timers.borrow_mut().advance_to(until);
    }

    pub fn now_ms(&self) -> f64 {
        self.timers.borrow().now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().pending_count()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Default for ManualEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for ManualEnvironment {
    fn viewport_size(&self) -> ViewportSize {
        self.viewport.get()
    }

    fn subscribe_resize(&self, listener: ResizeListener) -> ListenerId {
        self.listeners.borrow_mut().insert(listener)
    }

    fn unsubscribe_resize(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(id);
    }

    fn schedule(&self, delay_ms: u32, callback: TimerCallback) -> TimerId {
        self.timers.borrow_mut().schedule(delay_ms, callback)
    }

    fn cancel(&self, id: TimerId) {
        self.timers.borrow_mut().cancel(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callbacks_may_schedule_follow_ups() {
        let env = Rc::new(ManualEnvironment::new());
        let fired = Rc::new(Cell::new(0));

        let chained = {
            let env = Rc::clone(&env);
            let fired = Rc::clone(&fired);
            Box::new(move || {
                fired.set(fired.get() + 1);
                let fired = Rc::clone(&fired);
                env.schedule(50, Box::new(move || fired.set(fired.get() + 1)));
            })
        };
        env.schedule(100, chained);

        env.advance(120.0);
        assert_eq!(fired.get(), 1);
        env.advance(30.0);
        assert_eq!(fired.get(), 2);
        assert_eq!(env.now_ms(), 150.0);
    }

    #[test]
    fn test_resize_notifies_until_unsubscribed() {
        let env = ManualEnvironment::new();
        let calls = Rc::new(Cell::new(0));
        let id = env.subscribe_resize({
            let calls = Rc::clone(&calls);
            Rc::new(move || calls.set(calls.get() + 1))
        });

        env.resize(800.0, 600.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(env.viewport_size(), ViewportSize::new(800.0, 600.0));

        env.unsubscribe_resize(id);
        env.resize(1024.0, 768.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(env.listener_count(), 0);
    }
}
