//! Timer scheduler
//!
//! A tick-driven queue of delayed, cancelable callbacks. Time only moves when
//! the owner advances it, so a frame loop and a test harness drive it the
//! same way.
//!
//! The scheduler never runs callbacks itself: callers pop due timers one at a
//! time with [`TimerScheduler::pop_due`] and invoke them after releasing any
//! borrow of the scheduler, which lets a callback schedule or cancel timers.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scheduled callback
    pub struct TimerId;
}

/// Callback run when a timer fires
pub type TimerCallback = Box<dyn FnOnce()>;

struct PendingTimer {
    due_ms: f64,
    /// Insertion order, breaks ties between timers due at the same instant
    seq: u64,
    callback: TimerCallback,
}

/// Queue of delayed callbacks on a virtual clock
pub struct TimerScheduler {
    timers: SlotMap<TimerId, PendingTimer>,
    now_ms: f64,
    next_seq: u64,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now_ms: 0.0,
            next_seq: 0,
        }
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule `callback` to run `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u32, callback: TimerCallback) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.timers.insert(PendingTimer {
            due_ms: self.now_ms + delay_ms as f64,
            seq,
            callback,
        });
        tracing::trace!(?id, delay_ms, "timer scheduled");
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(id).is_some();
        if removed {
            tracing::trace!(?id, "timer cancelled");
        }
        removed
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of timers waiting to fire
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Remove the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to that timer's due time, so callbacks that schedule
    /// follow-up timers measure their delay from the right instant.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<(TimerId, TimerCallback)> {
        let (id, _) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))?;

        let timer = self.timers.remove(id)?;
        self.now_ms = self.now_ms.max(timer.due_ms);
        tracing::trace!(?id, at_ms = self.now_ms, "timer due");
        Some((id, timer.callback))
    }

    /// Move the clock forward to `until_ms` (never backwards)
    pub fn advance_to(&mut self, until_ms: f64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> TimerCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let log = Rc::clone(&log);
            move |name: &'static str| -> TimerCallback {
                let log = Rc::clone(&log);
                Box::new(move || log.borrow_mut().push(name))
            }
        };
        (log, make)
    }

    fn drain(scheduler: &mut TimerScheduler, until_ms: f64) {
        while let Some((_, callback)) = scheduler.pop_due(until_ms) {
            callback();
        }
        scheduler.advance_to(until_ms);
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let (log, make) = recorder();
        let mut scheduler = TimerScheduler::new();
        scheduler.schedule(300, make("late"));
        scheduler.schedule(100, make("early"));
        scheduler.schedule(100, make("early-second"));

        drain(&mut scheduler, 50.0);
        assert!(log.borrow().is_empty());

        drain(&mut scheduler, 1000.0);
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.now_ms(), 1000.0);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let (log, make) = recorder();
        let mut scheduler = TimerScheduler::new();
        let id = scheduler.schedule(100, make("cancelled"));
        assert!(scheduler.is_pending(id));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        drain(&mut scheduler, 500.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_delay_is_measured_from_current_time() {
        let (log, make) = recorder();
        let mut scheduler = TimerScheduler::new();
        drain(&mut scheduler, 200.0);
        scheduler.schedule(100, make("t"));

        drain(&mut scheduler, 250.0);
        assert!(log.borrow().is_empty());
        drain(&mut scheduler, 300.0);
        assert_eq!(*log.borrow(), vec!["t"]);
    }

    #[test]
    fn test_zero_delay_waits_for_next_advance() {
        let (log, make) = recorder();
        let mut scheduler = TimerScheduler::new();
        scheduler.schedule(0, make("now"));
        assert!(log.borrow().is_empty());
        drain(&mut scheduler, 0.0);
        assert_eq!(*log.borrow(), vec!["now"]);
    }
}
