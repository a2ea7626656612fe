//! Debounced actions
//!
//! A single-slot pending operation: every `trigger()` cancels the pending
//! run and arms a new one, so a burst of triggers collapses into one run
//! after the quiet window.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use unveil_animation::TimerId;

use crate::environment::Environment;

/// Quiet window for viewport resize bursts
pub const RESIZE_DEBOUNCE_MS: u32 = 100;

/// Coalesces bursts of triggers into one delayed action.
///
/// Dropping the debouncer cancels any pending run.
pub struct Debouncer {
    env: Weak<dyn Environment>,
    window_ms: u32,
    pending: Rc<Cell<Option<TimerId>>>,
    action: Rc<dyn Fn()>,
}

impl Debouncer {
    pub fn new(env: &Rc<dyn Environment>, window_ms: u32, action: impl Fn() + 'static) -> Self {
        Self {
            env: Rc::downgrade(env),
            window_ms,
            pending: Rc::new(Cell::new(None)),
            action: Rc::new(action),
        }
    }

    /// (Re)arm the action `window_ms` from now
    pub fn trigger(&self) {
        let Some(env) = self.env.upgrade() else {
            return;
        };
        if let Some(stale) = self.pending.take() {
            env.cancel(stale);
        }

        let pending = Rc::clone(&self.pending);
        let action = Rc::clone(&self.action);
        let id = env.schedule(
            self.window_ms,
            Box::new(move || {
                pending.set(None);
                action();
            }),
        );
        self.pending.set(Some(id));
    }

    /// Drop the pending run, if any
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(env) = self.env.upgrade() {
                env.cancel(id);
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::ManualEnvironment;

    fn setup() -> (Rc<ManualEnvironment>, Rc<Cell<u32>>, Debouncer) {
        let manual = Rc::new(ManualEnvironment::new());
        let env: Rc<dyn Environment> = manual.clone();
        let runs = Rc::new(Cell::new(0));
        let debouncer = Debouncer::new(&env, RESIZE_DEBOUNCE_MS, {
            let runs = Rc::clone(&runs);
            move || runs.set(runs.get() + 1)
        });
        (manual, runs, debouncer)
    }

    #[test]
    fn test_burst_collapses_into_one_run() {
        let (env, runs, debouncer) = setup();
        for _ in 0..5 {
            debouncer.trigger();
            env.advance(40.0);
        }
        assert_eq!(runs.get(), 0);
        assert!(debouncer.is_pending());

        env.advance(60.0);
        assert_eq!(runs.get(), 1);
        assert!(!debouncer.is_pending());
        assert_eq!(env.pending_timers(), 0);
    }

    #[test]
    fn test_runs_after_quiet_window() {
        let (env, runs, debouncer) = setup();
        debouncer.trigger();
        env.advance(99.0);
        assert_eq!(runs.get(), 0);
        env.advance(1.0);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_drop_cancels_pending_run() {
        let (env, runs, debouncer) = setup();
        debouncer.trigger();
        drop(debouncer);
        assert_eq!(env.pending_timers(), 0);
        env.advance(500.0);
        assert_eq!(runs.get(), 0);
    }
}
