//! Reveal state machine
//!
//! ```text
//!            reveal()                       layer_finished() × layer_count
//!   Idle ─────────────────▶ Animating ─────────────────────────────────▶ Idle
//!                            │    ▲
//!                            └────┘ reveal(): counter reset, animation restarted
//! ```
//!
//! The machine is pure bookkeeping. It never invokes callbacks or touches
//! timers itself; it reports what happened and the owner performs the side
//! effects once it has released its own borrows.

use unveil_animation::TimerId;

/// Phase of the reveal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Idle,
    Animating,
}

/// Result of feeding one layer-finished signal to the machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerOutcome {
    /// No reveal in progress; the signal was dropped
    Ignored,
    /// Counted, more layers still running
    Pending { completed: usize },
    /// Last layer finished; the machine is back to Idle
    Completed,
}

/// Per-provider reveal bookkeeping
#[derive(Debug)]
pub struct RevealSession {
    layer_count: usize,
    state: RevealState,
    completed_layers: usize,
    pending_timer: Option<TimerId>,
}

impl RevealSession {
    pub fn new(layer_count: usize) -> Self {
        Self {
            layer_count,
            state: RevealState::Idle,
            completed_layers: 0,
            pending_timer: None,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == RevealState::Animating
    }

    pub fn completed_layers(&self) -> usize {
        self.completed_layers
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending_timer
    }

    /// Enter `Animating`, restarting the layer count.
    ///
    /// Returns the previously armed completion timer, which the caller must
    /// cancel.
    pub fn begin(&mut self) -> Option<TimerId> {
        if self.is_animating() {
            tracing::debug!(
                completed = self.completed_layers,
                layer_count = self.layer_count,
                "reveal restarted mid-animation"
            );
        }
        self.state = RevealState::Animating;
        self.completed_layers = 0;
        self.pending_timer.take()
    }

    /// Record the completion timer armed for the current reveal
    pub fn arm(&mut self, timer: TimerId) {
        self.pending_timer = Some(timer);
    }

    /// Forget the completion timer once it has fired
    pub fn timer_fired(&mut self, timer: TimerId) {
        if self.pending_timer == Some(timer) {
            self.pending_timer = None;
        }
    }

    /// Take the completion timer for cancellation (teardown)
    pub fn take_timer(&mut self) -> Option<TimerId> {
        self.pending_timer.take()
    }

    /// Count one finished layer
    pub fn layer_finished(&mut self) -> LayerOutcome {
        if !self.is_animating() {
            return LayerOutcome::Ignored;
        }

        self.completed_layers += 1;
        if self.completed_layers >= self.layer_count {
            self.state = RevealState::Idle;
            self.completed_layers = 0;
            LayerOutcome::Completed
        } else {
            LayerOutcome::Pending {
                completed: self.completed_layers,
            }
        }
    }

    /// Drop back to Idle with a new layer count, keeping the armed timer
    pub fn reset(&mut self, layer_count: usize) {
        self.layer_count = layer_count;
        self.state = RevealState::Idle;
        self.completed_layers = 0;
    }
}
