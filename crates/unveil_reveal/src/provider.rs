//! Reveal provider
//!
//! The provider owns one reveal session, the last measured viewport, and one
//! keyframe animation per layer. It renders the caller's content followed by
//! the revealer container, and hands out [`RevealHandle`]s that descendants
//! use to start a transition.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use unveil_reveal::prelude::*;
//!
//! let env = Rc::new(ManualEnvironment::with_viewport(1280.0, 720.0));
//! let provider = RevealProvider::mount(
//!     RevealProps::new()
//!         .preset(Preset::DuoMove)
//!         .direction(Direction::CornerTopLeft)
//!         .on_end(|direction| tracing::info!(%direction, "page revealed")),
//!     env.clone(),
//! )?;
//!
//! // Anywhere below the provider:
//! let reveal = provider.use_reveal();
//! reveal.reveal_with(|| navigate_to("/about"), 750);
//!
//! // Frame loop:
//! env.advance(dt_ms);
//! provider.tick(dt_ms as f32);
//! let view = provider.render(page_content);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use unveil_animation::{KeyframeAnimation, RevealCurve, TimerCallback, TimerId};

use crate::config::{EffectiveConfig, RevealConfig};
use crate::debounce::{Debouncer, RESIZE_DEBOUNCE_MS};
use crate::direction::Direction;
use crate::environment::{Environment, ListenerId};
use crate::error::Result;
use crate::geometry::{
    compute_container_style, layer_style, StyleFragment, ViewportSize, CONTAINER_BASE_CSS,
    LAYER_BASE_CSS,
};
use crate::preset::Preset;
use crate::registry::{MountId, RevealRegistry};
use crate::session::{LayerOutcome, RevealSession, RevealState};

/// Stable identifier of the revealer container, for test harnesses
pub const CONTAINER_TEST_ID: &str = "unveil-page-reveal";

/// Lifecycle callback receiving the provider's direction
pub type DirectionCallback = Rc<dyn Fn(Direction)>;

/// Provider configuration plus lifecycle callbacks
#[derive(Clone, Default)]
pub struct RevealProps {
    pub config: RevealConfig,
    /// Called synchronously whenever a reveal starts
    pub on_start: Option<DirectionCallback>,
    /// Called once every layer of a reveal has finished
    pub on_end: Option<DirectionCallback>,
}

impl RevealProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: RevealConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn preset(mut self, preset: Preset) -> Self {
        self.config.preset = preset;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    pub fn layer_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.layer_colors(colors);
        self
    }

    pub fn on_start(mut self, callback: impl Fn(Direction) + 'static) -> Self {
        self.on_start = Some(Rc::new(callback));
        self
    }

    pub fn on_end(mut self, callback: impl Fn(Direction) + 'static) -> Self {
        self.on_end = Some(Rc::new(callback));
        self
    }
}

struct ProviderState {
    config: EffectiveConfig,
    direction: Direction,
    session: RevealSession,
    viewport: ViewportSize,
    layers: SmallVec<[KeyframeAnimation; 3]>,
    on_start: Option<DirectionCallback>,
    on_end: Option<DirectionCallback>,
}

fn build_layers(preset: Preset) -> SmallVec<[KeyframeAnimation; 3]> {
    preset
        .layer_curves()
        .iter()
        .map(|curve| curve.animation())
        .collect()
}

impl ProviderState {
    fn new(config: EffectiveConfig, props: &RevealProps) -> Self {
        Self {
            session: RevealSession::new(config.layer_count),
            layers: build_layers(config.preset),
            config,
            direction: props.config.direction,
            viewport: ViewportSize::default(),
            on_start: props.on_start.clone(),
            on_end: props.on_end.clone(),
        }
    }
}

/// Start a reveal: enter Animating, restart the layers, swap the completion
/// timer, then notify `on_start` with no borrow held.
fn start_reveal(
    state: &Rc<RefCell<ProviderState>>,
    env: &Rc<dyn Environment>,
    on_complete: Option<TimerCallback>,
    delay_ms: u32,
) {
    let (stale_timer, on_start, direction) = {
        let mut s = state.borrow_mut();
        let stale = s.session.begin();
        for layer in s.layers.iter_mut() {
            layer.start();
        }
        (stale, s.on_start.clone(), s.direction)
    };
    tracing::debug!(%direction, delay_ms, "reveal started");

    if let Some(stale) = stale_timer {
        env.cancel(stale);
    }

    if let Some(on_complete) = on_complete {
        let armed = Rc::new(Cell::new(None::<TimerId>));
        let callback: TimerCallback = {
            let state = Rc::downgrade(state);
            let armed = Rc::clone(&armed);
            Box::new(move || {
                if let (Some(state), Some(id)) = (state.upgrade(), armed.get()) {
                    state.borrow_mut().session.timer_fired(id);
                }
                tracing::trace!("reveal completion callback");
                on_complete();
            })
        };
        let id = env.schedule(delay_ms, callback);
        armed.set(Some(id));
        state.borrow_mut().session.arm(id);
    }

    if let Some(on_start) = on_start {
        on_start(direction);
    }
}

/// Count one finished layer and run `on_end` when it was the last.
fn finish_layer(state: &Rc<RefCell<ProviderState>>, index: usize) {
    let ended = {
        let mut s = state.borrow_mut();
        if !s.session.is_animating() {
            tracing::warn!(index, "layer finished while no reveal is running; ignored");
            return;
        }
        let Some(layer) = s.layers.get_mut(index) else {
            tracing::warn!(index, "layer finished signal for unknown layer; ignored");
            return;
        };
        layer.finish();

        match s.session.layer_finished() {
            LayerOutcome::Completed => {
                for layer in s.layers.iter_mut() {
                    layer.reset();
                }
                Some((s.on_end.clone(), s.direction))
            }
            LayerOutcome::Pending { completed } => {
                tracing::trace!(index, completed, "layer finished");
                None
            }
            LayerOutcome::Ignored => None,
        }
    };

    if let Some((on_end, direction)) = ended {
        tracing::debug!(%direction, "reveal finished");
        if let Some(on_end) = on_end {
            on_end(direction);
        }
    }
}

/// Trigger published to descendants.
///
/// Holds only weak references: once the provider is dropped the handle is
/// inert and `reveal` does nothing.
#[derive(Clone)]
pub struct RevealHandle {
    state: Weak<RefCell<ProviderState>>,
    env: Weak<dyn Environment>,
}

impl RevealHandle {
    /// Start a reveal without a completion callback
    pub fn reveal(&self) {
        self.trigger(None, 0);
    }

    /// Start a reveal and run `on_complete` after `delay_ms`.
    ///
    /// The delay is independent of the animation; a later reveal replaces a
    /// callback that has not fired yet.
    pub fn reveal_with(&self, on_complete: impl FnOnce() + 'static, delay_ms: u32) {
        self.trigger(Some(Box::new(on_complete)), delay_ms);
    }

    fn trigger(&self, on_complete: Option<TimerCallback>, delay_ms: u32) {
        let (Some(state), Some(env)) = (self.state.upgrade(), self.env.upgrade()) else {
            tracing::warn!("reveal requested on an unmounted provider; ignored");
            return;
        };
        start_reveal(&state, &env, on_complete, delay_ms);
    }

    /// Whether the owning provider is still mounted
    pub fn is_mounted(&self) -> bool {
        self.state.strong_count() > 0
    }
}

/// Rendered output: caller content followed by the revealer
pub struct RevealView<C> {
    pub children: C,
    pub revealer: RevealerNode,
}

/// The fixed, full-screen container holding the layers
#[derive(Clone, Debug, PartialEq)]
pub struct RevealerNode {
    pub test_id: &'static str,
    pub is_animating: bool,
    pub style: StyleFragment,
    pub layers: SmallVec<[LayerNode; 3]>,
}

impl RevealerNode {
    /// Inline CSS for the container
    pub fn css(&self) -> String {
        if self.style.is_empty() {
            return CONTAINER_BASE_CSS.to_string();
        }
        format!("{CONTAINER_BASE_CSS} {}", self.style)
    }
}

/// One colored layer
#[derive(Clone, Debug, PartialEq)]
pub struct LayerNode {
    pub index: usize,
    pub color: String,
    /// Keyframe set the styling engine should play; `None` while idle
    pub curve: Option<RevealCurve>,
    /// Current offset from the built-in animator
    pub style: StyleFragment,
}

impl LayerNode {
    /// Inline CSS for the layer
    pub fn css(&self) -> String {
        format!("{LAYER_BASE_CSS} background: {}; {}", self.color, self.style)
    }
}

/// Owner of a reveal session.
///
/// Dropping the provider unsubscribes from resize notifications, cancels the
/// pending resize and completion timers, and unregisters it.
pub struct RevealProvider {
    state: Rc<RefCell<ProviderState>>,
    env: Rc<dyn Environment>,
    config: RevealConfig,
    resize: Rc<Debouncer>,
    resize_listener: ListenerId,
    registration: Option<(RevealRegistry, MountId)>,
}

impl RevealProvider {
    /// Mount a provider. Fails when the layer colors don't fit the preset.
    pub fn mount<E: Environment + 'static>(props: RevealProps, env: Rc<E>) -> Result<Self> {
        let env: Rc<dyn Environment> = env;
        let effective = props.config.resolve()?;
        let state = Rc::new(RefCell::new(ProviderState::new(effective, &props)));

        let resize = Rc::new(Debouncer::new(&env, RESIZE_DEBOUNCE_MS, {
            let state = Rc::downgrade(&state);
            let env = Rc::downgrade(&env);
            move || {
                let (Some(state), Some(env)) = (state.upgrade(), env.upgrade()) else {
                    return;
                };
                let viewport = env.viewport_size();
                state.borrow_mut().viewport = viewport;
                tracing::debug!(
                    width = viewport.width,
                    height = viewport.height,
                    "viewport measured"
                );
            }
        }));

        let resize_listener = env.subscribe_resize({
            let resize = Rc::downgrade(&resize);
            Rc::new(move || {
                if let Some(resize) = resize.upgrade() {
                    resize.trigger();
                }
            })
        });
        // First measurement goes through the same quiet window.
        resize.trigger();

        tracing::debug!(
            preset = %props.config.preset,
            direction = %props.config.direction,
            "reveal provider mounted"
        );

        Ok(Self {
            state,
            env,
            config: props.config,
            resize,
            resize_listener,
            registration: None,
        })
    }

    /// Mount a provider and publish its trigger in `registry`
    pub fn mount_in<E: Environment + 'static>(
        props: RevealProps,
        env: Rc<E>,
        registry: &RevealRegistry,
    ) -> Result<Self> {
        let mut provider = Self::mount(props, env)?;
        let id = registry.register(provider.use_reveal());
        provider.registration = Some((registry.clone(), id));
        Ok(provider)
    }

    /// Registry key, when mounted with [`RevealProvider::mount_in`]
    pub fn mount_id(&self) -> Option<MountId> {
        self.registration.as_ref().map(|(_, id)| *id)
    }

    /// Trigger for descendants
    pub fn use_reveal(&self) -> RevealHandle {
        RevealHandle {
            state: Rc::downgrade(&self.state),
            env: Rc::downgrade(&self.env),
        }
    }

    /// Apply new props.
    ///
    /// The color override is re-validated only when the preset or the colors
    /// changed. Switching presets drops any running reveal back to Idle
    /// without calling `on_end`.
    pub fn update(&mut self, props: RevealProps) -> Result<()> {
        let preset_changed = props.config.preset != self.config.preset;
        let colors_changed = props.config.layer_colors != self.config.layer_colors;

        let mut s = self.state.borrow_mut();
        if preset_changed || colors_changed {
            let effective = props.config.resolve()?;
            if preset_changed {
                tracing::debug!(
                    from = %self.config.preset,
                    to = %effective.preset,
                    "preset changed; reveal session reset"
                );
                s.session.reset(effective.layer_count);
                s.layers = build_layers(effective.preset);
            }
            s.config = effective;
        }
        s.direction = props.config.direction;
        s.on_start = props.on_start;
        s.on_end = props.on_end;
        drop(s);

        self.config = props.config;
        Ok(())
    }

    /// Deliver a "layer animation finished" signal from the styling engine
    pub fn on_layer_animation_end(&self, index: usize) {
        finish_layer(&self.state, index);
    }

    /// Advance the built-in layer animator by `dt_ms`.
    ///
    /// Layers that finish during this tick report completion exactly as an
    /// external styling engine would.
    pub fn tick(&self, dt_ms: f32) {
        let finished: SmallVec<[usize; 3]> = self
            .state
            .borrow_mut()
            .layers
            .iter_mut()
            .enumerate()
            .filter_map(|(index, layer)| layer.tick(dt_ms).then_some(index))
            .collect();

        for index in finished {
            finish_layer(&self.state, index);
        }
    }

    /// Render the caller's content together with the revealer
    pub fn render<C>(&self, children: C) -> RevealView<C> {
        let s = self.state.borrow();
        let is_animating = s.session.is_animating();
        let curves = s.config.preset.layer_curves();

        let layers = s
            .config
            .layer_colors
            .iter()
            .enumerate()
            .map(|(index, color)| {
                let translate_y = s
                    .layers
                    .get(index)
                    .map(|layer| layer.current_translate_y())
                    .unwrap_or(0.0);
                LayerNode {
                    index,
                    color: color.clone(),
                    curve: if is_animating {
                        curves.get(index).copied()
                    } else {
                        None
                    },
                    style: layer_style(translate_y),
                }
            })
            .collect();

        RevealView {
            children,
            revealer: RevealerNode {
                test_id: CONTAINER_TEST_ID,
                is_animating,
                style: compute_container_style(
                    s.direction,
                    is_animating,
                    s.viewport.width,
                    s.viewport.height,
                ),
                layers,
            },
        }
    }

    pub fn state(&self) -> RevealState {
        self.state.borrow().session.state()
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().session.is_animating()
    }

    /// Layers finished so far in the running reveal
    pub fn completed_layers(&self) -> usize {
        self.state.borrow().session.completed_layers()
    }

    /// Whether a completion callback is waiting to fire
    pub fn has_pending_callback(&self) -> bool {
        self.state.borrow().session.pending_timer().is_some()
    }

    /// Last measured viewport
    pub fn viewport(&self) -> ViewportSize {
        self.state.borrow().viewport
    }

    pub fn direction(&self) -> Direction {
        self.state.borrow().direction
    }

    pub fn effective_config(&self) -> EffectiveConfig {
        self.state.borrow().config.clone()
    }
}

impl Drop for RevealProvider {
    fn drop(&mut self) {
        self.env.unsubscribe_resize(self.resize_listener);
        self.resize.cancel();

        let pending = self.state.borrow_mut().session.take_timer();
        if let Some(timer) = pending {
            self.env.cancel(timer);
        }

        if let Some((registry, id)) = self.registration.take() {
            registry.unregister(id);
        }
        tracing::debug!("reveal provider unmounted");
    }
}
