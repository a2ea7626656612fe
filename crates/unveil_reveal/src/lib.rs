//! Unveil Reveal
//!
//! Full-screen, multi-layer page reveal transitions. A provider wraps page
//! content, owns the reveal state, and exposes a trigger to descendants;
//! calling it sweeps one to three colored layers across the viewport from a
//! configurable direction.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use unveil_reveal::prelude::*;
//!
//! let env = Rc::new(ManualEnvironment::with_viewport(1280.0, 720.0));
//! let provider = RevealProvider::mount(
//!     RevealProps::new().preset(Preset::TripleWoosh).direction(Direction::Top),
//!     env.clone(),
//! )?;
//!
//! provider.use_reveal().reveal();
//! ```
//!
//! # Modules
//!
//! - [`preset`]: the four effect presets and their default colors
//! - [`direction`]: the eight sweep directions
//! - [`config`]: layer color validation and TOML config loading
//! - [`geometry`]: container placement for each direction
//! - [`session`]: the Idle/Animating state machine
//! - [`provider`]: provider, trigger handle, and rendered output
//! - [`registry`]: mount-scoped lookup of reveal triggers
//! - [`environment`]: the host services a provider consumes

pub mod config;
pub mod debounce;
pub mod direction;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod preset;
pub mod provider;
pub mod registry;
pub mod session;

pub use config::{layer_colors_from_value, resolve, EffectiveConfig, LayerColors, RevealConfig};
pub use debounce::{Debouncer, RESIZE_DEBOUNCE_MS};
pub use direction::Direction;
pub use environment::{Environment, ListenerId, ManualEnvironment, ResizeListener};
pub use error::{InvalidConfigError, Result};
pub use geometry::{
    compute_container_style, diagonal_style, layer_style, structural_style, Length,
    StyleFragment, Transform, TransformOp, ViewportSize,
};
pub use preset::{lookup, Preset, PresetConfig};
pub use provider::{
    DirectionCallback, LayerNode, RevealHandle, RevealProps, RevealProvider, RevealView,
    RevealerNode, CONTAINER_TEST_ID,
};
pub use registry::{MountId, RevealRegistry};
pub use session::{LayerOutcome, RevealSession, RevealState};

pub use unveil_animation::{RevealCurve, REVEAL_DURATION_MS};

pub mod prelude {
    pub use crate::config::RevealConfig;
    pub use crate::direction::Direction;
    pub use crate::environment::{Environment, ManualEnvironment};
    pub use crate::error::InvalidConfigError;
    pub use crate::preset::Preset;
    pub use crate::provider::{RevealHandle, RevealProps, RevealProvider};
    pub use crate::registry::{MountId, RevealRegistry};
    pub use crate::session::RevealState;
}
