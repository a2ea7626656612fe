//! Unveil Animation
//!
//! Timing primitives behind the page reveal transitions.
//!
//! # Features
//!
//! - **Easing**: CSS-compatible cubic-bezier timing functions
//! - **Keyframe Tracks**: vertical sweep keyframes with per-segment easing and
//!   hold plateaus
//! - **Reveal Curves**: the fixed keyframe table every reveal layer plays
//! - **Timer Queue**: tick-driven delayed callbacks with cancellation

pub mod curves;
pub mod easing;
pub mod keyframe;
pub mod scheduler;

pub use curves::{RevealCurve, REVEAL_DURATION_MS};
pub use easing::Easing;
pub use keyframe::{FillMode, Keyframe, KeyframeAnimation};
pub use scheduler::{TimerCallback, TimerId, TimerScheduler};
