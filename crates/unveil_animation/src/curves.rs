//! Reveal curves
//!
//! The fixed keyframe table played by reveal layers. Every curve sweeps a
//! layer from its resting place (0%) across the viewport (-100%, where it
//! fully covers the page) and out the far side (-200%). Curves differ in how
//! long they hold the covering position and in their timing functions, which
//! is what staggers the layers of the multi-layer presets.

use crate::easing::Easing;
use crate::keyframe::KeyframeAnimation;

/// Duration of every reveal curve
pub const REVEAL_DURATION_MS: u32 = 1500;

const COVER: f32 = -100.0;
const EXIT: f32 = -200.0;

/// One entry of the reveal curve table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealCurve {
    /// Single layer, fast-in ease-out sweep
    Sweep,
    /// First layer of the two-layer move
    DuoLead,
    /// Second layer of the two-layer move, starts late and leaves early
    DuoTrail,
    /// First layer of the three-layer woosh
    WooshLead,
    /// Middle layer of the three-layer woosh
    WooshMiddle,
    /// Last layer of the three-layer woosh, jumps straight through
    WooshTrail,
    /// Backdrop layer of the content move
    ContentBack,
    /// Middle layer of the content move
    ContentMiddle,
    /// Front layer of the content move
    ContentFront,
}

impl RevealCurve {
    /// All curves in table order
    pub fn all() -> &'static [RevealCurve] {
        const CURVES: [RevealCurve; 9] = [
            RevealCurve::Sweep,
            RevealCurve::DuoLead,
            RevealCurve::DuoTrail,
            RevealCurve::WooshLead,
            RevealCurve::WooshMiddle,
            RevealCurve::WooshTrail,
            RevealCurve::ContentBack,
            RevealCurve::ContentMiddle,
            RevealCurve::ContentFront,
        ];
        &CURVES
    }

    /// Stable keyframe-set name, usable as a CSS `@keyframes` identifier
    pub fn name(self) -> &'static str {
        match self {
            Self::Sweep => "unveil-sweep",
            Self::DuoLead => "unveil-duo-lead",
            Self::DuoTrail => "unveil-duo-trail",
            Self::WooshLead => "unveil-woosh-lead",
            Self::WooshMiddle => "unveil-woosh-middle",
            Self::WooshTrail => "unveil-woosh-trail",
            Self::ContentBack => "unveil-content-back",
            Self::ContentMiddle => "unveil-content-middle",
            Self::ContentFront => "unveil-content-front",
        }
    }

    /// Animation-wide timing function for a layer playing this curve
    pub fn timing(self) -> Easing {
        match self {
            Self::Sweep => Easing::cubic_bezier(0.2, 1.0, 0.3, 1.0),
            Self::DuoLead | Self::DuoTrail => Easing::cubic_bezier(0.7, 0.0, 0.3, 1.0),
            Self::WooshLead | Self::WooshMiddle | Self::WooshTrail | Self::ContentBack => {
                Easing::cubic_bezier(0.55, 0.055, 0.675, 0.19)
            }
            Self::ContentMiddle => Easing::cubic_bezier(0.895, 0.03, 0.685, 0.22),
            Self::ContentFront => Easing::cubic_bezier(0.755, 0.05, 0.855, 0.06),
        }
    }

    /// Build a fresh, stopped animation for this curve
    pub fn animation(self) -> KeyframeAnimation {
        let anim = KeyframeAnimation::new(REVEAL_DURATION_MS, self.timing());

        match self {
            Self::Sweep => anim
                .keyframe(0.0, 0.0)
                .hold(0.35, 0.65, COVER, None)
                .keyframe(1.0, EXIT),

            Self::DuoLead => {
                let ease = Easing::cubic_bezier(0.7, 0.0, 0.3, 1.0);
                anim.keyframe(0.0, 0.0)
                    .hold(0.30, 0.70, COVER, Some(ease))
                    .keyframe(1.0, EXIT)
            }

            Self::DuoTrail => {
                let ease = Easing::cubic_bezier(0.7, 0.0, 0.3, 1.0);
                anim.hold(0.0, 0.145, 0.0, None)
                    .hold(0.375, 0.625, COVER, Some(ease))
                    .hold(0.855, 1.0, EXIT, None)
            }

            Self::WooshLead => {
                let ease = Easing::cubic_bezier(0.215, 0.61, 0.355, 1.0);
                anim.keyframe(0.0, 0.0)
                    .hold(0.25, 0.75, COVER, Some(ease))
                    .keyframe(1.0, EXIT)
            }

            Self::WooshMiddle => {
                let ease = Easing::cubic_bezier(0.215, 0.61, 0.355, 1.0);
                anim.hold(0.0, 0.125, 0.0, None)
                    .hold(0.375, 0.625, COVER, Some(ease))
                    .hold(0.875, 1.0, EXIT, None)
            }

            Self::WooshTrail => {
                let ease = Easing::cubic_bezier(0.645, 0.045, 0.355, 1.0);
                anim.hold(0.0, 0.25, 0.0, Some(ease))
                    .hold(0.75, 1.0, EXIT, None)
            }

            Self::ContentBack => {
                let ease = Easing::cubic_bezier(0.215, 0.61, 0.355, 1.0);
                anim.keyframe(0.0, 0.0)
                    .hold(0.35, 0.65, COVER, Some(ease))
                    .keyframe(1.0, EXIT)
            }

            Self::ContentMiddle => {
                let ease = Easing::cubic_bezier(0.165, 0.84, 0.44, 1.0);
                anim.keyframe(0.0, 0.0)
                    .hold(0.45, 0.55, COVER, Some(ease))
                    .keyframe(1.0, EXIT)
            }

            Self::ContentFront => {
                let ease = Easing::cubic_bezier(0.23, 1.0, 0.32, 1.0);
                anim.keyframe(0.0, 0.0)
                    .hold(0.45, 0.55, COVER, Some(ease))
                    .keyframe(1.0, EXIT)
            }
        }
    }
}
