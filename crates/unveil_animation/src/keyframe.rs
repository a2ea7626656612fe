//! Keyframe animations
//!
//! A reveal layer only ever moves along its own vertical axis (the container
//! is rotated to pick the sweep direction), so a keyframe carries a single
//! `translate_y` offset expressed as a percentage of the layer's height.
//!
//! Timing follows CSS keyframe semantics: the easing stored on a keyframe
//! governs the segment that *starts* at that keyframe, and segments without
//! their own easing fall back to the animation-wide timing function.

use crate::easing::Easing;

/// A single keyframe in a vertical sweep
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    /// Position in the animation (0.0 to 1.0)
    pub offset: f32,
    /// Vertical translation in percent of the element height
    pub translate_y: f32,
    /// Timing function for the segment leaving this keyframe
    pub easing: Option<Easing>,
}

/// Fill mode determines the animation state after playback
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    /// Drop back to the untransformed state once finished
    None,
    /// Hold the final keyframe value after the animation completes
    #[default]
    Forwards,
}

/// A keyframe animation driven by `tick()`
#[derive(Clone, Debug)]
pub struct KeyframeAnimation {
    /// Duration in milliseconds
    duration_ms: u32,
    /// Animation-wide timing function
    easing: Easing,
    /// Keyframes sorted by offset
    keyframes: Vec<Keyframe>,
    /// Elapsed time in milliseconds
    current_time: f32,
    playing: bool,
    finished: bool,
    fill_mode: FillMode,
}

impl KeyframeAnimation {
    /// Create an empty animation with the given duration and timing function
    pub fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            keyframes: Vec::new(),
            current_time: 0.0,
            playing: false,
            finished: false,
            fill_mode: FillMode::Forwards,
        }
    }

    /// Add a keyframe that uses the animation-wide timing function
    pub fn keyframe(self, offset: f32, translate_y: f32) -> Self {
        self.push(Keyframe {
            offset,
            translate_y,
            easing: None,
        })
    }

    /// Add a keyframe whose outgoing segment uses its own timing function
    pub fn keyframe_eased(self, offset: f32, translate_y: f32, easing: Easing) -> Self {
        self.push(Keyframe {
            offset,
            translate_y,
            easing: Some(easing),
        })
    }

    /// Add a plateau: two keyframes holding the same value, like the CSS
    /// `35%, 65% { ... }` selector group
    pub fn hold(self, from: f32, to: f32, translate_y: f32, easing: Option<Easing>) -> Self {
        self.push(Keyframe {
            offset: from,
            translate_y,
            easing,
        })
        .push(Keyframe {
            offset: to,
            translate_y,
            easing,
        })
    }

    fn push(mut self, keyframe: Keyframe) -> Self {
        let offset = keyframe.offset.clamp(0.0, 1.0);
        let index = self.keyframes.partition_point(|kf| kf.offset <= offset);
        self.keyframes.insert(index, Keyframe { offset, ..keyframe });
        self
    }

    /// Set fill mode
    pub fn fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Start (or restart) playback from the first keyframe
    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.finished = false;
        self.playing = true;
    }

    /// Return to the idle, untransformed state
    pub fn reset(&mut self) {
        self.current_time = 0.0;
        self.finished = false;
        self.playing = false;
    }

    /// Jump to the end, as if playback had run to completion
    pub fn finish(&mut self) {
        self.current_time = self.duration_ms as f32;
        self.finished = true;
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return if self.finished { 1.0 } else { 0.0 };
        }
        (self.current_time / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Advance by `dt_ms` milliseconds.
    ///
    /// Returns `true` exactly once, on the tick that completes playback.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }

        self.current_time += dt_ms.max(0.0);

        if self.current_time >= self.duration_ms as f32 {
            self.finish();
            return true;
        }
        false
    }

    /// Current vertical translation in percent, honoring the fill mode
    pub fn current_translate_y(&self) -> f32 {
        if self.finished && self.fill_mode == FillMode::None {
            return 0.0;
        }
        if !self.playing && !self.finished {
            return 0.0;
        }
        self.sample_at(self.progress())
    }

    /// Sample the animation at a specific progress (0.0 to 1.0)
    pub fn sample_at(&self, progress: f32) -> f32 {
        let Some(first) = self.keyframes.first() else {
            return 0.0;
        };

        let progress = progress.clamp(0.0, 1.0);
        if progress <= first.offset {
            return first.translate_y;
        }

        // Last keyframe at or before `progress`; ties resolve to the later
        // keyframe so plateaus hand over cleanly.
        let next_index = self.keyframes.partition_point(|kf| kf.offset <= progress);
        let prev = &self.keyframes[next_index - 1];
        let Some(next) = self.keyframes.get(next_index) else {
            return prev.translate_y;
        };

        let span = next.offset - prev.offset;
        if span <= f32::EPSILON {
            return next.translate_y;
        }

        let local = (progress - prev.offset) / span;
        let eased = prev.easing.unwrap_or(self.easing).apply(local);

        prev.translate_y + (next.translate_y - prev.translate_y) * eased
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Animation-wide timing function
    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep() -> KeyframeAnimation {
        KeyframeAnimation::new(1000, Easing::Linear)
            .keyframe(0.0, 0.0)
            .hold(0.25, 0.75, -100.0, None)
            .keyframe(1.0, -200.0)
    }

    #[test]
    fn test_keyframes_stay_sorted() {
        let anim = KeyframeAnimation::new(100, Easing::Linear)
            .keyframe(1.0, -200.0)
            .keyframe(0.0, 0.0)
            .keyframe(0.5, -100.0);
        let offsets: Vec<f32> = anim.keyframes().iter().map(|kf| kf.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_linear_segments_interpolate() {
        let anim = sweep();
        assert!((anim.sample_at(0.0) - 0.0).abs() < 1e-4);
        assert!((anim.sample_at(0.125) - (-50.0)).abs() < 1e-3);
        assert!((anim.sample_at(0.875) - (-150.0)).abs() < 1e-3);
        assert!((anim.sample_at(1.0) - (-200.0)).abs() < 1e-4);
    }

    #[test]
    fn test_plateau_holds_value() {
        let anim = sweep();
        for progress in [0.25, 0.4, 0.5, 0.6, 0.75] {
            assert!(
                (anim.sample_at(progress) - (-100.0)).abs() < 1e-4,
                "progress={progress}"
            );
        }
    }

    #[test]
    fn test_segment_easing_comes_from_leading_keyframe() {
        let step_like = Easing::cubic_bezier(1.0, 0.0, 1.0, 0.0);
        let anim = KeyframeAnimation::new(1000, Easing::Linear)
            .keyframe_eased(0.0, 0.0, step_like)
            .keyframe(0.5, -100.0)
            .keyframe(1.0, -200.0);

        // First half is held back by its own curve, second half is linear
        assert!(anim.sample_at(0.25) > -20.0);
        assert!((anim.sample_at(0.75) - (-150.0)).abs() < 1e-3);
    }

    #[test]
    fn test_tick_reports_completion_once() {
        let mut anim = sweep();
        anim.start();
        assert!(!anim.tick(600.0));
        assert!(anim.is_playing());
        assert!(anim.tick(600.0));
        assert!(anim.is_finished());
        assert!(!anim.tick(600.0));
    }

    #[test]
    fn test_fill_forwards_holds_last_frame() {
        let mut anim = sweep();
        anim.start();
        anim.tick(1000.0);
        assert!((anim.current_translate_y() - (-200.0)).abs() < 1e-4);

        let mut none = sweep().fill_mode(FillMode::None);
        none.start();
        none.tick(1000.0);
        assert_eq!(none.current_translate_y(), 0.0);
    }

    #[test]
    fn test_idle_animation_is_untransformed() {
        let mut anim = sweep();
        assert_eq!(anim.current_translate_y(), 0.0);
        anim.start();
        anim.tick(500.0);
        anim.reset();
        assert_eq!(anim.current_translate_y(), 0.0);
        assert!(!anim.is_playing());
    }
}
