//! Easing functions for animations

/// Easing function type
///
/// Mirrors the CSS `animation-timing-function` values the reveal curves use.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Shorthand for `Easing::CubicBezier`, usable in const tables
    pub const fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Easing::CubicBezier(x1, y1, x2, y2)
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                if t <= 0.0 {
                    return 0.0;
                }
                if t >= 1.0 {
                    return 1.0;
                }
                UnitBezier::new(*x1, *y1, *x2, *y2).solve(t as f64) as f32
            }
        }
    }

    /// Render as a CSS timing function
    pub fn to_css(&self) -> String {
        match self {
            Easing::Linear => "linear".to_string(),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                format!("cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

const EPSILON: f64 = 1e-7;

/// Bezier from (0, 0) to (1, 1) with polynomial coefficients per axis.
///
/// Evaluated in f64 so the long reveal sweeps stay smooth near plateaus.
struct UnitBezier {
    x: [f64; 3],
    y: [f64; 3],
}

impl UnitBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: coefficients(x1 as f64, x2 as f64),
            y: coefficients(y1 as f64, y2 as f64),
        }
    }

    /// y at the curve parameter whose x is `x`
    fn solve(&self, x: f64) -> f64 {
        horner(&self.y, self.param_for_x(x))
    }

    fn param_for_x(&self, x: f64) -> f64 {
        // Newton converges in a few steps on well-behaved curves.
        let mut p = x;
        for _ in 0..8 {
            let err = horner(&self.x, p) - x;
            if err.abs() < EPSILON {
                return p;
            }
            let slope = derivative(&self.x, p);
            if slope.abs() < EPSILON {
                break;
            }
            p -= err / slope;
        }

        // Flat segments: bisect, x(p) is monotonic on [0, 1].
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        let mut p = x;
        for _ in 0..32 {
            let value = horner(&self.x, p);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = p;
            } else {
                hi = p;
            }
            p = lo + (hi - lo) / 2.0;
        }
        p
    }
}

/// `[a, b, c]` for `((a·t + b)·t + c)·t`
fn coefficients(p1: f64, p2: f64) -> [f64; 3] {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    [a, b, c]
}

#[inline]
fn horner([a, b, c]: &[f64; 3], t: f64) -> f64 {
    ((a * t + b) * t + c) * t
}

#[inline]
fn derivative([a, b, c]: &[f64; 3], t: f64) -> f64 {
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        let curves = [
            Easing::Linear,
            Easing::cubic_bezier(0.2, 1.0, 0.3, 1.0),
            Easing::cubic_bezier(0.7, 0.0, 0.3, 1.0),
        ];
        for easing in curves {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let easing = Easing::cubic_bezier(0.25, 0.25, 0.75, 0.75);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((easing.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_symmetric_curve_is_half_at_midpoint() {
        // (0.7, 0, 0.3, 1) is point-symmetric around (0.5, 0.5)
        let easing = Easing::cubic_bezier(0.7, 0.0, 0.3, 1.0);
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-4);
        assert!(easing.apply(0.25) < 0.25);
        assert!(easing.apply(0.75) > 0.75);
    }

    #[test]
    fn test_ease_out_front_loads_progress() {
        let easing = Easing::cubic_bezier(0.2, 1.0, 0.3, 1.0);
        assert!(easing.apply(0.2) > 0.6);
    }

    #[test]
    fn test_css_rendering() {
        assert_eq!(
            Easing::cubic_bezier(0.55, 0.055, 0.675, 0.19).to_css(),
            "cubic-bezier(0.55, 0.055, 0.675, 0.19)"
        );
        assert_eq!(Easing::Linear.to_css(), "linear");
    }
}
