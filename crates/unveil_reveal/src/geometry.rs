//! Container geometry
//!
//! Pure functions placing the reveal container for a direction. The layers
//! inside always sweep along the container's own vertical axis; the
//! container's rotation picks which way that axis points on screen.
//!
//! Edge directions use a static structural style sized in viewport units.
//! Corner directions additionally need the measured viewport: the container
//! becomes a square as wide as the viewport diagonal, so it covers the page at
//! any rotation and aspect ratio.

use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

use crate::direction::Direction;

/// Declarations every container carries regardless of direction
pub const CONTAINER_BASE_CSS: &str = "position: fixed; z-index: 1000; pointer-events: none;";

/// Declarations every layer carries
pub const LAYER_BASE_CSS: &str = "position: absolute; width: 100%; height: 100%; top: 0; left: 0;";

/// Current viewport dimensions in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Length of the viewport diagonal
    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }
}

/// A CSS length
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
    /// Percent of the viewport width
    Vw(f32),
    /// Percent of the viewport height
    Vh(f32),
}

impl Display for Length {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Percent(v) => write!(f, "{v}%"),
            Length::Vw(v) => write!(f, "{v}vw"),
            Length::Vh(v) => write!(f, "{v}vh"),
        }
    }
}

/// One step of a composed transform, applied left to right
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    Translate(Length, Length),
    /// Rotation about the z axis, in degrees
    Rotate(f32),
}

impl Display for TransformOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TransformOp::Translate(x, y) => write!(f, "translate3d({x}, {y}, 0)"),
            TransformOp::Rotate(deg) => write!(f, "rotate3d(0, 0, 1, {deg}deg)"),
        }
    }
}

/// Composed transform; an empty chain renders as `none`
pub type Transform = SmallVec<[TransformOp; 3]>;

/// A partial set of style declarations
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleFragment {
    pub top: Option<Length>,
    pub left: Option<Length>,
    pub bottom: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub transform: Option<Transform>,
    pub opacity: Option<f32>,
}

impl StyleFragment {
    pub fn is_empty(&self) -> bool {
        *self == StyleFragment::default()
    }

    /// Overlay `other` on top of `self`; declarations set in `other` win.
    pub fn merge(self, other: StyleFragment) -> StyleFragment {
        StyleFragment {
            top: other.top.or(self.top),
            left: other.left.or(self.left),
            bottom: other.bottom.or(self.bottom),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            transform: other.transform.or(self.transform),
            opacity: other.opacity.or(self.opacity),
        }
    }
}

impl Display for StyleFragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        let lengths = [
            ("top", self.top),
            ("left", self.left),
            ("bottom", self.bottom),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in lengths {
            if let Some(value) = value {
                write!(f, "{sep}{name}: {value};")?;
                sep = " ";
            }
        }
        if let Some(transform) = &self.transform {
            write!(f, "{sep}transform: ")?;
            if transform.is_empty() {
                f.write_str("none")?;
            }
            for (i, op) in transform.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{op}")?;
            }
            f.write_str(";")?;
            sep = " ";
        }
        if let Some(opacity) = self.opacity {
            write!(f, "{sep}opacity: {opacity};")?;
        }
        Ok(())
    }
}

fn opacity(is_animating: bool) -> Option<f32> {
    Some(if is_animating { 1.0 } else { 0.0 })
}

fn centered(is_animating: bool) -> (Option<Length>, Option<Length>) {
    if is_animating {
        (Some(Length::Percent(50.0)), Some(Length::Percent(50.0)))
    } else {
        (None, None)
    }
}

/// Structural container style; independent of the measured viewport.
pub fn structural_style(direction: Direction, is_animating: bool) -> StyleFragment {
    match direction {
        Direction::Top | Direction::Bottom => {
            let top = direction == Direction::Top;
            StyleFragment {
                left: Some(Length::Px(0.0)),
                width: Some(Length::Vh(100.0)),
                height: Some(Length::Vw(100.0)),
                bottom: top.then_some(Length::Percent(100.0)),
                top: (!top).then_some(Length::Percent(100.0)),
                transform: Some(if top {
                    SmallVec::from_slice(&[TransformOp::Rotate(180.0)])
                } else {
                    Transform::new()
                }),
                opacity: opacity(is_animating),
            }
        }
        Direction::Left | Direction::Right => {
            let angle = if direction == Direction::Left { 90.0 } else { -90.0 };
            let (top, left) = centered(is_animating);
            StyleFragment {
                top,
                left,
                width: Some(Length::Vh(100.0)),
                height: Some(Length::Vw(100.0)),
                transform: Some(SmallVec::from_slice(&[
                    TransformOp::Translate(Length::Percent(-50.0), Length::Percent(-50.0)),
                    TransformOp::Rotate(angle),
                    TransformOp::Translate(Length::Px(0.0), Length::Percent(100.0)),
                ])),
                opacity: opacity(is_animating),
                ..StyleFragment::default()
            }
        }
        _ => {
            let (top, left) = centered(is_animating);
            StyleFragment {
                top,
                left,
                opacity: opacity(is_animating),
                ..StyleFragment::default()
            }
        }
    }
}

/// Diagonal-square style for corner sweeps.
///
/// Empty for edge directions and whenever the reveal is idle.
pub fn diagonal_style(
    direction: Direction,
    is_animating: bool,
    viewport: ViewportSize,
) -> StyleFragment {
    let Some(angle) = direction.corner_angle() else {
        return StyleFragment::default();
    };
    if !is_animating {
        return StyleFragment::default();
    }

    let diagonal = viewport.diagonal();
    StyleFragment {
        width: Some(Length::Px(diagonal)),
        height: Some(Length::Px(diagonal)),
        transform: Some(SmallVec::from_slice(&[
            TransformOp::Translate(Length::Percent(-50.0), Length::Percent(-50.0)),
            TransformOp::Rotate(angle),
            TransformOp::Translate(Length::Px(0.0), Length::Px(diagonal)),
        ])),
        ..StyleFragment::default()
    }
}

/// Full container style for a direction and viewport.
///
/// This is the merged style: [`structural_style`] overlaid with
/// [`diagonal_style`]. The corner-only fragment, empty while idle, is
/// [`diagonal_style`] on its own.
pub fn compute_container_style(
    direction: Direction,
    is_animating: bool,
    viewport_width: f32,
    viewport_height: f32,
) -> StyleFragment {
    let viewport = ViewportSize::new(viewport_width, viewport_height);
    structural_style(direction, is_animating).merge(diagonal_style(direction, is_animating, viewport))
}

/// Style of a single layer at vertical offset `translate_y` (percent).
pub fn layer_style(translate_y: f32) -> StyleFragment {
    StyleFragment {
        transform: Some(SmallVec::from_slice(&[TransformOp::Translate(
            Length::Px(0.0),
            Length::Percent(translate_y),
        )])),
        ..StyleFragment::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_idle_has_no_diagonal() {
        for direction in Direction::all().iter().filter(|d| d.is_corner()) {
            let style = diagonal_style(*direction, false, ViewportSize::new(300.0, 400.0));
            assert!(style.is_empty(), "{direction}");
        }
    }

    #[test]
    fn test_edges_have_no_diagonal() {
        for direction in [Direction::Left, Direction::Right, Direction::Top, Direction::Bottom] {
            let style = diagonal_style(direction, true, ViewportSize::new(300.0, 400.0));
            assert!(style.is_empty(), "{direction}");
        }
    }

    #[test]
    fn test_corner_transform_chain() {
        let style = compute_container_style(Direction::CornerTopLeft, true, 300.0, 400.0);
        assert_eq!(
            style.to_string(),
            "top: 50%; left: 50%; width: 500px; height: 500px; \
             transform: translate3d(-50%, -50%, 0) rotate3d(0, 0, 1, 135deg) translate3d(0px, 500px, 0); \
             opacity: 1;"
        );
    }

    #[test]
    fn test_every_corner_rotates_by_its_angle() {
        let expected = [
            (Direction::CornerTopLeft, 135.0),
            (Direction::CornerTopRight, -135.0),
            (Direction::CornerBottomLeft, 45.0),
            (Direction::CornerBottomRight, -45.0),
        ];
        let corners: Vec<Direction> = Direction::all()
            .iter()
            .copied()
            .filter(|d| d.is_corner())
            .collect();
        assert_eq!(corners.len(), expected.len());

        for (direction, angle) in expected {
            assert!(corners.contains(&direction));
            assert_eq!(direction.corner_angle(), Some(angle), "{direction}");

            let css = compute_container_style(direction, true, 300.0, 400.0).to_string();
            let rotate = format!("rotate3d(0, 0, 1, {angle}deg)");
            assert!(css.contains(&rotate), "{direction}: {css}");
        }
        assert_eq!(
            compute_container_style(Direction::CornerBottomRight, true, 300.0, 400.0)
                .transform
                .map(|t| t[1]),
            Some(TransformOp::Rotate(-45.0))
        );
    }

    #[test]
    fn test_unmeasured_viewport_gives_zero_corner() {
        for direction in Direction::all().iter().copied().filter(|d| d.is_corner()) {
            let style = compute_container_style(direction, true, 0.0, 0.0);
            assert_eq!(style.width, Some(Length::Px(0.0)), "{direction}");
            assert_eq!(style.height, Some(Length::Px(0.0)), "{direction}");
            assert!(style
                .to_string()
                .contains("width: 0px; height: 0px;"));
        }
    }

    #[test]
    fn test_merged_idle_corner_keeps_structural_opacity() {
        let merged = compute_container_style(Direction::CornerTopLeft, false, 300.0, 400.0);
        assert_eq!(merged.to_string(), "opacity: 0;");
        let corner = diagonal_style(
            Direction::CornerTopLeft,
            false,
            ViewportSize::new(300.0, 400.0),
        );
        assert!(corner.is_empty());
    }

    #[test]
    fn test_top_is_flipped_above_viewport() {
        let style = structural_style(Direction::Top, false);
        assert_eq!(
            style.to_string(),
            "left: 0px; bottom: 100%; width: 100vh; height: 100vw; \
             transform: rotate3d(0, 0, 1, 180deg); opacity: 0;"
        );
    }

    #[test]
    fn test_bottom_is_unrotated_below_viewport() {
        let style = structural_style(Direction::Bottom, true);
        assert_eq!(style.top, Some(Length::Percent(100.0)));
        assert_eq!(style.bottom, None);
        assert_eq!(style.transform, Some(Transform::new()));
        assert_eq!(style.opacity, Some(1.0));
        assert!(style.to_string().contains("transform: none;"));
    }

    #[test]
    fn test_left_and_right_mirror() {
        let left = structural_style(Direction::Left, true);
        let right = structural_style(Direction::Right, true);
        let angle = |s: &StyleFragment| match s.transform.as_ref().map(|t| t[1]) {
            Some(TransformOp::Rotate(deg)) => deg,
            other => panic!("unexpected transform step {other:?}"),
        };
        assert_eq!(angle(&left), 90.0);
        assert_eq!(angle(&right), -90.0);
        assert_eq!(left.top, Some(Length::Percent(50.0)));

        let idle = structural_style(Direction::Left, false);
        assert_eq!(idle.top, None);
        assert_eq!(idle.left, None);
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let base = StyleFragment {
            opacity: Some(0.0),
            width: Some(Length::Vh(100.0)),
            ..StyleFragment::default()
        };
        let overlay = StyleFragment {
            width: Some(Length::Px(10.0)),
            ..StyleFragment::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.width, Some(Length::Px(10.0)));
        assert_eq!(merged.opacity, Some(0.0));
    }

    #[test]
    fn test_layer_style() {
        assert_eq!(
            layer_style(-100.0).to_string(),
            "transform: translate3d(0px, -100%, 0);"
        );
    }
}
