//! Sweep directions.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::InvalidConfigError;

/// Orientation a reveal sweeps from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
    CornerTopLeft,
    CornerTopRight,
    CornerBottomLeft,
    CornerBottomRight,
}

impl Direction {
    /// Stable direction id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::CornerTopLeft => "cornerTopLeft",
            Self::CornerTopRight => "cornerTopRight",
            Self::CornerBottomLeft => "cornerBottomLeft",
            Self::CornerBottomRight => "cornerBottomRight",
        }
    }

    pub fn all() -> &'static [Direction] {
        const DIRECTIONS: [Direction; 8] = [
            Direction::Left,
            Direction::Right,
            Direction::Top,
            Direction::Bottom,
            Direction::CornerTopLeft,
            Direction::CornerTopRight,
            Direction::CornerBottomLeft,
            Direction::CornerBottomRight,
        ];
        &DIRECTIONS
    }

    pub fn is_corner(self) -> bool {
        self.corner_angle().is_some()
    }

    /// Rotation applied to the diagonal square for corner sweeps, in degrees.
    pub fn corner_angle(self) -> Option<f32> {
        match self {
            Self::CornerTopLeft => Some(135.0),
            Self::CornerTopRight => Some(-135.0),
            Self::CornerBottomLeft => Some(45.0),
            Self::CornerBottomRight => Some(-45.0),
            _ => None,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Direction {
    type Err = InvalidConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::all()
            .iter()
            .copied()
            .find(|direction| direction.id() == s)
            .ok_or_else(|| InvalidConfigError::UnknownDirection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_corners_rotate() {
        let corners: Vec<_> = Direction::all()
            .iter()
            .filter(|d| d.is_corner())
            .map(|d| d.id())
            .collect();
        assert_eq!(
            corners,
            vec![
                "cornerTopLeft",
                "cornerTopRight",
                "cornerBottomLeft",
                "cornerBottomRight"
            ]
        );
    }

    #[test]
    fn test_parse_uses_camel_case_ids() {
        assert_eq!(
            "cornerBottomLeft".parse::<Direction>().unwrap(),
            Direction::CornerBottomLeft
        );
        assert!("corner-bottom-left".parse::<Direction>().is_err());
    }
}
