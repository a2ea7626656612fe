//! Built-in reveal presets.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;
use unveil_animation::RevealCurve;

use crate::error::InvalidConfigError;

/// Reveal preset catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// One dark layer sweeping across.
    #[default]
    Simple,
    /// Two layers, the second trailing the first.
    DuoMove,
    /// Three layers in a fast accelerating woosh.
    TripleWoosh,
    /// Three layers with staggered holds that carry the content across.
    ContentMove,
}

/// Static per-preset configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresetConfig {
    pub layer_count: usize,
    pub default_layer_colors: &'static [&'static str],
}

const SIMPLE: PresetConfig = PresetConfig {
    layer_count: 1,
    default_layer_colors: &["#202023"],
};

const DUO_MOVE: PresetConfig = PresetConfig {
    layer_count: 2,
    default_layer_colors: &["#202023", "#3d4a41"],
};

const TRIPLE_WOOSH: PresetConfig = PresetConfig {
    layer_count: 3,
    default_layer_colors: &["#0092dd", "#fff", "#3e3a35"],
};

const CONTENT_MOVE: PresetConfig = PresetConfig {
    layer_count: 3,
    default_layer_colors: &["#202023", "#555", "#d1d1d1"],
};

impl Preset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::DuoMove => "duo-move",
            Self::TripleWoosh => "triple-woosh",
            Self::ContentMove => "content-move",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [Preset] {
        const PRESETS: [Preset; 4] = [
            Preset::Simple,
            Preset::DuoMove,
            Preset::TripleWoosh,
            Preset::ContentMove,
        ];
        &PRESETS
    }

    /// Layer count and default colors for this preset.
    pub fn config(self) -> &'static PresetConfig {
        match self {
            Self::Simple => &SIMPLE,
            Self::DuoMove => &DUO_MOVE,
            Self::TripleWoosh => &TRIPLE_WOOSH,
            Self::ContentMove => &CONTENT_MOVE,
        }
    }

    pub fn layer_count(self) -> usize {
        self.config().layer_count
    }

    /// Curve played by each layer, in layer order.
    pub fn layer_curves(self) -> &'static [RevealCurve] {
        match self {
            Self::Simple => &[RevealCurve::Sweep],
            Self::DuoMove => &[RevealCurve::DuoLead, RevealCurve::DuoTrail],
            Self::TripleWoosh => &[
                RevealCurve::WooshLead,
                RevealCurve::WooshMiddle,
                RevealCurve::WooshTrail,
            ],
            Self::ContentMove => &[
                RevealCurve::ContentBack,
                RevealCurve::ContentMiddle,
                RevealCurve::ContentFront,
            ],
        }
    }
}

/// Registry lookup, total over the preset catalog.
pub fn lookup(preset: Preset) -> &'static PresetConfig {
    preset.config()
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Preset {
    type Err = InvalidConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::all()
            .iter()
            .copied()
            .find(|preset| preset.id() == s)
            .ok_or_else(|| InvalidConfigError::UnknownPreset(s.to_string()))
    }
}
