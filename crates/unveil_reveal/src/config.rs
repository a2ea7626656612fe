//! Reveal configuration
//!
//! [`RevealConfig`] is what callers write (in code or TOML);
//! [`EffectiveConfig`] is what a provider renders from, after the layer color
//! override has been validated against the preset.
//!
//! # TOML
//!
//! ```toml
//! preset = "duo-move"
//! direction = "cornerTopLeft"
//! layer_colors = ["#fff", "#ddd"]
//! ```

use serde::Deserialize;
use smallvec::SmallVec;

use crate::direction::Direction;
use crate::error::{InvalidConfigError, Result};
use crate::preset::{lookup, Preset};

/// Layer colors, at most three per preset
pub type LayerColors = SmallVec<[String; 3]>;

/// Caller-supplied reveal configuration
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealConfig {
    pub preset: Preset,
    pub direction: Direction,
    /// Optional override of the preset's default layer colors
    pub layer_colors: Option<Vec<String>>,
}

/// Raw TOML shape; `layer_colors` stays untyped so a non-list value can be
/// reported as such instead of as a generic parse failure.
#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawRevealConfig {
    preset: Preset,
    direction: Direction,
    layer_colors: Option<toml::Value>,
}

impl RevealConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn layer_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layer_colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    /// Load a configuration from TOML.
    ///
    /// Only the shape is checked here; the color count is validated by
    /// [`RevealConfig::resolve`].
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let raw: RawRevealConfig = toml::from_str(source)?;
        let layer_colors = raw
            .layer_colors
            .as_ref()
            .map(layer_colors_from_value)
            .transpose()?;

        Ok(Self {
            preset: raw.preset,
            direction: raw.direction,
            layer_colors,
        })
    }

    /// Validate the override against the preset.
    pub fn resolve(&self) -> Result<EffectiveConfig> {
        resolve(self.preset, self.layer_colors.as_deref())
    }
}

/// Convert a dynamically typed value into a color list.
pub fn layer_colors_from_value(value: &toml::Value) -> Result<Vec<String>> {
    let items = value.as_array().ok_or(InvalidConfigError::NotASequence)?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or(InvalidConfigError::NotASequence)
        })
        .collect()
}

/// Preset configuration with the color override applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub preset: Preset,
    pub layer_count: usize,
    pub layer_colors: LayerColors,
}

/// Resolve the effective configuration for `preset`.
///
/// Without an override the registry defaults are returned unchanged. An
/// override must have exactly one color per layer.
pub fn resolve(preset: Preset, override_colors: Option<&[String]>) -> Result<EffectiveConfig> {
    let defaults = lookup(preset);

    let layer_colors = match override_colors {
        None => defaults
            .default_layer_colors
            .iter()
            .map(|c| c.to_string())
            .collect(),
        Some(colors) if colors.len() != defaults.layer_count => {
            return Err(InvalidConfigError::LayerCountMismatch {
                preset,
                expected: defaults.layer_count,
                given: colors.len(),
            });
        }
        Some(colors) => colors.iter().cloned().collect(),
    };

    Ok(EffectiveConfig {
        preset,
        layer_count: defaults.layer_count,
        layer_colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message_names_preset_and_counts() {
        let err = resolve(Preset::DuoMove, Some(&["#fff".to_string()])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"duo-move\" effect takes 2 layer colors. 1 is given."
        );
    }

    #[test]
    fn test_toml_defaults() {
        let config = RevealConfig::from_toml_str("").unwrap();
        assert_eq!(config, RevealConfig::default());
        assert_eq!(config.preset, Preset::Simple);
        assert_eq!(config.direction, Direction::Right);
    }

    #[test]
    fn test_toml_full() {
        let config = RevealConfig::from_toml_str(
            r##"
            preset = "triple-woosh"
            direction = "cornerTopRight"
            layer_colors = ["#111", "#222", "#333"]
            "##,
        )
        .unwrap();
        assert_eq!(config.preset, Preset::TripleWoosh);
        assert_eq!(config.direction, Direction::CornerTopRight);
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.layer_colors.as_slice(), ["#111", "#222", "#333"]);
    }

    #[test]
    fn test_toml_rejects_unknown_preset() {
        let err = RevealConfig::from_toml_str(r#"preset = "wipe""#).unwrap_err();
        assert!(matches!(err, InvalidConfigError::Parse(_)));
    }

    #[test]
    fn test_non_string_items_are_not_a_color_list() {
        let value: toml::Value = toml::from_str("colors = [1, 2]").unwrap();
        let colors = value.get("colors").unwrap();
        assert!(matches!(
            layer_colors_from_value(colors),
            Err(InvalidConfigError::NotASequence)
        ));
    }
}
