//! Configuration error types

use thiserror::Error;

use crate::preset::Preset;

/// Rejected reveal configuration.
///
/// Raised while resolving a provider's configuration; it is a programmer
/// error to fix, not a runtime condition to retry.
#[derive(Error, Debug)]
pub enum InvalidConfigError {
    /// Layer colors were supplied as something other than a list of strings
    #[error("layer_colors is not an array.")]
    NotASequence,

    /// Layer color override does not match the preset's layer count
    #[error("\"{preset}\" effect takes {expected} layer colors. {given} is given.")]
    LayerCountMismatch {
        preset: Preset,
        expected: usize,
        given: usize,
    },

    /// Unknown preset tag
    #[error("unknown preset \"{0}\"")]
    UnknownPreset(String),

    /// Unknown direction tag
    #[error("unknown direction \"{0}\"")]
    UnknownDirection(String),

    /// Malformed TOML configuration
    #[error("invalid reveal config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, InvalidConfigError>;
