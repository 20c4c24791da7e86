//! Engine configuration.

use crate::error::EffectResult;
use serde::{Deserialize, Serialize};

/// Font size used when the owning node has none (or an unusable one).
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Style keys never copied from the owning node onto its effect instances.
///
/// These are identity, geometry or effect specific; everything else in the
/// owner's style (font, alignment, letter spacing, ...) is shared.
pub const IGNORE_SYNC_KEYS: &[&str] = &[
    "tag",
    "textEffects",
    "fill",
    "stroke",
    "x",
    "y",
    "skew",
    "scale",
    "scaleX",
    "scaleY",
    "rotation",
    "textEditing",
    "editable",
    "id",
    "states",
    "data",
    "shadow",
    "innerShadow",
];

/// Configuration for an [`EffectText`](crate::EffectText).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectConfig {
    /// Fallback font size for ratio normalization.
    pub default_font_size: f64,
    /// Style keys excluded from owner-to-instance propagation.
    pub ignore_sync_keys: Vec<String>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            default_font_size: DEFAULT_FONT_SIZE,
            ignore_sync_keys: IGNORE_SYNC_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl EffectConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> EffectResult<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        if !is_usable_font_size(config.default_font_size) {
            log::warn!(
                "Ignoring unusable default font size {}, using {}",
                config.default_font_size,
                DEFAULT_FONT_SIZE
            );
            config.default_font_size = DEFAULT_FONT_SIZE;
        }
        Ok(config)
    }

    /// Check whether a style key is excluded from propagation.
    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignore_sync_keys.iter().any(|k| k == key)
    }

    /// Resolve a node font size, falling back to the configured default.
    pub fn font_size_or_default(&self, font_size: Option<f64>) -> f64 {
        resolve_font_size(font_size, self.default_font_size)
    }
}

/// A font size can be divided by only when it is finite and positive.
pub fn is_usable_font_size(font_size: f64) -> bool {
    font_size.is_finite() && font_size > 0.0
}

/// Pick `font_size` if usable, otherwise `fallback`.
pub fn resolve_font_size(font_size: Option<f64>, fallback: f64) -> f64 {
    match font_size {
        Some(size) if is_usable_font_size(size) => size,
        _ => fallback,
    }
}
