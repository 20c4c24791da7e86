//! Font-size relative effect geometry.
//!
//! Effects are authored in absolute units against whatever font size the
//! text had at the time. The first layout pass after an assignment turns
//! those absolute values into ratios of the font size; every pass after
//! that multiplies the ratios back out with the current font size.

use crate::effect::TextEffect;

/// Geometry of one effect, absolute before normalization and relative after.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectRatio {
    pub offset_x_ratio: f64,
    pub offset_y_ratio: f64,
    pub stroke_width_ratio: f64,
    pub dash_pattern_ratios: Option<Vec<f64>>,
}

/// Absolute geometry for one effect at a given font size.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGeometry {
    pub x: f64,
    pub y: f64,
    pub stroke_width: f64,
    pub dash_pattern: Option<Vec<f64>>,
}

impl EffectRatio {
    /// Snapshot the absolute geometry of an effect.
    pub fn absolute(effect: &TextEffect) -> Self {
        let offset = effect.offset_value();
        Self {
            offset_x_ratio: offset.x,
            offset_y_ratio: offset.y,
            stroke_width_ratio: effect.stroke_width(),
            dash_pattern_ratios: effect.dash_pattern().map(<[f64]>::to_vec),
        }
    }

    fn divide(&mut self, font_size: f64) {
        self.offset_x_ratio /= font_size;
        self.offset_y_ratio /= font_size;
        self.stroke_width_ratio /= font_size;
        if let Some(pattern) = &mut self.dash_pattern_ratios {
            pattern.iter_mut().for_each(|v| *v /= font_size);
        }
    }

    /// Multiply the ratios out with `font_size`.
    pub fn resolve(&self, font_size: f64) -> ResolvedGeometry {
        ResolvedGeometry {
            x: self.offset_x_ratio * font_size,
            y: self.offset_y_ratio * font_size,
            stroke_width: self.stroke_width_ratio * font_size,
            dash_pattern: self
                .dash_pattern_ratios
                .as_ref()
                .map(|p| p.iter().map(|v| v * font_size).collect()),
        }
    }
}

/// Ratio table for the current effect list.
#[derive(Debug, Clone, Default)]
pub struct EffectRatios {
    ratios: Vec<EffectRatio>,
    normalized: bool,
}

impl EffectRatios {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table with absolute snapshots of `effects`.
    pub fn record_absolute(&mut self, effects: &[TextEffect]) {
        self.ratios = effects.iter().map(EffectRatio::absolute).collect();
        self.normalized = false;
    }

    /// Divide by `font_size` unless that already happened for this table.
    ///
    /// Returns true when the division took place. `font_size` must be
    /// finite and positive; callers resolve fallbacks beforehand.
    pub fn ensure_normalized(&mut self, font_size: f64) -> bool {
        if self.normalized {
            return false;
        }
        for ratio in &mut self.ratios {
            ratio.divide(font_size);
        }
        self.normalized = true;
        log::debug!(
            "Normalized {} effect ratios at font size {}",
            self.ratios.len(),
            font_size
        );
        true
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn clear(&mut self) {
        self.ratios.clear();
        self.normalized = false;
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn get(&self, index: usize) -> Option<&EffectRatio> {
        self.ratios.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EffectRatio> {
        self.ratios.iter()
    }
}
