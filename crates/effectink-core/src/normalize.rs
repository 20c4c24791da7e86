//! Rescale effect configurations between font sizes.

use crate::config::{DEFAULT_FONT_SIZE, resolve_font_size};
use crate::effect::{EffectOffset, TextEffect};
use std::borrow::Cow;

/// Rescale `effects` authored at `source_font_size` for text at
/// `target_font_size`.
///
/// Used to build fixed-size previews whose effect proportions match a
/// differently sized original. Offsets (when visible), stroke widths and dash
/// patterns scale by `target / source`. The input is never modified: an
/// empty list or equal sizes borrow it back, anything else is a deep copy.
pub fn normalize_text_effects(
    effects: &[TextEffect],
    source_font_size: f64,
    target_font_size: f64,
) -> Cow<'_, [TextEffect]> {
    if effects.is_empty() || source_font_size == target_font_size {
        return Cow::Borrowed(effects);
    }

    let source = resolve_font_size(Some(source_font_size), DEFAULT_FONT_SIZE);
    let target = resolve_font_size(Some(target_font_size), DEFAULT_FONT_SIZE);
    let scale = target / source;

    Cow::Owned(effects.iter().map(|effect| scale_effect(effect, scale)).collect())
}

fn scale_effect(effect: &TextEffect, scale: f64) -> TextEffect {
    let mut effect = effect.clone();

    if let Some(offset) = effect.offset.as_mut().filter(|o| o.visible.is_visible()) {
        *offset = EffectOffset::new(offset.x * scale, offset.y * scale);
    }

    if let Some(style) = effect.stroke.as_mut().and_then(|s| s.style.as_mut()) {
        if let Some(width) = style.stroke_width.as_mut().filter(|w| **w != 0.0) {
            *width *= scale;
        }
        if let Some(pattern) = style.dash_pattern.as_mut() {
            pattern.iter_mut().for_each(|v| *v *= scale);
        }
    }

    effect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectStroke, StrokeStyle, Visibility};

    fn sample() -> Vec<TextEffect> {
        vec![
            TextEffect::new()
                .with_offset(10.0, 0.0)
                .with_stroke(EffectStroke::solid("#000", 4.0)),
        ]
    }

    #[test]
    fn test_scales_offset_and_stroke() {
        let effects = sample();
        let scaled = normalize_text_effects(&effects, 10.0, 20.0);
        assert!(matches!(scaled, Cow::Owned(_)));

        let effect = &scaled[0];
        let offset = effect.offset.as_ref().unwrap();
        assert!((offset.x - 20.0).abs() < f64::EPSILON);
        assert!(offset.y.abs() < f64::EPSILON);
        assert!((effect.stroke_width() - 8.0).abs() < f64::EPSILON);

        // Input untouched
        assert!((effects[0].offset.as_ref().unwrap().x - 10.0).abs() < f64::EPSILON);
        assert!((effects[0].stroke_width() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_equal_sizes_borrow_input() {
        let effects = sample();
        let result = normalize_text_effects(&effects, 16.0, 16.0);
        match result {
            Cow::Borrowed(slice) => assert!(std::ptr::eq(slice, effects.as_slice())),
            Cow::Owned(_) => panic!("expected the input to be returned unchanged"),
        }
    }

    #[test]
    fn test_empty_input_borrowed() {
        let result = normalize_text_effects(&[], 10.0, 20.0);
        assert!(matches!(result, Cow::Borrowed(s) if s.is_empty()));
    }

    #[test]
    fn test_scales_dash_pattern() {
        let mut stroke = EffectStroke::solid("#000", 2.0);
        stroke.style = Some(StrokeStyle::with_width(2.0).with_dash_pattern(vec![4.0, 2.0]));
        let effects = vec![TextEffect::new().with_stroke(stroke)];
        let scaled = normalize_text_effects(&effects, 20.0, 10.0);
        assert_eq!(scaled[0].dash_pattern(), Some(&[2.0, 1.0][..]));
    }

    #[test]
    fn test_hidden_offset_not_scaled() {
        let mut effect = TextEffect::new().with_offset(8.0, 8.0);
        effect.offset.as_mut().unwrap().visible = Visibility::Hidden;
        let effects = vec![effect];
        let scaled = normalize_text_effects(&effects, 10.0, 20.0);
        let offset = scaled[0].offset.as_ref().unwrap();
        assert!((offset.x - 8.0).abs() < f64::EPSILON);
        assert_eq!(offset.visible, Visibility::Hidden);
    }
}
