//! Declarative effect configuration.
//!
//! A [`TextEffect`] describes one layer drawn under the owning text: an
//! offset, an optional stroke and an optional fill. The types serialize as
//! plain nested JSON with camelCase keys.

mod visibility;

pub use visibility::Visibility;

use crate::error::EffectResult;
use kurbo::Vec2;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Opaque paint description (color string, gradient object, ...).
///
/// Paint is carried through to the host renderer untouched.
pub type PaintData = serde_json::Map<String, Value>;

/// Offset of an effect layer relative to the owning text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectOffset {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y: f64,
    #[serde(default, skip_serializing_if = "Visibility::is_default")]
    pub visible: Visibility,
}

impl EffectOffset {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            visible: Visibility::Visible,
        }
    }
}

/// Geometric part of a stroke.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    #[serde(
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_width: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_dash_pattern",
        skip_serializing_if = "Option::is_none"
    )]
    pub dash_pattern: Option<Vec<f64>>,
    /// Remaining style keys (cap, join, ...) kept verbatim.
    #[serde(flatten)]
    pub extra: PaintData,
}

impl StrokeStyle {
    pub fn with_width(width: f64) -> Self {
        Self {
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    pub fn with_dash_pattern(mut self, pattern: Vec<f64>) -> Self {
        self.dash_pattern = Some(pattern);
        self
    }
}

/// Stroke of an effect layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectStroke {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StrokeStyle>,
    #[serde(default, skip_serializing_if = "Visibility::is_default")]
    pub visible: Visibility,
    #[serde(flatten)]
    pub paint: PaintData,
}

impl EffectStroke {
    /// A stroke with the given color and width.
    pub fn solid(color: &str, width: f64) -> Self {
        let mut paint = PaintData::new();
        paint.insert("type".to_string(), Value::from("solid"));
        paint.insert("color".to_string(), Value::from(color));
        Self {
            style: Some(StrokeStyle::with_width(width)),
            visible: Visibility::Visible,
            paint,
        }
    }

    /// Stroke width, zero when absent or hidden.
    pub fn width(&self) -> f64 {
        if !self.visible.is_visible() {
            return 0.0;
        }
        self.style
            .as_ref()
            .and_then(|s| s.stroke_width)
            .unwrap_or(0.0)
    }

    /// Dash pattern, `None` when absent, empty or hidden.
    pub fn dash_pattern(&self) -> Option<&[f64]> {
        if !self.visible.is_visible() {
            return None;
        }
        self.style
            .as_ref()
            .and_then(|s| s.dash_pattern.as_deref())
            .filter(|p| !p.is_empty())
    }
}

/// Paint object with its own visibility flag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaintLayer {
    #[serde(default, skip_serializing_if = "Visibility::is_default")]
    pub visible: Visibility,
    #[serde(flatten)]
    pub paint: PaintData,
}

/// Fill of an effect layer.
///
/// Hosts accept a color string, a paint object or a stack of paint objects.
/// Anything else is kept verbatim in [`EffectFill::Other`] so one odd entry
/// never rejects the whole effect list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EffectFill {
    Solid(String),
    Layer(PaintLayer),
    Layers(Vec<PaintLayer>),
    Other(Value),
}

impl EffectFill {
    /// A stack is visible while any of its layers is.
    pub fn is_visible(&self) -> bool {
        match self {
            EffectFill::Solid(_) | EffectFill::Other(_) => true,
            EffectFill::Layer(layer) => layer.visible.is_visible(),
            EffectFill::Layers(layers) => layers.iter().any(|l| l.visible.is_visible()),
        }
    }
}

/// One visual layer rendered under the owning text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextEffect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<EffectOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<EffectStroke>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<EffectFill>,
    #[serde(default, skip_serializing_if = "Visibility::is_default")]
    pub visible: Visibility,
}

impl TextEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Some(EffectOffset::new(x, y));
        self
    }

    pub fn with_stroke(mut self, stroke: EffectStroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_fill(mut self, fill: EffectFill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_visibility(mut self, visible: Visibility) -> Self {
        self.visible = visible;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible.is_visible()
    }

    /// Effective offset: zero when absent or hidden.
    pub fn offset_value(&self) -> Vec2 {
        match &self.offset {
            Some(offset) if offset.visible.is_visible() => Vec2::new(offset.x, offset.y),
            _ => Vec2::ZERO,
        }
    }

    /// Effective stroke width: zero when absent or hidden.
    pub fn stroke_width(&self) -> f64 {
        self.stroke.as_ref().map_or(0.0, EffectStroke::width)
    }

    /// Effective dash pattern: `None` when absent, empty or hidden.
    pub fn dash_pattern(&self) -> Option<&[f64]> {
        self.stroke.as_ref().and_then(EffectStroke::dash_pattern)
    }

    /// Properties pushed onto the instance that renders this effect.
    pub fn props(&self) -> EffectProps {
        let offset = self.offset_value();
        EffectProps {
            x: offset.x,
            y: offset.y,
            fill: self.fill.clone(),
            stroke: self.stroke.clone(),
            visible: self.visible,
        }
    }

    /// Parse an effect list from JSON.
    pub fn list_from_json(json: &str) -> EffectResult<Vec<TextEffect>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize an effect list to pretty JSON.
    pub fn list_to_json(effects: &[TextEffect]) -> EffectResult<String> {
        Ok(serde_json::to_string_pretty(effects)?)
    }
}

/// Property bag applied to an effect instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectProps {
    pub x: f64,
    pub y: f64,
    pub fill: Option<EffectFill>,
    pub stroke: Option<EffectStroke>,
    pub visible: Visibility,
}

/// Numbers that are missing, null or not finite read as zero.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(lenient_opt_f64(deserializer)?.unwrap_or(0.0))
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|n| n.is_finite()))
}

/// Anything but a non-empty array of numbers means "no dash pattern".
fn lenient_dash_pattern<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<f64>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(None);
    };
    let pattern: Option<Vec<f64>> = items.iter().map(Value::as_f64).collect();
    Ok(pattern.filter(|p| !p.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_effect() {
        let json = r##"[{
            "offset": { "x": 3, "y": -2 },
            "stroke": { "type": "solid", "color": "#000", "style": { "strokeWidth": 4, "dashPattern": [2, 1], "strokeCap": "round" } },
            "fill": "#ff0000"
        }]"##;
        let effects = TextEffect::list_from_json(json).unwrap();
        assert_eq!(effects.len(), 1);
        let effect = &effects[0];
        assert!(effect.is_visible());
        assert_eq!(effect.offset_value(), Vec2::new(3.0, -2.0));
        assert!((effect.stroke_width() - 4.0).abs() < f64::EPSILON);
        assert_eq!(effect.dash_pattern(), Some(&[2.0, 1.0][..]));
        let stroke = effect.stroke.as_ref().unwrap();
        assert_eq!(stroke.paint.get("color"), Some(&Value::from("#000")));
        let style = stroke.style.as_ref().unwrap();
        assert_eq!(style.extra.get("strokeCap"), Some(&Value::from("round")));
        assert_eq!(effect.fill, Some(EffectFill::Solid("#ff0000".to_string())));
    }

    #[test]
    fn test_missing_parts_default_to_zero() {
        let effects = TextEffect::list_from_json("[{}]").unwrap();
        let effect = &effects[0];
        assert_eq!(effect.offset_value(), Vec2::ZERO);
        assert!(effect.stroke_width().abs() < f64::EPSILON);
        assert!(effect.dash_pattern().is_none());
        assert!(effect.is_visible());
    }

    #[test]
    fn test_hidden_parts_contribute_nothing() {
        let json = r#"[{
            "offset": { "x": 5, "y": 5, "visible": false },
            "stroke": { "style": { "strokeWidth": 6, "dashPattern": [1] }, "visible": 0 }
        }]"#;
        let effect = &TextEffect::list_from_json(json).unwrap()[0];
        assert_eq!(effect.offset_value(), Vec2::ZERO);
        assert!(effect.stroke_width().abs() < f64::EPSILON);
        assert!(effect.dash_pattern().is_none());
    }

    #[test]
    fn test_invalid_dash_pattern_is_ignored() {
        let json = r#"[
            { "stroke": { "style": { "strokeWidth": 2, "dashPattern": [] } } },
            { "stroke": { "style": { "strokeWidth": 2, "dashPattern": "none" } } },
            { "stroke": { "style": { "strokeWidth": null } } }
        ]"#;
        let effects = TextEffect::list_from_json(json).unwrap();
        assert!(effects[0].dash_pattern().is_none());
        assert!(effects[1].dash_pattern().is_none());
        assert!(effects[2].stroke_width().abs() < f64::EPSILON);
    }

    #[test]
    fn test_effect_visibility_zero() {
        let effect = &TextEffect::list_from_json(r#"[{ "visible": 0 }]"#).unwrap()[0];
        assert!(!effect.is_visible());
        assert_eq!(effect.props().visible, Visibility::Hidden);
    }

    #[test]
    fn test_fill_layer_visibility() {
        let effect =
            &TextEffect::list_from_json(r##"[{ "fill": { "type": "solid", "color": "#fff", "visible": false } }]"##)
                .unwrap()[0];
        let fill = effect.fill.as_ref().unwrap();
        assert!(!fill.is_visible());
    }

    #[test]
    fn test_fill_layer_stack() {
        let json = r##"[{ "offset": { "x": 2, "y": 2 }, "fill": [{ "type": "solid", "color": "#f00" }] }]"##;
        let effects = TextEffect::list_from_json(json).unwrap();
        let fill = effects[0].fill.as_ref().unwrap();
        let EffectFill::Layers(layers) = fill else {
            panic!("expected a layer stack, got {fill:?}");
        };
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].paint.get("color"), Some(&Value::from("#f00")));
        assert!(fill.is_visible());
        assert_eq!(effects[0].offset_value(), Vec2::new(2.0, 2.0));

        let hidden = r#"[{ "fill": [{ "visible": false }, { "visible": 0 }] }]"#;
        let effects = TextEffect::list_from_json(hidden).unwrap();
        assert!(!effects[0].fill.as_ref().unwrap().is_visible());
    }

    #[test]
    fn test_unknown_fill_kept_verbatim() {
        let json = r##"[{ "fill": 42 }, { "fill": ["#f00", 1] }, { "offset": { "x": 9 } }]"##;
        let effects = TextEffect::list_from_json(json).unwrap();
        assert_eq!(effects.len(), 3);
        assert_eq!(effects[0].fill, Some(EffectFill::Other(Value::from(42))));
        assert!(matches!(effects[1].fill, Some(EffectFill::Other(Value::Array(_)))));
        assert!((effects[2].offset_value().x - 9.0).abs() < f64::EPSILON);

        let json = TextEffect::list_to_json(&effects[..1]).unwrap();
        assert!(json.contains("\"fill\": 42"));
    }

    #[test]
    fn test_malformed_visibility_reads_visible() {
        let json = r#"[{ "offset": { "x": 2, "y": 2, "visible": "false" } }, { "offset": { "x": 9 } }]"#;
        let effects = TextEffect::list_from_json(json).unwrap();
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0].offset_value(), Vec2::new(2.0, 2.0));
        assert!((effects[1].offset_value().x - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialized_form_is_plain_data() {
        let effect = TextEffect::new()
            .with_offset(2.0, 2.0)
            .with_stroke(EffectStroke::solid("#333", 3.0));
        let json = TextEffect::list_to_json(&[effect.clone()]).unwrap();
        assert!(json.contains("\"strokeWidth\""));
        assert!(!json.contains("visible"));
        let parsed = TextEffect::list_from_json(&json).unwrap();
        assert_eq!(parsed, vec![effect]);
    }
}
