//! End-to-end layout passes over the public API.

use effectink_core::{
    DrawCommand, EffectFill, EffectText, RecordingCanvas, RenderNode, RenderOptions, Spread,
    TextEffect, TextNode, TextNodeFactory,
};
use kurbo::Vec2;

const EFFECTS: &str = r##"[
    {
        "offset": { "x": 6, "y": 3 },
        "stroke": { "type": "solid", "color": "#000", "style": { "strokeWidth": 3, "dashPattern": [3, 6] } },
        "fill": [{ "type": "solid", "color": "#f00" }]
    },
    { "offset": { "x": 50, "y": 50 }, "visible": 0 }
]"##;

fn title(font_size: f64) -> EffectText<TextNodeFactory> {
    let base = TextNode::new("Title")
        .with_font_size(font_size)
        .with_position(10.0, 20.0)
        .with_fill(EffectFill::Solid("#222".to_string()));
    EffectText::new(base, TextNodeFactory)
}

#[test]
fn test_layout_passes_at_two_font_sizes() {
    let mut text = title(12.0);
    text.set_text_effects(TextEffect::list_from_json(EFFECTS).unwrap());
    text.update_change();

    assert_eq!(text.effect_group().len(), 2);
    assert_eq!(text.render_spread(), Spread::new(0.0, 7.5, 4.5, 0.0));

    let mut canvas = RecordingCanvas::new();
    text.draw(&mut canvas, &RenderOptions::default());
    let commands = canvas.take_commands();
    assert_eq!(commands.len(), 5);
    assert!(canvas.commands().is_empty());
    assert!(matches!(
        &commands[3],
        DrawCommand::FillText { fill: Some(EffectFill::Layers(_)), font_size, .. } if *font_size == 12.0
    ));

    text.base_mut().set_font_size(24.0);
    text.update_change();

    let effect = &text.text_effects()[0];
    assert_eq!(effect.offset_value(), Vec2::new(12.0, 6.0));
    assert!((effect.stroke_width() - 6.0).abs() < f64::EPSILON);
    assert_eq!(effect.dash_pattern(), Some(&[6.0, 12.0][..]));
    assert_eq!(text.render_spread(), Spread::new(0.0, 15.0, 9.0, 0.0));

    text.draw(&mut canvas, &RenderOptions::default());
    let transforms = canvas.world_transforms();
    assert_eq!(transforms.len(), 2);
    assert_eq!(transforms[0].translation(), Vec2::new(10.0, 20.0));
    assert_eq!(transforms[1].translation(), Vec2::new(22.0, 26.0));

    let stroke = canvas.commands().iter().find_map(|c| match c {
        DrawCommand::StrokeText {
            font_size,
            stroke_width,
            dash_pattern,
            ..
        } => Some((*font_size, *stroke_width, dash_pattern.clone())),
        _ => None,
    });
    assert_eq!(stroke, Some((24.0, 6.0, Some(vec![6.0, 12.0]))));
}

#[test]
fn test_config_read_back_reparses() {
    let mut text = title(12.0);
    text.set_text_effects(TextEffect::list_from_json(EFFECTS).unwrap());
    text.update_change();
    text.base_mut().set_font_size(24.0);
    text.update_change();

    let json = TextEffect::list_to_json(text.text_effects()).unwrap();
    let mut reloaded = title(24.0);
    reloaded.set_text_effects(TextEffect::list_from_json(&json).unwrap());
    reloaded.update_change();

    assert_eq!(reloaded.render_spread(), text.render_spread());
    let positions: Vec<_> = reloaded.effect_group().iter().map(|n| n.position()).collect();
    assert_eq!(positions[0], (12.0, 6.0));
    assert!(!reloaded.effect_group()[1].is_visible());
}
