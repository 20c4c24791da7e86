//! Subcommand implementations.

use crate::{Cli, Commands};
use effectink_core::config::is_usable_font_size;
use effectink_core::{
    EffectConfig, EffectError, EffectResult, EffectText, RecordingCanvas, RenderNode,
    RenderOptions, Spread, TextEffect, TextNode, TextNodeFactory, effects_spread,
    normalize_text_effects,
};
use serde_json::{Value, json};
use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

/// Run the selected subcommand and return what to print.
pub(crate) fn run(cli: Cli) -> EffectResult<String> {
    let effects = read_effects(cli.input.as_deref())?;
    let config = match cli.config.as_deref() {
        Some(path) => EffectConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => EffectConfig::default(),
    };

    match cli.command {
        Commands::Normalize { from, to } => normalize(&effects, from, to),
        Commands::Spread => Ok(spread(&effects)),
        Commands::Preview {
            text,
            font_size,
            resize,
            export,
        } => {
            let report = preview(effects, config, &text, font_size, resize, export)?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

fn read_effects(input: Option<&Path>) -> EffectResult<Vec<TextEffect>> {
    let json = match input {
        Some(path) => {
            log::debug!("Reading effects from {:?}", path);
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    TextEffect::list_from_json(&json)
}

fn check_font_size(size: f64) -> EffectResult<f64> {
    if is_usable_font_size(size) {
        Ok(size)
    } else {
        Err(EffectError::InvalidFontSize(size))
    }
}

fn normalize(effects: &[TextEffect], from: f64, to: f64) -> EffectResult<String> {
    let from = check_font_size(from)?;
    let to = check_font_size(to)?;
    let scaled = normalize_text_effects(effects, from, to);
    if let Cow::Borrowed(_) = scaled {
        log::info!("Effects unchanged (from {} to {})", from, to);
    }
    TextEffect::list_to_json(&scaled)
}

fn spread(effects: &[TextEffect]) -> String {
    let spread = effects_spread(Spread::ZERO, effects);
    json!(spread.to_array()).to_string()
}

fn preview(
    effects: Vec<TextEffect>,
    config: EffectConfig,
    text: &str,
    font_size: Option<f64>,
    resize: Option<f64>,
    export: bool,
) -> EffectResult<Value> {
    let mut base = TextNode::new(text);
    if let Some(size) = font_size {
        base = base.with_font_size(check_font_size(size)?);
    }

    let mut effect_text = EffectText::with_config(base, TextNodeFactory, config);
    effect_text.set_text_effects(effects);
    effect_text.update_change();

    if let Some(size) = resize {
        effect_text.base_mut().set_font_size(check_font_size(size)?);
        effect_text.update_change();
    }
    effect_text.update_box_bounds();

    let mut canvas = RecordingCanvas::new();
    let options = RenderOptions { exporting: export };
    effect_text.draw(&mut canvas, &options);

    let instances: Vec<Value> = effect_text
        .effect_pool()
        .instances()
        .iter()
        .map(|node| {
            let (x, y) = node.position();
            let bounds = node.world_bounds();
            json!({
                "x": x,
                "y": y,
                "visible": node.is_visible(),
                "worldBounds": [bounds.x0, bounds.y0, bounds.x1, bounds.y1],
            })
        })
        .collect();

    Ok(json!({
        "state": format!("{:?}", effect_text.state()),
        "fontSize": effect_text.base().resolved_font_size(),
        "textEffects": effect_text.text_effects(),
        "renderSpread": effect_text.render_spread().to_array(),
        "instances": instances,
        "drawCalls": canvas.commands().len(),
    }))
}
