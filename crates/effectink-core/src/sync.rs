//! Per-pass geometry synchronization.
//!
//! Every layout pass turns ratios back into absolute geometry for the
//! current font size and writes it into two places: the live instance and a
//! fresh snapshot of the effect configuration, so that reading the config
//! back reflects what is on screen.

use crate::effect::{EffectOffset, TextEffect};
use crate::node::RenderNode;
use crate::ratio::{EffectRatios, ResolvedGeometry};

/// Push ratio geometry at `font_size` into `group` and return the updated
/// effect configuration.
///
/// Normalizes the ratios first if this is the first pass since they were
/// recorded. Returns `None` without touching anything when there is no
/// group or no ratios yet. Indices without an instance or an effect are
/// skipped and their configuration is returned unchanged.
pub fn sync_positions<N: RenderNode>(
    ratios: &mut EffectRatios,
    effects: &[TextEffect],
    group: &mut [N],
    font_size: f64,
) -> Option<Vec<TextEffect>> {
    if group.is_empty() || ratios.is_empty() {
        return None;
    }

    ratios.ensure_normalized(font_size);

    let mut updated = effects.to_vec();
    for (index, ratio) in ratios.iter().enumerate() {
        let (Some(instance), Some(effect)) = (group.get_mut(index), updated.get_mut(index)) else {
            continue;
        };

        let geometry = ratio.resolve(font_size);
        instance.set_position(geometry.x, geometry.y);
        write_offset(effect, &geometry);

        // A hidden stroke recorded zero geometry; keep its authored values.
        let stroke_visible = effect.stroke.as_ref().is_none_or(|s| s.visible.is_visible());
        if let Some(style) = instance.stroke_style_mut().filter(|_| stroke_visible) {
            style.stroke_width = Some(geometry.stroke_width);
            if let Some(pattern) = &geometry.dash_pattern {
                style.dash_pattern = Some(pattern.clone());
            }
            write_stroke(effect, &geometry);
        }

        instance.update_local_matrix();
        instance.update_world_matrix();
    }

    Some(updated)
}

fn write_offset(effect: &mut TextEffect, geometry: &ResolvedGeometry) {
    let visible = effect.offset.as_ref().map(|o| o.visible).unwrap_or_default();
    effect.offset = Some(EffectOffset {
        x: geometry.x,
        y: geometry.y,
        visible,
    });
}

fn write_stroke(effect: &mut TextEffect, geometry: &ResolvedGeometry) {
    let Some(style) = effect.stroke.as_mut().and_then(|s| s.style.as_mut()) else {
        return;
    };
    style.stroke_width = Some(geometry.stroke_width);
    if let Some(pattern) = &geometry.dash_pattern {
        style.dash_pattern = Some(pattern.clone());
    }
}
