//! Text node that renders stacked effect layers.

use crate::config::EffectConfig;
use crate::effect::TextEffect;
use crate::node::{Canvas, NodeFactory, RenderNode, RenderOptions, StyleMap, TextNode};
use crate::pool::EffectPool;
use crate::ratio::EffectRatios;
use crate::spread::{Spread, effects_spread};
use crate::sync::sync_positions;

/// Lifecycle of an [`EffectText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectState {
    /// No effects assigned.
    #[default]
    Unconfigured,
    /// Effects assigned; ratios still hold absolute values.
    Configured,
    /// Ratios are relative to the font size.
    Normalized,
    /// Instances released. Terminal.
    Destroyed,
}

/// A text node plus the effect instances drawn with it.
///
/// The base node draws the text itself. Each [`TextEffect`] gets a duplicate
/// node from the factory, sharing the base style but carrying its own
/// offset, stroke and fill.
pub struct EffectText<F: NodeFactory> {
    base: TextNode,
    effects: Vec<TextEffect>,
    ratios: EffectRatios,
    pool: EffectPool<F::Node>,
    factory: F,
    config: EffectConfig,
    destroyed: bool,
}

impl<F: NodeFactory> EffectText<F> {
    pub fn new(base: TextNode, factory: F) -> Self {
        Self::with_config(base, factory, EffectConfig::default())
    }

    pub fn with_config(base: TextNode, factory: F, config: EffectConfig) -> Self {
        Self {
            base,
            effects: Vec::new(),
            ratios: EffectRatios::new(),
            pool: EffectPool::new(),
            factory,
            config,
            destroyed: false,
        }
    }

    /// Assign a new effect list, replacing the previous one wholesale.
    ///
    /// A non-empty list snapshots absolute geometry and reconciles the
    /// instance pool; an empty list hides every instance without destroying
    /// it. Assigning the same list again repeats the work.
    pub fn set_text_effects(&mut self, effects: Vec<TextEffect>) {
        if self.destroyed {
            log::warn!("Ignoring effect assignment on destroyed text {}", self.base.id());
            return;
        }

        if effects.is_empty() {
            self.pool.hide_all();
            self.ratios.clear();
        } else {
            self.ratios.record_absolute(&effects);
            self.pool.reconcile(&effects, &self.factory);
        }
        self.effects = effects;
    }

    /// Current effect configuration, reflecting geometry at the current size.
    pub fn text_effects(&self) -> &[TextEffect] {
        &self.effects
    }

    /// Instances rendering the current effects.
    pub fn effect_group(&self) -> &[F::Node] {
        self.pool.group()
    }

    /// The whole instance pool, including hidden spares.
    pub fn effect_pool(&self) -> &EffectPool<F::Node> {
        &self.pool
    }

    pub fn base(&self) -> &TextNode {
        &self.base
    }

    /// Mutable base node. Call [`update_change`](Self::update_change) after
    /// changing it.
    pub fn base_mut(&mut self) -> &mut TextNode {
        &mut self.base
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn state(&self) -> EffectState {
        if self.destroyed {
            EffectState::Destroyed
        } else if self.effects.is_empty() {
            EffectState::Unconfigured
        } else if self.ratios.is_normalized() {
            EffectState::Normalized
        } else {
            EffectState::Configured
        }
    }

    /// Base style shared with every instance.
    pub fn shared_style(&self) -> StyleMap {
        let mut style = self.base.to_style_map();
        style.retain(|key, _| !self.config.is_ignored(key));
        style
    }

    /// Update pass: propagate style, refresh instances, sync geometry.
    pub fn update_change(&mut self) {
        if self.destroyed {
            return;
        }

        let style = self.shared_style();
        self.base.refresh();

        let parent = self.base.parent_info();
        for instance in self.pool.group_mut() {
            instance.apply_style(&style);
            instance.set_parent(&parent);
            instance.refresh();
        }

        self.update_effect_positions();
    }

    /// Re-derive instance geometry from the ratios at the current font size.
    pub fn update_effect_positions(&mut self) {
        let font_size = self.config.font_size_or_default(self.base.font_size);
        if let Some(updated) = sync_positions(
            &mut self.ratios,
            &self.effects,
            self.pool.group_mut(),
            font_size,
        ) {
            self.effects = updated;
        }
    }

    /// Box-bounds pass: instances first, then the base.
    pub fn update_box_bounds(&mut self) {
        for instance in self.pool.group_mut() {
            instance.update_box_bounds();
        }
        self.base.update_box_bounds();
    }

    /// Spread of the base padded for every visible effect.
    pub fn render_spread(&self) -> Spread {
        let base = self.base.render_spread();
        if self.effects.is_empty() {
            return base;
        }
        effects_spread(base, &self.effects)
    }

    /// Draw the base text, then each visible instance in effect order.
    ///
    /// Nothing is drawn while the text is being edited in place, unless
    /// exporting.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, options: &RenderOptions) {
        if self.destroyed || (self.base.text_editing && !options.exporting) {
            return;
        }

        if self.base.is_visible() {
            canvas.set_world(self.base.world_transform());
            self.base.draw(canvas, options);
        }

        for instance in self.pool.group_mut() {
            instance.refresh();
            if !instance.is_visible() {
                continue;
            }
            canvas.set_world(instance.world_transform());
            instance.draw(canvas, options);
        }
    }

    /// Release every instance and clear the configuration. Terminal.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.pool.release_all();
        self.effects.clear();
        self.ratios.clear();
        self.base.destroy();
        self.destroyed = true;
    }
}
