//! Drawing surface abstraction.

use crate::effect::{EffectFill, EffectStroke};
use kurbo::Affine;

/// Drawing surface the host provides for a frame.
pub trait Canvas {
    /// Set the world transform for subsequent draw calls.
    fn set_world(&mut self, transform: Affine);

    /// Fill text with the given paint (host default when `None`).
    fn fill_text(&mut self, text: &str, font_size: f64, fill: Option<&EffectFill>);

    /// Stroke text outlines.
    fn stroke_text(&mut self, text: &str, font_size: f64, stroke: &EffectStroke);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetWorld(Affine),
    FillText {
        text: String,
        font_size: f64,
        fill: Option<EffectFill>,
    },
    StrokeText {
        text: String,
        font_size: f64,
        stroke_width: f64,
        dash_pattern: Option<Vec<f64>>,
    },
}

/// Canvas that records draw calls instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Transforms set so far, in order.
    pub fn world_transforms(&self) -> Vec<Affine> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::SetWorld(t) => Some(*t),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn set_world(&mut self, transform: Affine) {
        self.commands.push(DrawCommand::SetWorld(transform));
    }

    fn fill_text(&mut self, text: &str, font_size: f64, fill: Option<&EffectFill>) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            font_size,
            fill: fill.cloned(),
        });
    }

    fn stroke_text(&mut self, text: &str, font_size: f64, stroke: &EffectStroke) {
        self.commands.push(DrawCommand::StrokeText {
            text: text.to_string(),
            font_size,
            stroke_width: stroke.width(),
            dash_pattern: stroke.dash_pattern().map(<[f64]>::to_vec),
        });
    }
}
