//! EffectInk Core Library
//!
//! Layered text effects built from stacked duplicates of a text node.
//! Each duplicate carries its own offset, stroke and fill; the library keeps
//! the duplicates in a reusable pool, scales their geometry with the font size
//! and pads the owner's render bounds so nothing gets clipped.

pub mod config;
pub mod effect;
pub mod effect_text;
pub mod error;
pub mod node;
pub mod normalize;
pub mod pool;
pub mod ratio;
pub mod spread;
pub mod sync;

pub use config::{DEFAULT_FONT_SIZE, EffectConfig, IGNORE_SYNC_KEYS};
pub use effect::{
    EffectFill, EffectOffset, EffectProps, EffectStroke, PaintData, PaintLayer, StrokeStyle,
    TextEffect, Visibility,
};
pub use effect_text::{EffectState, EffectText};
pub use error::{EffectError, EffectResult};
pub use node::{
    Canvas, DrawCommand, NodeFactory, NodeId, ParentInfo, RecordingCanvas, RenderNode,
    RenderOptions, StyleMap, TextNode, TextNodeFactory,
};
pub use normalize::normalize_text_effects;
pub use pool::EffectPool;
pub use ratio::{EffectRatio, EffectRatios, ResolvedGeometry};
pub use spread::{DirectionSpread, Spread, direction_spread, effects_spread};
pub use sync::sync_positions;
