//! Host node abstraction.
//!
//! The effect engine never draws glyphs itself. It drives duplicate render
//! nodes through [`RenderNode`] and creates them through [`NodeFactory`]; a
//! host framework implements both. [`TextNode`] is the bundled implementation
//! used by the CLI and the tests.

mod canvas;
mod text_node;

pub use canvas::{Canvas, DrawCommand, RecordingCanvas};
pub use text_node::{TextNode, TextNodeFactory};

use crate::effect::{EffectProps, StrokeStyle};
use kurbo::{Affine, Rect};
use uuid::Uuid;

/// Unique identifier for render nodes.
pub type NodeId = Uuid;

/// Serialized style of a node, keyed by property name.
pub type StyleMap = serde_json::Map<String, serde_json::Value>;

/// Options for a draw pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Drawing for export rather than on screen.
    pub exporting: bool,
}

impl RenderOptions {
    pub fn export() -> Self {
        Self { exporting: true }
    }
}

/// What a child node needs to know about its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentInfo {
    pub id: NodeId,
    pub world_transform: Affine,
    pub world_opacity: f64,
}

/// A render node as seen by the effect engine.
pub trait RenderNode {
    /// Get the unique identifier.
    fn id(&self) -> NodeId;

    /// Apply effect-specific properties (offset, fill, stroke, visibility).
    fn set(&mut self, props: &EffectProps);

    /// Apply shared style copied from the owning node.
    fn apply_style(&mut self, style: &StyleMap);

    /// Attach this node under a parent.
    fn set_parent(&mut self, parent: &ParentInfo);

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Current x/y position in the parent's space.
    fn position(&self) -> (f64, f64);

    /// Move the node within its parent's space.
    fn set_position(&mut self, x: f64, y: f64);

    /// Mutable stroke style, if the node has a stroke with a style.
    fn stroke_style_mut(&mut self) -> Option<&mut StrokeStyle>;

    fn update_world_opacity(&mut self);

    fn update_size(&mut self);

    fn update_change(&mut self);

    fn update_local_matrix(&mut self);

    fn update_world_matrix(&mut self);

    fn update_local_bounds(&mut self);

    fn update_world_bounds(&mut self);

    fn update_box_bounds(&mut self);

    fn world_transform(&self) -> Affine;

    fn world_bounds(&self) -> Rect;

    /// Issue draw calls; the caller has already set the canvas transform.
    fn draw(&self, canvas: &mut dyn Canvas, options: &RenderOptions);

    /// Release the node. It must not be used afterwards.
    fn destroy(&mut self);

    /// Recompute everything derived from the node's properties, in order.
    fn refresh(&mut self) {
        self.update_world_opacity();
        self.update_size();
        self.update_change();
        self.update_local_matrix();
        self.update_world_matrix();
        self.update_local_bounds();
        self.update_world_bounds();
    }
}

/// Creates duplicate nodes for effect instances.
pub trait NodeFactory {
    type Node: RenderNode;

    fn create(&self, props: &EffectProps) -> Self::Node;
}
