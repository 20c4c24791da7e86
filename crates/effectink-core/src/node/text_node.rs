//! Plain-data text node.

use super::{Canvas, NodeFactory, NodeId, ParentInfo, RenderNode, RenderOptions, StyleMap};
use crate::config::{DEFAULT_FONT_SIZE, resolve_font_size};
use crate::effect::{EffectFill, EffectProps, EffectStroke, StrokeStyle, Visibility};
use crate::spread::Spread;
use kurbo::{Affine, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Tag written into the serialized style of every text node.
pub const TEXT_TAG: &str = "Text";

/// A text node with enough layout to position, bound and draw itself.
///
/// Glyph metrics are out of scope, so the box size is approximated from the
/// character count and font size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    #[serde(default = "Uuid::new_v4")]
    id: NodeId,
    /// Position in the parent's space.
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Rotation angle in radians.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
    /// The text content.
    #[serde(default, rename = "text")]
    pub content: String,
    /// Font size in pixels; `None` uses the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default = "one")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<EffectFill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<EffectStroke>,
    /// Whether the text is being edited in place.
    #[serde(default)]
    pub text_editing: bool,
    #[serde(default)]
    pub editable: bool,
    /// Other style keys (font family, alignment, ...).
    #[serde(flatten)]
    pub style: StyleMap,

    #[serde(default, skip_serializing)]
    visible: Visibility,
    #[serde(skip)]
    parent: Option<NodeId>,
    #[serde(skip)]
    parent_world: Affine,
    #[serde(skip, default = "one")]
    parent_opacity: f64,
    #[serde(skip)]
    world_opacity: f64,
    #[serde(skip)]
    local_transform: Affine,
    #[serde(skip)]
    world_transform: Affine,
    #[serde(skip)]
    box_bounds: Rect,
    #[serde(skip)]
    local_bounds: Rect,
    #[serde(skip)]
    world_bounds: Rect,
    #[serde(skip, default = "yes")]
    changed: bool,
    #[serde(skip)]
    destroyed: bool,
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

impl TextNode {
    /// Create a new text node at the origin.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            content: content.into(),
            font_size: None,
            opacity: 1.0,
            fill: None,
            stroke: None,
            text_editing: false,
            editable: false,
            style: StyleMap::new(),
            visible: Visibility::Visible,
            parent: None,
            parent_world: Affine::IDENTITY,
            parent_opacity: 1.0,
            world_opacity: 1.0,
            local_transform: Affine::IDENTITY,
            world_transform: Affine::IDENTITY,
            box_bounds: Rect::ZERO,
            local_bounds: Rect::ZERO,
            world_bounds: Rect::ZERO,
            changed: true,
            destroyed: false,
        }
    }

    /// Create a duplicate node for an effect instance.
    pub fn from_props(props: &EffectProps) -> Self {
        let mut node = Self::new(String::new());
        node.set(props);
        node
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_fill(mut self, fill: EffectFill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: EffectStroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Set the font size and mark the node for re-layout.
    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = Some(size);
        self.changed = true;
    }

    /// Font size with the default applied.
    pub fn resolved_font_size(&self) -> f64 {
        resolve_font_size(self.font_size, DEFAULT_FONT_SIZE)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn world_opacity(&self) -> f64 {
        self.world_opacity
    }

    pub fn local_transform(&self) -> Affine {
        self.local_transform
    }

    /// Untransformed content box.
    pub fn box_bounds(&self) -> Rect {
        self.box_bounds
    }

    pub fn local_bounds(&self) -> Rect {
        self.local_bounds
    }

    /// Padding the node's own stroke needs around its box.
    pub fn render_spread(&self) -> Spread {
        let width = self.stroke.as_ref().map_or(0.0, EffectStroke::width);
        Spread::uniform(width / 2.0)
    }

    /// Identity for children attached under this node.
    pub fn parent_info(&self) -> ParentInfo {
        ParentInfo {
            id: self.id,
            world_transform: self.world_transform,
            world_opacity: self.world_opacity,
        }
    }

    /// Serializable style, including identity and geometry keys.
    pub fn to_style_map(&self) -> StyleMap {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => {
                map.insert("tag".to_string(), Value::from(TEXT_TAG));
                map
            }
            Ok(_) | Err(_) => {
                log::warn!("Text node {} did not serialize to an object", self.id);
                StyleMap::new()
            }
        }
    }

    /// Approximate width based on character count and font size.
    fn approximate_width(&self) -> f64 {
        let max_line_len = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let char_width_factor = match self.style.get("fontWeight") {
            Some(Value::String(w)) if w == "bold" || w == "black" => 0.60,
            Some(Value::Number(n)) if n.as_f64().is_some_and(|w| w >= 600.0) => 0.60,
            _ => 0.55,
        };

        max_line_len as f64 * self.resolved_font_size() * char_width_factor
    }

    /// Approximate height based on font size and number of lines.
    fn approximate_height(&self) -> f64 {
        let line_count = self.content.lines().count().max(1);
        let line_count = if self.content.ends_with('\n') {
            line_count + 1
        } else {
            line_count
        };
        line_count as f64 * self.resolved_font_size() * 1.2
    }

    fn compute_box(&mut self) {
        self.box_bounds = Rect::new(0.0, 0.0, self.approximate_width(), self.approximate_height());
    }
}

impl RenderNode for TextNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn set(&mut self, props: &EffectProps) {
        self.x = props.x;
        self.y = props.y;
        self.fill = props.fill.clone();
        self.stroke = props.stroke.clone();
        self.visible = props.visible;
        self.changed = true;
    }

    fn apply_style(&mut self, style: &StyleMap) {
        for (key, value) in style {
            match key.as_str() {
                "text" => {
                    if let Some(text) = value.as_str() {
                        if text != self.content {
                            self.content = text.to_string();
                            self.changed = true;
                        }
                    }
                }
                "fontSize" => {
                    let size = value.as_f64();
                    if size != self.font_size {
                        self.font_size = size;
                        self.changed = true;
                    }
                }
                "opacity" => {
                    if let Some(opacity) = value.as_f64() {
                        self.opacity = opacity;
                    }
                }
                _ => {
                    self.style.insert(key.clone(), value.clone());
                }
            }
        }
    }

    fn set_parent(&mut self, parent: &ParentInfo) {
        self.parent = Some(parent.id);
        self.parent_world = parent.world_transform;
        self.parent_opacity = parent.world_opacity;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = Visibility::from(visible);
    }

    fn is_visible(&self) -> bool {
        self.visible.is_visible()
    }

    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn stroke_style_mut(&mut self) -> Option<&mut StrokeStyle> {
        self.stroke.as_mut().and_then(|s| s.style.as_mut())
    }

    fn update_world_opacity(&mut self) {
        self.world_opacity = if self.is_visible() {
            self.parent_opacity * self.opacity
        } else {
            0.0
        };
    }

    fn update_size(&mut self) {
        if self.changed {
            self.compute_box();
        }
    }

    fn update_change(&mut self) {
        self.changed = false;
    }

    fn update_local_matrix(&mut self) {
        self.local_transform = Affine::translate((self.x, self.y))
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.scale_x, self.scale_y);
    }

    fn update_world_matrix(&mut self) {
        self.world_transform = self.parent_world * self.local_transform;
    }

    fn update_local_bounds(&mut self) {
        let render_box = self.render_spread().inflate(self.box_bounds);
        self.local_bounds = self.local_transform.transform_rect_bbox(render_box);
    }

    fn update_world_bounds(&mut self) {
        self.world_bounds = self.parent_world.transform_rect_bbox(self.local_bounds);
    }

    fn update_box_bounds(&mut self) {
        self.compute_box();
    }

    fn world_transform(&self) -> Affine {
        self.world_transform
    }

    fn world_bounds(&self) -> Rect {
        self.world_bounds
    }

    fn draw(&self, canvas: &mut dyn Canvas, _options: &RenderOptions) {
        if self.destroyed || self.content.is_empty() {
            return;
        }
        let font_size = self.resolved_font_size();
        if let Some(fill) = self.fill.as_ref().filter(|f| f.is_visible()) {
            canvas.fill_text(&self.content, font_size, Some(fill));
        }
        if let Some(stroke) = self.stroke.as_ref().filter(|s| s.width() > 0.0) {
            canvas.stroke_text(&self.content, font_size, stroke);
        }
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        self.parent = None;
        self.visible = Visibility::Hidden;
    }
}

/// Creates [`TextNode`] duplicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNodeFactory;

impl NodeFactory for TextNodeFactory {
    type Node = TextNode;

    fn create(&self, props: &EffectProps) -> TextNode {
        TextNode::from_props(props)
    }
}
