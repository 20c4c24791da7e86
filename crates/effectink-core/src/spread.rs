//! Render-bounds spread.
//!
//! Effect layers are drawn inside the owner's render box, so that box has to
//! grow on each edge by the worst-case offset plus half stroke of any
//! visible effect.

use crate::effect::TextEffect;
use kurbo::{Insets, Rect};

/// Padding per edge, in `[top, right, bottom, left]` order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spread {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Spread {
    pub const ZERO: Spread = Spread::uniform(0.0);

    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Edge-wise maximum of two spreads.
    pub fn max(self, other: Spread) -> Spread {
        Spread::new(
            self.top.max(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
            self.left.max(other.left),
        )
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// Grow `rect` by this spread.
    pub fn inflate(self, rect: Rect) -> Rect {
        Rect::new(
            rect.x0 - self.left,
            rect.y0 - self.top,
            rect.x1 + self.right,
            rect.y1 + self.bottom,
        )
    }
}

impl From<[f64; 4]> for Spread {
    fn from([top, right, bottom, left]: [f64; 4]) -> Self {
        Spread::new(top, right, bottom, left)
    }
}

impl From<f64> for Spread {
    fn from(value: f64) -> Self {
        Spread::uniform(value)
    }
}

impl From<Spread> for Insets {
    fn from(spread: Spread) -> Self {
        Insets::new(spread.left, spread.top, spread.right, spread.bottom)
    }
}

/// Spread along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionSpread {
    /// Toward +x (right) or +y (bottom).
    pub positive: f64,
    /// Toward -x (left) or -y (top).
    pub negative: f64,
}

/// Spread along one axis for an offset and a half stroke width.
///
/// An offset pushes the layer entirely to one side; an unmoved layer only
/// bleeds its stroke on both sides.
pub fn direction_spread(offset: f64, stroke_spread: f64) -> DirectionSpread {
    if offset < 0.0 {
        DirectionSpread {
            positive: 0.0,
            negative: offset.abs() + stroke_spread,
        }
    } else if offset > 0.0 {
        DirectionSpread {
            positive: offset + stroke_spread,
            negative: 0.0,
        }
    } else {
        DirectionSpread {
            positive: stroke_spread,
            negative: stroke_spread,
        }
    }
}

/// Spread needed by one effect, or `None` if it is hidden.
pub fn effect_spread(effect: &TextEffect) -> Option<Spread> {
    if !effect.is_visible() {
        return None;
    }
    let offset = effect.offset_value();
    let stroke_spread = effect.stroke_width() / 2.0;
    let horizontal = direction_spread(offset.x, stroke_spread);
    let vertical = direction_spread(offset.y, stroke_spread);
    Some(Spread::new(
        vertical.negative,
        horizontal.positive,
        vertical.positive,
        horizontal.negative,
    ))
}

/// Owner spread padded for every visible effect.
///
/// Layers overlap in the same box, so each edge takes the maximum over all
/// effects rather than the sum. The result never shrinks below `base`.
pub fn effects_spread(base: Spread, effects: &[TextEffect]) -> Spread {
    effects
        .iter()
        .filter_map(effect_spread)
        .fold(base, Spread::max)
}
