//! Tri-state visibility flag.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Visibility of an effect or one of its parts.
///
/// Stored documents may say `true`, `false`, `0`, `1` or nothing at all.
/// Only an explicit `false` or `0` hides; absence or any other value means
/// visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }

    /// True for the default state, used to keep serialized output terse.
    pub fn is_default(&self) -> bool {
        *self == Visibility::Visible
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVisibility {
    Flag(bool),
    Number(f64),
    Other(IgnoredAny),
}

impl Serialize for Visibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_visible())
    }
}

impl<'de> Deserialize<'de> for Visibility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawVisibility>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawVisibility::Flag(false)) => Visibility::Hidden,
            Some(RawVisibility::Number(n)) if n == 0.0 => Visibility::Hidden,
            _ => Visibility::Visible,
        })
    }
}
