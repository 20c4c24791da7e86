//! Error types.
//!
//! The effect engine itself never fails: malformed entries fall back to zero
//! contributions. Errors only come from the boundaries where effect lists and
//! configuration are read from outside.

use thiserror::Error;

/// Errors raised while loading or parsing effect data.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid font size: {0}")]
    InvalidFontSize(f64),
}

/// Result type for effect data operations.
pub type EffectResult<T> = Result<T, EffectError>;

impl From<serde_json::Error> for EffectError {
    fn from(err: serde_json::Error) -> Self {
        EffectError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for EffectError {
    fn from(err: std::io::Error) -> Self {
        EffectError::Io(err.to_string())
    }
}
