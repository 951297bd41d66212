#![forbid(unsafe_code)]

//! Style configuration errors.

use std::fmt;

use crate::style::VisualState;

/// A style value that cannot be used.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleError {
    /// Raw shape code outside the known shapes.
    UnsupportedShape(i32),
    /// Raw stroke-position code outside inside/center/outside.
    UnsupportedStrokePosition(i32),
    /// Raw selector-position code outside over/under.
    UnsupportedSelectorPosition(i32),
    /// Stroke width below zero (or NaN).
    NegativeStrokeWidth(f32),
    /// Fill alpha outside `[0, 1]`.
    AlphaOutOfRange { state: VisualState, value: f32 },
    /// An environment override that failed to parse.
    InvalidOverride { key: &'static str, value: String },
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedShape(code) => write!(f, "unsupported selector shape: {code}"),
            Self::UnsupportedStrokePosition(code) => {
                write!(f, "unsupported stroke position: {code}")
            }
            Self::UnsupportedSelectorPosition(code) => {
                write!(f, "unsupported selector position: {code}")
            }
            Self::NegativeStrokeWidth(w) => write!(f, "stroke width must be >= 0, got {w}"),
            Self::AlphaOutOfRange { state, value } => {
                write!(f, "{state:?} fill alpha must be in [0, 1], got {value}")
            }
            Self::InvalidOverride { key, value } => {
                write!(f, "invalid override {key}={value:?}")
            }
        }
    }
}

impl std::error::Error for StyleError {}
