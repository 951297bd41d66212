#![forbid(unsafe_code)]

//! Style: the immutable [`SelectorStyle`] record and how it is configured.

pub mod env;
pub mod error;
pub mod style;

pub use error::StyleError;
pub use style::{
    PerState, SelectorPosition, SelectorShape, SelectorStyle, StrokePosition, VisualState,
};
