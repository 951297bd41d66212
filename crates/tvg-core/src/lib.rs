#![forbid(unsafe_code)]

//! Core: geometry, animation primitives, and deferred tasks for the selector.

pub mod animation;
pub mod deferred;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
