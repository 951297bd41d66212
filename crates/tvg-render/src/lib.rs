#![forbid(unsafe_code)]

//! Render: ARGB color math, a software pixmap, and the drawing-surface seam.
//!
//! # Role in tvgrid
//! `tvg-render` owns pixels. The selector rasterizes overlays into a
//! [`Pixmap`] and hands them to a host [`DrawSurface`] for placement.

pub mod color;
pub mod pixmap;
pub mod shape;
pub mod surface;

pub use color::Argb;
pub use pixmap::{BlendMode, Pixmap};
pub use shape::{RectF, Shape};
pub use surface::DrawSurface;
