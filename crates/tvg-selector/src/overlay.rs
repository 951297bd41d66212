#![forbid(unsafe_code)]

//! Overlay rasterization.
//!
//! The overlay is painted at the cell's own size and later scaled into the
//! selector bounds. Painting is layered, and each layer's outline follows
//! [`SelectorShape`]:
//!
//! 1. the outer rect (inside the margins) in the stroke color,
//! 2. unless filled, a 50% black shadow one stroke width further in,
//! 3. an erase of the cutout (which leaves the ring),
//! 4. when filled, the fill color over the cutout.
//!
//! Layers 1 to 3 only run when the stroke width is positive.

use tvg_render::{Argb, BlendMode, Pixmap, RectF, Shape};
use tvg_style::{SelectorShape, SelectorStyle, VisualState};

/// Alpha of the shadow layer: `ceil(0.5 * 255)`.
const SHADOW_ALPHA: u8 = 128;

/// An immutable rendered overlay.
///
/// Shared through `Rc` between the bitmap cache and the selector; nothing
/// mutates its pixels after [`render`] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayBitmap {
    pixmap: Pixmap,
}

impl OverlayBitmap {
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Bytes charged against the cache budget: `width × height × 4`.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.pixmap.byte_size()
    }

    /// Pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Argb> {
        self.pixmap.get(x, y)
    }

    /// The backing pixmap.
    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// The outer, shadow, and cutout rects for a `width × height` overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayers {
    pub outer: RectF,
    pub shadow: RectF,
    pub cutout: RectF,
}

impl OverlayLayers {
    pub fn new(width: u32, height: u32, style: &SelectorStyle) -> Self {
        let m = style.margins;
        let s = style.stroke_width;
        let outer = RectF::new(m.left, m.top, width as f32 - m.right, height as f32 - m.bottom);
        let shadow = outer.inset(s, s, s, s);
        let cutout = shadow.inset(2.0, 2.0, 1.0, 1.0);
        Self {
            outer,
            shadow,
            cutout,
        }
    }
}

fn outline(style: &SelectorStyle, rect: RectF) -> Shape {
    match style.shape {
        SelectorShape::Rectangle => Shape::RoundRect {
            rect,
            rx: style.corner_radius_x,
            ry: style.corner_radius_y,
        },
        SelectorShape::Circle => Shape::circle_in(rect),
    }
}

/// Rasterize the overlay for one cell size and visual state.
///
/// Deterministic: equal inputs give identical pixels. Zero width or height
/// gives an empty bitmap; stroke width 0 without fill gives a fully
/// transparent one.
pub fn render(width: u32, height: u32, style: &SelectorStyle, state: VisualState) -> OverlayBitmap {
    let span = tvg_core::debug_span!("overlay_render", width, height, ?state);
    let _guard = span.enter();

    let mut pixmap = Pixmap::new(width, height);
    if pixmap.is_empty() {
        return OverlayBitmap { pixmap };
    }

    let layers = OverlayLayers::new(width, height, style);
    let mut fill_rect = layers.cutout;

    if style.stroke_width > 0.0 {
        pixmap.fill(
            &outline(style, layers.outer),
            style.stroke_color(state),
            BlendMode::SourceOver,
        );

        if style.filled {
            fill_rect = layers.shadow;
        } else {
            pixmap.fill(
                &outline(style, layers.shadow),
                Argb::BLACK.with_alpha(SHADOW_ALPHA),
                BlendMode::SourceOver,
            );
        }

        pixmap.fill(
            &outline(style, fill_rect),
            Argb::BLACK,
            BlendMode::DestinationOut,
        );
    }

    if style.filled {
        pixmap.fill(
            &outline(style, fill_rect),
            style.fill_color(state),
            BlendMode::SourceOver,
        );
    }

    OverlayBitmap { pixmap }
}
