#![forbid(unsafe_code)]

//! Selector geometry: where the overlay sits for a given cell.

use tvg_core::geometry::{Offset, Rect};
use tvg_style::{SelectorStyle, StrokePosition};

/// Extra width and height the ring needs around the cell.
///
/// Inside adds nothing, center adds one stroke width, outside adds two. The
/// stroke width is truncated before scaling.
pub fn stroke_expansion(style: &SelectorStyle) -> i32 {
    let stroke = style.stroke_width as i32;
    match style.stroke_position {
        StrokePosition::Inside => 0,
        StrokePosition::Center => stroke,
        StrokePosition::Outside => stroke.saturating_mul(2),
    }
}

/// Overlay rect for `cell` in container coordinates.
///
/// The cell is grown by [`stroke_expansion`] and re-centered (shifting the
/// origin by half the expansion, integer division), nudged by `offset`, then
/// grown by the style spacing on each edge. Float edges truncate toward
/// zero.
pub fn compute_bounds(cell: Rect, style: &SelectorStyle, offset: Offset) -> Rect {
    let expansion = stroke_expansion(style);
    let (dx, dy) = offset.resolve();

    let width = cell.width().saturating_add(expansion);
    let height = cell.height().saturating_add(expansion);
    let left = cell.left.saturating_sub(expansion / 2).saturating_add(dx);
    let top = cell.top.saturating_sub(expansion / 2).saturating_add(dy);

    let spacing = style.spacing;
    Rect::new(
        (left as f32 - spacing.left) as i32,
        (top as f32 - spacing.top) as i32,
        (left as f32 + width as f32 + spacing.right) as i32,
        (top as f32 + height as f32 + spacing.bottom) as i32,
    )
}
