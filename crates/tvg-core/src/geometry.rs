#![forbid(unsafe_code)]

//! Geometric primitives.

/// An edge-based rectangle in container pixel coordinates.
///
/// Edges may be negative: a selector drawn outside a cell that touches the
/// container origin extends past it. `right` and `bottom` are exclusive.
///
/// A rect is *normalized* when `left <= right` and `top <= bottom`.
/// Construction helpers keep that invariant; [`Rect::set_edges`] may break it
/// transiently and [`Rect::normalized`] restores it before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Rect {
    /// Create a rect from its four edges.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rect from an origin and a size.
    #[inline]
    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(
            x,
            y,
            x.saturating_add(width),
            y.saturating_add(height),
        )
    }

    /// Create a rect at the origin with the given size.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::from_xywh(0, 0, width, height)
    }

    /// Horizontal extent. Negative for a denormalized rect.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Vertical extent. Negative for a denormalized rect.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Area in pixels, zero when empty or denormalized.
    #[inline]
    pub const fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.width() as u64 * self.height() as u64
        }
    }

    /// True when the rect covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// True when `left <= right` and `top <= bottom`.
    #[inline]
    pub const fn is_normalized(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Center point, rounded toward negative infinity.
    #[inline]
    pub const fn center(&self) -> (i32, i32) {
        (
            (self.left + self.right).div_euclid(2),
            (self.top + self.bottom).div_euclid(2),
        )
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Overwrite all four edges. The result is not normalized.
    #[inline]
    pub fn set_edges(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        *self = Self::new(left, top, right, bottom);
    }

    /// Copy with swapped edges where `left > right` or `top > bottom`.
    #[must_use]
    pub fn normalized(&self) -> Rect {
        Rect {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    /// Copy translated by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Copy moved so its top-left corner is `(left, top)`, size preserved.
    #[inline]
    #[must_use]
    pub const fn offset_to(&self, left: i32, top: i32) -> Rect {
        Rect::new(
            left,
            top,
            left + self.width(),
            top + self.height(),
        )
    }

    /// Copy with each edge pushed outward by the matching side.
    #[must_use]
    pub const fn outset(&self, left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        Rect::new(
            self.left - left,
            self.top - top,
            self.right + right,
            self.bottom + bottom,
        )
    }

    /// Smallest rect containing both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Overlap with another rect, `None` when they do not overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);

        if left < right && top < bottom {
            Some(Rect::new(left, top, right, bottom))
        } else {
            None
        }
    }
}

/// Per-edge float lengths (margins, spacing) in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Sides {
    /// Zero on every edge.
    pub const ZERO: Self = Self::all(0.0);

    /// Same value on every edge.
    pub const fn all(val: f32) -> Self {
        Self {
            left: val,
            top: val,
            right: val,
            bottom: val,
        }
    }

    /// Explicit values, in left/top/right/bottom order.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for Sides {
    fn from(val: f32) -> Self {
        Self::all(val)
    }
}

/// An optional per-axis pixel nudge applied after centering.
///
/// Each component is either unset or a non-negative pixel value. Unset
/// components contribute 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl Offset {
    /// Neither axis set.
    pub const NONE: Self = Self { x: None, y: None };

    /// Both axes set.
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Build from host values where any negative value means "unset".
    pub const fn from_raw(x: i32, y: i32) -> Self {
        Self {
            x: if x < 0 { None } else { Some(x) },
            y: if y < 0 { None } else { Some(y) },
        }
    }

    /// True when at least one axis is set.
    #[inline]
    pub const fn is_set(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// The `(dx, dy)` to apply, unset axes as 0.
    #[inline]
    pub fn resolve(&self) -> (i32, i32) {
        (self.x.unwrap_or(0), self.y.unwrap_or(0))
    }
}
