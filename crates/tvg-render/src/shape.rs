#![forbid(unsafe_code)]

//! Fillable shapes and their point-inclusion tests.

/// A float rectangle in pixel space. Pixel `(x, y)` spans `[x, x + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    /// Create from four edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when no area is enclosed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// Copy shrunk by the given per-edge amounts.
    #[must_use]
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> RectF {
        RectF::new(
            self.left + left,
            self.top + top,
            self.right - right,
            self.bottom - bottom,
        )
    }

    #[inline]
    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// A shape the pixmap can fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Rectangle with elliptical corners. Radii are clamped to half the
    /// rect's extent; zero radii give square corners.
    RoundRect { rect: RectF, rx: f32, ry: f32 },
    /// Circle.
    Circle { cx: f32, cy: f32, radius: f32 },
}

impl Shape {
    /// Plain rectangle.
    pub const fn rect(rect: RectF) -> Self {
        Shape::RoundRect {
            rect,
            rx: 0.0,
            ry: 0.0,
        }
    }

    /// Circle centered in `rect` with radius `rect.width() / 2`.
    pub fn circle_in(rect: RectF) -> Self {
        Shape::Circle {
            cx: (rect.left + rect.right) / 2.0,
            cy: (rect.top + rect.bottom) / 2.0,
            radius: rect.width() / 2.0,
        }
    }

    /// Axis-aligned bounds of the shape. May be empty.
    pub fn bounds(&self) -> RectF {
        match *self {
            Shape::RoundRect { rect, .. } => rect,
            Shape::Circle { cx, cy, radius } => {
                let r = radius.max(0.0);
                RectF::new(cx - r, cy - r, cx + r, cy + r)
            }
        }
    }

    /// Point inclusion at a sample position.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match *self {
            Shape::RoundRect { rect, rx, ry } => {
                if !rect.contains(x, y) {
                    return false;
                }
                let rx = rx.clamp(0.0, rect.width() / 2.0);
                let ry = ry.clamp(0.0, rect.height() / 2.0);
                if rx <= 0.0 || ry <= 0.0 {
                    return true;
                }
                // Distance into the corner box, zero outside the corners.
                let dx = if x < rect.left + rx {
                    rect.left + rx - x
                } else if x > rect.right - rx {
                    x - (rect.right - rx)
                } else {
                    0.0
                };
                let dy = if y < rect.top + ry {
                    rect.top + ry - y
                } else if y > rect.bottom - ry {
                    y - (rect.bottom - ry)
                } else {
                    0.0
                };
                if dx == 0.0 || dy == 0.0 {
                    return true;
                }
                let nx = dx / rx;
                let ny = dy / ry;
                nx * nx + ny * ny <= 1.0
            }
            Shape::Circle { cx, cy, radius } => {
                if radius <= 0.0 {
                    return false;
                }
                let dx = x - cx;
                let dy = y - cy;
                dx * dx + dy * dy <= radius * radius
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RectF, Shape};

    #[test]
    fn rect_inset_and_empty() {
        let r = RectF::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.inset(2.0, 2.0, 1.0, 1.0), RectF::new(2.0, 2.0, 9.0, 9.0));
        assert!(r.inset(6.0, 0.0, 6.0, 0.0).is_empty());
        assert!(!r.is_empty());
    }

    #[test]
    fn square_corners_cover_corner_samples() {
        let s = Shape::rect(RectF::new(0.0, 0.0, 10.0, 10.0));
        assert!(s.contains(0.1, 0.1));
        assert!(s.contains(9.9, 9.9));
        assert!(!s.contains(10.0, 5.0));
    }

    #[test]
    fn rounded_corners_exclude_corner_samples() {
        let s = Shape::RoundRect {
            rect: RectF::new(0.0, 0.0, 20.0, 20.0),
            rx: 8.0,
            ry: 8.0,
        };
        assert!(!s.contains(0.5, 0.5));
        assert!(s.contains(10.0, 0.5));
        assert!(s.contains(8.0, 8.0));
        assert!(!s.contains(19.5, 19.5));
    }

    #[test]
    fn oversized_radii_clamp_to_half_extent() {
        let pill = Shape::RoundRect {
            rect: RectF::new(0.0, 0.0, 40.0, 10.0),
            rx: 100.0,
            ry: 100.0,
        };
        // Acts like rx = 20, ry = 5.
        assert!(pill.contains(20.0, 0.5));
        assert!(!pill.contains(1.0, 1.0));
        assert!(pill.contains(5.0, 5.0));
    }

    #[test]
    fn circle_in_uses_half_width() {
        let s = Shape::circle_in(RectF::new(0.0, 0.0, 20.0, 40.0));
        assert_eq!(
            s,
            Shape::Circle {
                cx: 10.0,
                cy: 20.0,
                radius: 10.0
            }
        );
        assert!(s.contains(10.0, 20.0));
        assert!(!s.contains(10.0, 5.0));
        assert_eq!(s.bounds(), RectF::new(0.0, 10.0, 20.0, 30.0));
    }

    #[test]
    fn zero_radius_circle_is_empty() {
        let s = Shape::Circle {
            cx: 5.0,
            cy: 5.0,
            radius: 0.0,
        };
        assert!(!s.contains(5.0, 5.0));
    }
}
