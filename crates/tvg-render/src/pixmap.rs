#![forbid(unsafe_code)]

//! Software ARGB raster target.
//!
//! Shapes are anti-aliased by fixed 4×4 supersampling: each pixel tests 16
//! sample points and its coverage is `hits / 16`. No floating-point
//! accumulation crosses pixel boundaries, so output is bit-for-bit
//! reproducible for equal inputs.

use crate::color::Argb;
use crate::shape::Shape;

/// Samples per axis.
const SUBSAMPLES: u32 = 4;
const SAMPLE_COUNT: u32 = SUBSAMPLES * SUBSAMPLES;

/// How a fill combines with the pixels already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Paint over existing pixels.
    #[default]
    SourceOver,
    /// Erase existing pixels in proportion to the fill's alpha and coverage.
    DestinationOut,
}

/// A width × height grid of straight-alpha [`Argb`] pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Argb>,
}

impl Pixmap {
    /// Create a fully transparent pixmap. Either dimension may be zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Argb::TRANSPARENT; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the pixmap holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Memory footprint of the pixel data: `width × height × 4`.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * 4
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Pixel at `(x, y)`, `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Argb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite one pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Argb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Composite `color` over the pixel at `(x, y)`.
    #[inline]
    pub fn blend(&mut self, x: u32, y: u32, color: Argb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    /// Set every pixel to `color`.
    pub fn clear(&mut self, color: Argb) {
        self.pixels.fill(color);
    }

    /// Fill `shape` with `color` using `mode`, anti-aliased.
    pub fn fill(&mut self, shape: &Shape, color: Argb, mode: BlendMode) {
        let Some((x0, y0, x1, y1)) = self.pixel_span(shape) else {
            return;
        };

        tvg_core::trace!(?shape, ?mode, x0, y0, x1, y1, "pixmap fill");

        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = coverage_at(shape, x, y);
                if coverage == 0 {
                    continue;
                }
                let src = color.with_coverage(coverage);
                let i = y as usize * self.width as usize + x as usize;
                let dst = self.pixels[i];
                self.pixels[i] = match mode {
                    BlendMode::SourceOver => src.over(dst),
                    BlendMode::DestinationOut => src.erase_from(dst),
                };
            }
        }
    }

    /// Pixel range touched by the shape's bounds, clipped to the pixmap.
    fn pixel_span(&self, shape: &Shape) -> Option<(u32, u32, u32, u32)> {
        let b = shape.bounds();
        if b.is_empty() || self.is_empty() {
            return None;
        }
        let clip = |v: f32, max: u32| -> u32 { v.clamp(0.0, max as f32) as u32 };
        let x0 = clip(b.left.floor(), self.width);
        let y0 = clip(b.top.floor(), self.height);
        let x1 = clip(b.right.ceil(), self.width);
        let y1 = clip(b.bottom.ceil(), self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

/// Fraction of the 16 sample points of pixel `(x, y)` inside `shape`,
/// scaled to `0..=255`.
fn coverage_at(shape: &Shape, x: u32, y: u32) -> u8 {
    let step = 1.0 / SUBSAMPLES as f32;
    let mut hits = 0u32;
    for sy in 0..SUBSAMPLES {
        let py = y as f32 + (sy as f32 + 0.5) * step;
        for sx in 0..SUBSAMPLES {
            let px = x as f32 + (sx as f32 + 0.5) * step;
            if shape.contains(px, py) {
                hits += 1;
            }
        }
    }
    ((hits * 255 + SAMPLE_COUNT / 2) / SAMPLE_COUNT) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::RectF;

    #[test]
    fn new_is_transparent() {
        let p = Pixmap::new(3, 2);
        assert_eq!(p.pixels().len(), 6);
        assert!(p.pixels().iter().all(|&c| c == Argb::TRANSPARENT));
        assert_eq!(p.byte_size(), 24);
    }

    #[test]
    fn zero_sized_pixmap_ignores_fills() {
        let mut p = Pixmap::new(0, 5);
        assert!(p.is_empty());
        p.fill(
            &Shape::rect(RectF::new(0.0, 0.0, 5.0, 5.0)),
            Argb::WHITE,
            BlendMode::SourceOver,
        );
        assert_eq!(p.byte_size(), 0);
    }

    #[test]
    fn get_set_bounds() {
        let mut p = Pixmap::new(2, 2);
        p.set(1, 1, Argb::WHITE);
        p.set(5, 5, Argb::WHITE);
        assert_eq!(p.get(1, 1), Some(Argb::WHITE));
        assert_eq!(p.get(2, 0), None);
    }

    #[test]
    fn pixel_aligned_rect_is_crisp() {
        let mut p = Pixmap::new(6, 6);
        p.fill(
            &Shape::rect(RectF::new(1.0, 1.0, 5.0, 5.0)),
            Argb::BLUE,
            BlendMode::SourceOver,
        );
        assert_eq!(p.get(0, 0), Some(Argb::TRANSPARENT));
        assert_eq!(p.get(1, 1), Some(Argb::BLUE));
        assert_eq!(p.get(4, 4), Some(Argb::BLUE));
        assert_eq!(p.get(5, 5), Some(Argb::TRANSPARENT));
    }

    #[test]
    fn half_pixel_edge_is_half_covered() {
        let mut p = Pixmap::new(4, 1);
        p.fill(
            &Shape::rect(RectF::new(0.0, 0.0, 1.5, 1.0)),
            Argb::WHITE,
            BlendMode::SourceOver,
        );
        assert_eq!(p.get(0, 0), Some(Argb::WHITE));
        // 8 of 16 samples.
        assert_eq!(p.get(1, 0).map(Argb::a), Some(128));
        assert_eq!(p.get(2, 0), Some(Argb::TRANSPARENT));
    }

    #[test]
    fn destination_out_erases_hole() {
        let mut p = Pixmap::new(6, 6);
        p.clear(Argb::WHITE);
        p.fill(
            &Shape::rect(RectF::new(2.0, 2.0, 4.0, 4.0)),
            Argb::BLACK,
            BlendMode::DestinationOut,
        );
        assert_eq!(p.get(2, 2), Some(Argb::TRANSPARENT));
        assert_eq!(p.get(3, 3), Some(Argb::TRANSPARENT));
        assert_eq!(p.get(1, 1), Some(Argb::WHITE));
    }

    #[test]
    fn fill_clips_to_pixmap() {
        let mut p = Pixmap::new(4, 4);
        p.fill(
            &Shape::rect(RectF::new(-10.0, -10.0, 2.0, 100.0)),
            Argb::WHITE,
            BlendMode::SourceOver,
        );
        assert_eq!(p.get(1, 3), Some(Argb::WHITE));
        assert_eq!(p.get(2, 3), Some(Argb::TRANSPARENT));
    }

    #[test]
    fn fills_are_deterministic() {
        let shape = Shape::RoundRect {
            rect: RectF::new(0.3, 0.7, 17.2, 9.9),
            rx: 3.3,
            ry: 2.1,
        };
        let render = || {
            let mut p = Pixmap::new(20, 12);
            p.fill(&shape, Argb::argb(200, 10, 200, 30), BlendMode::SourceOver);
            p
        };
        assert_eq!(render(), render());
    }
}
