#![forbid(unsafe_code)]

//! The drawing-surface seam between the selector and the host canvas.

use tvg_core::geometry::Rect;

use crate::pixmap::Pixmap;

/// A 2D target that can place an image.
///
/// Hosts implement this over their own canvas. [`Pixmap`] implements it in
/// software, which is what tests draw into.
pub trait DrawSurface {
    /// Draw `image` scaled into `dst` with source-over compositing.
    ///
    /// `dst` is normalized by the caller and may extend past the surface.
    fn draw_image(&mut self, image: &Pixmap, dst: Rect);
}

impl DrawSurface for Pixmap {
    /// Nearest-neighbour scaling, clipped to the pixmap.
    fn draw_image(&mut self, image: &Pixmap, dst: Rect) {
        if image.is_empty() || dst.is_empty() {
            return;
        }
        let surface = Rect::from_size(
            i32::try_from(self.width()).unwrap_or(i32::MAX),
            i32::try_from(self.height()).unwrap_or(i32::MAX),
        );
        let Some(clip) = dst.intersection_opt(&surface) else {
            return;
        };

        let dw = i64::from(dst.width());
        let dh = i64::from(dst.height());
        let sw = i64::from(image.width());
        let sh = i64::from(image.height());

        for y in clip.top..clip.bottom {
            let sy = (i64::from(y - dst.top) * sh / dh) as u32;
            for x in clip.left..clip.right {
                let sx = (i64::from(x - dst.left) * sw / dw) as u32;
                if let Some(color) = image.get(sx, sy) {
                    // Clip guarantees non-negative in-bounds coordinates.
                    self.blend(x as u32, y as u32, color);
                }
            }
        }
    }
}
