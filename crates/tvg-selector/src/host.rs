#![forbid(unsafe_code)]

//! Types shared with the host grid.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tvg_core::geometry::Rect;

/// Opaque identity of one grid item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u64);

/// A cell as seen at event time: its identity and its rect in container
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub id: CellId,
    pub rect: Rect,
}

impl Cell {
    pub const fn new(id: CellId, rect: Rect) -> Self {
        Self { id, rect }
    }

    /// Cell size in whole pixels; negative extents count as zero.
    pub fn size(&self) -> (u32, u32) {
        (
            u32::try_from(self.rect.width()).unwrap_or(0),
            u32::try_from(self.rect.height()).unwrap_or(0),
        )
    }
}

/// The scrollable container the selector decorates.
pub trait GridView {
    /// Current rect of `cell`, `None` when it is no longer laid out.
    fn item_bounds(&self, cell: CellId) -> Option<Rect>;
}

impl<S: BuildHasher> GridView for HashMap<CellId, Rect, S> {
    fn item_bounds(&self, cell: CellId) -> Option<Rect> {
        self.get(&cell).copied()
    }
}

impl<G: GridView + ?Sized> GridView for &G {
    fn item_bounds(&self, cell: CellId) -> Option<Rect> {
        (**self).item_bounds(cell)
    }
}

bitflags::bitflags! {
    /// Work the host must schedule after a selector call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Invalidation: u8 {
        /// Repaint the container.
        const REDRAW = 0b01;
        /// Re-run layout.
        const LAYOUT = 0b10;
    }
}

/// Which draw pass the host is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawPhase {
    /// Before the cells are drawn (under-content selectors).
    BeforeContent,
    /// After the cells are drawn (over-content selectors).
    AfterContent,
}

/// A scroll the host should perform on the selector's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollRequest {
    pub dx: i32,
    pub dy: i32,
    /// Animate the scroll instead of jumping.
    pub smooth: bool,
}
