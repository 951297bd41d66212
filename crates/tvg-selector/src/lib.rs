#![forbid(unsafe_code)]

//! Animated focus/click selector for scrolling TV grids.
//!
//! # Role in tvgrid
//! `tvg-selector` is the engine the host grid talks to. It turns focus,
//! click, scroll, and touch events into a placed, animated overlay bitmap
//! and tells the host when to redraw.
//!
//! # Frame loop
//! The selector never spawns threads or timers of its own. The host forwards
//! events, calls [`Selector::tick`] once per frame, drains
//! [`Selector::take_invalidation`], and paints with [`Selector::draw`] in the
//! matching [`DrawPhase`].
//!
//! ```
//! use std::collections::HashMap;
//! use std::time::Duration;
//! use tvg_core::geometry::{Offset, Rect};
//! use tvg_selector::{Cell, CellId, Invalidation, Selector};
//!
//! let mut grid = HashMap::new();
//! grid.insert(CellId(1), Rect::from_xywh(10, 10, 100, 50));
//!
//! let mut selector = Selector::default();
//! selector.focus(Cell::new(CellId(1), grid[&CellId(1)]), Offset::NONE);
//! selector.tick(Duration::from_millis(16), &grid);
//!
//! assert!(selector.take_invalidation().contains(Invalidation::REDRAW));
//! assert_eq!(selector.bounds(), Some(Rect::new(6, 6, 114, 64)));
//! ```

pub mod animator;
pub mod bounds;
pub mod cache;
pub mod host;
pub mod overlay;
pub mod selector;

pub use animator::{ANIMATION_DURATION, Animator};
pub use bounds::{compute_bounds, stroke_expansion};
pub use cache::{BitmapCache, CacheBudget, CacheStats, CellVisualKey};
pub use host::{Cell, CellId, DrawPhase, GridView, Invalidation, ScrollRequest};
pub use overlay::{OverlayBitmap, OverlayLayers, render};
pub use selector::{CLICK_REVERT_DELAY, DESELECT_DELAY, Selector, SelectorState};
pub use tvg_style::{SelectorStyle, StyleError, VisualState};
