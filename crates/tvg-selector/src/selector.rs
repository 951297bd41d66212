#![forbid(unsafe_code)]

//! The selector state machine.
//!
//! [`Selector`] reacts to focus, click, scroll, and touch events from the
//! host grid and keeps one overlay placed over the focused cell. It is
//! frame-driven: the host calls [`Selector::tick`] once per frame, which fires
//! due timers (deselect debounce, click revert) and advances the glide.
//!
//! The session distinguishes two rects:
//!
//! - **bounds**: where the overlay belongs (the logical target),
//! - **drawn bounds**: where it is painted right now (the current glide
//!   frame, or `bounds` when idle).

use std::rc::Rc;
use std::time::Duration;

use tvg_core::deferred::{Deferred, TaskId, reschedule};
use tvg_core::geometry::{Offset, Rect};
use tvg_render::DrawSurface;
use tvg_style::{SelectorPosition, SelectorShape, SelectorStyle, StyleError, VisualState};

use crate::animator::{ANIMATION_DURATION, Animator};
use crate::bounds::compute_bounds;
use crate::cache::{BitmapCache, CacheBudget, CacheStats, CellVisualKey};
use crate::host::{Cell, CellId, DrawPhase, GridView, Invalidation, ScrollRequest};
use crate::overlay::{OverlayBitmap, render};

/// Debounce before a focus loss is applied.
pub const DESELECT_DELAY: Duration = Duration::from_millis(50);

/// How long the clicked look stays up.
pub const CLICK_REVERT_DELAY: Duration = Duration::from_millis(100);

/// Observable selector state.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorState {
    /// Nothing shown.
    Cleared,
    /// Overlay at rest.
    Selected {
        bitmap: Rc<OverlayBitmap>,
        bounds: Rect,
    },
    /// Overlay gliding from `from` toward `to`.
    Animating {
        bitmap: Rc<OverlayBitmap>,
        from: Rect,
        to: Rect,
    },
}

impl SelectorState {
    pub fn is_cleared(&self) -> bool {
        matches!(self, Self::Cleared)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, Self::Animating { .. })
    }
}

#[derive(Debug)]
enum Timer {
    Deselect {
        cell: CellId,
        offset: Offset,
    },
    ClickRevert {
        clicked: Rc<OverlayBitmap>,
        restore: Option<Rc<OverlayBitmap>>,
    },
}

#[derive(Debug, Default)]
struct Session {
    cell: Option<CellId>,
    bounds: Option<Rect>,
    drawn: Option<Rect>,
    bitmap: Option<Rc<OverlayBitmap>>,
    pending_offset: Offset,
    scroll_x: i32,
    scroll_y: i32,
    hard_scroll: bool,
    edge_change: bool,
    deselect: Option<TaskId>,
    click_revert: Option<TaskId>,
}

/// Focus/click overlay for one scrolling grid.
#[derive(Debug)]
pub struct Selector {
    style: SelectorStyle,
    cache: BitmapCache,
    animator: Animator,
    timers: Deferred<Timer>,
    session: Session,
    invalidation: Invalidation,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(SelectorStyle::default())
    }
}

impl Selector {
    /// Selector with the default cache budget.
    pub fn new(style: SelectorStyle) -> Self {
        Self::with_cache_budget(style, CacheBudget::default())
    }

    pub fn with_cache_budget(style: SelectorStyle, budget: CacheBudget) -> Self {
        Self {
            style,
            cache: BitmapCache::new(budget),
            animator: Animator::new(ANIMATION_DURATION),
            timers: Deferred::new(),
            session: Session::default(),
            invalidation: Invalidation::empty(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    /// Whether changes glide instead of jumping.
    pub fn use_animations(&self) -> bool {
        self.style.animate_changes
    }

    /// Enable or disable gliding. Turning it off mid-glide snaps to the
    /// target.
    pub fn set_animate_selector_changes(&mut self, animate: bool) {
        self.style.animate_changes = animate;
        if !animate && self.animator.cancel().is_some() {
            self.session.drawn = self.session.bounds;
            self.invalidation |= Invalidation::REDRAW;
        }
    }

    pub fn animation_duration(&self) -> Duration {
        self.animator.duration()
    }

    pub fn style(&self) -> &SelectorStyle {
        &self.style
    }

    /// Replace the style.
    ///
    /// When the new style paints differently for the same cache key, the
    /// cache is replaced. The current overlay is kept until the next update.
    pub fn set_style(&mut self, style: SelectorStyle) {
        if !style.same_raster_params(&self.style) {
            tvg_core::debug!("raster parameters changed, replacing overlay cache");
            self.cache = BitmapCache::new(self.cache.budget());
        }
        if !style.animate_changes && self.animator.cancel().is_some() {
            self.session.drawn = self.session.bounds;
        }
        self.style = style;
        self.invalidation |= Invalidation::REDRAW;
    }

    /// Derive a new style from the current one.
    pub fn update_style<F>(&mut self, f: F)
    where
        F: FnOnce(SelectorStyle) -> SelectorStyle,
    {
        let next = f(self.style.clone());
        self.set_style(next);
    }

    /// Set the shape from a raw host code.
    pub fn set_selector_shape_code(&mut self, code: i32) -> Result<(), StyleError> {
        let shape = SelectorShape::from_code(code)?;
        self.update_style(|s| s.with_shape(shape));
        Ok(())
    }

    pub fn state(&self) -> SelectorState {
        let Some(bitmap) = self.session.bitmap.clone() else {
            return SelectorState::Cleared;
        };
        match (self.animator.from(), self.animator.target(), self.session.bounds) {
            (Some(from), Some(to), _) => SelectorState::Animating { bitmap, from, to },
            (_, _, Some(bounds)) => SelectorState::Selected { bitmap, bounds },
            _ => SelectorState::Cleared,
        }
    }

    pub fn current_bitmap(&self) -> Option<&Rc<OverlayBitmap>> {
        self.session.bitmap.as_ref()
    }

    /// Logical target rect.
    pub fn bounds(&self) -> Option<Rect> {
        self.session.bounds
    }

    /// Rect the overlay is painted into right now.
    pub fn drawn_bounds(&self) -> Option<Rect> {
        self.session.drawn
    }

    /// Cell the overlay belongs to.
    pub fn cell(&self) -> Option<CellId> {
        self.session.cell
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Accumulated scroll since creation, `(x, y)`.
    pub fn scroll_offset(&self) -> (i32, i32) {
        (self.session.scroll_x, self.session.scroll_y)
    }

    /// Drain the pending host work.
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::replace(&mut self.invalidation, Invalidation::empty())
    }

    // ── Focus and click ────────────────────────────────────────────────

    /// Show the selector on `cell` (`focused`) or schedule its deselect.
    ///
    /// `None` is ignored. A deselect is debounced by [`DESELECT_DELAY`] and
    /// a later focus within that window cancels it. Focus loss of a cell
    /// other than the current one is stale and ignored.
    ///
    /// A deselect renders with the offset passed alongside the focus loss.
    pub fn select_view(&mut self, cell: Option<Cell>, offset: Offset, focused: bool) {
        let Some(cell) = cell else {
            return;
        };

        if !focused {
            if self.session.cell != Some(cell.id) {
                tvg_core::debug!(cell = cell.id.0, "stale focus loss ignored");
                return;
            }
            tvg_core::debug!(cell = cell.id.0, "deselect scheduled");
            reschedule(
                &mut self.timers,
                &mut self.session.deselect,
                DESELECT_DELAY,
                Timer::Deselect {
                    cell: cell.id,
                    offset,
                },
            );
            return;
        }

        self.session.pending_offset = offset;

        if let Some(id) = self.session.deselect.take() {
            self.timers.cancel(id);
        }

        if self.use_animations() && self.session.bitmap.is_some() {
            self.glide_to(cell);
        } else {
            self.animator.cancel();
            self.hard_update(cell, VisualState::Focused);
            self.session.pending_offset = Offset::NONE;
        }
    }

    /// Shorthand for a focused [`select_view`](Self::select_view).
    pub fn focus(&mut self, cell: Cell, offset: Offset) {
        self.select_view(Some(cell), offset, true);
    }

    /// Flash the clicked look on `cell`, then revert after
    /// [`CLICK_REVERT_DELAY`].
    ///
    /// The revert restores the pre-click overlay without moving it, and only
    /// if the clicked overlay is still the one shown.
    pub fn click_view(&mut self, cell: Option<Cell>, offset: Offset) {
        let Some(cell) = cell else {
            return;
        };
        self.session.pending_offset = offset;
        self.animator.cancel();

        let mut restore = self.session.bitmap.clone();
        if let Some(id) = self.session.click_revert.take()
            && let Some(Timer::ClickRevert {
                restore: earlier, ..
            }) = self.timers.cancel(id)
        {
            // Back-to-back clicks revert to the look before the first one.
            restore = earlier;
        }

        tvg_core::debug!(cell = cell.id.0, "click");
        let clicked = self.hard_update(cell, VisualState::Clicked);
        let id = self.timers.schedule(
            CLICK_REVERT_DELAY,
            Timer::ClickRevert { clicked, restore },
        );
        self.session.click_revert = Some(id);
    }

    /// Drop the overlay and everything pending.
    pub fn clear_highlighted_view(&mut self) {
        tvg_core::debug!("selector cleared");
        self.animator.cancel();
        for slot in [&mut self.session.deselect, &mut self.session.click_revert] {
            if let Some(id) = slot.take() {
                self.timers.cancel(id);
            }
        }
        self.session.bitmap = None;
        self.session.bounds = None;
        self.session.drawn = None;
        self.session.cell = None;
        self.invalidation |= Invalidation::REDRAW | Invalidation::LAYOUT;
    }

    /// A touch anywhere in the grid clears the selector.
    pub fn on_touch(&mut self) {
        self.clear_highlighted_view();
    }

    // ── Scrolling ──────────────────────────────────────────────────────

    /// Mark the next scroll as API-driven (scroll-to-position, scroll-by).
    pub fn note_programmatic_scroll(&mut self) {
        self.session.hard_scroll = true;
    }

    /// Ask the host to scroll vertically by `dy`.
    ///
    /// `edge_change` marks a scroll that brings an edge cell into view. When
    /// animations are off and this is not an edge change, the overlay snaps
    /// to its target immediately.
    pub fn scroll_by_y(&mut self, dy: i32, edge_change: bool) -> ScrollRequest {
        self.session.edge_change = edge_change;
        self.session.hard_scroll = false;

        let smooth = self.use_animations();
        if !smooth && !edge_change && self.has_overlay() {
            self.animator.cancel();
            self.session.drawn = self.session.bounds;
            self.invalidation |= Invalidation::REDRAW;
        }
        ScrollRequest { dx: 0, dy, smooth }
    }

    /// The grid scrolled by `(dx, dy)`; keep the overlay on its cell.
    pub fn on_scrolled(&mut self, dx: i32, dy: i32) {
        self.session.scroll_x = self.session.scroll_x.saturating_add(dx);
        self.session.scroll_y = self.session.scroll_y.saturating_add(dy);

        let Some(bounds) = self.session.bounds else {
            return;
        };
        if self.session.bitmap.is_none() {
            return;
        }
        let target = bounds.offset(-dx, -dy);

        if let Some(frozen) = self.animator.cancel() {
            let from = frozen.offset(-dx, -dy);
            self.session.bounds = Some(target);
            self.session.drawn = Some(from);
            self.animator.start(from, target);
        } else if self.use_animations() {
            let from = self.session.drawn.unwrap_or(bounds);
            self.session.bounds = Some(target);
            self.animator.start(from, target);
        } else if self.session.hard_scroll || self.session.edge_change {
            self.session.bounds = Some(target);
            self.session.drawn = Some(target);
        } else {
            return;
        }
        self.invalidation |= Invalidation::REDRAW;
    }

    /// Scrolling settled.
    pub fn on_scroll_idle(&mut self) {
        self.session.hard_scroll = false;
        self.session.edge_change = false;
    }

    // ── Frame loop ─────────────────────────────────────────────────────

    /// Advance one frame: fire due timers, then step the glide.
    pub fn tick<G: GridView + ?Sized>(&mut self, dt: Duration, grid: &G) {
        for timer in self.timers.advance(dt) {
            match timer {
                Timer::Deselect { cell, offset } => {
                    self.session.deselect = None;
                    self.apply_deselect(cell, offset, grid);
                }
                Timer::ClickRevert { clicked, restore } => {
                    self.session.click_revert = None;
                    self.apply_click_revert(&clicked, restore);
                }
            }
        }

        if let Some(frame) = self.animator.tick(dt) {
            self.session.drawn = Some(frame);
            self.invalidation |= Invalidation::REDRAW;
        }
    }

    /// Paint the overlay if `phase` is the style's pass.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, phase: DrawPhase) {
        let wanted = match self.style.selector_position {
            SelectorPosition::UnderContent => DrawPhase::BeforeContent,
            SelectorPosition::OverContent => DrawPhase::AfterContent,
        };
        if phase != wanted {
            return;
        }
        if let (Some(bitmap), Some(drawn)) = (&self.session.bitmap, self.session.drawn) {
            surface.draw_image(bitmap.pixmap(), drawn.normalized());
        }
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn has_overlay(&self) -> bool {
        self.session.bitmap.is_some() && self.session.bounds.is_some()
    }

    fn overlay_for(&mut self, width: u32, height: u32, state: VisualState) -> Rc<OverlayBitmap> {
        let key = CellVisualKey::new(&self.style, state, width, height);
        let style = &self.style;
        self.cache
            .get_or_insert_with(&key, || render(width, height, style, state))
    }

    /// Place the overlay on `cell` at once, without a glide.
    fn hard_update(&mut self, cell: Cell, state: VisualState) -> Rc<OverlayBitmap> {
        let bounds = compute_bounds(cell.rect, &self.style, self.session.pending_offset);
        let (w, h) = cell.size();
        let bitmap = self.overlay_for(w, h, state);

        tvg_core::debug!(cell = cell.id.0, ?state, ?bounds, "selector placed");
        self.session.cell = Some(cell.id);
        self.session.bounds = Some(bounds);
        self.session.drawn = Some(bounds);
        self.session.bitmap = Some(Rc::clone(&bitmap));
        self.invalidation |= Invalidation::REDRAW;
        bitmap
    }

    /// Glide from wherever the overlay is now to `cell`.
    fn glide_to(&mut self, cell: Cell) {
        let from = self
            .animator
            .cancel()
            .or(self.session.drawn)
            .or(self.session.bounds);
        let to = compute_bounds(cell.rect, &self.style, self.session.pending_offset);
        let (w, h) = cell.size();
        let bitmap = self.overlay_for(w, h, VisualState::Focused);

        tvg_core::debug!(cell = cell.id.0, ?from, ?to, "selector glide");
        self.session.cell = Some(cell.id);
        self.session.bounds = Some(to);
        self.session.bitmap = Some(bitmap);
        match from {
            Some(from) => {
                self.session.drawn = Some(from);
                self.animator.start(from, to);
            }
            None => self.session.drawn = Some(to),
        }
        self.invalidation |= Invalidation::REDRAW;
    }

    /// Re-render the current cell in its default look.
    ///
    /// Dropped when focus has moved to another cell since the loss was
    /// reported, or when the cell is no longer laid out.
    fn apply_deselect<G: GridView + ?Sized>(&mut self, id: CellId, offset: Offset, grid: &G) {
        if self.session.cell != Some(id) {
            tvg_core::debug!(cell = id.0, "deselect for a cell no longer current");
            return;
        }
        let Some(rect) = grid.item_bounds(id) else {
            tvg_core::debug!(cell = id.0, "deselect target gone");
            return;
        };
        tvg_core::debug!(cell = id.0, "deselect applied");
        self.animator.cancel();
        self.session.pending_offset = offset;
        self.hard_update(Cell::new(id, rect), VisualState::Default);
        self.session.pending_offset = Offset::NONE;
    }

    fn apply_click_revert(&mut self, clicked: &Rc<OverlayBitmap>, restore: Option<Rc<OverlayBitmap>>) {
        let still_clicked = self
            .session
            .bitmap
            .as_ref()
            .is_some_and(|current| Rc::ptr_eq(current, clicked));
        if !still_clicked {
            return;
        }
        let bitmap = match restore {
            Some(bitmap) => bitmap,
            None => self.overlay_for(clicked.width(), clicked.height(), VisualState::Focused),
        };
        tvg_core::debug!("click reverted");
        self.session.bitmap = Some(bitmap);
        self.invalidation |= Invalidation::REDRAW;
    }
}
