#![forbid(unsafe_code)]

//! End-to-end selector scenarios driven through the host-facing API.
//!
//! Every scenario runs on a simulated clock: the test calls `tick` with fixed
//! frame times, so no test sleeps.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tvg_core::geometry::{Offset, Rect};
use tvg_render::{Argb, Pixmap};
use tvg_selector::{
    Cell, CellId, DrawPhase, Invalidation, ScrollRequest, Selector, SelectorState, SelectorStyle,
};
use tvg_style::SelectorPosition;

const FRAME: Duration = Duration::from_millis(16);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Three 100×50 cells in a row, 100 px apart.
fn row() -> HashMap<CellId, Rect> {
    (0..3)
        .map(|i| (CellId(i + 1), Rect::from_xywh(10 + 200 * i as i32, 10, 100, 50)))
        .collect()
}

fn cell(grid: &HashMap<CellId, Rect>, id: u64) -> Cell {
    Cell::new(CellId(id), grid[&CellId(id)])
}

fn still() -> Selector {
    Selector::new(SelectorStyle::default().with_animate_changes(false))
}

/// Stroke color at the overlay's top-left corner.
fn corner(sel: &Selector) -> Option<Argb> {
    sel.current_bitmap().and_then(|b| b.pixel(0, 0))
}

fn run_frames(sel: &mut Selector, grid: &HashMap<CellId, Rect>, frames: usize) {
    for _ in 0..frames {
        sel.tick(FRAME, grid);
    }
}

// ============================================================================
// Focus and glide
// ============================================================================

#[test]
fn retarget_mid_glide_starts_from_drawn_rect() {
    let grid = row();
    let mut sel = Selector::default();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.focus(cell(&grid, 2), Offset::NONE);
    sel.tick(ms(70), &grid);

    let in_flight = sel.drawn_bounds();
    assert_ne!(in_flight, Some(Rect::new(6, 6, 114, 64)));

    sel.focus(cell(&grid, 3), Offset::NONE);
    match sel.state() {
        SelectorState::Animating { from, to, .. } => {
            assert_eq!(Some(from), in_flight);
            assert_eq!(to, Rect::new(406, 6, 514, 64));
        }
        other => panic!("expected glide, got {other:?}"),
    }
    // No jump on the retargeting frame.
    assert_eq!(sel.drawn_bounds(), in_flight);

    run_frames(&mut sel, &grid, 9);
    assert_eq!(sel.drawn_bounds(), Some(Rect::new(406, 6, 514, 64)));
    assert_eq!(sel.cell(), Some(CellId(3)));
}

#[test]
fn glide_frames_move_monotonically() {
    let grid = row();
    let mut sel = Selector::default();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.focus(cell(&grid, 2), Offset::NONE);
    sel.take_invalidation();

    let mut last_left = 6;
    while sel.state().is_animating() {
        sel.tick(FRAME, &grid);
        assert!(sel.take_invalidation().contains(Invalidation::REDRAW));
        let left = sel.drawn_bounds().map(|r| r.left).unwrap_or_default();
        assert!(left >= last_left, "{left} < {last_left}");
        last_left = left;
    }
    assert_eq!(last_left, 206);
}

#[test]
fn refocus_same_cell_settles_next_frame() {
    let grid = row();
    let mut sel = Selector::default();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.focus(cell(&grid, 1), Offset::NONE);

    sel.tick(FRAME, &grid);
    assert!(!sel.state().is_animating());
    assert_eq!(sel.drawn_bounds(), Some(Rect::new(6, 6, 114, 64)));
    assert_eq!(sel.drawn_bounds(), sel.bounds());
}

#[test]
fn animations_off_jumps() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.focus(cell(&grid, 2), Offset::NONE);
    assert!(!sel.state().is_animating());
    assert_eq!(sel.drawn_bounds(), Some(Rect::new(206, 6, 314, 64)));
}

// ============================================================================
// Deselect debounce
// ============================================================================

#[test]
fn deselect_applies_after_delay() {
    let grid = row();
    let mut sel = Selector::default();
    sel.focus(cell(&grid, 1), Offset::NONE);
    assert_eq!(corner(&sel), Some(Argb::WHITE));

    sel.select_view(Some(cell(&grid, 1)), Offset::NONE, false);
    run_frames(&mut sel, &grid, 3);
    assert_eq!(corner(&sel), Some(Argb::WHITE), "48 ms: still focused");

    sel.tick(FRAME, &grid);
    assert_eq!(corner(&sel), Some(Argb::BLUE), "64 ms: default look");
    assert_eq!(sel.bounds(), Some(Rect::new(6, 6, 114, 64)));
}

#[test]
fn refocus_within_window_cancels_deselect() {
    let grid = row();
    let mut sel = Selector::default();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.select_view(Some(cell(&grid, 1)), Offset::NONE, false);
    sel.tick(ms(32), &grid);
    sel.focus(cell(&grid, 2), Offset::NONE);

    run_frames(&mut sel, &grid, 20);
    assert_eq!(corner(&sel), Some(Argb::WHITE));
    assert_eq!(sel.cell(), Some(CellId(2)));
    assert_eq!(sel.drawn_bounds(), Some(Rect::new(206, 6, 314, 64)));
}

#[test]
fn repeated_deselect_restarts_debounce() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);

    sel.select_view(Some(cell(&grid, 1)), Offset::NONE, false);
    sel.tick(ms(40), &grid);
    sel.select_view(Some(cell(&grid, 1)), Offset::NONE, false);
    sel.tick(ms(40), &grid);
    assert_eq!(corner(&sel), Some(Argb::WHITE));
    sel.tick(ms(10), &grid);
    assert_eq!(corner(&sel), Some(Argb::BLUE));
}

#[test]
fn deselect_of_vanished_cell_is_dropped() {
    let grid = row();
    let mut sel = Selector::default();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.select_view(Some(cell(&grid, 1)), Offset::NONE, false);

    let empty: HashMap<CellId, Rect> = HashMap::new();
    sel.tick(ms(100), &empty);
    assert_eq!(corner(&sel), Some(Argb::WHITE));
}

#[test]
fn deselect_reads_cell_rect_at_fire_time() {
    let mut grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.select_view(Some(cell(&grid, 1)), Offset::NONE, false);

    grid.insert(CellId(1), Rect::from_xywh(10, 110, 100, 50));
    sel.tick(ms(50), &grid);
    assert_eq!(sel.bounds(), Some(Rect::new(6, 106, 114, 164)));
}

#[test]
fn late_focus_loss_of_previous_cell_is_ignored() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.focus(cell(&grid, 2), Offset::NONE);
    sel.select_view(Some(cell(&grid, 1)), Offset::NONE, false);

    sel.tick(ms(60), &grid);
    assert_eq!(sel.cell(), Some(CellId(2)));
    assert_eq!(sel.bounds(), Some(Rect::new(206, 6, 314, 64)));
    assert_eq!(corner(&sel), Some(Argb::WHITE));
}

#[test]
fn deselect_uses_its_own_offset_once() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.select_view(Some(cell(&grid, 1)), Offset::new(3, 4), false);

    sel.tick(ms(50), &grid);
    assert_eq!(corner(&sel), Some(Argb::BLUE));
    assert_eq!(sel.bounds(), Some(Rect::new(9, 10, 117, 68)));

    // A later focus without an offset is not shifted.
    sel.focus(cell(&grid, 2), Offset::NONE);
    assert_eq!(sel.bounds(), Some(Rect::new(206, 6, 314, 64)));
}

// ============================================================================
// Click flash
// ============================================================================

#[test]
fn click_flashes_then_reverts_in_place() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);
    let focused = sel.current_bitmap().cloned();

    sel.click_view(Some(cell(&grid, 1)), Offset::NONE);
    assert_eq!(corner(&sel), Some(Argb::GRAY));
    let clicked_bounds = sel.bounds();

    sel.tick(ms(99), &grid);
    assert_eq!(corner(&sel), Some(Argb::GRAY));
    sel.tick(ms(1), &grid);
    assert!(matches!(
        (sel.current_bitmap(), focused.as_ref()),
        (Some(now), Some(before)) if Rc::ptr_eq(now, before)
    ));
    assert_eq!(sel.bounds(), clicked_bounds);
}

#[test]
fn double_click_restores_pre_click_look() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);
    let focused = sel.current_bitmap().cloned();

    sel.click_view(Some(cell(&grid, 1)), Offset::NONE);
    sel.tick(ms(50), &grid);
    sel.click_view(Some(cell(&grid, 1)), Offset::NONE);
    sel.tick(ms(60), &grid);
    assert_eq!(corner(&sel), Some(Argb::GRAY), "second click restarts the flash");

    sel.tick(ms(40), &grid);
    assert_eq!(corner(&sel), Some(Argb::WHITE));
    assert!(matches!(
        (sel.current_bitmap(), focused.as_ref()),
        (Some(now), Some(before)) if Rc::ptr_eq(now, before)
    ));
}

#[test]
fn click_without_prior_overlay_reverts_to_focused() {
    let grid = row();
    let mut sel = Selector::default();
    sel.click_view(Some(cell(&grid, 2)), Offset::NONE);
    assert_eq!(corner(&sel), Some(Argb::GRAY));
    sel.tick(ms(100), &grid);
    assert_eq!(corner(&sel), Some(Argb::WHITE));
    assert_eq!(sel.bounds(), Some(Rect::new(206, 6, 314, 64)));
}

#[test]
fn revert_skipped_when_overlay_replaced() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.click_view(Some(cell(&grid, 1)), Offset::NONE);
    sel.focus(cell(&grid, 2), Offset::NONE);
    let after_move = sel.current_bitmap().cloned();

    sel.tick(ms(100), &grid);
    assert!(matches!(
        (sel.current_bitmap(), after_move.as_ref()),
        (Some(now), Some(before)) if Rc::ptr_eq(now, before)
    ));
    assert_eq!(sel.bounds(), Some(Rect::new(206, 6, 314, 64)));
}

#[test]
fn click_offset_shifts_bounds() {
    let grid = row();
    let mut sel = still();
    sel.click_view(Some(cell(&grid, 1)), Offset::from_raw(2, -1));
    assert_eq!(sel.bounds(), Some(Rect::new(8, 6, 116, 64)));
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn passive_scroll_without_animation_leaves_overlay() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.take_invalidation();

    sel.on_scrolled(0, 20);
    assert_eq!(sel.scroll_offset(), (0, 20));
    assert_eq!(sel.bounds(), Some(Rect::new(6, 6, 114, 64)));
    assert!(sel.take_invalidation().is_empty());
}

#[test]
fn programmatic_scroll_shifts_overlay() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);

    sel.note_programmatic_scroll();
    sel.on_scrolled(0, 20);
    assert_eq!(sel.bounds(), Some(Rect::new(6, -14, 114, 44)));
    assert_eq!(sel.drawn_bounds(), sel.bounds());
    assert!(sel.take_invalidation().contains(Invalidation::REDRAW));

    sel.on_scroll_idle();
    sel.on_scrolled(0, 5);
    assert_eq!(sel.bounds(), Some(Rect::new(6, -14, 114, 44)));
    assert_eq!(sel.scroll_offset(), (0, 25));
}

#[test]
fn edge_scroll_request_and_follow() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);

    let req = sel.scroll_by_y(30, true);
    assert_eq!(
        req,
        ScrollRequest {
            dx: 0,
            dy: 30,
            smooth: false
        }
    );
    sel.on_scrolled(0, 30);
    assert_eq!(sel.bounds(), Some(Rect::new(6, -24, 114, 34)));

    sel.on_scroll_idle();
    let req = sel.scroll_by_y(-30, false);
    assert!(!req.smooth);
    sel.on_scrolled(0, -30);
    assert_eq!(sel.bounds(), Some(Rect::new(6, -24, 114, 34)));
}

#[test]
fn scroll_by_y_clears_programmatic_flag() {
    let grid = row();
    let mut sel = still();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.note_programmatic_scroll();
    let _ = sel.scroll_by_y(10, false);
    sel.on_scrolled(0, 10);
    assert_eq!(sel.bounds(), Some(Rect::new(6, 6, 114, 64)));
}

#[test]
fn animated_scroll_glides_to_shifted_target() {
    let grid = row();
    let mut sel = Selector::default();
    sel.focus(cell(&grid, 1), Offset::NONE);
    assert!(sel.scroll_by_y(20, false).smooth);

    sel.on_scrolled(0, 20);
    match sel.state() {
        SelectorState::Animating { from, to, .. } => {
            assert_eq!(from, Rect::new(6, 6, 114, 64));
            assert_eq!(to, Rect::new(6, -14, 114, 44));
        }
        other => panic!("expected glide, got {other:?}"),
    }
    run_frames(&mut sel, &grid, 9);
    assert_eq!(sel.drawn_bounds(), Some(Rect::new(6, -14, 114, 44)));
}

#[test]
fn scroll_during_glide_shifts_both_ends() {
    let grid = row();
    let mut sel = Selector::default();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.focus(cell(&grid, 2), Offset::NONE);
    sel.tick(ms(70), &grid);
    let frozen = sel.drawn_bounds().unwrap_or_default();

    sel.on_scrolled(0, 10);
    match sel.state() {
        SelectorState::Animating { from, to, .. } => {
            assert_eq!(from, frozen.offset(0, -10));
            assert_eq!(to, Rect::new(206, -4, 314, 54));
        }
        other => panic!("expected glide, got {other:?}"),
    }
}

#[test]
fn scroll_without_overlay_only_accumulates() {
    let mut sel = Selector::default();
    sel.on_scrolled(3, 4);
    sel.on_scrolled(-1, 4);
    assert_eq!(sel.scroll_offset(), (2, 8));
    assert!(sel.state().is_cleared());
    assert!(sel.take_invalidation().is_empty());
}

// ============================================================================
// Clearing
// ============================================================================

#[test]
fn touch_clears_everything_pending() {
    let grid = row();
    let mut sel = Selector::default();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.focus(cell(&grid, 2), Offset::NONE);
    sel.select_view(Some(cell(&grid, 2)), Offset::NONE, false);
    sel.click_view(Some(cell(&grid, 3)), Offset::NONE);
    sel.take_invalidation();

    sel.on_touch();
    assert!(sel.state().is_cleared());
    assert_eq!(sel.cell(), None);
    assert_eq!(
        sel.take_invalidation(),
        Invalidation::REDRAW | Invalidation::LAYOUT
    );

    sel.tick(ms(500), &grid);
    assert!(sel.state().is_cleared());
    assert!(sel.take_invalidation().is_empty());

    // Next focus places without a glide.
    sel.focus(cell(&grid, 3), Offset::NONE);
    assert!(matches!(sel.state(), SelectorState::Selected { .. }));
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn under_content_draws_before_cells() {
    let grid = row();
    let mut sel = Selector::new(
        SelectorStyle::default()
            .with_animate_changes(false)
            .with_selector_position(SelectorPosition::UnderContent),
    );
    sel.focus(cell(&grid, 1), Offset::NONE);

    let mut canvas = Pixmap::new(320, 80);
    sel.draw(&mut canvas, DrawPhase::AfterContent);
    assert!(canvas.pixels().iter().all(|p| p.a() == 0));

    sel.draw(&mut canvas, DrawPhase::BeforeContent);
    assert_eq!(canvas.get(6, 6), Some(Argb::WHITE));
    assert_eq!(canvas.get(5, 6), Some(Argb::TRANSPARENT));
    assert_eq!(canvas.get(60, 35), Some(Argb::TRANSPARENT));
}

#[test]
fn draw_follows_glide_frame() {
    let grid = row();
    let mut sel = Selector::default();
    sel.focus(cell(&grid, 1), Offset::NONE);
    sel.focus(cell(&grid, 2), Offset::NONE);
    sel.tick(ms(70), &grid);
    let drawn = sel.drawn_bounds().unwrap_or_default();

    let mut canvas = Pixmap::new(400, 80);
    sel.draw(&mut canvas, DrawPhase::AfterContent);
    let x = u32::try_from(drawn.left).unwrap_or_default();
    assert_eq!(canvas.get(x, 6), Some(Argb::WHITE));
    assert_eq!(canvas.get(6, 6), Some(Argb::TRANSPARENT));
}

#[test]
fn cleared_selector_draws_nothing() {
    let sel = Selector::default();
    let mut canvas = Pixmap::new(16, 16);
    sel.draw(&mut canvas, DrawPhase::AfterContent);
    sel.draw(&mut canvas, DrawPhase::BeforeContent);
    assert!(canvas.pixels().iter().all(|p| p.a() == 0));
}

// ============================================================================
// Cache sharing
// ============================================================================

#[test]
fn same_sized_cells_share_one_render() {
    let grid = row();
    let mut sel = still();
    for id in [1, 2, 3, 1, 2] {
        sel.focus(cell(&grid, id), Offset::NONE);
    }
    let stats = sel.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 4);
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.bytes_cached, 100 * 50 * 4);
}
