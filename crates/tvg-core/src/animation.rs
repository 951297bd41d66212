#![forbid(unsafe_code)]

//! Time-based animation primitives.
//!
//! An [`Animation`] is advanced with explicit `dt` steps by the owner's frame
//! loop; nothing here reads a clock. Progress is normalized to `[0.0, 1.0]`
//! and shaped by an [`EasingFn`].
//!
//! [`RectTween`] drives the four edges of a [`Rect`] from one shared
//! progress fraction, which is how the selector glides between cells.

use std::time::Duration;

use crate::geometry::Rect;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cosine ease: `cos((t + 1)π) / 2 + 0.5`.
///
/// Starts and ends with zero velocity, fastest at the midpoint.
#[inline]
pub fn accelerate_decelerate(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        return 1.0;
    }
    let v = ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5;
    v.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

fn nonzero(duration: Duration) -> Duration {
    if duration.is_zero() {
        Duration::from_nanos(1)
    } else {
        duration
    }
}

fn progress(elapsed: Duration, duration: Duration) -> f32 {
    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
    (t as f32).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Progression from 0.0 to 1.0 over a duration, with configurable easing.
///
/// Elapsed time is kept as a [`Duration`] so repeated small ticks do not
/// drift.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with the given duration and linear easing.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: nonzero(duration),
            easing: linear,
        }
    }

    /// Set the easing function.
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress before easing.
    pub fn raw_progress(&self) -> f32 {
        progress(self.elapsed, self.duration)
    }

    /// Total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// RectTween
// ---------------------------------------------------------------------------

/// Interpolates all four edges of a [`Rect`] between `from` and `to`.
///
/// Every edge uses the same eased fraction, so the four channels always
/// start, progress, and finish together. [`RectTween::frame`] returns
/// exactly `to` once complete.
#[derive(Debug, Clone, Copy)]
pub struct RectTween {
    from: Rect,
    to: Rect,
    fade: Fade,
}

impl RectTween {
    /// Create a tween from `from` to `to` over `duration` with linear easing.
    pub fn new(from: Rect, to: Rect, duration: Duration) -> Self {
        Self {
            from,
            to,
            fade: Fade::new(duration),
        }
    }

    /// Set the easing function (builder).
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.fade = self.fade.easing(easing);
        self
    }

    /// Start rect.
    pub fn from(&self) -> Rect {
        self.from
    }

    /// End rect.
    pub fn to(&self) -> Rect {
        self.to
    }

    /// Interpolated rect at the current progress.
    pub fn frame(&self) -> Rect {
        if self.fade.is_complete() {
            return self.to;
        }
        let t = self.fade.value();
        Rect::new(
            lerp(self.from.left, self.to.left, t),
            lerp(self.from.top, self.to.top, t),
            lerp(self.from.right, self.to.right, t),
            lerp(self.from.bottom, self.to.bottom, t),
        )
    }
}

fn lerp(from: i32, to: i32, t: f32) -> i32 {
    let range = to as f32 - from as f32;
    let pos = from as f32 + range * t;
    pos.round().clamp(i32::MIN as f32, i32::MAX as f32) as i32
}

impl Animation for RectTween {
    fn tick(&mut self, dt: Duration) {
        self.fade.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.fade.is_complete()
    }

    fn value(&self) -> f32 {
        self.fade.value()
    }

    fn reset(&mut self) {
        self.fade.reset();
    }

    fn overshoot(&self) -> Duration {
        self.fade.overshoot()
    }
}
