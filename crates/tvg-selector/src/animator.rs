#![forbid(unsafe_code)]

//! The selector's glide between two rects.

use std::time::Duration;

use tvg_core::animation::{Animation, RectTween, accelerate_decelerate};
use tvg_core::geometry::Rect;

/// Glide duration.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(140);

/// Drives the four edge channels (left, top, right, bottom) of the selector
/// together.
///
/// Each [`tick`](Animator::tick) yields one rect; the caller stores it as the
/// drawn bounds. Cancelling freezes the glide where it is and never rewinds.
#[derive(Debug, Clone)]
pub struct Animator {
    duration: Duration,
    tween: Option<RectTween>,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(ANIMATION_DURATION)
    }
}

impl Animator {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tween: None,
        }
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.tween.is_some()
    }

    /// Rect at the current progress, if running.
    pub fn current(&self) -> Option<Rect> {
        self.tween.as_ref().map(RectTween::frame)
    }

    /// Start rect of the running glide.
    pub fn from(&self) -> Option<Rect> {
        self.tween.as_ref().map(RectTween::from)
    }

    /// Destination of the running glide.
    pub fn target(&self) -> Option<Rect> {
        self.tween.as_ref().map(RectTween::to)
    }

    /// Start a glide from `from` to `to`.
    ///
    /// A running glide is cancelled first; its frozen rect is returned so the
    /// caller can decide where the new glide starts. A glide with nowhere to
    /// go completes on the next tick.
    pub fn start(&mut self, from: Rect, to: Rect) -> Option<Rect> {
        let frozen = self.cancel();
        let duration = if from == to { Duration::ZERO } else { self.duration };
        self.tween = Some(RectTween::new(from, to, duration).easing(accelerate_decelerate));
        frozen
    }

    /// Advance by `dt` and return the new frame.
    ///
    /// The completing tick returns exactly the target and leaves the animator
    /// idle. Returns `None` when idle.
    pub fn tick(&mut self, dt: Duration) -> Option<Rect> {
        let tween = self.tween.as_mut()?;
        tween.tick(dt);
        let frame = tween.frame();
        if tween.is_complete() {
            self.tween = None;
        }
        Some(frame)
    }

    /// Stop where the glide is, returning that rect.
    pub fn cancel(&mut self) -> Option<Rect> {
        self.tween.take().map(|t| t.frame())
    }
}
