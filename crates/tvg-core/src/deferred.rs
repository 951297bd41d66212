#![forbid(unsafe_code)]

//! Cancellable delayed tasks driven by the frame clock.
//!
//! [`Deferred`] holds plain data payloads instead of closures. The owner
//! advances it with the same `dt` it feeds its animations and handles the
//! payloads that came due:
//!
//! ```
//! use std::time::Duration;
//! use tvg_core::deferred::Deferred;
//!
//! let mut queue = Deferred::new();
//! let id = queue.schedule(Duration::from_millis(50), "deselect");
//! assert!(queue.is_pending(id));
//! assert!(queue.advance(Duration::from_millis(49)).is_empty());
//! assert_eq!(queue.advance(Duration::from_millis(1)), vec!["deselect"]);
//! assert!(!queue.is_pending(id));
//! ```

use std::time::Duration;

/// Handle to a scheduled task. Stays valid (but inert) after the task fires
/// or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TaskId,
    due: Duration,
    task: T,
}

/// A queue of payloads that come due after a delay.
///
/// Due payloads are returned in due order; payloads due at the same instant
/// come back in scheduling order.
#[derive(Debug, Clone)]
pub struct Deferred<T> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deferred<T> {
    /// Create an empty queue with its clock at zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Schedule `task` to come due `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now.saturating_add(delay),
            task,
        });
        id
    }

    /// Cancel a pending task, returning its payload. `None` if it already
    /// fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx).task)
    }

    /// Whether `id` is still waiting to fire.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Time until `id` fires, if pending.
    pub fn remaining(&self, id: TaskId) -> Option<Duration> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.due.saturating_sub(self.now))
    }

    /// Advance the clock by `dt` and take every payload that came due.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now = self.now.saturating_add(dt);
        if !self.entries.iter().any(|e| e.due <= self.now) {
            return Vec::new();
        }

        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.entries)
                .into_iter()
                .partition(|e| e.due <= now);
        self.entries = pending;
        // Stable sort keeps scheduling order among equal due times.
        due.sort_by_key(|e| e.due);
        due.into_iter().map(|e| e.task).collect()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Replace the task stored in `slot`, cancelling whatever it held before.
pub fn reschedule<T>(
    queue: &mut Deferred<T>,
    slot: &mut Option<TaskId>,
    delay: Duration,
    task: T,
) -> TaskId {
    if let Some(prev) = slot.take() {
        queue.cancel(prev);
    }
    let id = queue.schedule(delay, task);
    *slot = Some(id);
    id
}
